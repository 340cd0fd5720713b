// src/crawl/config.rs
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use url::Url;

use crate::utils::error::AppError;

/// Top hub of the college directory.
pub const DEFAULT_START_URL: &str = "http://www.indiastudycenter.com/Univ/Engineering-Colleges.asp";

/// Leaf URLs that redirect to search pages, leave the site, or need manual handling.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "http://www.indiastudycenter.com/Univ/Engineering-Colleges.asp",
    "http://www.indiastudycenter.com/Univ/Admission7.htm",
    "http://www.indiastudycenter.com/Univ/States/AP/hydbad/hydengc.asp",
    "http://www.indiastudycenter.com/Univ/States/AP/Rangardy/Rangaengg.asp",
    "http://twitter.com/share",
    "http://www.indiastudycenter.com/Univ/States/Karnataka/Bangalore(Urban)/amrita_institute_of_technology_&_sc.asp",
    "http://www.indiastudycenter.com/Univ/States/Karnataka/Bangalore/bit.asp",
    "http://www.indiastudycenter.com/Univ/States/Karnataka/Bangalore(Urban)/b-t-l-institute_of_technology_&_manageme.asp",
    "http://www.indiastudycenter.com/Univ/States/Karnataka/Bangalore(Urban)/nagarjuna_college_of_engg_&_tech.asp",
    "http://www.indiastudycenter.com/Univ/States/Karnataka/Bangalore(Urban)/reva_institute_for_science_&_technology.asp",
    "http://www.indiastudycenter.com/Univ/States/Karnataka/Bangalore(Urban)/University_vishweshwaraiah_college_of_en.asp",
    "http://www.indiastudycenter.com/univ/states/kerala/kozhikode/AWH-Engineering-College.asp",
    "http://www.indiastudycenter.com/Univ/States/Maharastra/Dr-Babasaheb-Ambedkar-Marathwada-University/Faculties-Departments/Chemistry.asp",
    "http://www.indiastudycenter.com/Univ/States/Maharastra/Pune/Marathwada-Mitra-Mandal'S-College-of-Engineering-Karvenagar.asp",
    "http://www.indiastudycenter.com/Univ/States/Maharastra/Raigad/kgce.asp",
    "http://www.indiastudycenter.com/univ/examinfo/uajet/default.asp",
];

/// Where the crawl starts and which leaf URLs it must never hand to the pipeline.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: String,
    pub denylist: HashSet<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            denylist: DEFAULT_DENYLIST.iter().map(|u| normalize_url(u)).collect(),
        }
    }
}

impl CrawlConfig {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            ..Self::default()
        }
    }

    pub fn deny<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for url in urls {
            let url: String = url.into();
            self.denylist.insert(normalize_url(&url));
        }
        self
    }

    /// Adds one URL per line from `path`. Blank lines and `#` comments are skipped.
    pub fn deny_from_file(self, path: &Path) -> Result<Self, AppError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read denylist {}: {}", path.display(), e))
        })?;
        let urls: Vec<String> = parse_denylist(&contents);
        tracing::info!("Loaded {} denylisted URLs from {}", urls.len(), path.display());
        Ok(self.deny(urls))
    }

    pub fn is_denied(&self, url: &str) -> bool {
        self.denylist.contains(&normalize_url(url))
    }
}

/// Serializes `url` the way resolved links are serialized, so both sides
/// compare equal. Unparseable input is kept verbatim.
fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(parsed) => parsed.to_string(),
        Err(e) => {
            tracing::debug!("'{}' is not a valid URL ({}), comparing it verbatim", trimmed, e);
            trimmed.to_string()
        }
    }
}

fn parse_denylist(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
