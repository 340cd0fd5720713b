// src/pipeline/mod.rs
pub mod report;

use std::path::PathBuf;

use crate::extractors::{self, ExtractedRecord, SchemaVariant};
use crate::fetch::Fetcher;
use crate::utils::error::FetchError;
use crate::utils::html_debug;

pub use report::ExtractionReport;

/// A record together with the layout it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub variant: SchemaVariant,
    pub record: ExtractedRecord,
}

/// Fetch → classify → extract, one leaf URL at a time.
pub struct ExtractionPipeline<'f> {
    fetcher: &'f dyn Fetcher,
    debug_dir: Option<PathBuf>,
    report: ExtractionReport,
}

impl<'f> ExtractionPipeline<'f> {
    pub fn new(fetcher: &'f dyn Fetcher) -> Self {
        Self {
            fetcher,
            debug_dir: None,
            report: ExtractionReport::default(),
        }
    }

    /// Save annotated copies of non-rich pages under `dir`.
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    /// Fetches `url` and extracts its record. Only the fetch can fail.
    pub async fn extract(&mut self, url: &str) -> Result<Extraction, FetchError> {
        let page = self.fetcher.fetch(url).await?;
        Ok(self.extract_html(url, &page.body))
    }

    /// Extracts a record from an already fetched body.
    pub fn extract_html(&mut self, url: &str, html: &str) -> Extraction {
        let (variant, record) = extractors::extract_document(html, url);

        if variant != SchemaVariant::RichLayout {
            self.save_debug_copy(url, html);
        }

        self.report.record(variant, &record);
        let missing: Vec<&str> = ExtractedRecord::FIELD_NAMES
            .iter()
            .zip(record.cells().iter())
            .filter(|(_, cell)| cell.is_none())
            .map(|(name, _)| *name)
            .collect();
        tracing::debug!(
            "{} ({}): {} fields missing {:?}",
            url,
            variant.as_str(),
            missing.len(),
            missing
        );

        Extraction { variant, record }
    }

    pub fn report(&self) -> &ExtractionReport {
        &self.report
    }

    pub fn note_failure(&mut self, url: &str, error: &FetchError) {
        tracing::error!("Failed to fetch {}: {}", url, error);
        self.report.fetch_failures += 1;
    }

    fn save_debug_copy(&self, url: &str, html: &str) {
        let Some(dir) = &self.debug_dir else {
            return;
        };
        let path = html_debug::debug_file_name(dir, url);
        if let Err(e) = html_debug::create_debug_html(html, &path, html_debug::REGION_MARKER_PATTERNS) {
            tracing::warn!("Failed to create debug HTML for {}: {}", url, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;

    const RICH: &str = r#"<div class="r"><h1>Alpha College, Pune</h1>
        <div>Courses</div><div><p>Information Technology 60 seats</p><p>Civil 40 seats</p></div></div>"#;
    const PLACEHOLDER: &str = r#"<strong>Choose a University</strong>"#;
    const TABLE: &str = r#"<table><tr><td class="grn"><strong>Beta</strong></td></tr></table>"#;

    fn fetcher() -> StaticFetcher {
        StaticFetcher::new()
            .page("http://site/rich", RICH)
            .page("http://site/placeholder", PLACEHOLDER)
            .page("http://site/table", TABLE)
    }

    #[test]
    fn test_extract_dispatches_per_layout() {
        let fetcher = fetcher();
        let mut pipeline = ExtractionPipeline::new(&fetcher);

        let rich = tokio_test::block_on(pipeline.extract("http://site/rich")).unwrap();
        assert_eq!(rich.variant, SchemaVariant::RichLayout);
        assert_eq!(rich.record.title.as_deref(), Some("Alpha College"));
        assert_eq!(rich.record.district.as_deref(), Some("Pune"));
        assert_eq!(rich.record.state, None);
        assert_eq!(rich.record.target_program_seat_count, Some(60));
        assert_eq!(rich.record.total_seat_count, Some(40));

        let placeholder = tokio_test::block_on(pipeline.extract("http://site/placeholder")).unwrap();
        assert_eq!(placeholder.variant, SchemaVariant::PlaceholderLayout);
        assert_eq!(placeholder.record, ExtractedRecord::placeholder("http://site/placeholder"));

        let table = tokio_test::block_on(pipeline.extract("http://site/table")).unwrap();
        assert_eq!(table.variant, SchemaVariant::TableLayout);
        assert_eq!(table.record.title.as_deref(), Some("Beta"));
        assert_eq!(table.record.source_url, "http://site/table");

        let report = pipeline.report();
        assert_eq!(report.records, 3);
        assert_eq!(report.by_variant.get("rich"), Some(&1));
        assert_eq!(report.by_variant.get("table"), Some(&1));
        assert_eq!(report.by_variant.get("placeholder"), Some(&1));
        assert_eq!(report.populated.get("source_url"), Some(&3));
        assert_eq!(report.populated.get("title"), Some(&3));
    }

    #[test]
    fn test_source_url_is_the_requested_url() {
        let fetcher = StaticFetcher::new().redirect("http://site/a", "http://site/b", RICH);
        let mut pipeline = ExtractionPipeline::new(&fetcher);
        let out = tokio_test::block_on(pipeline.extract("http://site/a")).unwrap();
        assert_eq!(out.record.source_url, "http://site/a");
    }

    #[test]
    fn test_fetch_failure_produces_no_record() {
        let fetcher = StaticFetcher::new();
        let mut pipeline = ExtractionPipeline::new(&fetcher);
        let err = tokio_test::block_on(pipeline.extract("http://site/missing")).unwrap_err();
        pipeline.note_failure("http://site/missing", &err);
        assert_eq!(pipeline.report().records, 0);
        assert_eq!(pipeline.report().fetch_failures, 1);
    }

    #[test]
    fn test_debug_copies_only_for_non_rich_pages() {
        let dir = std::env::temp_dir().join(format!("pipeline-debug-{}", std::process::id()));
        let fetcher = fetcher();
        let mut pipeline = ExtractionPipeline::new(&fetcher).with_debug_dir(&dir);

        pipeline.extract_html("http://site/rich", RICH);
        pipeline.extract_html("http://site/table", TABLE);

        assert!(!html_debug::debug_file_name(&dir, "http://site/rich").exists());
        let table_copy = html_debug::debug_file_name(&dir, "http://site/table");
        let annotated = std::fs::read_to_string(&table_copy).unwrap();
        assert!(annotated.contains("region-table"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
