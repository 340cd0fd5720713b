// src/utils/html_debug.rs
use std::fs;
use std::path::{Path, PathBuf};
use regex::Regex;
use crate::utils::error::StorageError;

/// Region markers highlighted in annotated copies of leaf documents.
pub const REGION_MARKER_PATTERNS: &[(&str, &str)] = &[
    (r#"<div[^>]*class=['"]?r['"]?[^>]*>"#, "container"),
    (r#"<div[^>]*class=['"]?c['"]?[^>]*>"#, "info"),
    (r"Courses|About|Engineering Updates", "rich"),
    (r"Whos Who", "rich"),
    (r#"<td[^>]*class=['"]?(?:grn|crm)['"]?[^>]*>"#, "table"),
    (r"Choose a University", "placeholder"),
];

/// Background colour per region kind.
const REGION_STYLES: &[(&str, &str)] = &[
    ("container", "#FFFF00"),
    ("info", "#FFA500"),
    ("rich", "#90EE90"),
    ("table", "#ADD8E6"),
    ("placeholder", "#FFC0CB"),
];

/// Wraps every `(start, end, kind)` byte range of `html` in a `region-<kind>` span.
/// Ranges overlapping an earlier one are dropped.
pub fn annotate_html(html: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    for (kind, colour) in REGION_STYLES {
        out.push_str(&format!(".region-{} {{ background-color: {}; }}\n", kind, colour));
    }
    out.push_str("</style>\n</head>\n<body>\n");

    let mut sorted = highlights.to_vec();
    sorted.sort_by_key(|&(start, _, _)| start);

    let mut last = 0;
    for (start, end, kind) in sorted {
        if start < last || end > html.len() {
            continue;
        }
        out.push_str(&html[last..start]);
        out.push_str(&format!("<span class=\"region-{}\">{}</span>", kind, &html[start..end]));
        last = end;
    }

    out.push_str(&html[last..]);
    out.push_str("\n</body>\n</html>");
    out
}

/// Creates a debug copy of an HTML document with every match of `patterns` highlighted.
pub fn create_debug_html(html: &str, path: &Path, patterns: &[(&str, &str)]) -> Result<(), StorageError> {
    let mut highlights = Vec::new();

    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            StorageError::SerializationError(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, annotate_html(html, &highlights))?;

    tracing::debug!("Saved debug HTML to {}", path.display());
    Ok(())
}

/// Builds a file name for a source URL that is safe on every platform.
pub fn debug_file_name(dir: &Path, source_url: &str) -> PathBuf {
    let slug: String = source_url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect();
    dir.join(format!("{}.annotated.html", slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_wraps_matches() {
        let html = "<td class=grn><strong>X</strong></td>";
        let out = annotate_html(html, &[(0, 14, "table")]);
        assert!(out.contains("<span class=\"region-table\"><td class=grn></span><strong>X</strong></td>"));
        assert!(out.contains(".region-table { background-color: #ADD8E6; }"));
    }

    #[test]
    fn test_annotate_drops_overlaps() {
        let html = "abcdefgh";
        let out = annotate_html(html, &[(0, 4, "rich"), (2, 6, "info")]);
        assert_eq!(out.matches("<span").count(), 1);
        assert!(out.contains("efgh"));
    }

    #[test]
    fn test_every_marker_kind_has_a_style() {
        for (_, kind) in REGION_MARKER_PATTERNS {
            assert!(REGION_STYLES.iter().any(|(styled, _)| styled == kind), "{kind}");
        }
    }

    #[test]
    fn test_debug_file_name_is_flat() {
        let path = debug_file_name(Path::new("/tmp/dbg"), "http://host/Univ/States/a b.asp");
        assert_eq!(
            path,
            PathBuf::from("/tmp/dbg/host_Univ_States_a_b.asp.annotated.html")
        );
    }
}
