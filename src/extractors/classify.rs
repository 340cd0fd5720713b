// src/extractors/classify.rs
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::extractors::document::{content_container, find_by_text, DIV_SELECTOR};
use crate::extractors::record::SchemaVariant;

static STRONG_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("strong").expect("Failed to compile STRONG_SELECTOR")
});

pub static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("Choose a University").expect("Failed to compile PLACEHOLDER_RE")
});

pub static COURSES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("Courses").expect("Failed to compile COURSES_RE")
});

pub static ABOUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("About").expect("Failed to compile ABOUT_RE")
});

static UPDATES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("Engineering Updates").expect("Failed to compile UPDATES_RE")
});

/// Decides which layout a page follows. Placeholder wins over rich, rich over table.
pub fn classify(document: &Html) -> SchemaVariant {
    let root = document.root_element();
    if find_by_text(root, &STRONG_SELECTOR, &PLACEHOLDER_RE).is_some() {
        return SchemaVariant::PlaceholderLayout;
    }

    let container = content_container(document);
    let has_rich_region = [&*COURSES_RE, &*ABOUT_RE, &*UPDATES_RE]
        .iter()
        .any(|re| find_by_text(container, &DIV_SELECTOR, re).is_some());
    if has_rich_region {
        return SchemaVariant::RichLayout;
    }

    SchemaVariant::TableLayout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_str(html: &str) -> SchemaVariant {
        classify(&Html::parse_document(html))
    }

    #[test]
    fn test_placeholder_takes_precedence_over_rich() {
        let html = r#"<div class="r"><div>Courses</div><strong>Choose a University</strong></div>"#;
        assert_eq!(classify_str(html), SchemaVariant::PlaceholderLayout);
    }

    #[test]
    fn test_each_rich_label_is_enough() {
        for label in ["Courses Offered", "About College", "Engineering Updates"] {
            let html = format!(r#"<div class="r"><div>{}</div></div>"#, label);
            assert_eq!(classify_str(&html), SchemaVariant::RichLayout, "label {label}");
        }
    }

    #[test]
    fn test_rich_label_must_be_the_whole_text_node() {
        let html = r#"<div class="r"><div>About <a href="x">us</a></div></div>"#;
        assert_eq!(classify_str(html), SchemaVariant::TableLayout);
    }

    #[test]
    fn test_rich_labels_outside_the_container_are_ignored() {
        let html = r#"<div class="nav"><div>About</div></div><div class="r"><p>x</p></div>"#;
        assert_eq!(classify_str(html), SchemaVariant::TableLayout);
    }

    #[test]
    fn test_table_is_the_fallback() {
        let html = r#"<table><tr><td class="grn"><strong>X</strong></td></tr></table>"#;
        assert_eq!(classify_str(html), SchemaVariant::TableLayout);
        assert_eq!(classify_str(""), SchemaVariant::TableLayout);
    }
}
