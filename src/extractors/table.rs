// src/extractors/table.rs
//! Field extractors for the legacy table-cell layout. Only the title,
//! accreditation and target-program flag can be read from these pages.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::extractors::document::region_text;
use crate::extractors::record::ExtractedRecord;

static TITLE_CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.grn").expect("Failed to compile TITLE_CELL_SELECTOR")
});

static DESCRIPTION_CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.crm").expect("Failed to compile DESCRIPTION_CELL_SELECTOR")
});

static STRONG_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("strong").expect("Failed to compile STRONG_SELECTOR")
});

pub fn extract_table(document: &Html, source_url: &str) -> ExtractedRecord {
    let title_cell = document.select(&TITLE_CELL_SELECTOR).next();
    let descriptions: Vec<ElementRef<'_>> = document.select(&DESCRIPTION_CELL_SELECTOR).collect();

    let title = table_title(title_cell);
    if title.is_none() {
        tracing::debug!("No title cell on table page {}", source_url);
    }

    // An empty description cell still counts as read: it yields false, not null.
    let accreditation_status = descriptions
        .first()
        .map(|cell| region_text(*cell).to_lowercase().contains("aicte"));

    ExtractedRecord {
        title,
        accreditation_status,
        has_target_program: Some(has_target_program(&descriptions)),
        source_url: source_url.to_string(),
        ..ExtractedRecord::default()
    }
}

/// Bold name inside the title cell.
pub fn table_title(cell: Option<ElementRef<'_>>) -> Option<String> {
    let strong = cell?.select(&STRONG_SELECTOR).next()?;
    Some(region_text(strong).trim().to_string())
}

/// The second description cell lists courses; any "it" in it counts.
pub fn has_target_program(descriptions: &[ElementRef<'_>]) -> bool {
    descriptions
        .get(1)
        .is_some_and(|cell| region_text(*cell).to_lowercase().contains("it"))
}
