// src/pipeline/report.rs
use std::collections::BTreeMap;

use serde::Serialize;

use crate::extractors::{ExtractedRecord, SchemaVariant};

/// Running counts of what a run extracted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    pub records: usize,
    pub fetch_failures: usize,
    /// Records per layout.
    pub by_variant: BTreeMap<String, usize>,
    /// Records with a value, per field.
    pub populated: BTreeMap<String, usize>,
}

impl ExtractionReport {
    pub fn record(&mut self, variant: SchemaVariant, record: &ExtractedRecord) {
        self.records += 1;
        *self.by_variant.entry(variant.as_str().to_string()).or_default() += 1;

        for (name, cell) in ExtractedRecord::FIELD_NAMES.iter().zip(record.cells()) {
            let count = self.populated.entry(name.to_string()).or_default();
            if cell.is_some() {
                *count += 1;
            }
        }
    }

    /// Records that lack `field`.
    pub fn missing(&self, field: &str) -> usize {
        self.records - self.populated.get(field).copied().unwrap_or(0)
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "Extracted {} records ({} fetch failures)",
            self.records,
            self.fetch_failures
        );
        for variant in SchemaVariant::ALL {
            let count = self.by_variant.get(variant.as_str()).copied().unwrap_or(0);
            tracing::info!("  {:<12} {}", variant.as_str(), count);
        }
        for name in ExtractedRecord::FIELD_NAMES {
            tracing::debug!("  {:<26} missing in {}", name, self.missing(name));
        }
    }
}
