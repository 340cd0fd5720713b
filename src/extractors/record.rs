// src/extractors/record.rs
use serde::Serialize;

/// Known layout conventions of a leaf document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SchemaVariant {
    /// Section-labelled page with a heading, about, course and who's-who blocks.
    RichLayout,
    /// Legacy page built from styled table cells.
    TableLayout,
    /// Selection page with no institution data.
    PlaceholderLayout,
}

impl SchemaVariant {
    pub const ALL: [SchemaVariant; 3] = [
        SchemaVariant::RichLayout,
        SchemaVariant::TableLayout,
        SchemaVariant::PlaceholderLayout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::RichLayout => "rich",
            SchemaVariant::TableLayout => "table",
            SchemaVariant::PlaceholderLayout => "placeholder",
        }
    }
}

/// One output row. Every field but `source_url` may be missing from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    pub title: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub establishment_year: Option<String>,
    pub institution_type: Option<String>,
    pub postal_code: Option<String>,
    pub accreditation_status: Option<bool>,
    pub has_graduate_programs: Option<bool>,
    pub has_target_program: Option<bool>,
    pub target_program_seat_count: Option<u64>,
    pub total_seat_count: Option<i64>,
    pub head_of_institution: Option<String>,
    pub source_url: String,
}

impl ExtractedRecord {
    /// Column names, in output order.
    pub const FIELD_NAMES: [&'static str; 13] = [
        "title",
        "district",
        "state",
        "establishment_year",
        "institution_type",
        "postal_code",
        "accreditation_status",
        "has_graduate_programs",
        "has_target_program",
        "target_program_seat_count",
        "total_seat_count",
        "head_of_institution",
        "source_url",
    ];

    /// Record for a page that carries nothing but its own address.
    pub fn placeholder(source_url: &str) -> Self {
        Self {
            title: Some(source_url.to_string()),
            source_url: source_url.to_string(),
            ..Self::default()
        }
    }

    /// Cells in `FIELD_NAMES` order; `None` marks a missing value.
    pub fn cells(&self) -> [Option<String>; 13] {
        fn flag(b: Option<bool>) -> Option<String> {
            b.map(|b| if b { "true" } else { "false" }.to_string())
        }
        [
            self.title.clone(),
            self.district.clone(),
            self.state.clone(),
            self.establishment_year.clone(),
            self.institution_type.clone(),
            self.postal_code.clone(),
            flag(self.accreditation_status),
            flag(self.has_graduate_programs),
            flag(self.has_target_program),
            self.target_program_seat_count.map(|n| n.to_string()),
            self.total_seat_count.map(|n| n.to_string()),
            self.head_of_institution.clone(),
            Some(self.source_url.clone()),
        ]
    }
}
