// src/extractors/mod.rs
pub mod classify;
pub mod document;
pub mod record;
pub mod rich;
pub mod table;

use scraper::Html;

// Re-export key extraction types for convenience
pub use classify::classify;
pub use record::{ExtractedRecord, SchemaVariant};

/// Parses `html`, classifies it and runs the matching extractor family.
pub fn extract_document(html: &str, source_url: &str) -> (SchemaVariant, ExtractedRecord) {
    let document = Html::parse_document(html);
    let variant = classify(&document);
    tracing::debug!("{} classified as {:?}", source_url, variant);

    let record = match variant {
        SchemaVariant::PlaceholderLayout => ExtractedRecord::placeholder(source_url),
        SchemaVariant::RichLayout => rich::extract_rich(&document, source_url),
        SchemaVariant::TableLayout => table::extract_table(&document, source_url),
    };
    (variant, record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://www.example.org/Univ/States/AP/Adilabad/amr.asp";

    #[test]
    fn test_placeholder_page_record() {
        let html = r#"<div class="r"><p><strong>Choose a University</strong></p>
            <div>About</div><div><p>Establishment: 1999</p></div></div>"#;
        let (variant, record) = extract_document(html, URL);
        assert_eq!(variant, SchemaVariant::PlaceholderLayout);
        assert_eq!(record, ExtractedRecord::placeholder(URL));
        assert_eq!(record.title.as_deref(), Some(URL));
        assert_eq!(record.establishment_year, None);
    }

    #[test]
    fn test_full_rich_page() {
        let html = r#"<html><body>
            <div class="l">menu</div>
            <div class="r">
              <h1>AMR Institute of Technology, Adilabad, Andhra Pradesh</h1>
              <div class="c"><p>Address: NH 7</p><p>Pin: 504001</p></div>
              <div>About</div><div>
                <p>Establishment Year: 2007</p>
                <p>Institution Type: Private</p>
                <p>Approved by AICTE</p>
              </div>
              <div>Courses</div><div>
                <p>B.Tech Information Technology 60 seats</p>
                <p>Civil 60 seats, Mechanical 120 seats</p>
                <p>Master of Business Administration</p>
              </div>
              <div>Whos Who</div><div>Principal<br>Dr. S. Reddy</div>
            </div>
        </body></html>"#;

        let (variant, record) = extract_document(html, URL);
        assert_eq!(variant, SchemaVariant::RichLayout);
        assert_eq!(
            record,
            ExtractedRecord {
                title: Some("AMR Institute of Technology".to_string()),
                district: Some("Adilabad".to_string()),
                state: Some("Andhra Pradesh".to_string()),
                establishment_year: Some("2007".to_string()),
                institution_type: Some("Private".to_string()),
                postal_code: Some("504001".to_string()),
                accreditation_status: Some(true),
                has_graduate_programs: Some(true),
                has_target_program: Some(true),
                target_program_seat_count: Some(60),
                total_seat_count: Some(180),
                head_of_institution: Some("Dr. S. Reddy".to_string()),
                source_url: URL.to_string(),
            }
        );
    }

    #[test]
    fn test_table_page_record() {
        let html = r#"<table><tr><td class="grn"><strong>JNS College</strong></td>
            <td class="crm">Approved by AICTE</td></tr></table>"#;
        let (variant, record) = extract_document(html, URL);
        assert_eq!(variant, SchemaVariant::TableLayout);
        assert_eq!(record.title.as_deref(), Some("JNS College"));
        assert_eq!(record.accreditation_status, Some(true));
        assert_eq!(record.has_target_program, Some(false));
    }
}
