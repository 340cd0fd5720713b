// src/storage/mod.rs
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::extractors::ExtractedRecord;
use crate::pipeline::ExtractionReport;
use crate::utils::error::StorageError;

/// Collects finished records and writes them out at the end of a run.
pub struct DatasetSink {
    base_dir: PathBuf,
    file_name: String,
    rows: Vec<ExtractedRecord>,
}

impl DatasetSink {
    /// Creates a sink writing `file_name` under `base_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(base_dir: P, file_name: &str) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_dir: base_path,
            file_name: file_name.to_string(),
            rows: Vec::new(),
        })
    }

    pub fn push(&mut self, record: ExtractedRecord) {
        self.rows.push(record);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.base_dir.join(&self.file_name)
    }

    pub fn summary_path(&self) -> PathBuf {
        let stem = Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone());
        self.base_dir.join(format!("{}_summary.json", stem))
    }

    /// Writes all rows as CSV: an index column, then the record fields.
    pub fn save_dataset(&self) -> Result<PathBuf, StorageError> {
        let file_path = self.dataset_path();
        let mut buf = Vec::new();
        write_dataset(&mut buf, &self.rows)?;
        fs::write(&file_path, buf)?;

        tracing::info!("Saved {} rows to {}", self.rows.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves run counts in JSON format next to the dataset.
    pub fn save_summary(&self, report: &ExtractionReport, start_url: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.summary_path();

        let summary = serde_json::json!({
            "start_url": start_url,
            "dataset": self.file_name,
            "rows": self.rows.len(),
            "report": report,
            "finished_at": chrono::Utc::now().to_rfc3339(),
        });

        let summary_str = serde_json::to_string_pretty(&summary)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, summary_str)?;

        tracing::info!("Saved run summary to {}", file_path.display());
        Ok(file_path)
    }
}

/// Header row, then one row per record prefixed by its zero-based index.
pub fn write_dataset<W: Write>(mut w: W, rows: &[ExtractedRecord]) -> io::Result<()> {
    let header: Vec<String> = std::iter::once(String::new())
        .chain(ExtractedRecord::FIELD_NAMES.iter().map(|s| s.to_string()))
        .collect();
    write_row(&mut w, &header)?;

    for (index, record) in rows.iter().enumerate() {
        let row: Vec<String> = std::iter::once(index.to_string())
            .chain(record.cells().into_iter().map(Option::unwrap_or_default))
            .collect();
        write_row(&mut w, &row)?;
    }
    w.flush()
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single comma-separated row.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, ",")?; } else { first = false; }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::SchemaVariant;

    fn sample() -> ExtractedRecord {
        ExtractedRecord {
            title: Some("AMR Institute".into()),
            district: Some("Adilabad".into()),
            accreditation_status: Some(true),
            has_target_program: Some(true),
            target_program_seat_count: Some(60),
            total_seat_count: Some(40),
            head_of_institution: Some("Dr. \"KR\" Rao, Principal".into()),
            source_url: "http://site/amr.asp".into(),
            ..ExtractedRecord::default()
        }
    }

    #[test]
    fn test_write_dataset_layout() {
        let mut out = Vec::new();
        write_dataset(&mut out, &[sample(), ExtractedRecord::placeholder("http://site/p.asp")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            ",title,district,state,establishment_year,institution_type,postal_code,\
             accreditation_status,has_graduate_programs,has_target_program,\
             target_program_seat_count,total_seat_count,head_of_institution,source_url"
        );
        assert_eq!(
            lines[1],
            "0,AMR Institute,Adilabad,,,,,true,,true,60,40,\"Dr. \"\"KR\"\" Rao, Principal\",http://site/amr.asp"
        );
        assert_eq!(lines[2], "1,http://site/p.asp,,,,,,,,,,,,http://site/p.asp");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_row_quoting() {
        let mut out = Vec::new();
        write_row(&mut out, &["a".into(), "b,c".into(), "line\nbreak".into()]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,\"b,c\",\"line\nbreak\"\n");
    }

    #[test]
    fn test_sink_writes_dataset_and_summary() {
        let dir = std::env::temp_dir().join(format!("sink-test-{}", std::process::id()));
        let mut sink = DatasetSink::new(&dir, "colleges.csv").unwrap();
        sink.push(sample());
        assert_eq!(sink.len(), 1);

        let mut report = ExtractionReport::default();
        report.record(SchemaVariant::RichLayout, &sample());

        let data = sink.save_dataset().unwrap();
        let summary = sink.save_summary(&report, "http://site/top").unwrap();
        assert_eq!(data, dir.join("colleges.csv"));
        assert_eq!(summary, dir.join("colleges_summary.json"));

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
        assert_eq!(json["rows"], 1);
        assert_eq!(json["report"]["by_variant"]["rich"], 1);
        assert_eq!(json["start_url"], "http://site/top");

        fs::remove_dir_all(&dir).unwrap();
    }
}
