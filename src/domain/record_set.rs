use std::collections::HashMap;
use std::path::Path;

use super::transcript::TranscriptionResult;

pub const FILENAME_COLUMN: &str = "filename";
pub const TEXT_COLUMN: &str = "generated_text";
pub const DURATION_COLUMN: &str = "duration";

#[derive(Debug, thiserror::Error)]
pub enum RecordSetError {
    #[error("column 'filename' is not present in record set")]
    MissingFilenameColumn,
    #[error("failed to read record set: {0}")]
    Read(#[source] csv::Error),
    #[error("failed to write record set: {0}")]
    Write(#[source] csv::Error),
}

/// Persisted tabular store of filename -> transcription results.
///
/// Loaded once per run, mutated in memory, written back once at the end.
/// Columns other than the two managed ones are preserved untouched, and rows
/// are only ever updated in place, never added or removed.
#[derive(Debug, Clone)]
pub struct RecordSet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    filename_idx: usize,
    text_idx: usize,
    duration_idx: usize,
    by_filename: HashMap<String, usize>,
}

impl RecordSet {
    pub fn load(path: &Path) -> Result<Self, RecordSetError> {
        let mut reader = csv::Reader::from_path(path).map_err(RecordSetError::Read)?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(RecordSetError::Read)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(RecordSetError::Read)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::from_parts(headers, rows)
    }

    pub fn from_parts(
        mut headers: Vec<String>,
        mut rows: Vec<Vec<String>>,
    ) -> Result<Self, RecordSetError> {
        let filename_idx = headers
            .iter()
            .position(|h| h == FILENAME_COLUMN)
            .ok_or(RecordSetError::MissingFilenameColumn)?;

        let text_idx = ensure_column(&mut headers, &mut rows, TEXT_COLUMN);
        let duration_idx = ensure_column(&mut headers, &mut rows, DURATION_COLUMN);

        // Ragged input rows get padded so every row has a cell per header.
        for row in &mut rows {
            row.resize(headers.len(), String::new());
        }

        let by_filename = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row[filename_idx].clone(), i))
            .collect();

        Ok(Self {
            headers,
            rows,
            filename_idx,
            text_idx,
            duration_idx,
            by_filename,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Stored (generated_text, duration) pair for a filename, if the row
    /// exists.
    pub fn get(&self, filename: &str) -> Option<(&str, &str)> {
        self.by_filename.get(filename).map(|&i| {
            (
                self.rows[i][self.text_idx].as_str(),
                self.rows[i][self.duration_idx].as_str(),
            )
        })
    }

    /// Merge one result into the row keyed by `filename`.
    ///
    /// An empty incoming value never overwrites a stored non-empty one, so a
    /// failed retry cannot erase an earlier success. Filenames without a row
    /// are ignored; the driver never adds rows.
    pub fn merge(&mut self, filename: &str, result: &TranscriptionResult) {
        let Some(&i) = self.by_filename.get(filename) else {
            tracing::debug!(filename, "No record set row for file; result dropped");
            return;
        };
        if !result.transcription.is_empty() {
            self.rows[i][self.text_idx] = result.transcription.clone();
        }
        if !result.duration.is_empty() {
            self.rows[i][self.duration_idx] = result.duration.clone();
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), RecordSetError> {
        let mut writer = csv::Writer::from_path(path).map_err(RecordSetError::Write)?;
        writer
            .write_record(&self.headers)
            .map_err(RecordSetError::Write)?;
        for row in &self.rows {
            writer.write_record(row).map_err(RecordSetError::Write)?;
        }
        writer
            .flush()
            .map_err(|e| RecordSetError::Write(csv::Error::from(e)))?;
        Ok(())
    }

    /// Rows as column -> value maps with empty cells exported as `None`,
    /// the shape a downstream bulk index loader consumes.
    pub fn rows_for_export(&self) -> Vec<HashMap<String, Option<String>>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.iter().map(|v| {
                        if v.is_empty() {
                            None
                        } else {
                            Some(v.clone())
                        }
                    }))
                    .collect()
            })
            .collect()
    }
}

fn ensure_column(headers: &mut Vec<String>, rows: &mut [Vec<String>], name: &str) -> usize {
    if let Some(idx) = headers.iter().position(|h| h == name) {
        return idx;
    }
    headers.push(name.to_string());
    for row in rows.iter_mut() {
        row.push(String::new());
    }
    headers.len() - 1
}
