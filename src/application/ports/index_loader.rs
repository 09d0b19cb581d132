use async_trait::async_trait;

use crate::domain::RecordSet;

/// Downstream collaborator that bulk-loads the finished record set into a
/// search index. The pipeline only promises stable column names; concrete
/// index clients live outside this crate.
#[async_trait]
pub trait IndexLoader: Send + Sync {
    /// Field names the target index mapping requires.
    fn required_fields(&self) -> Vec<String>;

    async fn bulk_load(&self, records: &RecordSet) -> Result<BulkReport, IndexLoaderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum IndexLoaderError {
    #[error("index '{0}' does not exist")]
    IndexNotFound(String),
    #[error("record set is missing fields required by the index mapping: {0:?}")]
    MissingFields(Vec<String>),
    #[error("bulk load failed: {0}")]
    LoadFailed(String),
}

/// Check that the record set carries every field the index mapping defines.
pub fn validate_schema(required: &[String], records: &RecordSet) -> Result<(), IndexLoaderError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| !records.headers().iter().any(|h| h == *field))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IndexLoaderError::MissingFields(missing))
    }
}
