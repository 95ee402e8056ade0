use serde::Deserialize;
use serde::Serialize;

/// Tabular result of `POST /query`; rows are positional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// Result of `POST /upload`: the table and its row count after the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub table: String,
    pub rows: usize,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl<E: std::fmt::Display + ?Sized> From<&E> for ErrorDetail {
    fn from(e: &E) -> Self {
        Self {
            detail: e.to_string(),
        }
    }
}
