use serde::Deserialize;
use serde::Serialize;

/// Source selector used when a query names none.
pub const DEFAULT_SOURCE: &str = "duckdb";

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub sql: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub path: Option<String>,
}

impl QueryRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            source: default_source(),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn source_defaults_to_duckdb() {
        let req: QueryRequest = serde_json::from_str(r#"{"sql":"SELECT 1"}"#).unwrap();
        assert_eq!(req.source, DEFAULT_SOURCE);
        assert!(req.path.is_none());
    }
    #[test]
    fn explicit_source_and_path() {
        let req: QueryRequest = serde_json::from_str(
            r#"{"sql":"SELECT * FROM parquet_data","source":"parquet","path":"/tmp/a.parquet"}"#,
        )
        .unwrap();
        assert_eq!(req.source, "parquet");
        assert_eq!(req.path.as_deref(), Some("/tmp/a.parquet"));
    }
}
