/// Failure taxonomy shared by the resolver, the orchestrator, and query execution.
///
/// None of these are retried. HTTP callers see every variant as a 400 with
/// the display text as detail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad identifier, bad file type, missing or mismatched primary key.
    #[error("{0}")]
    Validation(String),
    /// A required credential is not configured.
    #[error("{0}")]
    Configuration(String),
    #[error("Unsupported source: {0}")]
    Unsupported(String),
    /// Constraint violations, malformed SQL, unreadable files.
    #[error(transparent)]
    Store(#[from] duckdb::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
