/// Context attached to an accepted request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grant {
    db_path: Option<String>,
}

impl Grant {
    pub fn new(db_path: Option<String>) -> Self {
        Self { db_path }
    }
    /// Grant used when authentication is disabled.
    pub fn anonymous() -> Self {
        Self::default()
    }
    /// Database this caller lands in when a request names none.
    pub fn db_path(&self) -> Option<&str> {
        self.db_path.as_deref()
    }
}
