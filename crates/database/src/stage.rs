use super::*;
use std::io::Write;
use std::path::Path;

/// Encoding of an uploaded file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Parquet,
}

impl Format {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Parquet => ".parquet",
        }
    }
    /// Table function reading a file of this format, given a quoted path.
    fn reader(&self, path: &str) -> String {
        match self {
            Self::Csv => format!("read_csv_auto({}, header = true)", path),
            Self::Parquet => format!("read_parquet({})", path),
        }
    }
}

impl TryFrom<&str> for Format {
    type Error = Error;
    fn try_from(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(Error::validation(format!(
                "Unsupported file type: {:?} (expected .csv or .parquet)",
                filename
            ))),
        }
    }
}

/// An uploaded file parked on disk for DuckDB to scan.
///
/// The backing temp file is unlinked when this value drops, whichever way
/// the request ends.
#[derive(Debug)]
pub struct Staged {
    file: tempfile::NamedTempFile,
    format: Format,
}

impl Staged {
    pub fn new(format: Format) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(format.suffix())
            .tempfile()?;
        Ok(Self { file, format })
    }
    pub fn from_bytes(format: Format, bytes: &[u8]) -> Result<Self> {
        let mut staged = Self::new(format)?;
        staged.write(bytes)?;
        Ok(staged)
    }
    pub fn write(&mut self, chunk: &[u8]) -> Result<()> {
        Ok(self.file.write_all(chunk)?)
    }
    pub fn format(&self) -> Format {
        self.format
    }
    pub fn path(&self) -> &Path {
        self.file.path()
    }
    /// SQL relation over the staged file, usable after `FROM`.
    pub fn relation(&self) -> String {
        self.format
            .reader(&quote_literal(&self.path().to_string_lossy()))
    }
}
