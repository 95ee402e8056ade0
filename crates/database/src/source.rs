use super::*;
use duckdb::Connection;
use qd_core::Config;
use qd_core::IN_MEMORY;

/// Where a request's SQL runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A DuckDB file on local disk, or an in-memory instance.
    Local,
    /// A hosted MotherDuck database.
    Remote,
    /// A single Parquet file exposed as [`PARQUET_VIEW`].
    External,
}

impl TryFrom<&str> for Source {
    type Error = Error;
    fn try_from(kind: &str) -> Result<Self> {
        match kind {
            "duckdb" | "local" => Ok(Self::Local),
            "motherduck" | "remote" => Ok(Self::Remote),
            "parquet" | "external-file" => Ok(Self::External),
            other => Err(Error::Unsupported(other.to_string())),
        }
    }
}

/// Opens a connection for `source`.
///
/// The caller owns the handle; dropping it closes the database.
pub fn resolve(config: &Config, source: Source, path: Option<&str>) -> Result<Connection> {
    let path = path.filter(|p| !p.trim().is_empty());
    match source {
        Source::Local => local(path.unwrap_or(config.local())),
        Source::Remote => remote(config, path),
        Source::External => external(path),
    }
}

fn local(path: &str) -> Result<Connection> {
    log::debug!("opening local database {}", path);
    if path == IN_MEMORY {
        Ok(Connection::open_in_memory()?)
    } else {
        Ok(Connection::open(path)?)
    }
}

fn remote(config: &Config, database: Option<&str>) -> Result<Connection> {
    let token = config
        .motherduck_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::configuration("MOTHERDUCK_TOKEN is not set"))?;
    log::debug!("opening remote database {}", database.unwrap_or("<default>"));
    Ok(Connection::open(dsn(token, database))?)
}

/// `md:[database]?motherduck_token=<token>`
fn dsn(token: &str, database: Option<&str>) -> String {
    format!(
        "{}{}?motherduck_token={}",
        MOTHERDUCK,
        database.map(str::trim).unwrap_or_default(),
        token
    )
}

fn external(path: Option<&str>) -> Result<Connection> {
    let path = path.ok_or_else(|| Error::validation("Parquet source requires a file path"))?;
    log::debug!("exposing {} as {}", path, PARQUET_VIEW);
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(&format!(
        "CREATE VIEW {} AS SELECT * FROM read_parquet({})",
        PARQUET_VIEW,
        quote_literal(path)
    ))?;
    Ok(conn)
}
