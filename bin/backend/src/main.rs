//! quackdock Backend Binary
//!
//! Serves `/query` and `/upload` over DuckDB.
//! Settings come from flags or their env equivalents (BIND_ADDR,
//! DATABASE_PATH, MOTHERDUCK_TOKEN, API_TOKENS, WORKERS, LOG_DIR).

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = qd_core::Config::parse();
    qd_core::log(&config)?;
    qd_core::kys();
    qd_server::run(config).await?;
    Ok(())
}
