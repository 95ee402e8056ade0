//! DuckDB integration for quackdock.
//!
//! Resolves connections for each request, stages uploaded files as
//! queryable relations, and merges them into managed tables.
//!
//! ## Connectivity
//!
//! - [`Source`] — Logical source selector (local, remote, external file)
//! - [`resolve()`] — Opens a [`duckdb::Connection`] for a source
//!
//! ## Business Rules
//!
//! - [`Table`] — Validated table identifier
//! - [`PrimaryKey`] — Ordered key columns with set-equality matching
//!
//! ## Core Types
//!
//! - [`Staged`] — Temporary file exposed to SQL as a relation
//! - [`Catalog`] — Existence, schema, and row-count lookups
//! - [`Merge`] — Create-or-upsert of a staged relation
//! - [`execute()`] — Ad-hoc SQL returning positional rows
mod catalog;
mod error;
mod ident;
mod key;
mod merge;
mod query;
mod source;
mod stage;

pub use catalog::*;
pub use error::*;
pub use ident::*;
pub use key::*;
pub use merge::*;
pub use query::*;
pub use source::*;
pub use stage::*;

/// View created over an external Parquet file.
#[rustfmt::skip]
pub const PARQUET_VIEW: &str = "parquet_data";
/// Connection-string prefix for hosted MotherDuck databases.
#[rustfmt::skip]
pub const MOTHERDUCK:   &str = "md:";
