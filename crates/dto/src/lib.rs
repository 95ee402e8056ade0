//! Data transfer objects for API communication.
//!
//! Request and response types for the query and upload endpoints,
//! serializable via `serde`.
mod request;
mod response;

pub use request::*;
pub use response::*;
