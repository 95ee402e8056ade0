//! Bearer-token authentication.
//!
//! Tokens come from `API_TOKENS` as `token[:db_path]` entries. An empty list
//! turns authentication off. A token may carry a database path that becomes
//! the caller's default local database.
//!
//! - [`Tokens`] — Known token digests and their routing
//! - [`Grant`] — What an accepted request is allowed to default to
//! - [`Auth`] — actix extractor enforcing the above
mod grant;
mod tokens;

pub use grant::*;
pub use tokens::*;

#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use middleware::*;
