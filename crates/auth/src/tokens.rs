use super::*;
use qd_core::Config;
use std::collections::HashMap;

/// Known API tokens, held only as SHA-256 digests.
#[derive(Debug, Clone, Default)]
pub struct Tokens(HashMap<Vec<u8>, Grant>);

impl Tokens {
    /// Parses `token[:db_path]` entries separated by commas.
    ///
    /// `"alpha:/data/a.duckdb,beta"` admits `alpha` routed to
    /// `/data/a.duckdb` and `beta` with no routing.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| match item.split_once(':') {
                    Some((token, path)) => (token, Some(path.to_string())),
                    None => (item, None),
                })
                .map(|(token, path)| (Self::hash(token), Grant::new(path)))
                .collect(),
        )
    }
    pub fn from_config(config: &Config) -> Self {
        let tokens = Self::parse(&config.api_tokens);
        match tokens.enabled() {
            true => log::info!("bearer authentication enabled for {} tokens", tokens.0.len()),
            false => log::warn!("API_TOKENS is empty, authentication disabled"),
        }
        tokens
    }
    /// False when no tokens are configured and every request is admitted.
    pub fn enabled(&self) -> bool {
        !self.0.is_empty()
    }
    pub fn lookup(&self, token: &str) -> Option<&Grant> {
        self.0.get(&Self::hash(token))
    }
    pub fn hash(token: &str) -> Vec<u8> {
        use sha2::Digest;
        sha2::Sha256::digest(token.as_bytes()).to_vec()
    }
}
