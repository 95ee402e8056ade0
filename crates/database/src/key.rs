use super::*;
use std::collections::BTreeSet;

/// Ordered primary-key columns.
///
/// Order is kept for DDL; matching against an existing table ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey(Vec<String>);

impl PrimaryKey {
    /// Builds a key from raw form values.
    ///
    /// Each value may itself be a comma-separated list. Blank entries are
    /// dropped, and `None` means no key was supplied at all.
    pub fn parse<I, S>(values: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = values
            .into_iter()
            .flat_map(|v| {
                v.as_ref()
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        if columns.is_empty() {
            return Ok(None);
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.to_lowercase())) {
            return Err(Error::validation(format!(
                "primary_key column {:?} is listed more than once",
                dup
            )));
        }
        Ok(Some(Self(columns)))
    }
    pub fn columns(&self) -> &[String] {
        &self.0
    }
    /// Order-insensitive, case-insensitive set equality.
    pub fn matches(&self, existing: &[String]) -> bool {
        fn set(cols: &[String]) -> BTreeSet<String> {
            cols.iter().map(|c| c.to_lowercase()).collect()
        }
        existing.len() == self.0.len() && set(existing) == set(&self.0)
    }
    /// `"a", "b"` in declared order, for constraint clauses.
    pub fn ddl(&self) -> String {
        self.0
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
    /// Row filter keeping only rows where every key column is non-null
    /// and non-empty once cast to text.
    pub fn predicate(&self) -> String {
        self.0
            .iter()
            .map(|c| blank_key_predicate(c))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// Filter for a single key column: non-null and non-empty after a cast.
pub fn blank_key_predicate(column: &str) -> String {
    let col = quote_ident(column);
    format!("({col} IS NOT NULL AND CAST({col} AS VARCHAR) <> '')")
}
