use super::*;
use std::fmt::Display;
use std::fmt::Formatter;

/// True when `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Double-quotes an identifier for interpolation into SQL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Single-quotes a string literal for interpolation into SQL.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// A table name that has passed the identifier grammar.
///
/// The only way to obtain one is [`TryFrom<&str>`], so holding a `Table`
/// is proof that it is safe in identifier position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table(String);

impl Table {
    pub fn name(&self) -> &str {
        &self.0
    }
    pub fn quoted(&self) -> String {
        quote_ident(&self.0)
    }
}

impl TryFrom<&str> for Table {
    type Error = Error;
    fn try_from(name: &str) -> Result<Self> {
        if is_identifier(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(Error::validation(format!("Invalid table name: {:?}", name)))
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn accepts_plain_names() {
        for name in ["people", "_tmp", "T1", "a_b_c", "_", "x9_"] {
            assert!(is_identifier(name), "{}", name);
        }
    }
    #[test]
    fn rejects_unsafe_names() {
        for name in ["", "1abc", "a-b", "a b", "people;drop", "\"x\"", "tåble", "a.b"] {
            assert!(!is_identifier(name), "{}", name);
        }
    }
    #[test]
    fn table_rejects_injection() {
        let err = Table::try_from("people; DROP TABLE x").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
    #[test]
    fn quoting_escapes() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(Table::try_from("people").unwrap().quoted(), "\"people\"");
    }
}
