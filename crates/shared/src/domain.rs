use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned product identifier.
///
/// The client never interprets it: numbers and strings are both accepted on
/// the wire and written back in the form they arrived in.
///
/// Numeric ids must fit in an `i64`. A fractional id or an integer above
/// `i64::MAX` matches neither variant, so the record holding it (and with it
/// the whole list response) fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProdutoId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProdutoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ProdutoId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ProdutoId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ProdutoId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
