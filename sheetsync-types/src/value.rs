//! Scalar cell values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar held by a cell.
///
/// The remote store is loosely typed per cell, so a column declared as text
/// may still hold numbers. A missing cell is modelled by the absence of a
/// value in [`Row`](crate::Row), not by a variant here; an explicit empty
/// string is `Text("")`.
///
/// On the wire the value is untagged: `true`, `12`, `1.5` or `"abc"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// The empty-string value used to clear a cell in the remote store.
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Shorthand for a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Returns true for the blank forms: an empty string or a NaN float.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Float(f) => f.is_nan(),
            Self::Bool(_) | Self::Int(_) => false,
        }
    }

    /// Returns the text content if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
