//! Identifier types used by the remote store.
//!
//! The store hands out opaque 64-bit integers for sheets, columns and rows.
//! They are wrapped so a row id can never be passed where a column id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn get(&self) -> i64 {
                self.0
            }

            /// Parses an identifier from a decimal string.
            pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a sheet or of an aggregate view (report).
    SheetId
);

numeric_id!(
    /// Identifier of a column. Stable for the lifetime of the column,
    /// unlike its title.
    ColumnId
);

numeric_id!(
    /// Identifier of a remote row. Local rows and rows pending creation
    /// have none.
    RowId
);
