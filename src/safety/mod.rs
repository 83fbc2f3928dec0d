//! Read-only guard for catalog statements.
//!
//! Parses SQL and classifies it as safe, mutating, or destructive. The
//! runner only executes statements classified as safe.

mod parser;

pub use parser::{classify_sql, ensure_read_only, SqlClassifier};

use std::fmt;

/// Safety level classification for SQL statements, ordered by danger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SafetyLevel {
    /// Read-only queries (SELECT, VALUES, set operations over them).
    Safe,
    /// Data modification (INSERT, UPDATE, MERGE).
    Mutating,
    /// Data loss, schema changes, or anything that could not be parsed.
    Destructive,
}

impl SafetyLevel {
    /// Returns true if the statement only reads data.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Safe)
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Mutating => write!(f, "Mutating"),
            Self::Destructive => write!(f, "Destructive"),
        }
    }
}
