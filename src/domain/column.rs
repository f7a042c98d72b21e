use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a column (e.g., COL1, COL2, COL100)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    const PREFIX: &'static str = "COL";

    /// Creates a new ColumnId from a counter
    pub fn new(counter: u32) -> Self {
        Self(format!("{}{}", Self::PREFIX, counter))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ColumnId {
    type Err = crate::error::KanriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Convert to uppercase for case-insensitive comparison
        let normalized = s.to_uppercase();
        let prefix = ColumnId::PREFIX;

        if normalized.starts_with(prefix) && normalized.len() > prefix.len() {
            // Verify the rest is a valid number
            if normalized[prefix.len()..].parse::<u32>().is_ok() {
                Ok(Self(normalized))
            } else {
                Err(crate::error::KanriError::InvalidColumnId(s.to_string()))
            }
        } else {
            Err(crate::error::KanriError::InvalidColumnId(s.to_string()))
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named ordered container of cards. Its position on the board is implicit
/// in the board's column sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    /// Title given to freshly created columns
    pub const DEFAULT_TITLE: &'static str = "New column";

    /// Creates a new column with the given ID and title
    pub fn new(id: ColumnId, title: String) -> Self {
        Self { id, title }
    }
}
