use crate::domain::column::ColumnId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a card (e.g., CARD1, CARD2, CARD100)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    const PREFIX: &'static str = "CARD";

    /// Creates a new CardId from a counter
    pub fn new(counter: u32) -> Self {
        Self(format!("{}{}", Self::PREFIX, counter))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CardId {
    type Err = crate::error::KanriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Convert to uppercase for case-insensitive comparison
        let normalized = s.to_uppercase();
        let prefix = CardId::PREFIX;

        if normalized.starts_with(prefix) && normalized.len() > prefix.len() {
            // Verify the rest is a valid number
            if normalized[prefix.len()..].parse::<u32>().is_ok() {
                Ok(Self(normalized))
            } else {
                Err(crate::error::KanriError::InvalidCardId(s.to_string()))
            }
        } else {
            Err(crate::error::KanriError::InvalidCardId(s.to_string()))
        }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of work belonging to exactly one column.
///
/// Its position within that column is implicit: the card sequence on the
/// board is ordered, and a column's cards are read off in sequence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column_id: ColumnId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a new card owned by the given column
    pub fn new(id: CardId, column_id: ColumnId, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            column_id,
            content,
            label: None,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the content text
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Sets the label
    pub fn set_label(&mut self, label: String) {
        self.label = Some(label);
        self.updated_at = Utc::now();
    }

    /// Clears the label
    pub fn clear_label(&mut self) {
        self.label = None;
        self.updated_at = Utc::now();
    }

    /// Sets the image reference
    pub fn set_image(&mut self, image: String) {
        self.image = Some(image);
        self.updated_at = Utc::now();
    }

    /// Clears the image reference
    pub fn clear_image(&mut self) {
        self.image = None;
        self.updated_at = Utc::now();
    }
}
