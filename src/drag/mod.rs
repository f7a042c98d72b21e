use crate::domain::card::CardId;
use crate::domain::column::ColumnId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod engine;
pub mod resolver;
pub mod session;

pub use engine::DragEngine;
pub use resolver::Resolution;
pub use session::{DragSession, Overlay};

/// The entity a pointer gesture refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragTarget {
    Column(ColumnId),
    Card(CardId),
}

impl fmt::Display for DragTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(id) => write!(f, "{}", id),
            Self::Card(id) => write!(f, "{}", id),
        }
    }
}

/// One event from the input-sensor collaborator.
///
/// `over` and `end` carry no target when the pointer is over empty space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start {
        target: DragTarget,
    },
    Over {
        active: DragTarget,
        over: Option<DragTarget>,
    },
    End {
        active: DragTarget,
        over: Option<DragTarget>,
    },
    Cancel,
}

/// Gesture recognition and cancellation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Pointer displacement before a gesture counts as a drag rather than a
    /// click. Read by the input-sensor collaborator; the engine only sees
    /// events that already passed this gate.
    #[serde(default = "default_min_drag_distance")]
    pub min_drag_distance: f64,
    /// When set, cancelling a gesture restores the ordering captured at
    /// gesture start instead of keeping the incrementally applied moves.
    #[serde(default)]
    pub restore_on_cancel: bool,
}

fn default_min_drag_distance() -> f64 {
    10.0
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: default_min_drag_distance(),
            restore_on_cancel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DragConfig::default();
        assert_eq!(config.min_drag_distance, 10.0);
        assert!(!config.restore_on_cancel);
    }

    #[test]
    fn test_config_deserializes_with_missing_fields() {
        let config: DragConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.min_drag_distance, 10.0);
    }

    #[test]
    fn test_drag_target_display() {
        let target = DragTarget::Card(CardId::new(3));
        assert_eq!(target.to_string(), "CARD3");

        let target = DragTarget::Column(ColumnId::new(1));
        assert_eq!(target.to_string(), "COL1");
    }
}
