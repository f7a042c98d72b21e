use crate::domain::card::{Card, CardId};
use crate::domain::column::{Column, ColumnId};
use crate::drag::DragTarget;

/// State of the in-progress pointer gesture.
///
/// The session is transient: created on gesture start, destroyed on gesture
/// end, never persisted. The snapshots are detached clones taken at gesture
/// start and used only for overlay rendering; they are not kept in sync with
/// the store while the gesture runs.
#[derive(Debug, Clone)]
pub enum DragSession {
    Idle,
    DraggingColumn { id: ColumnId, snapshot: Column },
    DraggingCard { id: CardId, snapshot: Card },
}

impl DragSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    /// The identity of the dragged entity, if a gesture is in progress
    pub fn active_target(&self) -> Option<DragTarget> {
        match self {
            Self::Idle => None,
            Self::DraggingColumn { id, .. } => Some(DragTarget::Column(id.clone())),
            Self::DraggingCard { id, .. } => Some(DragTarget::Card(id.clone())),
        }
    }

    /// The snapshot to render as the dragged representation
    pub fn overlay(&self) -> Option<Overlay<'_>> {
        match self {
            Self::Idle => None,
            Self::DraggingColumn { snapshot, .. } => Some(Overlay::Column(snapshot)),
            Self::DraggingCard { snapshot, .. } => Some(Overlay::Card(snapshot)),
        }
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::Idle
    }
}

/// Borrowed view of the active snapshot for the presentation collaborator
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    Column(&'a Column),
    Card(&'a Card),
}
