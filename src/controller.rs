use crate::domain::board::Board;
use crate::domain::card::CardId;
use crate::domain::column::ColumnId;
use crate::drag::engine::DragEngine;
use crate::drag::session::{DragSession, Overlay};
use crate::drag::{DragConfig, DragEvent, DragTarget};
use crate::error::Result;
use log::debug;

/// Owns the board store and the drag engine and keeps them consistent.
///
/// CRUD calls go to the store; sensor events go to the engine; deletions
/// that remove the entity currently being dragged force the session back to
/// `Idle` so the overlay never shows a ghost of a deleted entity.
#[derive(Debug, Default)]
pub struct BoardController {
    board: Board,
    drag: DragEngine,
}

impl BoardController {
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    pub fn with_config(config: DragConfig) -> Self {
        Self {
            board: Board::new(),
            drag: DragEngine::with_config(config),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &DragSession {
        self.drag.session()
    }

    pub fn overlay(&self) -> Option<Overlay<'_>> {
        self.drag.overlay()
    }

    pub fn config(&self) -> &DragConfig {
        self.drag.config()
    }

    pub fn create_column(&mut self) -> ColumnId {
        self.board.create_column()
    }

    /// Deletes a column, cascading to its cards. If the column or one of the
    /// cascaded cards is currently being dragged, the session is forced back
    /// to `Idle`.
    pub fn delete_column(&mut self, id: &ColumnId) {
        let removed = self.board.delete_column(id);

        match self.drag.session().active_target() {
            Some(DragTarget::Column(active)) if &active == id => {
                debug!("dragged column {} deleted, resetting session", id);
                self.drag.reset();
            }
            Some(DragTarget::Card(active)) if removed.contains(&active) => {
                debug!("dragged card {} deleted with its column, resetting session", active);
                self.drag.reset();
            }
            _ => {}
        }
    }

    pub fn rename_column(&mut self, id: &ColumnId, title: String) {
        self.board.rename_column(id, title);
    }

    pub fn create_card(&mut self, column_id: &ColumnId) -> Result<CardId> {
        self.board.create_card(column_id)
    }

    /// Deletes a card, forcing the session back to `Idle` if that card is
    /// currently being dragged.
    pub fn delete_card(&mut self, id: &CardId) {
        self.board.delete_card(id);

        if self.drag.session().active_target() == Some(DragTarget::Card(id.clone())) {
            debug!("dragged card {} deleted, resetting session", id);
            self.drag.reset();
        }
    }

    pub fn update_card_content(&mut self, id: &CardId, content: String) {
        self.board.update_card_content(id, content);
    }

    pub fn update_card_label(&mut self, id: &CardId, label: Option<String>) {
        self.board.update_card_label(id, label);
    }

    pub fn update_card_image(&mut self, id: &CardId, image: Option<String>) {
        self.board.update_card_image(id, image);
    }

    pub fn drag_start(&mut self, target: DragTarget) {
        self.drag.start(&self.board, target);
    }

    pub fn drag_over(&mut self, active: &DragTarget, over: Option<&DragTarget>) {
        self.drag.over(&mut self.board, active, over);
    }

    pub fn drag_end(&mut self, active: &DragTarget, over: Option<&DragTarget>) {
        self.drag.end(&mut self.board, active, over);
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel(&mut self.board);
    }

    /// Dispatches one input-sensor event
    pub fn handle_event(&mut self, event: DragEvent) {
        match event {
            DragEvent::Start { target } => self.drag_start(target),
            DragEvent::Over { active, over } => self.drag_over(&active, over.as_ref()),
            DragEvent::End { active, over } => self.drag_end(&active, over.as_ref()),
            DragEvent::Cancel => self.drag_cancel(),
        }
    }
}
