use crate::domain::board::{Board, OrderSnapshot};
use crate::drag::resolver::{self, Resolution};
use crate::drag::session::{DragSession, Overlay};
use crate::drag::{DragConfig, DragTarget};
use log::{debug, trace};

/// The drag session state machine.
///
/// Consumes the input-sensor event stream (start, over, end, cancel) and
/// applies the resulting reorders to a [`Board`]. Hover steps for card drags
/// commit incrementally; a column drag commits once, at gesture end. Every
/// entry point absorbs stale or malformed events silently, so a gesture
/// racing a deletion degrades to a no-op instead of an error.
#[derive(Debug)]
pub struct DragEngine {
    session: DragSession,
    config: DragConfig,
    origin: Option<OrderSnapshot>,
    last_over: Option<(DragTarget, DragTarget)>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    pub fn with_config(config: DragConfig) -> Self {
        Self {
            session: DragSession::Idle,
            config,
            origin: None,
            last_over: None,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// The detached snapshot of the dragged entity, while a gesture runs
    pub fn overlay(&self) -> Option<Overlay<'_>> {
        self.session.overlay()
    }

    /// Opens a session for `target`, capturing its snapshot.
    ///
    /// Valid only from `Idle`. A target that no longer exists in the board
    /// is ignored, so a start racing a deletion is harmless.
    pub fn start(&mut self, board: &Board, target: DragTarget) {
        if self.session.is_active() {
            return;
        }

        let session = match &target {
            DragTarget::Column(id) => board.find_column(id).map(|column| {
                DragSession::DraggingColumn {
                    id: id.clone(),
                    snapshot: column.clone(),
                }
            }),
            DragTarget::Card(id) => board.find_card(id).map(|card| DragSession::DraggingCard {
                id: id.clone(),
                snapshot: card.clone(),
            }),
        };

        match session {
            Some(session) => {
                debug!("drag start: {}", target);
                if self.config.restore_on_cancel {
                    self.origin = Some(board.capture_order());
                }
                self.session = session;
                self.last_over = None;
            }
            None => trace!("drag start ignored, {} is gone", target),
        }
    }

    /// Processes one hover step of the gesture.
    ///
    /// No-ops when the session is idle, the pointer is over empty space, the
    /// hovered entity is the dragged one, or `active` does not match the
    /// session. A re-fire with the same `(active, over)` pair as the last
    /// processed step is absorbed, so high-frequency pointer sampling cannot
    /// re-apply a move and oscillate.
    pub fn over(&mut self, board: &mut Board, active: &DragTarget, over: Option<&DragTarget>) {
        if self.session.is_idle() {
            return;
        }
        if self.session.active_target().as_ref() != Some(active) {
            trace!("stale drag-over for {} ignored", active);
            return;
        }

        let over = match over {
            Some(over) => over,
            None => return,
        };
        if active == over {
            return;
        }
        if let Some((last_active, last_over)) = &self.last_over {
            if last_active == active && last_over == over {
                trace!("drag-over re-fire absorbed: {} over {}", active, over);
                return;
            }
        }

        let resolution = resolver::resolve_over(board, active, over);
        trace!("drag over {}: {:?}", over, resolution);
        self.apply(board, resolution);
        self.last_over = Some((active.clone(), over.clone()));
    }

    /// Closes the gesture.
    ///
    /// A column drag dropped on a different column commits the column
    /// reorder here; card drags have already been applied incrementally by
    /// the hover steps. With no drop target the gesture counts as cancelled.
    /// The session returns to `Idle` unconditionally.
    pub fn end(&mut self, board: &mut Board, active: &DragTarget, over: Option<&DragTarget>) {
        let prior = std::mem::replace(&mut self.session, DragSession::Idle);
        self.last_over = None;
        if prior.is_idle() {
            self.origin = None;
            return;
        }

        let over = match over {
            Some(over) => over,
            None => {
                debug!("drag end with no target: {}", active);
                self.restore_origin(board);
                return;
            }
        };
        self.origin = None;

        if prior.active_target().as_ref() != Some(active) {
            trace!("stale drag-end for {} ignored", active);
            return;
        }
        if active == over {
            return;
        }
        if !matches!(prior, DragSession::DraggingColumn { .. }) {
            return;
        }

        let resolution = resolver::resolve_end(board, active, over);
        debug!("drag end {} over {}: {:?}", active, over, resolution);
        self.apply(board, resolution);
    }

    /// Aborts the gesture externally, discarding the snapshot.
    ///
    /// The board keeps whatever the hover steps already committed unless
    /// [`DragConfig::restore_on_cancel`] is set.
    pub fn cancel(&mut self, board: &mut Board) {
        if self.session.is_idle() {
            return;
        }

        debug!("drag cancelled");
        self.session = DragSession::Idle;
        self.last_over = None;
        self.restore_origin(board);
    }

    /// Forces the session back to `Idle` without touching the board.
    ///
    /// Used when the dragged entity is deleted out from under the gesture.
    pub fn reset(&mut self) {
        self.session = DragSession::Idle;
        self.last_over = None;
        self.origin = None;
    }

    fn restore_origin(&mut self, board: &mut Board) {
        if let Some(origin) = self.origin.take() {
            board.restore_order(&origin);
            debug!("restored gesture-start ordering");
        }
    }

    fn apply(&self, board: &mut Board, resolution: Resolution) {
        let result = match resolution {
            Resolution::NoOp => Ok(()),
            Resolution::MoveCard { from, to } => board.move_card(from, to),
            Resolution::ReparentBeforeCard { from, to, column } => {
                board.reparent_card(from, &column, to)
            }
            Resolution::ReparentToColumn { from, column } => {
                let end = board.card_count();
                board.reparent_card(from, &column, end)
            }
            Resolution::MoveColumn { from, to } => board.move_column(from, to),
        };

        if let Err(err) = result {
            debug!("reorder step dropped: {}", err);
        }
    }
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::CardId;
    use crate::domain::column::ColumnId;

    /// Columns [todo, doing], cards [(1, todo), (2, todo), (3, doing)]
    fn sample_board() -> (Board, ColumnId, ColumnId, Vec<CardId>) {
        let mut board = Board::new();
        let todo = board.create_column();
        let doing = board.create_column();
        let c1 = board.create_card(&todo).unwrap();
        let c2 = board.create_card(&todo).unwrap();
        let c3 = board.create_card(&doing).unwrap();
        (board, todo, doing, vec![c1, c2, c3])
    }

    fn card_order_of(board: &Board, column: &ColumnId) -> Vec<CardId> {
        board
            .ordered_cards_of(column)
            .iter()
            .map(|card| card.id.clone())
            .collect()
    }

    #[test]
    fn test_card_over_card_cross_column_scenario() {
        let (mut board, todo, doing, cards) = sample_board();
        let mut engine = DragEngine::new();

        let active = DragTarget::Card(cards[0].clone());
        engine.start(&board, active.clone());
        engine.over(
            &mut board,
            &active,
            Some(&DragTarget::Card(cards[2].clone())),
        );
        engine.end(&mut board, &active, Some(&DragTarget::Card(cards[2].clone())));

        assert_eq!(board.find_card(&cards[0]).unwrap().column_id, doing);
        assert_eq!(
            card_order_of(&board, &doing),
            vec![cards[0].clone(), cards[2].clone()]
        );
        assert_eq!(card_order_of(&board, &todo), vec![cards[1].clone()]);
        assert!(engine.session().is_idle());
        board.validate().unwrap();
    }

    #[test]
    fn test_card_over_column_scenario() {
        let (mut board, _, doing, cards) = sample_board();
        let mut engine = DragEngine::new();

        let active = DragTarget::Card(cards[1].clone());
        engine.start(&board, active.clone());
        engine.over(&mut board, &active, Some(&DragTarget::Column(doing.clone())));
        engine.end(&mut board, &active, Some(&DragTarget::Column(doing.clone())));

        assert_eq!(board.find_card(&cards[1]).unwrap().column_id, doing);
        // Still exactly one of it on the board
        assert_eq!(board.card_count(), 3);
        assert!(card_order_of(&board, &doing).contains(&cards[1]));
        board.validate().unwrap();
    }

    #[test]
    fn test_column_reorder_commits_at_end() {
        let mut board = Board::new();
        let a = board.create_column();
        let b = board.create_column();
        let c = board.create_column();
        let mut engine = DragEngine::new();

        let active = DragTarget::Column(a.clone());
        engine.start(&board, active.clone());
        // Hover steps never move columns
        engine.over(&mut board, &active, Some(&DragTarget::Column(c.clone())));
        let order: Vec<&str> = board
            .ordered_columns()
            .iter()
            .map(|col| col.id.as_str())
            .collect();
        assert_eq!(order, vec![a.as_str(), b.as_str(), c.as_str()]);

        engine.end(&mut board, &active, Some(&DragTarget::Column(c.clone())));
        let order: Vec<&str> = board
            .ordered_columns()
            .iter()
            .map(|col| col.id.as_str())
            .collect();
        assert_eq!(order, vec![b.as_str(), c.as_str(), a.as_str()]);
    }

    #[test]
    fn test_same_column_reorder_during_hover() {
        let (mut board, todo, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        let active = DragTarget::Card(cards[0].clone());
        engine.start(&board, active.clone());
        engine.over(
            &mut board,
            &active,
            Some(&DragTarget::Card(cards[1].clone())),
        );

        assert_eq!(
            card_order_of(&board, &todo),
            vec![cards[1].clone(), cards[0].clone()]
        );
    }

    #[test]
    fn test_over_refire_is_idempotent() {
        let (mut board, todo, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        let active = DragTarget::Card(cards[0].clone());
        let over = DragTarget::Card(cards[1].clone());
        engine.start(&board, active.clone());

        engine.over(&mut board, &active, Some(&over));
        let after_first = card_order_of(&board, &todo);

        engine.over(&mut board, &active, Some(&over));
        engine.over(&mut board, &active, Some(&over));

        assert_eq!(card_order_of(&board, &todo), after_first);
    }

    #[test]
    fn test_over_empty_space_does_not_clear_memo() {
        let (mut board, todo, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        let active = DragTarget::Card(cards[0].clone());
        let over = DragTarget::Card(cards[1].clone());
        engine.start(&board, active.clone());

        engine.over(&mut board, &active, Some(&over));
        let after_first = card_order_of(&board, &todo);

        // Pointer drifts into empty space, then back over the same card
        engine.over(&mut board, &active, None);
        engine.over(&mut board, &active, Some(&over));

        assert_eq!(card_order_of(&board, &todo), after_first);
    }

    #[test]
    fn test_start_on_missing_entity_is_ignored() {
        let (board, _, _, _) = sample_board();
        let mut engine = DragEngine::new();

        engine.start(&board, DragTarget::Card(CardId::new(99)));

        assert!(engine.session().is_idle());
        assert!(engine.overlay().is_none());
    }

    #[test]
    fn test_start_while_active_is_ignored() {
        let (board, _, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        engine.start(&board, DragTarget::Card(cards[0].clone()));
        engine.start(&board, DragTarget::Card(cards[1].clone()));

        assert_eq!(
            engine.session().active_target(),
            Some(DragTarget::Card(cards[0].clone()))
        );
    }

    #[test]
    fn test_over_while_idle_is_ignored() {
        let (mut board, _, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        let before: Vec<CardId> = board.cards().iter().map(|c| c.id.clone()).collect();
        engine.over(
            &mut board,
            &DragTarget::Card(cards[0].clone()),
            Some(&DragTarget::Card(cards[1].clone())),
        );

        let after: Vec<CardId> = board.cards().iter().map(|c| c.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_mismatched_active_is_ignored() {
        let (mut board, todo, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        engine.start(&board, DragTarget::Card(cards[0].clone()));
        // Event names a different active entity than the session
        engine.over(
            &mut board,
            &DragTarget::Card(cards[1].clone()),
            Some(&DragTarget::Card(cards[0].clone())),
        );

        assert_eq!(
            card_order_of(&board, &todo),
            vec![cards[0].clone(), cards[1].clone()]
        );
    }

    #[test]
    fn test_end_always_returns_to_idle() {
        let (mut board, _, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        let active = DragTarget::Card(cards[0].clone());
        engine.start(&board, active.clone());
        assert!(engine.session().is_active());

        engine.end(&mut board, &active, None);

        assert!(engine.session().is_idle());
        assert!(engine.overlay().is_none());
    }

    #[test]
    fn test_cancel_keeps_incremental_moves_by_default() {
        let (mut board, _, doing, cards) = sample_board();
        let mut engine = DragEngine::new();

        let active = DragTarget::Card(cards[0].clone());
        engine.start(&board, active.clone());
        engine.over(
            &mut board,
            &active,
            Some(&DragTarget::Card(cards[2].clone())),
        );
        engine.cancel(&mut board);

        assert!(engine.session().is_idle());
        assert_eq!(board.find_card(&cards[0]).unwrap().column_id, doing);
    }

    #[test]
    fn test_cancel_restores_order_when_configured() {
        let (mut board, todo, _, cards) = sample_board();
        let mut engine = DragEngine::with_config(DragConfig {
            restore_on_cancel: true,
            ..DragConfig::default()
        });

        let active = DragTarget::Card(cards[0].clone());
        engine.start(&board, active.clone());
        engine.over(
            &mut board,
            &active,
            Some(&DragTarget::Card(cards[2].clone())),
        );
        engine.cancel(&mut board);

        assert_eq!(board.find_card(&cards[0]).unwrap().column_id, todo);
        assert_eq!(
            card_order_of(&board, &todo),
            vec![cards[0].clone(), cards[1].clone()]
        );
        board.validate().unwrap();
    }

    #[test]
    fn test_end_without_target_restores_when_configured() {
        let (mut board, todo, _, cards) = sample_board();
        let mut engine = DragEngine::with_config(DragConfig {
            restore_on_cancel: true,
            ..DragConfig::default()
        });

        let active = DragTarget::Card(cards[0].clone());
        engine.start(&board, active.clone());
        engine.over(
            &mut board,
            &active,
            Some(&DragTarget::Card(cards[2].clone())),
        );
        engine.end(&mut board, &active, None);

        assert_eq!(board.find_card(&cards[0]).unwrap().column_id, todo);
        assert!(engine.session().is_idle());
    }

    #[test]
    fn test_committed_drop_discards_restore_snapshot() {
        let (mut board, _, doing, cards) = sample_board();
        let mut engine = DragEngine::with_config(DragConfig {
            restore_on_cancel: true,
            ..DragConfig::default()
        });

        let active = DragTarget::Card(cards[0].clone());
        let over = DragTarget::Card(cards[2].clone());
        engine.start(&board, active.clone());
        engine.over(&mut board, &active, Some(&over));
        engine.end(&mut board, &active, Some(&over));

        assert_eq!(board.find_card(&cards[0]).unwrap().column_id, doing);
    }

    #[test]
    fn test_overlay_snapshot_is_detached() {
        let (mut board, _, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        engine.start(&board, DragTarget::Card(cards[0].clone()));
        board.update_card_content(&cards[0], "Edited mid-drag".to_string());

        match engine.overlay() {
            Some(Overlay::Card(snapshot)) => assert_eq!(snapshot.content, "Task 1"),
            other => panic!("expected card overlay, got {:?}", other),
        }
        // The store itself did change
        assert_eq!(
            board.find_card(&cards[0]).unwrap().content,
            "Edited mid-drag"
        );
    }

    #[test]
    fn test_over_with_entity_deleted_mid_gesture() {
        let (mut board, _, _, cards) = sample_board();
        let mut engine = DragEngine::new();

        let active = DragTarget::Card(cards[0].clone());
        engine.start(&board, active.clone());
        board.delete_card(&cards[0]);

        engine.over(
            &mut board,
            &active,
            Some(&DragTarget::Card(cards[2].clone())),
        );

        assert_eq!(board.card_count(), 2);
        board.validate().unwrap();
    }
}
