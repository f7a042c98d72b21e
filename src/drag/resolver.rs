use crate::domain::board::Board;
use crate::domain::column::ColumnId;
use crate::drag::DragTarget;

/// Outcome of classifying one hover or drop step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Reinsert a card at another card's position within the same column
    MoveCard { from: usize, to: usize },
    /// Hand a card to another column, reinserted just before the hovered card
    ReparentBeforeCard {
        from: usize,
        to: usize,
        column: ColumnId,
    },
    /// Hand a card to a directly hovered column; it joins the end of the
    /// card sequence
    ReparentToColumn { from: usize, column: ColumnId },
    /// Reorder the column sequence (commit step of a column drag)
    MoveColumn { from: usize, to: usize },
    /// Nothing to do
    NoOp,
}

/// Decides what a single hover step does, in priority order:
///
/// 1. A dragged column never moves during hover; its order commits at
///    gesture end.
/// 2. Card over a card of the same column: reinsert at the hovered card's
///    position.
/// 3. Card over a card of another column: the card changes owner and is
///    reinserted one slot before the hovered card. The asymmetry is a
///    deliberate tie-break that keeps the card from oscillating when the
///    pointer sits near a container boundary; a destination that would fall
///    before the front of the sequence clamps to the front.
/// 4. Card over a column: the card changes owner and joins the end of the
///    card sequence.
///
/// Anything else, including identities that no longer resolve against the
/// board, is a no-op.
pub fn resolve_over(board: &Board, active: &DragTarget, over: &DragTarget) -> Resolution {
    if active == over {
        return Resolution::NoOp;
    }

    let active_id = match active {
        DragTarget::Card(id) => id,
        // Column order only changes at gesture end
        DragTarget::Column(_) => return Resolution::NoOp,
    };
    let from = match board.card_index(active_id) {
        Some(index) => index,
        None => return Resolution::NoOp,
    };

    match over {
        DragTarget::Card(over_id) => {
            let over_index = match board.card_index(over_id) {
                Some(index) => index,
                None => return Resolution::NoOp,
            };

            let active_column = &board.cards()[from].column_id;
            let over_column = &board.cards()[over_index].column_id;
            if active_column == over_column {
                Resolution::MoveCard {
                    from,
                    to: over_index,
                }
            } else {
                Resolution::ReparentBeforeCard {
                    from,
                    to: over_index.saturating_sub(1),
                    column: over_column.clone(),
                }
            }
        }
        DragTarget::Column(column_id) => match board.find_column(column_id) {
            Some(column) => Resolution::ReparentToColumn {
                from,
                column: column.id.clone(),
            },
            None => Resolution::NoOp,
        },
    }
}

/// Decides what a drop commits: a column dropped on a different live column
/// reorders the column sequence; everything else has already been applied
/// incrementally by the hover steps and resolves to a no-op.
pub fn resolve_end(board: &Board, active: &DragTarget, over: &DragTarget) -> Resolution {
    if active == over {
        return Resolution::NoOp;
    }

    match (active, over) {
        (DragTarget::Column(active_id), DragTarget::Column(over_id)) => {
            match (board.column_index(active_id), board.column_index(over_id)) {
                (Some(from), Some(to)) => Resolution::MoveColumn { from, to },
                _ => Resolution::NoOp,
            }
        }
        _ => Resolution::NoOp,
    }
}
