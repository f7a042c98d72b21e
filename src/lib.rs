//! # Kanri Core
//!
//! Core board state and drag-reordering engine for Kanri kanban boards.
//!
//! This crate provides the ordered column and card collections, the
//! pointer-drag session state machine, and the reparenting rules for
//! cross-column card moves, without any dependency on specific UI
//! implementations or input backends. Rendering, text editing, and pointer
//! sampling are left to collaborators that consume the event and query
//! surface exposed here.

pub mod controller;
pub mod domain;
pub mod drag;
pub mod error;

// Re-export commonly used types
pub use controller::BoardController;
pub use domain::{
    board::{Board, OrderSnapshot},
    card::{Card, CardId},
    column::{Column, ColumnId},
};
pub use drag::{
    engine::DragEngine,
    session::{DragSession, Overlay},
    DragConfig, DragEvent, DragTarget,
};
pub use error::{KanriError, Result};
