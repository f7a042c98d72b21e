use crate::domain::card::{Card, CardId};
use crate::domain::column::{Column, ColumnId};
use crate::domain::ordering;
use crate::error::{KanriError, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Authoritative board state: an ordered column sequence and an ordered card
/// sequence, each card tagged with its owning column.
///
/// All mutation goes through methods so the structural invariants hold at
/// every step: no duplicate identities in either sequence, and every card's
/// owning column is live except inside a single reparent step, which swaps
/// in the repaired sequence before returning.
#[derive(Debug, Serialize, Deserialize)]
pub struct Board {
    columns: Vec<Column>,
    cards: Vec<Card>,
    next_column_number: u32,
    next_card_number: u32,
}

impl Board {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            cards: Vec::new(),
            next_column_number: 1,
            next_card_number: 1,
        }
    }

    /// Generates the next column ID
    fn next_column_id(&mut self) -> ColumnId {
        let id = ColumnId::new(self.next_column_number);
        self.next_column_number += 1;
        id
    }

    /// Generates the next card ID
    fn next_card_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_number);
        self.next_card_number += 1;
        id
    }

    /// Appends a new column with a fresh identity and the default title
    pub fn create_column(&mut self) -> ColumnId {
        let id = self.next_column_id();
        self.columns
            .push(Column::new(id.clone(), Column::DEFAULT_TITLE.to_string()));
        id
    }

    /// Removes a column and every card it owns.
    ///
    /// Returns the IDs of the cascaded cards. An unknown ID is a no-op and
    /// returns an empty list.
    pub fn delete_column(&mut self, id: &ColumnId) -> Vec<CardId> {
        if self.column_index(id).is_none() {
            return Vec::new();
        }

        self.columns.retain(|col| &col.id != id);

        let removed: Vec<CardId> = self
            .cards
            .iter()
            .filter(|card| &card.column_id == id)
            .map(|card| card.id.clone())
            .collect();
        self.cards.retain(|card| &card.column_id != id);

        debug!("deleted column {} and {} owned cards", id, removed.len());
        removed
    }

    /// Sets a column's title. Unknown IDs are a no-op.
    pub fn rename_column(&mut self, id: &ColumnId, title: String) {
        if let Some(column) = self.columns.iter_mut().find(|col| &col.id == id) {
            column.title = title;
        }
    }

    /// Appends a new card to the given column with default content.
    ///
    /// Fails if the column does not exist; cards are never created orphaned.
    pub fn create_card(&mut self, column_id: &ColumnId) -> Result<CardId> {
        if self.column_index(column_id).is_none() {
            return Err(KanriError::ColumnNotFound(column_id.to_string()));
        }

        let content = format!("Task {}", self.cards.len() + 1);
        let id = self.next_card_id();
        self.cards
            .push(Card::new(id.clone(), column_id.clone(), content));
        Ok(id)
    }

    /// Removes a card. Unknown IDs are a no-op.
    pub fn delete_card(&mut self, id: &CardId) {
        self.cards.retain(|card| &card.id != id);
    }

    /// Sets a card's content text. Unknown IDs are a no-op.
    pub fn update_card_content(&mut self, id: &CardId, content: String) {
        if let Some(card) = self.find_card_mut(id) {
            card.set_content(content);
        }
    }

    /// Sets or clears a card's label. Unknown IDs are a no-op.
    pub fn update_card_label(&mut self, id: &CardId, label: Option<String>) {
        if let Some(card) = self.find_card_mut(id) {
            match label {
                Some(label) => card.set_label(label),
                None => card.clear_label(),
            }
        }
    }

    /// Sets or clears a card's image reference. Unknown IDs are a no-op.
    pub fn update_card_image(&mut self, id: &CardId, image: Option<String>) {
        if let Some(card) = self.find_card_mut(id) {
            match image {
                Some(image) => card.set_image(image),
                None => card.clear_image(),
            }
        }
    }

    /// The columns in display order
    pub fn ordered_columns(&self) -> &[Column] {
        &self.columns
    }

    /// The full card sequence in board order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The cards owned by a column, in display order
    pub fn ordered_cards_of(&self, column_id: &ColumnId) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| &card.column_id == column_id)
            .collect()
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// Looks up a column, failing if it does not exist
    pub fn get_column(&self, id: &ColumnId) -> Result<&Column> {
        self.find_column(id)
            .ok_or_else(|| KanriError::ColumnNotFound(id.to_string()))
    }

    /// Looks up a card, failing if it does not exist
    pub fn get_card(&self, id: &CardId) -> Result<&Card> {
        self.find_card(id)
            .ok_or_else(|| KanriError::CardNotFound(id.to_string()))
    }

    fn find_card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| &card.id == id)
    }

    /// Index of a column within the column sequence
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|col| &col.id == id)
    }

    /// Index of a card within the board-wide card sequence
    pub fn card_index(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == id)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Reorders the column sequence by index
    pub(crate) fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        self.columns = ordering::move_item(&self.columns, from, to)?;
        Ok(())
    }

    /// Reorders the card sequence by index
    pub(crate) fn move_card(&mut self, from: usize, to: usize) -> Result<()> {
        self.cards = ordering::move_item(&self.cards, from, to)?;
        Ok(())
    }

    /// Hands the card at `from` to another column and reinserts it at `to`.
    ///
    /// The new sequence is computed on a copy and swapped in with a single
    /// assignment, so the owner change and the reinsertion are never
    /// observable half-applied.
    pub(crate) fn reparent_card(
        &mut self,
        from: usize,
        column_id: &ColumnId,
        to: usize,
    ) -> Result<()> {
        let mut next = self.cards.clone();
        match next.get_mut(from) {
            Some(card) => card.column_id = column_id.clone(),
            None => {
                return Err(KanriError::IndexOutOfBounds {
                    index: from,
                    len: next.len(),
                })
            }
        }

        self.cards = ordering::move_item(&next, from, to)?;
        Ok(())
    }

    /// Records the current relative ordering of both sequences
    pub fn capture_order(&self) -> OrderSnapshot {
        OrderSnapshot {
            columns: self.columns.iter().map(|col| col.id.clone()).collect(),
            cards: self
                .cards
                .iter()
                .map(|card| (card.id.clone(), card.column_id.clone()))
                .collect(),
        }
    }

    /// Restores the ordering captured by [`Board::capture_order`].
    ///
    /// Entities created since the snapshot keep their current relative order
    /// at the tail of each sequence; entities deleted since the snapshot stay
    /// deleted. A card's recorded owner is only reapplied while that column
    /// is still live.
    pub fn restore_order(&mut self, snapshot: &OrderSnapshot) {
        let mut next_columns: Vec<Column> = Vec::with_capacity(self.columns.len());
        for id in &snapshot.columns {
            if let Some(column) = self.find_column(id) {
                next_columns.push(column.clone());
            }
        }
        for column in &self.columns {
            if !snapshot.columns.contains(&column.id) {
                next_columns.push(column.clone());
            }
        }
        self.columns = next_columns;

        let mut next_cards: Vec<Card> = Vec::with_capacity(self.cards.len());
        for (id, owner) in &snapshot.cards {
            if let Some(card) = self.find_card(id) {
                let mut card = card.clone();
                if self.column_index(owner).is_some() {
                    card.column_id = owner.clone();
                }
                next_cards.push(card);
            }
        }
        for card in &self.cards {
            if !snapshot.cards.iter().any(|(id, _)| id == &card.id) {
                next_cards.push(card.clone());
            }
        }
        self.cards = next_cards;
    }

    /// Checks the structural invariants: unique identities in both sequences
    /// and a live owning column for every card.
    ///
    /// Mutation methods uphold these by construction; a failure here is a
    /// programming defect, not a runtime condition to recover from.
    pub fn validate(&self) -> Result<()> {
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns.iter().skip(i + 1).any(|c| c.id == column.id) {
                return Err(KanriError::InvariantViolation(format!(
                    "duplicate column ID {}",
                    column.id
                )));
            }
        }

        for (i, card) in self.cards.iter().enumerate() {
            if self.cards.iter().skip(i + 1).any(|c| c.id == card.id) {
                return Err(KanriError::InvariantViolation(format!(
                    "duplicate card ID {}",
                    card.id
                )));
            }
        }

        for card in &self.cards {
            if self.column_index(&card.column_id).is_none() {
                return Err(KanriError::InvariantViolation(format!(
                    "card {} references missing column {}",
                    card.id, card.column_id
                )));
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative ordering of both board sequences at one point in time, used to
/// roll a cancelled gesture back to its starting arrangement.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    columns: Vec<ColumnId>,
    cards: Vec<(CardId, ColumnId)>,
}
