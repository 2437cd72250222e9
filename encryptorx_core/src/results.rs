use chrono::NaiveDateTime;
use encryptorx_plugins::WriteMode;
use std::collections::VecDeque;

use crate::error::CoreError;

pub type CardId = usize;

/// Handler bound to one of a card's buttons, with its arguments captured at
/// the moment the card was populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Save { payload: String, mode: WriteMode },
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    pub key: String,
    pub data: String,
    pub created_at: NaiveDateTime,
    pub save: CardAction,
    pub copy: CardAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardState {
    Pending,
    Populated(CardContent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    id: CardId,
    state: CardState,
}

impl ResultCard {
    fn pending(id: CardId) -> Self {
        Self {
            id,
            state: CardState::Pending,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, CardState::Pending)
    }

    pub fn content(&self) -> Option<&CardContent> {
        match &self.state {
            CardState::Pending => None,
            CardState::Populated(content) => Some(content),
        }
    }

    /// Pending -> Populated, exactly once.
    pub fn populate(&mut self, content: CardContent) -> Result<(), CoreError> {
        if !self.is_pending() {
            return Err(CoreError::CardAlreadyPopulated(self.id));
        }
        self.state = CardState::Populated(content);
        Ok(())
    }
}

/// Ordered result cards, newest first, plus the lifetime creation counter.
#[derive(Debug, Default)]
pub struct ResultList {
    cards: VecDeque<ResultCard>,
    counter: usize,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pending card with the next identity and puts it on top.
    pub fn add_result(&mut self) -> CardId {
        let id = self.counter;
        self.cards.push_front(ResultCard::pending(id));
        self.counter += 1;
        tracing::debug!(card = id, total = self.cards.len(), "Result card added");
        id
    }

    pub fn populate(&mut self, id: CardId, content: CardContent) -> Result<(), CoreError> {
        self.get_mut(id)
            .ok_or(CoreError::CardNotFound(id))?
            .populate(content)
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.cards.len();
        self.cards.clear();
        self.counter = 0;
        removed
    }

    pub fn get(&self, id: CardId) -> Option<&ResultCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut ResultCard> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    /// Cards in display order (most recently created first).
    pub fn cards(&self) -> impl Iterator<Item = &ResultCard> {
        self.cards.iter()
    }

    pub fn display_order(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn counter(&self) -> usize {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn content(key: &str, data: &str) -> CardContent {
        CardContent {
            key: key.to_string(),
            data: data.to_string(),
            created_at: NaiveDate::from_ymd_opt(2026, 2, 8)
                .and_then(|d| d.and_hms_opt(10, 0, 0))
                .unwrap(),
            save: CardAction::Save {
                payload: "payload".to_string(),
                mode: WriteMode::Append,
            },
            copy: CardAction::Copy,
        }
    }

    #[test]
    fn ids_are_sequential_and_display_is_newest_first() {
        let mut list = ResultList::new();
        for expected in 0..5 {
            assert_eq!(list.add_result(), expected);
            let creation: Vec<CardId> = (0..=expected).collect();
            let reversed: Vec<CardId> = creation.into_iter().rev().collect();
            assert_eq!(list.display_order(), reversed);
        }
        assert_eq!(list.counter(), 5);
    }

    #[test]
    fn new_cards_start_pending() {
        let mut list = ResultList::new();
        let id = list.add_result();
        assert!(list.get(id).unwrap().is_pending());
        assert!(list.get(id).unwrap().content().is_none());
    }

    #[test]
    fn populate_happens_only_once() {
        let mut list = ResultList::new();
        let id = list.add_result();
        list.populate(id, content("k", "d")).unwrap();
        assert_eq!(list.get(id).unwrap().content().unwrap().key, "k");
        assert_eq!(
            list.populate(id, content("k2", "d2")).unwrap_err(),
            CoreError::CardAlreadyPopulated(id)
        );
    }

    #[test]
    fn populate_unknown_card_fails() {
        let mut list = ResultList::new();
        assert_eq!(
            list.populate(7, content("k", "d")).unwrap_err(),
            CoreError::CardNotFound(7)
        );
    }

    #[test]
    fn clear_resets_cards_and_counter() {
        let mut list = ResultList::new();
        for _ in 0..3 {
            list.add_result();
        }
        assert_eq!(list.clear(), 3);
        assert!(list.is_empty());
        assert_eq!(list.counter(), 0);

        // identities restart after a clear
        assert_eq!(list.add_result(), 0);
    }

    #[test]
    fn clear_on_empty_list_is_harmless() {
        let mut list = ResultList::new();
        assert_eq!(list.clear(), 0);
        assert_eq!(list.counter(), 0);
    }

    #[test]
    fn counter_never_below_card_count() {
        let mut list = ResultList::new();
        for _ in 0..4 {
            list.add_result();
            assert!(list.counter() >= list.len());
        }
    }
}
