//! Study mode: stepping through a snapshot of cards, one side at a time.

use crate::error::{CardzError, Result};
use crate::model::Card;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct StudySession {
    cards: Vec<Card>,
    index: usize,
    flipped: bool,
}

impl StudySession {
    /// Starts a session on the first card. An empty deck is refused.
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(CardzError::Validation("no cards to study".to_string()));
        }
        Ok(Self {
            cards,
            index: 0,
            flipped: false,
        })
    }

    /// Reorders the deck randomly and restarts.
    pub fn shuffled(mut self) -> Self {
        let mut keyed: Vec<(Uuid, Card)> = self
            .cards
            .into_iter()
            .map(|c| (Uuid::new_v4(), c))
            .collect();
        keyed.sort_by_key(|(k, _)| *k);
        self.cards = keyed.into_iter().map(|(_, c)| c).collect();
        self.reset();
        self
    }

    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.index)
    }

    /// 1-based position of the current card, 0 when the deck is empty.
    pub fn position(&self) -> usize {
        if self.cards.is_empty() {
            0
        } else {
            self.index + 1
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn next(&mut self) -> Option<&Card> {
        if self.index + 1 >= self.cards.len() {
            return None;
        }
        self.index += 1;
        self.flipped = false;
        self.current()
    }

    pub fn prev(&mut self) -> Option<&Card> {
        if self.index == 0 || self.cards.is_empty() {
            return None;
        }
        self.index -= 1;
        self.flipped = false;
        self.current()
    }

    pub fn flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.flipped = false;
    }

    /// Drops the current card from the deck, keeping the index in range.
    pub fn remove_current(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let removed = self.cards.remove(self.index);
        self.index = self.index.min(self.cards.len().saturating_sub(1));
        self.flipped = false;
        Some(removed)
    }

    /// Text currently facing the user.
    pub fn visible_side(&self) -> Option<&str> {
        self.current().map(|c| {
            if self.flipped {
                c.back.as_str()
            } else {
                c.front.as_str()
            }
        })
    }

    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ROOT_ID;

    fn deck(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                Card::new(
                    format!("card_{}", i),
                    ROOT_ID.to_string(),
                    format!("front {}", i),
                    format!("back {}", i),
                )
            })
            .collect()
    }

    #[test]
    fn empty_deck_is_rejected() {
        let err = StudySession::new(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), "Validation");
    }

    #[test]
    fn steps_without_wrapping() {
        let mut study = StudySession::new(deck(3)).unwrap();
        assert_eq!(study.position(), 1);
        assert!(study.prev().is_none());
        assert_eq!(study.next().unwrap().id, "card_1");
        assert_eq!(study.next().unwrap().id, "card_2");
        assert!(study.next().is_none());
        assert_eq!(study.position(), 3);
        assert!(study.at_end());
        assert_eq!(study.prev().unwrap().id, "card_1");
    }

    #[test]
    fn flip_shows_back_and_moving_unflips() {
        let mut study = StudySession::new(deck(2)).unwrap();
        assert_eq!(study.visible_side(), Some("front 0"));
        assert!(study.flip());
        assert_eq!(study.visible_side(), Some("back 0"));
        study.next();
        assert!(!study.is_flipped());
        assert_eq!(study.visible_side(), Some("front 1"));
    }

    #[test]
    fn reset_returns_to_first_card() {
        let mut study = StudySession::new(deck(3)).unwrap();
        study.next();
        study.flip();
        study.reset();
        assert_eq!(study.position(), 1);
        assert!(!study.is_flipped());
    }

    #[test]
    fn removing_last_card_clamps_index() {
        let mut study = StudySession::new(deck(2)).unwrap();
        study.next();
        assert_eq!(study.remove_current().unwrap().id, "card_1");
        assert_eq!(study.position(), 1);
        assert_eq!(study.current().unwrap().id, "card_0");
        study.remove_current();
        assert!(study.is_empty());
        assert_eq!(study.position(), 0);
        assert!(study.current().is_none());
        assert!(study.remove_current().is_none());
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let study = StudySession::new(deck(20)).unwrap().shuffled();
        let mut ids: Vec<String> = (0..study.len())
            .map(|i| study.cards[i].id.clone())
            .collect();
        ids.sort();
        let mut expected: Vec<String> = deck(20).into_iter().map(|c| c.id).collect();
        expected.sort();
        assert_eq!(ids, expected);
        assert_eq!(study.position(), 1);
    }
}
