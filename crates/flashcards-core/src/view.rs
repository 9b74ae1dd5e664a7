//! Render-ready projection of the card collection
//!
//! Front ends keep a `FlipState` between refreshes and rebuild a `DeckView`
//! from the repository after every mutation.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{Card, CardId};

/// Which side of a card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Question,
    Answer,
}

/// Ids of cards currently turned over to their answer
#[derive(Debug, Clone, Default)]
pub struct FlipState {
    flipped: HashSet<CardId>,
}

impl FlipState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a card over; returns the face now showing
    pub fn toggle(&mut self, id: CardId) -> Face {
        if self.flipped.remove(&id) {
            Face::Question
        } else {
            self.flipped.insert(id);
            Face::Answer
        }
    }

    /// Show the answer side regardless of the current face
    pub fn reveal(&mut self, id: CardId) {
        self.flipped.insert(id);
    }

    pub fn is_flipped(&self, id: CardId) -> bool {
        self.flipped.contains(&id)
    }

    /// Forget ids that are no longer in the collection
    pub fn retain_existing(&mut self, cards: &[Card]) {
        let present: HashSet<CardId> = cards.iter().map(|c| c.id).collect();
        self.flipped.retain(|id| present.contains(id));
    }

    pub fn reset(&mut self) {
        self.flipped.clear();
    }
}

/// One card as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub face: Face,
}

impl CardView {
    /// Text of the side currently showing
    pub fn visible_text(&self) -> &str {
        match self.face {
            Face::Question => &self.question,
            Face::Answer => &self.answer,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.face == Face::Answer
    }
}

/// The whole deck as it should be drawn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckView {
    pub cards: Vec<CardView>,
}

impl DeckView {
    /// Whether the empty-state indicator should show
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn get(&self, index: usize) -> Option<&CardView> {
        self.cards.get(index)
    }

    /// Position of a card in display order
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}

/// Build the deck view for `cards`, dropping stale flip state on the way
pub fn project(cards: &[Card], flips: &mut FlipState) -> DeckView {
    flips.retain_existing(cards);
    DeckView {
        cards: cards
            .iter()
            .map(|card| CardView {
                id: card.id,
                question: card.question.clone(),
                answer: card.answer.clone(),
                face: if flips.is_flipped(card.id) {
                    Face::Answer
                } else {
                    Face::Question
                },
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Card> {
        vec![Card::new(1, "Q1", "A1"), Card::new(2, "Q2", "A2")]
    }

    #[test]
    fn test_project_defaults_to_question_side() {
        let view = project(&cards(), &mut FlipState::new());

        assert_eq!(view.len(), 2);
        assert!(!view.is_empty());
        assert_eq!(view.cards[0].visible_text(), "Q1");
        assert_eq!(view.cards[1].face, Face::Question);
    }

    #[test]
    fn test_toggle_flips_back_and_forth() {
        let mut flips = FlipState::new();

        assert_eq!(flips.toggle(2), Face::Answer);
        let view = project(&cards(), &mut flips);
        assert_eq!(view.cards[1].visible_text(), "A2");
        assert!(!view.cards[0].is_flipped());

        assert_eq!(flips.toggle(2), Face::Question);
        assert!(!flips.is_flipped(2));
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut flips = FlipState::new();
        flips.reveal(1);
        flips.reveal(1);
        assert!(flips.is_flipped(1));
    }

    #[test]
    fn test_project_prunes_removed_cards() {
        let mut flips = FlipState::new();
        flips.reveal(1);
        flips.reveal(99);

        project(&cards(), &mut flips);
        assert!(flips.is_flipped(1));
        assert!(!flips.is_flipped(99));
    }

    #[test]
    fn test_empty_deck() {
        let view = project(&[], &mut FlipState::new());
        assert!(view.is_empty());
        assert_eq!(view.position(1), None);
    }

    #[test]
    fn test_accessors_follow_face() {
        let mut view = project(&cards(), &mut FlipState::new());
        let card = &mut view.cards[0];

        card.face = Face::Answer;
        assert!(card.is_flipped());
        assert_eq!(card.visible_text(), "A1");

        card.face = Face::Question;
        assert!(!card.is_flipped());
        assert_eq!(card.visible_text(), "Q1");

        view.cards.clear();
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn test_position() {
        let view = project(&cards(), &mut FlipState::new());
        assert_eq!(view.position(2), Some(1));
    }
}
