//! Data models for flashcards
//!
//! A `Card` is one question/answer pair. The persisted field names (`id`,
//! `q`, `a`) are kept short so exported files stay readable.

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Card identifier, a millisecond-resolution timestamp-derived integer
pub type CardId = i64;

/// A question/answer flashcard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    /// Unique identifier within the collection
    pub id: CardId,
    /// Front of the card
    #[serde(rename = "q")]
    pub question: String,
    /// Back of the card, may be empty
    #[serde(rename = "a", default)]
    pub answer: String,
}

impl Card {
    /// Create a card with a specific ID
    pub fn new(id: CardId, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ids of the starter cards
///
/// Fixed so that an id listed from an unsaved collection still addresses
/// the same card on the next load, in this process or another one.
pub const STARTER_IDS: [CardId; 2] = [1, 2];

/// The cards shown when nothing has been saved yet
pub fn starter_cards() -> Vec<Card> {
    vec![
        Card::new(STARTER_IDS[0], "HTML stands for?", "HyperText Markup Language"),
        Card::new(
            STARTER_IDS[1],
            "What does CSS control?",
            "Presentation: layout, colors, fonts\nUse selectors to target elements.",
        ),
    ]
}

/// Pick an id for a new card
///
/// Ids follow the clock but never repeat: the result is strictly greater
/// than every id already in `existing`. When the largest id is already
/// `CardId::MAX`, the smallest unused positive id is taken instead.
pub fn next_id(existing: &[Card]) -> CardId {
    next_id_at(existing, now_millis())
}

fn next_id_at(existing: &[Card], now: CardId) -> CardId {
    match existing.iter().map(|c| c.id).max() {
        Some(max) if max >= now => max
            .checked_add(1)
            .unwrap_or_else(|| smallest_unused_id(existing)),
        _ => now,
    }
}

fn smallest_unused_id(existing: &[Card]) -> CardId {
    let used: HashSet<CardId> = existing.iter().map(|c| c.id).collect();
    (1..=CardId::MAX)
        .find(|id| !used.contains(id))
        .unwrap_or(CardId::MIN)
}

/// Strip trailing whitespace and blank lines, keeping everything else
pub fn trim_trailing(text: &str) -> &str {
    text.trim_end()
}

fn now_millis() -> CardId {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_short_field_names() {
        let card = Card::new(1, "Q", "A");
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"id":1,"q":"Q","a":"A"}"#);
    }

    #[test]
    fn test_missing_answer_defaults_to_empty() {
        let card: Card = serde_json::from_str(r#"{"id":5,"q":"Only a question"}"#).unwrap();
        assert_eq!(card.answer, "");
    }

    #[test]
    fn test_non_integer_id_is_rejected() {
        assert!(serde_json::from_str::<Card>(r#"{"id":"x","q":"Q","a":"A"}"#).is_err());
        assert!(serde_json::from_str::<Card>(r#"{"q":"Q","a":"A"}"#).is_err());
    }

    #[test]
    fn test_starter_cards() {
        let cards = starter_cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "HTML stands for?");
        assert!(cards[1].answer.contains('\n'));
        assert_eq!(cards[0].id, STARTER_IDS[0]);
        assert_eq!(cards[1].id, STARTER_IDS[1]);
    }

    #[test]
    fn test_starter_ids_are_stable_across_calls() {
        let first = starter_cards();
        std::thread::sleep(std::time::Duration::from_millis(3));
        assert_eq!(starter_cards(), first);
    }

    #[test]
    fn test_next_id_follows_clock() {
        assert_eq!(next_id_at(&[], 1_000), 1_000);
        assert_eq!(next_id_at(&[Card::new(10, "q", "")], 1_000), 1_000);
    }

    #[test]
    fn test_next_id_never_collides() {
        let cards = vec![Card::new(1_000, "q", ""), Card::new(1_005, "q", "")];
        assert_eq!(next_id_at(&cards, 1_000), 1_006);
        assert_eq!(next_id_at(&cards, 1_005), 1_006);
    }

    #[test]
    fn test_next_id_after_max_id_reuses_smallest_free_id() {
        let cards = vec![Card::new(CardId::MAX, "q", "")];
        assert_eq!(next_id_at(&cards, 1_000), 1);

        let cards = vec![
            Card::new(CardId::MAX, "q", ""),
            Card::new(1, "q", ""),
            Card::new(3, "q", ""),
        ];
        assert_eq!(next_id_at(&cards, 1_000), 2);
    }

    #[test]
    fn test_trim_trailing_keeps_leading_and_inner_whitespace() {
        assert_eq!(trim_trailing("  line one\n\n  line two  \n\n"), "  line one\n\n  line two");
        assert_eq!(trim_trailing(" \n\t\n"), "");
    }
}
