//! Card repository operations
//!
//! Every operation reloads the whole collection from the `Store`, computes
//! the new collection, and saves it back. There is no cache between calls.
//! The read-modify-write span of each mutation runs under one mutex, so a
//! `Repository` can be shared between threads without losing writes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::config::Config;
use crate::error::{CardError, CardResult};
use crate::models::{next_id, trim_trailing, Card, CardId};
use crate::storage::{FileStore, KeyValueStore};
use crate::store::Store;

/// Create, read, update and delete cards
pub struct Repository<S> {
    store: Store<S>,
    lock: Mutex<()>,
}

impl Repository<FileStore> {
    /// Open the file-backed repository for a configuration
    pub fn open_with_config(config: &Config) -> Self {
        Self::new(Store::open_with_config(config))
    }
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: Store<S>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// The underlying persistence boundary
    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// Serialize access to the store for one read-modify-write cycle
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock holds nothing stale
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All cards in display order
    pub fn list(&self) -> CardResult<Vec<Card>> {
        let _guard = self.lock();
        Ok(self.store.load()?)
    }

    /// Look up a single card
    pub fn get(&self, id: CardId) -> CardResult<Card> {
        let _guard = self.lock();
        self.store
            .load()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(CardError::NotFound(id))
    }

    /// Create a card at the front of the collection
    pub fn add(&self, question: &str, answer: &str) -> CardResult<Card> {
        let (question, answer) = validate(question, answer)?;

        let _guard = self.lock();
        let mut cards = self.store.load()?;
        let card = Card::new(next_id(&cards), question, answer);
        cards.insert(0, card.clone());
        self.store.save(&cards)?;

        Ok(card)
    }

    /// Replace the question and answer of an existing card, keeping its position
    pub fn update(&self, id: CardId, question: &str, answer: &str) -> CardResult<Card> {
        let (question, answer) = validate(question, answer)?;

        let _guard = self.lock();
        let mut cards = self.store.load()?;
        let card = cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CardError::NotFound(id))?;
        card.question = question.to_string();
        card.answer = answer.to_string();
        let updated = card.clone();
        self.store.save(&cards)?;

        Ok(updated)
    }

    /// Delete every card with the given id
    ///
    /// Returns how many cards were removed.
    pub fn remove(&self, id: CardId) -> CardResult<usize> {
        let _guard = self.lock();
        let mut cards = self.store.load()?;
        let before = cards.len();
        cards.retain(|c| c.id != id);
        let removed = before - cards.len();
        if removed == 0 {
            return Err(CardError::NotFound(id));
        }
        self.store.save(&cards)?;

        Ok(removed)
    }

    /// Delete the persisted collection
    ///
    /// The next load falls back to the starter cards.
    pub fn clear(&self) -> CardResult<()> {
        let _guard = self.lock();
        self.store.clear()?;
        info!("Cleared all cards under '{}'", self.store.key());
        Ok(())
    }

    /// Number of cards currently stored
    pub fn count(&self) -> CardResult<usize> {
        Ok(self.list()?.len())
    }
}

/// Apply the input rules shared by add and update
///
/// Trailing whitespace is trimmed from both fields; the question must
/// still have content afterwards.
fn validate<'a>(question: &'a str, answer: &'a str) -> CardResult<(&'a str, &'a str)> {
    let question = trim_trailing(question);
    if question.is_empty() {
        return Err(CardError::EmptyQuestion);
    }
    Ok((question, trim_trailing(answer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::collections::HashSet;
    use std::sync::Arc;

    const KEY: &str = "cards";

    fn repo() -> Repository<MemoryStore> {
        Repository::new(Store::new(MemoryStore::new(), KEY))
    }

    fn repo_with(cards: &[Card]) -> Repository<MemoryStore> {
        let repo = repo();
        repo.store().save(cards).unwrap();
        repo
    }

    #[test]
    fn test_list_starts_with_starter_cards() {
        assert_eq!(repo().list().unwrap().len(), 2);
    }

    #[test]
    fn test_add_prepends() {
        let repo = repo();

        let card = repo.add("Q1", "A1").unwrap();

        let cards = repo.list().unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0], card);
        assert_eq!(cards[0].question, "Q1");
        assert_eq!(cards[0].answer, "A1");
    }

    #[test]
    fn test_add_trims_trailing_whitespace_only() {
        let repo = repo_with(&[]);

        let card = repo.add("  What is\n  Rust?\n\n", "  A language\n\n  for systems \n").unwrap();
        assert_eq!(card.question, "  What is\n  Rust?");
        assert_eq!(card.answer, "  A language\n\n  for systems");
    }

    #[test]
    fn test_add_allows_empty_answer() {
        let repo = repo_with(&[]);
        let card = repo.add("Question only", "").unwrap();
        assert_eq!(card.answer, "");
    }

    #[test]
    fn test_add_rejects_empty_question() {
        let repo = repo_with(&[Card::new(1, "existing", "")]);

        assert!(matches!(repo.add("", "A"), Err(CardError::EmptyQuestion)));
        assert!(matches!(repo.add(" \n\n ", "A"), Err(CardError::EmptyQuestion)));
        assert_eq!(repo.list().unwrap(), vec![Card::new(1, "existing", "")]);
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let repo = repo_with(&[]);

        let ids: HashSet<CardId> = (0..50)
            .map(|i| repo.add(&format!("Q{}", i), "").unwrap().id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_id_exceeds_existing_future_ids() {
        let repo = repo_with(&[Card::new(i64::MAX - 10, "from the future", "")]);
        let card = repo.add("now", "").unwrap();
        assert_eq!(card.id, i64::MAX - 9);
    }

    #[test]
    fn test_add_after_max_id_keeps_ids_unique() {
        let repo = repo_with(&[Card::new(CardId::MAX, "at the limit", "")]);

        let card = repo.add("new", "").unwrap();
        assert_ne!(card.id, CardId::MAX);

        let ids: HashSet<CardId> = repo.list().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_unsaved_starter_cards_are_addressable_by_listed_id() {
        let repo = repo();
        let listed = repo.list().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(3));

        assert_eq!(repo.get(listed[0].id).unwrap(), listed[0]);
        repo.update(listed[0].id, "HTML stands for...?", "HyperText").unwrap();
        assert_eq!(repo.remove(listed[1].id).unwrap(), 1);

        let cards = repo.list().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, listed[0].id);
        assert_eq!(cards[0].question, "HTML stands for...?");
    }

    #[test]
    fn test_get() {
        let repo = repo_with(&[Card::new(1, "one", "1"), Card::new(2, "two", "2")]);

        assert_eq!(repo.get(2).unwrap().question, "two");
        assert!(matches!(repo.get(3), Err(CardError::NotFound(3))));
    }

    #[test]
    fn test_update_preserves_position_and_others() {
        let repo = repo_with(&[
            Card::new(1, "one", "1"),
            Card::new(2, "two", "2"),
            Card::new(3, "three", "3"),
        ]);

        let updated = repo.update(2, "TWO", "deux\n").unwrap();
        assert_eq!(updated, Card::new(2, "TWO", "deux"));

        assert_eq!(
            repo.list().unwrap(),
            vec![
                Card::new(1, "one", "1"),
                Card::new(2, "TWO", "deux"),
                Card::new(3, "three", "3"),
            ]
        );
    }

    #[test]
    fn test_update_first_duplicate_only() {
        let repo = repo_with(&[Card::new(7, "first", ""), Card::new(7, "second", "")]);

        repo.update(7, "changed", "").unwrap();
        let cards = repo.list().unwrap();
        assert_eq!(cards[0].question, "changed");
        assert_eq!(cards[1].question, "second");
    }

    #[test]
    fn test_update_missing_card_is_not_found() {
        let repo = repo_with(&[Card::new(1, "one", "1")]);

        assert!(matches!(repo.update(99, "q", "a"), Err(CardError::NotFound(99))));
        assert_eq!(repo.list().unwrap(), vec![Card::new(1, "one", "1")]);
    }

    #[test]
    fn test_update_rejects_empty_question() {
        let repo = repo_with(&[Card::new(1, "one", "1")]);

        assert!(matches!(repo.update(1, "   ", "a"), Err(CardError::EmptyQuestion)));
        assert_eq!(repo.get(1).unwrap().question, "one");
    }

    #[test]
    fn test_remove_drops_all_duplicates_in_order() {
        let repo = repo_with(&[
            Card::new(1, "a", ""),
            Card::new(2, "b", ""),
            Card::new(1, "c", ""),
            Card::new(3, "d", ""),
        ]);

        assert_eq!(repo.remove(1).unwrap(), 2);
        assert_eq!(
            repo.list().unwrap(),
            vec![Card::new(2, "b", ""), Card::new(3, "d", "")]
        );
    }

    #[test]
    fn test_remove_missing_card_is_not_found() {
        let repo = repo_with(&[Card::new(1, "a", "")]);
        assert!(matches!(repo.remove(2), Err(CardError::NotFound(2))));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_removing_last_card_leaves_empty_collection() {
        let repo = repo_with(&[Card::new(1, "a", "")]);
        repo.remove(1).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_clear_resets_to_starter_cards() {
        let repo = repo_with(&[]);
        repo.add("Q", "A").unwrap();

        repo.clear().unwrap();
        let cards = repo.list().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "HTML stands for?");
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let repo = Arc::new(repo_with(&[]));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        repo.add(&format!("t{} q{}", t, i), "").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let cards = repo.list().unwrap();
        assert_eq!(cards.len(), 200);
        let ids: HashSet<CardId> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 200);
    }
}
