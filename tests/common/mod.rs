//! Shared fixtures for the catalog integration tests.
//!
//! Provides an in-memory document store, deterministic valid card ids, and a
//! call-counting [`DocumentStore`] fake used to prove that validation errors
//! are returned before any persistence call is made.

#![allow(dead_code)]

use std::cell::Cell;

use mtgjson_catalog::store::{DocumentStore, DuckStore, Filter};
use mtgjson_catalog::{Card, CardRepository, Result, User, UserRepository};
use serde_json::Value;

/// Fresh in-memory document store.
pub fn memory_store() -> DuckStore {
    DuckStore::in_memory().unwrap()
}

/// Deterministic card id that passes UUID validation
/// (version nibble `5`, variant nibble `8`).
pub fn uuid(n: u8) -> String {
    format!("{:08x}-0000-5000-8000-{:012x}", n, n)
}

/// Seed `(name, uuid)` cards into the store under the system principal.
pub fn seed_cards(store: &DuckStore, cards: &[(&str, &str)]) {
    let repo = CardRepository::new(store);
    for (name, id) in cards {
        let mut card = Card::new(name, id);
        repo.create(&mut card, None).unwrap();
    }
}

/// Seed a user so it can be referenced as an owner principal.
pub fn seed_user(store: &DuckStore, username: &str, email: &str) {
    let mut user = User::new(username, email);
    user.identity_id = format!("id-{}", username);
    UserRepository::new(store).create(&user).unwrap();
}

// ---------------------------------------------------------------------------
// CountingStore
// ---------------------------------------------------------------------------

/// A [`DocumentStore`] fake that records how many calls it received and
/// returns empty results for everything.
#[derive(Default)]
pub struct CountingStore {
    pub calls: Cell<usize>,
}

impl CountingStore {
    fn count(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl DocumentStore for CountingStore {
    fn find_one(&self, _collection: &str, _filter: &Filter) -> Result<Option<Value>> {
        self.count();
        Ok(None)
    }

    fn find_many(
        &self,
        _collection: &str,
        _key_path: &str,
        _values: &[String],
    ) -> Result<Vec<Value>> {
        self.count();
        Ok(Vec::new())
    }

    fn insert(&self, _collection: &str, _doc: &Value) -> Result<()> {
        self.count();
        Ok(())
    }

    fn replace(&self, _collection: &str, _filter: &Filter, _doc: &Value) -> Result<u64> {
        self.count();
        Ok(1)
    }

    fn delete(&self, _collection: &str, _filter: &Filter) -> Result<u64> {
        self.count();
        Ok(1)
    }

    fn list_all(&self, _collection: &str, _limit: i64) -> Result<Vec<Value>> {
        self.count();
        Ok(Vec::new())
    }
}
