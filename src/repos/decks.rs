//! Deck repository: owner-scoped CRUD, board reconciliation, and content
//! hydration for the `deck` collection.
//!
//! The persisted quantity maps are the source of truth; hydrated contents are
//! derived per call and never written back.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::models::{meta, ApiMeta, Board, Card, Deck, DeckContentEntry, DeckContents};
use crate::store::{from_doc, DocumentStore, Filter};

use super::cards::{CARD_COLLECTION, CARD_KEY_PATH};
use super::resolve_owner;

pub const DECK_COLLECTION: &str = "deck";
pub const DECK_KEY_PATH: &str = "$.code";

// ---------------------------------------------------------------------------
// DeckRepository
// ---------------------------------------------------------------------------

pub struct DeckRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> DeckRepository<'a> {
    /// Create a new `DeckRepository` bound to the given store.
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Fetch a single deck by code, optionally narrowed to an owner.
    pub fn get(&self, code: &str, owner: Option<&str>) -> Result<Deck> {
        let filter = Filter::key(DECK_KEY_PATH, code).owner(owner);
        match self.store.find_one(DECK_COLLECTION, &filter)? {
            Some(doc) => from_doc(doc),
            None => Err(CatalogError::NotFound(format!("deck {}", code))),
        }
    }

    /// Fetch many decks in one batched lookup. Result order is unspecified.
    pub fn get_many(&self, codes: &[String]) -> Result<Vec<Deck>> {
        let docs = self.store.find_many(DECK_COLLECTION, DECK_KEY_PATH, codes)?;
        if docs.is_empty() {
            return Err(CatalogError::NotFound(
                "no decks matched the requested codes".to_string(),
            ));
        }
        docs.into_iter().map(from_doc).collect()
    }

    /// Insert a new deck.
    ///
    /// The deck must carry a name and a code and must not already exist under
    /// that code within the owner scope. Boards start empty by construction;
    /// the release date defaults to the creation timestamp.
    pub fn create(&self, deck: &mut Deck, owner: Option<&str>) -> Result<()> {
        if deck.name.is_empty() || deck.code.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "deck requires a name and a code".to_string(),
            ));
        }

        let owner = resolve_owner(self.store, owner)?;

        match self.get(&deck.code, Some(&owner)) {
            Err(CatalogError::NotFound(_)) => {}
            Ok(_) => return Err(CatalogError::AlreadyExists(format!("deck {}", deck.code))),
            Err(e) => return Err(e),
        }

        if deck.release_date.is_none() {
            deck.release_date = Some(meta::timestamp());
        }
        deck.mtgjson_api_meta = Some(ApiMeta::stamp(&owner, "Deck", None));

        let doc: Value = serde_json::to_value(&*deck)?;
        self.store.insert(DECK_COLLECTION, &doc)
    }

    /// Replace the entire deck document matching the deck's code.
    ///
    /// When the deck carries metadata the filter is narrowed to its owner, so
    /// another principal's deck under the same code is never touched.
    pub fn replace(&self, deck: &Deck) -> Result<()> {
        if deck.code.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "deck requires a code".to_string(),
            ));
        }

        let doc: Value = serde_json::to_value(deck)?;
        let owner = deck.mtgjson_api_meta.as_ref().map(|m| m.owner.as_str());
        let filter = Filter::key(DECK_KEY_PATH, &deck.code).owner(owner);
        let replaced = self.store.replace(DECK_COLLECTION, &filter, &doc)?;
        if replaced < 1 {
            return Err(CatalogError::UpdateFailed(format!("deck {}", deck.code)));
        }
        Ok(())
    }

    /// Delete a deck by code, optionally within an owner scope.
    pub fn delete(&self, code: &str, owner: Option<&str>) -> Result<()> {
        self.get(code, owner)?;

        let filter = Filter::key(DECK_KEY_PATH, code).owner(owner);
        let deleted = self.store.delete(DECK_COLLECTION, &filter)?;
        if deleted < 1 {
            return Err(CatalogError::DeleteFailed(format!("deck {}", code)));
        }
        Ok(())
    }

    /// List decks in the collection, unfiltered by owner.
    pub fn list(&self, limit: i64) -> Result<Vec<Deck>> {
        let docs = self.store.list_all(DECK_COLLECTION, limit)?;
        if docs.is_empty() {
            return Err(CatalogError::NotFound("no decks in collection".to_string()));
        }
        docs.into_iter().map(from_doc).collect()
    }

    // -- Board reconciliation ----------------------------------------------

    /// Merge a quantity delta into one board and persist the deck.
    ///
    /// Deltas are additive: an id already on the board accumulates, a new id
    /// is inserted directly. Exactly one `replace` round trip is performed;
    /// mutating several boards means one call (and one round trip) per board,
    /// with no cross-board atomicity.
    pub fn add_cards(
        &self,
        deck: &mut Deck,
        board: Board,
        delta: &BTreeMap<String, i64>,
    ) -> Result<()> {
        self.reconcile(deck, delta, |deck| deck.boards.merge(board, delta))
    }

    /// Subtract a quantity delta from one board and persist the deck.
    ///
    /// Entries whose quantity reaches zero are removed from the map entirely;
    /// a board never stores a zero or negative quantity.
    pub fn remove_cards(
        &self,
        deck: &mut Deck,
        board: Board,
        delta: &BTreeMap<String, i64>,
    ) -> Result<()> {
        self.reconcile(deck, delta, |deck| deck.boards.subtract(board, delta))
    }

    /// Shared mutate-stamp-replace flow for board reconciliation.
    ///
    /// Validation happens before the mutation is applied, so a failed call
    /// leaves the in-memory deck untouched. An empty delta is a no-op and
    /// consumes no persistence call.
    fn reconcile<F>(&self, deck: &mut Deck, delta: &BTreeMap<String, i64>, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Deck),
    {
        if deck.code.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "deck requires a code".to_string(),
            ));
        }
        if deck.mtgjson_api_meta.is_none() {
            return Err(CatalogError::MissingMeta(format!("deck {}", deck.code)));
        }
        if delta.is_empty() {
            return Ok(());
        }

        apply(deck);

        if let Some(meta) = deck.mtgjson_api_meta.as_mut() {
            meta.touch();
        }
        self.replace(deck)
    }

    // -- Hydration ---------------------------------------------------------

    /// Resolve the deck's board references into full card records.
    ///
    /// Collects the deduplicated id set across all three boards, performs one
    /// batched card lookup, and redistributes the results per board by
    /// quantity-map membership. Ids that no longer resolve (cards deleted
    /// since the reference was created) are silently dropped from the output;
    /// the persisted quantity maps are untouched. An empty reference set
    /// returns empty contents without a persistence call.
    pub fn contents(&self, deck: &Deck) -> Result<DeckContents> {
        if deck.code.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "deck requires a code".to_string(),
            ));
        }

        let ids = deck.boards.all_card_ids();
        if ids.is_empty() {
            return Ok(DeckContents::default());
        }

        let docs = self.store.find_many(CARD_COLLECTION, CARD_KEY_PATH, &ids)?;

        let mut contents = DeckContents::default();
        for doc in docs {
            let card: Card = from_doc(doc)?;
            let id = card.uuid().to_string();

            for board in Board::ALL {
                if let Some(&quantity) = deck.boards.board(board).get(&id) {
                    if quantity > 0 {
                        contents.board_mut(board).insert(
                            id.clone(),
                            DeckContentEntry {
                                quantity,
                                card: card.clone(),
                            },
                        );
                    }
                }
            }
        }

        Ok(contents)
    }
}
