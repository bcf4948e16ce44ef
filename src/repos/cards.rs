//! Card repository: owner-scoped CRUD over the `card` collection.
//!
//! Cards are keyed by their MTGJSON v4 id; the key is format-validated
//! before any persistence call is made.

use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::models::{ApiMeta, Card};
use crate::store::{from_doc, DocumentStore, Filter};
use crate::validate::validate_uuid;

use super::resolve_owner;

pub const CARD_COLLECTION: &str = "card";
pub const CARD_KEY_PATH: &str = "$.identifiers.mtgjsonV4Id";

// ---------------------------------------------------------------------------
// CardRepository
// ---------------------------------------------------------------------------

pub struct CardRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CardRepository<'a> {
    /// Create a new `CardRepository` bound to the given store.
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Fetch a single card by its MTGJSON v4 id.
    ///
    /// When `owner` is a non-empty principal the lookup is narrowed to cards
    /// owned by it; `None` means no ownership filter.
    pub fn get(&self, uuid: &str, owner: Option<&str>) -> Result<Card> {
        if !validate_uuid(uuid) {
            return Err(CatalogError::InvalidUuid(uuid.to_string()));
        }

        let filter = Filter::key(CARD_KEY_PATH, uuid).owner(owner);
        match self.store.find_one(CARD_COLLECTION, &filter)? {
            Some(doc) => from_doc(doc),
            None => Err(CatalogError::NotFound(format!("card {}", uuid))),
        }
    }

    /// Fetch many cards in one batched lookup.
    ///
    /// Result order is unspecified. Returns `NotFound` when no id resolves.
    pub fn get_many(&self, uuids: &[String]) -> Result<Vec<Card>> {
        let docs = self.store.find_many(CARD_COLLECTION, CARD_KEY_PATH, uuids)?;
        if docs.is_empty() {
            return Err(CatalogError::NotFound(
                "no cards matched the requested ids".to_string(),
            ));
        }
        docs.into_iter().map(from_doc).collect()
    }

    /// Insert a new card.
    ///
    /// The card must carry a name and a valid MTGJSON v4 id, and must not
    /// already exist under that id within the owner scope. Metadata is
    /// stamped on the model before insertion.
    pub fn create(&self, card: &mut Card, owner: Option<&str>) -> Result<()> {
        if card.name.is_empty() || card.uuid().is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "card requires a name and an mtgjsonV4Id".to_string(),
            ));
        }
        if !validate_uuid(card.uuid()) {
            return Err(CatalogError::InvalidUuid(card.uuid().to_string()));
        }

        let owner = resolve_owner(self.store, owner)?;

        match self.get(card.uuid(), Some(&owner)) {
            Err(CatalogError::NotFound(_)) => {}
            Ok(_) => return Err(CatalogError::AlreadyExists(format!("card {}", card.uuid()))),
            Err(e) => return Err(e),
        }

        card.mtgjson_api_meta = Some(ApiMeta::stamp(&owner, "Card", Some("Set")));

        let doc: Value = serde_json::to_value(&*card)?;
        self.store.insert(CARD_COLLECTION, &doc)
    }

    /// Delete a card by id, optionally within an owner scope.
    ///
    /// A preceding existence probe distinguishes `NotFound` from a delete
    /// that matched but removed nothing (`DeleteFailed`).
    pub fn delete(&self, uuid: &str, owner: Option<&str>) -> Result<()> {
        self.get(uuid, owner)?;

        let filter = Filter::key(CARD_KEY_PATH, uuid).owner(owner);
        let deleted = self.store.delete(CARD_COLLECTION, &filter)?;
        if deleted < 1 {
            return Err(CatalogError::DeleteFailed(format!("card {}", uuid)));
        }
        Ok(())
    }

    /// List cards in the collection, unfiltered by owner.
    pub fn list(&self, limit: i64) -> Result<Vec<Card>> {
        let docs = self.store.list_all(CARD_COLLECTION, limit)?;
        if docs.is_empty() {
            return Err(CatalogError::NotFound("no cards in collection".to_string()));
        }
        docs.into_iter().map(from_doc).collect()
    }
}
