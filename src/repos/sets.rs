//! Set repository: owner-scoped CRUD, content-list mutation, and hydration
//! for the `set` collection.

use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::models::{meta, ApiMeta, Card, Set};
use crate::store::{from_doc, DocumentStore, Filter};

use super::cards::{CARD_COLLECTION, CARD_KEY_PATH};
use super::resolve_owner;

pub const SET_COLLECTION: &str = "set";
pub const SET_KEY_PATH: &str = "$.code";

// ---------------------------------------------------------------------------
// SetRepository
// ---------------------------------------------------------------------------

pub struct SetRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> SetRepository<'a> {
    /// Create a new `SetRepository` bound to the given store.
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Fetch a single set by code, optionally narrowed to an owner.
    pub fn get(&self, code: &str, owner: Option<&str>) -> Result<Set> {
        let filter = Filter::key(SET_KEY_PATH, code).owner(owner);
        match self.store.find_one(SET_COLLECTION, &filter)? {
            Some(doc) => from_doc(doc),
            None => Err(CatalogError::NotFound(format!("set {}", code))),
        }
    }

    /// Fetch many sets in one batched lookup. Result order is unspecified.
    pub fn get_many(&self, codes: &[String]) -> Result<Vec<Set>> {
        let docs = self.store.find_many(SET_COLLECTION, SET_KEY_PATH, codes)?;
        if docs.is_empty() {
            return Err(CatalogError::NotFound(
                "no sets matched the requested codes".to_string(),
            ));
        }
        docs.into_iter().map(from_doc).collect()
    }

    /// Insert a new set.
    ///
    /// The set must carry a name and a code and must not already exist under
    /// that code within the owner scope.
    pub fn create(&self, set: &mut Set, owner: Option<&str>) -> Result<()> {
        if set.name.is_empty() || set.code.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "set requires a name and a code".to_string(),
            ));
        }

        let owner = resolve_owner(self.store, owner)?;

        match self.get(&set.code, Some(&owner)) {
            Err(CatalogError::NotFound(_)) => {}
            Ok(_) => return Err(CatalogError::AlreadyExists(format!("set {}", set.code))),
            Err(e) => return Err(e),
        }

        if set.release_date.is_none() {
            set.release_date = Some(meta::timestamp());
        }
        set.mtgjson_api_meta = Some(ApiMeta::stamp(&owner, "Set", None));

        let doc: Value = serde_json::to_value(&*set)?;
        self.store.insert(SET_COLLECTION, &doc)
    }

    /// Replace the entire set document matching the set's code.
    ///
    /// When the set carries metadata the filter is narrowed to its owner, so
    /// another principal's set under the same code is never touched.
    pub fn replace(&self, set: &Set) -> Result<()> {
        if set.code.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "set requires a code".to_string(),
            ));
        }

        let doc: Value = serde_json::to_value(set)?;
        let owner = set.mtgjson_api_meta.as_ref().map(|m| m.owner.as_str());
        let filter = Filter::key(SET_KEY_PATH, &set.code).owner(owner);
        let replaced = self.store.replace(SET_COLLECTION, &filter, &doc)?;
        if replaced < 1 {
            return Err(CatalogError::UpdateFailed(format!("set {}", set.code)));
        }
        Ok(())
    }

    /// Delete a set by code, optionally within an owner scope.
    pub fn delete(&self, code: &str, owner: Option<&str>) -> Result<()> {
        self.get(code, owner)?;

        let filter = Filter::key(SET_KEY_PATH, code).owner(owner);
        let deleted = self.store.delete(SET_COLLECTION, &filter)?;
        if deleted < 1 {
            return Err(CatalogError::DeleteFailed(format!("set {}", code)));
        }
        Ok(())
    }

    /// List sets in the collection, unfiltered by owner.
    pub fn list(&self, limit: i64) -> Result<Vec<Set>> {
        let docs = self.store.list_all(SET_COLLECTION, limit)?;
        if docs.is_empty() {
            return Err(CatalogError::NotFound("no sets in collection".to_string()));
        }
        docs.into_iter().map(from_doc).collect()
    }

    // -- Content mutation ---------------------------------------------------

    /// Append card ids to the set's content list and persist.
    ///
    /// An empty input is a no-op and consumes no persistence call.
    pub fn add_cards(&self, set: &mut Set, new_cards: &[String]) -> Result<()> {
        if new_cards.is_empty() {
            return Ok(());
        }
        self.mutate_contents(set, |set| {
            set.content_ids.extend(new_cards.iter().cloned());
        })
    }

    /// Remove every occurrence of the given card ids from the set's content
    /// list and persist. An empty input is a no-op.
    pub fn remove_cards(&self, set: &mut Set, cards: &[String]) -> Result<()> {
        if cards.is_empty() {
            return Ok(());
        }
        self.mutate_contents(set, |set| {
            set.content_ids.retain(|id| !cards.contains(id));
        })
    }

    /// Shared mutate-stamp-replace flow for content mutation.
    fn mutate_contents<F>(&self, set: &mut Set, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Set),
    {
        if set.code.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "set requires a code".to_string(),
            ));
        }
        if set.mtgjson_api_meta.is_none() {
            return Err(CatalogError::MissingMeta(format!("set {}", set.code)));
        }

        apply(set);

        if let Some(meta) = set.mtgjson_api_meta.as_mut() {
            meta.touch();
        }
        self.replace(set)
    }

    // -- Hydration ---------------------------------------------------------

    /// Resolve the set's content ids into full card records in one batched
    /// lookup. Ids that no longer resolve are silently dropped; the persisted
    /// content list is untouched. An empty content list returns an empty
    /// vector without a persistence call.
    pub fn contents(&self, set: &Set) -> Result<Vec<Card>> {
        if set.code.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "set requires a code".to_string(),
            ));
        }
        if set.content_ids.is_empty() {
            return Ok(Vec::new());
        }

        let docs = self
            .store
            .find_many(CARD_COLLECTION, CARD_KEY_PATH, &set.content_ids)?;
        docs.into_iter().map(from_doc).collect()
    }
}
