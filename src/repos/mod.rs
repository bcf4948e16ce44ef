//! Entity repositories: owner-scoped CRUD over one document collection each,
//! plus board reconciliation and content hydration for decks and sets.
//!
//! Each repository is a lightweight wrapper borrowing its
//! [`DocumentStore`](crate::store::DocumentStore); nothing here keeps state
//! between calls and every operation performs at most the persistence round
//! trips it documents.

pub mod cards;
pub mod decks;
pub mod sets;
pub mod users;

pub use cards::CardRepository;
pub use decks::DeckRepository;
pub use sets::SetRepository;
pub use users::UserRepository;

use crate::error::{CatalogError, Result};
use crate::models::SYSTEM_USER;
use crate::store::DocumentStore;

/// Resolve the owner principal for a `create` call.
///
/// An empty or absent owner defaults to the system principal. Any other
/// principal must exist as a user, otherwise
/// [`OwnerNotFound`](CatalogError::OwnerNotFound) is returned.
pub(crate) fn resolve_owner(store: &dyn DocumentStore, owner: Option<&str>) -> Result<String> {
    let owner = match owner {
        Some(o) if !o.is_empty() => o,
        _ => SYSTEM_USER,
    };

    if owner != SYSTEM_USER {
        match UserRepository::new(store).get(owner) {
            Ok(_) => {}
            Err(CatalogError::NotFound(_)) => {
                return Err(CatalogError::OwnerNotFound(owner.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(owner.to_string())
}
