//! Data-access layer for an MTGJSON-style trading-card catalog.
//!
//! Cards, sets, decks, and users are stored as JSON documents keyed by their
//! natural identifier (card UUID, set code, deck code, user email), with
//! ownership-scoped multi-tenancy. Deck boards are id -> quantity maps;
//! adding and removing cards reconciles quantity deltas into those maps, and
//! hydration resolves the referenced ids into full card records in a single
//! batched lookup.
//!
//! # Quick start
//!
//! ```no_run
//! use mtgjson_catalog::{Board, Card, Catalog, Deck};
//! use std::collections::BTreeMap;
//!
//! let catalog = Catalog::builder().in_memory(true).build().unwrap();
//!
//! let mut card = Card::new("Lightning Bolt", "a1b2c3d4-e5f6-5789-9abc-def012345678");
//! catalog.cards().create(&mut card, None).unwrap();
//!
//! let mut deck = Deck::new("DCK1", "Burn");
//! catalog.decks().create(&mut deck, None).unwrap();
//!
//! let delta = BTreeMap::from([(card.uuid().to_string(), 4)]);
//! catalog.decks().add_cards(&mut deck, Board::Mainboard, &delta).unwrap();
//!
//! let contents = catalog.decks().contents(&deck).unwrap();
//! assert_eq!(contents.board(Board::Mainboard)[card.uuid()].quantity, 4);
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repos;
pub mod store;
pub mod validate;

pub use auth::{AuthClient, TokenSet, Userinfo};
pub use config::{AuthConfig, Config, StoreConfig};
pub use error::{CatalogError, Result};
pub use models::{
    ApiMeta, Board, Card, Deck, DeckBoards, DeckContentEntry, DeckContents, Set, User, SYSTEM_USER,
};
pub use repos::{CardRepository, DeckRepository, SetRepository, UserRepository};
pub use store::{DocumentStore, DuckStore, Filter};
pub use validate::{validate_email, validate_uuid};

use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Catalog`] instance.
///
/// Use [`Catalog::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CatalogBuilder::build).
#[derive(Default)]
pub struct CatalogBuilder {
    store_path: Option<PathBuf>,
    in_memory: bool,
    auth: Option<AuthConfig>,
}

impl CatalogBuilder {
    /// Set the path of the on-disk document store.
    ///
    /// If neither this nor [`in_memory`](Self::in_memory) is set, the
    /// platform-appropriate default data path is used.
    pub fn store_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use an in-memory document store. All data is discarded on drop.
    pub fn in_memory(mut self, in_memory: bool) -> Self {
        self.in_memory = in_memory;
        self
    }

    /// Configure the identity-provider bridge. Without this, the catalog has
    /// no [`AuthClient`] and the registration/login operations are
    /// unavailable.
    pub fn auth(mut self, config: AuthConfig) -> Self {
        self.auth = Some(config);
        self
    }

    /// Populate the builder from a loaded [`Config`].
    ///
    /// A config without a store path means an in-memory store.
    pub fn from_config(config: Config) -> Self {
        Self {
            in_memory: config.store.path.is_none(),
            store_path: config.store.path,
            auth: Some(config.auth),
        }
    }

    /// Build the catalog, opening the document store.
    pub fn build(self) -> Result<Catalog> {
        let store = if self.in_memory {
            DuckStore::in_memory()?
        } else {
            let path = self.store_path.unwrap_or_else(config::default_store_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            DuckStore::open(path)?
        };

        let auth = match self.auth {
            Some(cfg) if !cfg.domain.is_empty() => Some(AuthClient::new(&cfg)?),
            _ => None,
        };

        Ok(Catalog { store, auth })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The main entry point of the catalog data-access layer.
///
/// Owns the document store (and the optional identity-provider client) and
/// exposes the entity repositories as lightweight borrowing wrappers.
pub struct Catalog {
    store: DuckStore,
    auth: Option<AuthClient>,
}

impl Catalog {
    /// Create a new builder for configuring the catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Access the card repository.
    pub fn cards(&self) -> CardRepository<'_> {
        CardRepository::new(&self.store)
    }

    /// Access the set repository.
    pub fn sets(&self) -> SetRepository<'_> {
        SetRepository::new(&self.store)
    }

    /// Access the deck repository.
    pub fn decks(&self) -> DeckRepository<'_> {
        DeckRepository::new(&self.store)
    }

    /// Access the user repository.
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.store)
    }

    /// The identity-provider client, if one was configured.
    pub fn auth(&self) -> Option<&AuthClient> {
        self.auth.as_ref()
    }

    /// The underlying document store, for advanced usage.
    pub fn store(&self) -> &dyn DocumentStore {
        &self.store
    }
}
