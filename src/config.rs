//! Configuration for the catalog store and the identity provider.
//!
//! Configuration is a plain serde structure loaded from a JSON file or from
//! environment variables; nothing here is global state. The resulting
//! [`Config`] is handed to [`CatalogBuilder::from_config`](crate::CatalogBuilder::from_config).

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Connection name used for the identity provider's username/password store.
pub const DEFAULT_AUTH_CONNECTION: &str = "Username-Password-Authentication";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub auth: AuthConfig,
}

/// Where the DuckDB-backed document store lives. `path: None` means an
/// in-memory database that is discarded on drop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the identity provider tenant, e.g. `https://tenant.auth0.com`.
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
    /// The API audience requested during password logins.
    pub audience: String,
    /// Space-separated scopes requested during password logins.
    pub scope: String,
    pub connection: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            audience: String::new(),
            scope: String::new(),
            connection: DEFAULT_AUTH_CONNECTION.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Build configuration from `MTGJSON_*` environment variables.
    ///
    /// Unset variables keep their defaults, so partial environments work
    /// (e.g. store path only, no identity provider).
    pub fn from_env() -> Self {
        let mut cfg = Config::default();

        if let Ok(path) = env::var("MTGJSON_STORE_PATH") {
            cfg.store.path = Some(PathBuf::from(path));
        }
        if let Ok(domain) = env::var("MTGJSON_AUTH_DOMAIN") {
            cfg.auth.domain = domain;
        }
        if let Ok(id) = env::var("MTGJSON_AUTH_CLIENT_ID") {
            cfg.auth.client_id = id;
        }
        if let Ok(secret) = env::var("MTGJSON_AUTH_CLIENT_SECRET") {
            cfg.auth.client_secret = secret;
        }
        if let Ok(audience) = env::var("MTGJSON_AUTH_AUDIENCE") {
            cfg.auth.audience = audience;
        }
        if let Ok(scope) = env::var("MTGJSON_AUTH_SCOPE") {
            cfg.auth.scope = scope;
        }

        cfg
    }
}

/// Default location of the config file
/// (e.g. `~/.config/mtgjson-catalog/config.json` on Linux).
pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        dir.join("mtgjson-catalog").join("config.json")
    } else {
        PathBuf::from("mtgjson-catalog.json")
    }
}

/// Default location of the on-disk document store
/// (e.g. `~/.local/share/mtgjson-catalog/catalog.duckdb` on Linux).
pub fn default_store_path() -> PathBuf {
    if let Some(dir) = dirs::data_dir() {
        dir.join("mtgjson-catalog").join("catalog.duckdb")
    } else {
        PathBuf::from("catalog.duckdb")
    }
}
