use serde::{Deserialize, Serialize};

use super::meta::ApiMeta;

// ---------------------------------------------------------------------------
// Set — keyed by its code, referencing cards by id
// ---------------------------------------------------------------------------

/// A card set. `content_ids` is the persisted source of truth; the hydrated
/// card records are derived on demand and never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub content_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtgjson_api_meta: Option<ApiMeta>,
}

impl Set {
    /// Construct a set with the given code and name and no contents.
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }
}
