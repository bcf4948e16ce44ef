use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User — keyed by email, correlated with the external identity provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    /// Id assigned by the external identity provider at signup.
    #[serde(default)]
    pub identity_id: String,
    #[serde(default)]
    pub owned_cards: Vec<String>,
    #[serde(default)]
    pub owned_sets: Vec<String>,
    #[serde(default)]
    pub owned_decks: Vec<String>,
}

impl User {
    /// Construct a user with empty owned-entity collections.
    pub fn new(username: &str, email: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            ..Self::default()
        }
    }
}
