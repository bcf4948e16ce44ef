//! HTTP client for the external identity provider (an Auth0-style tenant).
//!
//! A thin adapter: each method is one blocking HTTP call with no retries.
//! Account/user correlation lives in
//! [`UserRepository`](crate::repos::UserRepository); this client only speaks
//! the provider's wire protocol.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::error::{CatalogError, Result};

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Tokens returned by a password login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Claims returned by the OIDC `/userinfo` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Userinfo {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignupResponse {
    #[serde(rename = "_id")]
    id: String,
}

// ---------------------------------------------------------------------------
// AuthClient
// ---------------------------------------------------------------------------

pub struct AuthClient {
    base_url: String,
    client_id: String,
    client_secret: String,
    audience: String,
    scope: String,
    connection: String,
    client: Client,
}

impl AuthClient {
    /// Build a client for the configured tenant.
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            base_url: config.domain.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            audience: config.audience.clone(),
            scope: config.scope.clone(),
            connection: config.connection.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sign a new account up with the provider's credential database.
    ///
    /// Returns the identity id the provider assigned to the account.
    pub fn signup(&self, username: &str, email: &str, password: &str) -> Result<String> {
        let resp = self
            .client
            .post(self.url("/dbconnections/signup"))
            .json(&serde_json::json!({
                "client_id": self.client_id,
                "connection": self.connection,
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()?;

        if !resp.status().is_success() {
            return Err(CatalogError::AuthFailed(format!(
                "signup returned {}",
                resp.status()
            )));
        }

        let body: SignupResponse = resp.json()?;
        Ok(body.id)
    }

    /// Exchange a user's credentials for a token set (password grant).
    pub fn login(&self, email: &str, password: &str) -> Result<TokenSet> {
        let resp = self
            .client
            .post(self.url("/oauth/token"))
            .json(&serde_json::json!({
                "grant_type": "password",
                "username": email,
                "password": password,
                "audience": self.audience,
                "scope": self.scope,
                "client_id": self.client_id,
                "client_secret": self.client_secret,
            }))
            .send()?;

        if !resp.status().is_success() {
            return Err(CatalogError::AuthFailed(format!(
                "login returned {}",
                resp.status()
            )));
        }

        Ok(resp.json()?)
    }

    /// Introspect an access token via the OIDC `/userinfo` endpoint.
    pub fn userinfo(&self, access_token: &str) -> Result<Userinfo> {
        let resp = self
            .client
            .get(self.url("/userinfo"))
            .bearer_auth(access_token)
            .send()?;

        if !resp.status().is_success() {
            return Err(CatalogError::AuthFailed(format!(
                "userinfo returned {}",
                resp.status()
            )));
        }

        Ok(resp.json()?)
    }

    /// Trigger a password-reset email for the given account.
    pub fn change_password(&self, email: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/dbconnections/change_password"))
            .json(&serde_json::json!({
                "client_id": self.client_id,
                "email": email,
                "connection": self.connection,
            }))
            .send()?;

        if !resp.status().is_success() {
            return Err(CatalogError::AuthFailed(format!(
                "change_password returned {}",
                resp.status()
            )));
        }
        Ok(())
    }

    /// Delete an account from the identity provider by its identity id.
    ///
    /// Uses a client-credentials management token; the local user document is
    /// not touched here.
    pub fn delete_account(&self, identity_id: &str) -> Result<()> {
        let token = self.management_token()?;

        let resp = self
            .client
            .delete(self.url(&format!("/api/v2/users/auth0|{}", identity_id)))
            .bearer_auth(token)
            .send()?;

        if !resp.status().is_success() {
            return Err(CatalogError::AuthFailed(format!(
                "delete_account returned {}",
                resp.status()
            )));
        }
        Ok(())
    }

    /// Fetch a management API token via the client-credentials grant.
    fn management_token(&self) -> Result<String> {
        let resp = self
            .client
            .post(self.url("/oauth/token"))
            .json(&serde_json::json!({
                "grant_type": "client_credentials",
                "client_id": self.client_id,
                "client_secret": self.client_secret,
                "audience": format!("{}/api/v2/", self.base_url),
            }))
            .send()?;

        if !resp.status().is_success() {
            return Err(CatalogError::AuthFailed(format!(
                "management token request returned {}",
                resp.status()
            )));
        }

        let token: TokenSet = resp.json()?;
        Ok(token.access_token)
    }
}
