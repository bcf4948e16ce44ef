//! User repository: CRUD over the `user` collection plus the bridge to the
//! external identity provider.
//!
//! Users are keyed by email and are not owner-scoped; the ownership predicate
//! applies to the catalog entities they own, not to user documents.

use serde_json::Value;

use crate::auth::{AuthClient, TokenSet};
use crate::error::{CatalogError, Result};
use crate::models::User;
use crate::store::{from_doc, DocumentStore, Filter};
use crate::validate::validate_email;

pub const USER_COLLECTION: &str = "user";
pub const USER_KEY_PATH: &str = "$.email";

/// Minimum accepted password length for registration.
pub const MIN_PASSWORD_LEN: usize = 12;

// ---------------------------------------------------------------------------
// UserRepository
// ---------------------------------------------------------------------------

pub struct UserRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new `UserRepository` bound to the given store.
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Fetch a user by email. The email is format-validated before any
    /// persistence call.
    pub fn get(&self, email: &str) -> Result<User> {
        if email.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "user requires an email".to_string(),
            ));
        }
        if !validate_email(email) {
            return Err(CatalogError::InvalidEmail(email.to_string()));
        }

        let filter = Filter::key(USER_KEY_PATH, email);
        match self.store.find_one(USER_COLLECTION, &filter)? {
            Some(doc) => from_doc(doc),
            None => Err(CatalogError::NotFound(format!("user {}", email))),
        }
    }

    /// Fetch many users in one batched lookup. Result order is unspecified.
    pub fn get_many(&self, emails: &[String]) -> Result<Vec<User>> {
        let docs = self.store.find_many(USER_COLLECTION, USER_KEY_PATH, emails)?;
        if docs.is_empty() {
            return Err(CatalogError::NotFound(
                "no users matched the requested emails".to_string(),
            ));
        }
        docs.into_iter().map(from_doc).collect()
    }

    /// Insert a new user document.
    ///
    /// The user must carry a username, a valid email, and the identity id
    /// assigned by the identity provider at signup.
    pub fn create(&self, user: &User) -> Result<()> {
        if user.username.is_empty() || user.email.is_empty() || user.identity_id.is_empty() {
            return Err(CatalogError::MissingIdentifier(
                "user requires a username, an email, and an identity id".to_string(),
            ));
        }
        if !validate_email(&user.email) {
            return Err(CatalogError::InvalidEmail(user.email.clone()));
        }

        match self.get(&user.email) {
            Err(CatalogError::NotFound(_)) => {}
            Ok(_) => return Err(CatalogError::AlreadyExists(format!("user {}", user.email))),
            Err(e) => return Err(e),
        }

        let doc: Value = serde_json::to_value(user)?;
        self.store.insert(USER_COLLECTION, &doc)
    }

    /// Delete a user document by email.
    ///
    /// Does not touch the identity provider; see
    /// [`deactivate`](Self::deactivate) for full account removal.
    pub fn delete(&self, email: &str) -> Result<()> {
        self.get(email)?;

        let filter = Filter::key(USER_KEY_PATH, email);
        let deleted = self.store.delete(USER_COLLECTION, &filter)?;
        if deleted < 1 {
            return Err(CatalogError::DeleteFailed(format!("user {}", email)));
        }
        Ok(())
    }

    /// List users in the collection.
    pub fn list(&self, limit: i64) -> Result<Vec<User>> {
        let docs = self.store.list_all(USER_COLLECTION, limit)?;
        if docs.is_empty() {
            return Err(CatalogError::NotFound("no users in collection".to_string()));
        }
        docs.into_iter().map(from_doc).collect()
    }

    // -- Identity provider bridge ------------------------------------------

    /// Register a new account: sign the credentials up with the identity
    /// provider, then store the correlated user document.
    ///
    /// The email shape and password length are checked before any network
    /// call is made.
    pub fn register(
        &self,
        auth: &AuthClient,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User> {
        if !validate_email(email) {
            return Err(CatalogError::InvalidEmail(email.to_string()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(CatalogError::PasswordTooShort);
        }

        let identity_id = auth.signup(username, email, password)?;

        let mut user = User::new(username, email);
        user.identity_id = identity_id;

        self.create(&user)?;
        Ok(user)
    }

    /// Log a user in and return the identity provider's token set.
    ///
    /// The user must exist locally before the credential exchange is
    /// attempted.
    pub fn login(&self, auth: &AuthClient, email: &str, password: &str) -> Result<TokenSet> {
        self.get(email)?;
        auth.login(email, password)
    }

    /// Remove an account entirely: the local user document first, then the
    /// identity-provider account.
    pub fn deactivate(&self, auth: &AuthClient, email: &str) -> Result<()> {
        let user = self.get(email)?;
        self.delete(email)?;
        auth.delete_account(&user.identity_id)
    }

    /// Trigger a password-reset email for an existing user.
    pub fn reset_password(&self, auth: &AuthClient, email: &str) -> Result<()> {
        self.get(email)?;
        auth.change_password(email)
    }
}
