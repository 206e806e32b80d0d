//! Mock authentication.
//!
//! Users log in with email and plaintext password and receive an opaque bearer token of the form
//! `mock-token-<uuid>`. Tokens live in memory until logout or restart.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use super::store::ClinicStore;
use crate::components::directory::User;
use crate::constants::MOCK_TOKEN_PREFIX;
use crate::{ClinicError, ClinicResult};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<ClinicStore>,
    /// token -> user id
    sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl AuthService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self {
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns a fresh token and the logged-in user.
    ///
    /// Email comparison ignores case and surrounding whitespace; passwords must match exactly.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidCredentials` for an unknown email or a wrong password.
    pub fn login(&self, email: &str, password: &str) -> ClinicResult<(String, User)> {
        let email = email.trim();
        let user = self
            .store
            .users
            .list()?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.password == password)
            .ok_or_else(|| {
                tracing::warn!(email, "login rejected");
                ClinicError::InvalidCredentials
            })?;

        let token = format!("{MOCK_TOKEN_PREFIX}{}", Uuid::new_v4());
        self.sessions
            .write()
            .map_err(|_| ClinicError::LockPoisoned("session"))?
            .insert(token.clone(), user.id.clone());

        tracing::info!(user_id = %user.id, role = ?user.role, "user logged in");
        Ok((token, user))
    }

    /// Resolves a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::Unauthorised` for an unknown token, or a token whose user has since
    /// been removed.
    pub fn authenticate(&self, token: &str) -> ClinicResult<User> {
        let user_id = self
            .sessions
            .read()
            .map_err(|_| ClinicError::LockPoisoned("session"))?
            .get(token)
            .cloned()
            .ok_or(ClinicError::Unauthorised)?;

        self.store
            .users
            .get(&user_id)?
            .ok_or(ClinicError::Unauthorised)
    }

    /// Ends the session. Returns whether the token was known.
    pub fn logout(&self, token: &str) -> ClinicResult<bool> {
        let removed = self
            .sessions
            .write()
            .map_err(|_| ClinicError::LockPoisoned("session"))?
            .remove(token);

        if let Some(user_id) = &removed {
            tracing::info!(user_id = %user_id, "user logged out");
        }
        Ok(removed.is_some())
    }
}
