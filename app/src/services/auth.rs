//! Authentication against the static allow-list, and the login session
//!
//! This is a convenience gate for a shared shop computer, not a security
//! boundary: PINs are compared in plain text.

use std::sync::Arc;

use shared::{AuthorizedUser, User};

use crate::error::{AppError, AppResult};
use crate::storage::BlobStore;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: Vec<AuthorizedUser>,
}

impl AuthService {
    pub fn new(users: Vec<AuthorizedUser>) -> Self {
        Self { users }
    }

    /// Check an email/PIN pair against the allow-list
    pub fn login(&self, email: &str, pin: &str) -> AppResult<User> {
        self.users
            .iter()
            .find(|u| u.matches(email.trim(), pin))
            .map(AuthorizedUser::to_user)
            .ok_or(AppError::InvalidCredentials)
    }
}

/// The logged-in user, persisted between runs under the session key.
///
/// Loaded once at startup and handed to every command; cleared on logout.
pub struct Session {
    store: Arc<dyn BlobStore>,
    key: String,
    user: Option<User>,
}

impl Session {
    /// Restore the session saved by a previous run, if any
    pub fn load(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let user = match store.get(&key) {
            Ok(Some(blob)) => match serde_json::from_str::<User>(&blob) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Discarding unreadable session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Error loading session: {}", e);
                None
            }
        };

        Self { store, key, user }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> AppResult<&User> {
        self.user.as_ref().ok_or(AppError::NotAuthenticated)
    }

    /// Record a successful login
    pub fn start(&mut self, user: User) -> AppResult<()> {
        self.store.set(&self.key, &serde_json::to_string(&user)?)?;
        tracing::info!(email = %user.email, "Logged in");
        self.user = Some(user);
        Ok(())
    }

    /// Log out and forget the saved session
    pub fn end(&mut self) -> AppResult<()> {
        self.store.remove(&self.key)?;
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "Logged out");
        }
        Ok(())
    }
}
