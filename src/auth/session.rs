//! Session lifecycle orchestration.
//!
//! A small state machine over [`TokenStore`] + [`ApiClient`]:
//! `Anonymous → Restoring → Authenticated`, with an `Error` state for the
//! last failed auth operation. Presence of a stored token is what
//! "authenticated" means; the user record is fetched separately and may
//! lag behind the token.

use crate::api::error::ApiError;
use crate::api::ApiClient;
use crate::auth::token::TokenStore;
use crate::models::User;

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token held.
    Anonymous,
    /// Startup: checking the token store.
    Restoring,
    /// A token is held; the user record may or may not be populated yet.
    Authenticated,
    /// The last auth operation failed; see `last_error`.
    Error,
}

/// Orchestrates login, logout and session restore.
pub struct SessionController {
    tokens: TokenStore,
    state: SessionState,
    current_user: Option<User>,
    last_error: Option<String>,
}

impl SessionController {
    pub fn new(tokens: TokenStore) -> Self {
        Self {
            tokens,
            state: SessionState::Anonymous,
            current_user: None,
            last_error: None,
        }
    }

    /// Startup restore: a stored token is taken at face value and the
    /// session becomes authenticated without a revalidation round-trip
    /// (the wire protocol has no current-user endpoint to check it against).
    pub fn restore(&mut self) -> SessionState {
        self.state = SessionState::Restoring;
        self.state = if self.tokens.is_authenticated() {
            tracing::debug!("restored session from stored token");
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        self.state
    }

    /// Persist a freshly issued token and enter the authenticated state,
    /// clearing any earlier auth error.
    pub fn login(&mut self, token: &str) -> anyhow::Result<()> {
        self.tokens.set(token)?;
        self.state = SessionState::Authenticated;
        self.last_error = None;
        Ok(())
    }

    /// Populate the current user from the backend. On failure the session
    /// is logged out, the error state records the message, and the original
    /// failure is handed back to the caller.
    pub async fn fetch_current_user(
        &mut self,
        api: &ApiClient,
        user_id: i64,
    ) -> Result<User, ApiError> {
        match api.get_user(user_id).await {
            Ok(user) => {
                self.current_user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.logout();
                self.state = SessionState::Error;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Drop the token and the in-memory user. Always succeeds: a storage
    /// failure is logged but local state clears regardless.
    pub fn logout(&mut self) {
        if let Err(e) = self.tokens.clear() {
            tracing::warn!("failed to clear stored token: {e:#}");
        }
        self.current_user = None;
        self.state = SessionState::Anonymous;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The token currently held, read through the store.
    pub fn token(&self) -> Option<String> {
        self.tokens.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Message from the last failed auth operation, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ── Tests ────────────────────────────────────────────────────────
