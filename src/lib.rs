//! API client core for the Gestor de Inventário dashboard.
//!
//! The rendering layer calls the typed methods on [`api::ApiClient`] and the
//! login/logout/restore operations on [`auth::SessionController`], and shows
//! whatever records or error messages come back; all protocol knowledge
//! lives here.
//!
//! Two backends sit behind one request interface: the live REST server, and
//! an in-memory mock that takes over when the server is unreachable and
//! mock mode is enabled.

pub mod api;
pub mod auth;
pub mod config;
pub mod mock;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{SessionController, SessionState, TokenStore};
pub use config::ClientConfig;
pub use mock::MockBackend;
