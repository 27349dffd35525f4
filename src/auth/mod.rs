//! Authentication: token persistence, header derivation, session lifecycle.
//!
//! Provides:
//! - A file-backed store for the single bearer token
//! - Per-request header derivation (JSON content type + bearer auth)
//! - The login / logout / restore state machine used by the UI layer
//!
//! ## Design Decisions
//! - The token is an opaque string from the backend; no expiry, validation,
//!   or encoding is applied client-side.
//! - Headers are recomputed from storage on every request, never cached.

pub mod headers;
pub mod session;
pub mod token;

pub use session::{SessionController, SessionState};
pub use token::TokenStore;
