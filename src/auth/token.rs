//! File-backed bearer token storage.
//!
//! One fixed file holds the raw token string; nothing else is persisted
//! between runs. Every read goes back to disk, so concurrent holders of the
//! same path (client, session controller) always observe the latest value.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Durable store for the single authentication token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// A store over the given token file. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The current token, or `None` when logged out. Read failures and
    /// blank files degrade to `None` rather than erroring.
    pub fn get(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Persist a token, replacing any previous one.
    pub fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create token dir: {}", parent.display()))?;
        }
        std::fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token file: {}", self.path.display()))
    }

    /// Remove the stored token. Removing an absent token is a no-op.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to clear token: {}", self.path.display()))
            }
        }
    }

    /// True when a token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

// ── Tests ────────────────────────────────────────────────────────
