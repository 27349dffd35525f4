//! Client configuration.
//!
//! Everything is read from environment variables in one place: a base URL
//! selecting the remote host, a switch for the in-memory mock fallback, and
//! the location of the token file.

use std::path::PathBuf;

/// Default backend when `INVENTARIO_API_BASE_URL` is unset.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Settings for [`crate::api::ApiClient`] and the token store.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub base_url: String,
    /// When true, transport-level unreachability falls back to the
    /// in-memory mock backend instead of failing.
    pub mock_fallback: bool,
    /// Where the bearer token is persisted between runs.
    pub token_path: PathBuf,
}

impl ClientConfig {
    /// Load from environment variables, with defaults for everything:
    /// - `INVENTARIO_API_BASE_URL`: backend host (default localhost:8000)
    /// - `INVENTARIO_MOCK_FALLBACK`: `1`/`true`/`yes` enables the mock
    /// - `INVENTARIO_TOKEN_FILE`: token file override
    pub fn from_env() -> Self {
        let base_url = std::env::var("INVENTARIO_API_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mock_fallback = std::env::var("INVENTARIO_MOCK_FALLBACK")
            .map(|value| env_flag(&value))
            .unwrap_or(false);

        let token_path = std::env::var("INVENTARIO_TOKEN_FILE")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_token_path);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            mock_fallback,
            token_path,
        }
    }

    /// Platform data dir (`~/.local/share/inventario/token` on Linux), with
    /// a working-directory fallback for odd environments without a home.
    fn default_token_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "inventario")
            .map(|dirs| dirs.data_dir().join("token"))
            .unwrap_or_else(|| PathBuf::from(".inventario-token"))
    }
}

/// Truthy values accepted for boolean env switches.
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ── Tests ────────────────────────────────────────────────────────
