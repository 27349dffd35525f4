//! Error taxonomy for the API client.
//!
//! Every failure surfaces as one human-readable message via `Display`;
//! callers that need to branch (the fallback policy, the CLI exit paths)
//! match on the variant instead of parsing strings.

use thiserror::Error;

/// Failures produced by [`crate::api::ApiClient`] and the mock backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The exchange completed but the server answered non-2xx. `detail` is
    /// the server's `detail` body field when present, a generic message
    /// otherwise.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    /// The server could not be reached at all (connection refused, host
    /// down). Distinct from an HTTP error response; this is the variant
    /// the mock fallback keys on.
    #[error("could not reach server at {0}")]
    Unreachable(String),

    /// Login rejected. One message for both wrong email and wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A record lookup or update targeted an id that does not exist.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Client-side input validation failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// Transport failure other than reachability (e.g. the connection died
    /// mid-body). Propagated unchanged.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A response or mock payload did not decode into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// True when the failure means the host was unreachable at the
    /// transport level, as opposed to a completed exchange that failed.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_server_detail() {
        let err = ApiError::Http {
            status: 422,
            detail: "preco must be positive".into(),
        };
        assert_eq!(err.to_string(), "preco must be positive");
    }

    #[test]
    fn credential_error_names_neither_field() {
        let message = ApiError::InvalidCredentials.to_string();
        assert!(!message.contains("email only"));
        assert_eq!(message, "invalid email or password");
    }

    #[test]
    fn unreachable_mentions_the_base_url() {
        let err = ApiError::Unreachable("http://localhost:8000".into());
        assert!(err.to_string().contains("http://localhost:8000"));
        assert!(err.is_unreachable());
    }

    #[test]
    fn not_found_names_resource_and_id() {
        let err = ApiError::NotFound {
            resource: "produto",
            id: 42,
        };
        assert_eq!(err.to_string(), "produto 42 not found");
    }
}
