//! Request header derivation.
//!
//! Recomputed on every call from the token store so a login or logout in the
//! middle of a session is reflected by the very next request. Never cached.

use crate::auth::token::TokenStore;

/// Base headers for authenticated JSON requests: always the JSON content
/// type, plus a bearer authorization entry when a token is stored.
pub fn auth_headers(tokens: &TokenStore) -> Vec<(&'static str, String)> {
    let mut headers = vec![("Content-Type", "application/json".to_string())];
    if let Some(token) = tokens.get() {
        headers.push(("Authorization", format!("Bearer {token}")));
    }
    headers
}

/// Merge caller-supplied headers over the base set. The caller wins on a
/// name conflict (names compared case-insensitively, as HTTP does).
pub fn merge_headers(
    base: Vec<(&'static str, String)>,
    extras: &[(&'static str, String)],
) -> Vec<(&'static str, String)> {
    let mut merged: Vec<(&'static str, String)> = base
        .into_iter()
        .filter(|(name, _)| {
            !extras
                .iter()
                .any(|(extra, _)| extra.eq_ignore_ascii_case(name))
        })
        .collect();
    merged.extend(extras.iter().cloned());
    merged
}

// ── Tests ────────────────────────────────────────────────────────
