//! Shared application state injected into every Axum handler.

use axum::extract::FromRef;

use crate::key::SecretKey;

/// Application state shared across all request handlers.
///
/// Cheaply cloneable (the key is `Arc`-backed) so that Axum can clone the
/// state for each request without copying key material.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The immutable payload encryption key, set once at startup.
    pub key: SecretKey,
}

impl AppState {
    /// Create a new [`AppState`] holding the payload key.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }
}

/// Lets extractors that only need the key, such as the payload binding, pull
/// it straight out of the full state.
impl FromRef<AppState> for SecretKey {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
