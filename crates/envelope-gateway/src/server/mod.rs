//! Axum HTTP server, routing, and the payload binding.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Bind request and response bodies to encrypted envelopes ([`binding`]).
//! - Inject shared application state (`AppState`) into handlers.

pub mod binding;
pub mod handlers;
pub mod router;
pub mod state;
