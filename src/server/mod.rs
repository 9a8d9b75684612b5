//! Axum HTTP trigger surface: routing, handlers, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with the invocation and health routes.
//! - Inject shared application state (`AppState`) into handlers.
//! - Map the two error tiers onto HTTP statuses.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
