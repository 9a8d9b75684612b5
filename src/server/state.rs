//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::function::EnvelopeDecryptor;

/// Application state shared across all request handlers.
///
/// The decryptor is built once at startup and immutable afterwards, so the
/// state is safe to clone into concurrently served invocations.
#[derive(Clone)]
pub struct AppState {
    /// The envelope decryption flow, holding config and the KMS collaborator.
    pub decryptor: Arc<EnvelopeDecryptor>,
}

impl AppState {
    /// Create a new [`AppState`] wrapping the provided decryptor.
    pub fn new(decryptor: EnvelopeDecryptor) -> Self {
        Self {
            decryptor: Arc::new(decryptor),
        }
    }
}
