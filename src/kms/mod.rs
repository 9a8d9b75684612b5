//! Remote key unwrap: the KMS decrypt call and its credentials.
//!
//! The KMS service is an injected external collaborator behind the
//! [`KeyUnwrap`] trait, which exposes exactly one capability: exchange a
//! wrapped DEK ciphertext for plaintext key bytes. Handlers and the envelope
//! decryption flow depend only on the trait, so tests substitute a mock and
//! never touch the network.

pub mod client;
pub mod credentials;

pub use client::KmsKeyClient;
pub use credentials::CredentialsMode;

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced by the remote unwrap tier.
///
/// All variants are hard invocation failures: they propagate out of the
/// envelope decryption flow with no retry and no partial result.
#[derive(Debug, Error)]
pub enum UnwrapError {
    /// The wrapped-key ciphertext is not valid base64 (a malformed request
    /// the KMS service would reject).
    #[error("wrapped key is not valid base64")]
    InvalidCiphertext(#[from] base64::DecodeError),

    /// The KMS decrypt call failed: network, credentials, or an unauthorized
    /// or unknown key.
    #[error("KMS decrypt call failed: {0}")]
    Remote(String),

    /// The KMS decrypt response carried no plaintext.
    #[error("KMS decrypt response contained no plaintext")]
    MissingPlaintext,
}

/// Capability to unwrap a KMS-wrapped data-encryption key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyUnwrap: Send + Sync {
    /// Exchange `wrapped_key_b64` for the plaintext DEK bytes via the KMS
    /// decrypt API, authorising against `key_id`.
    async fn unwrap_key(&self, key_id: &str, wrapped_key_b64: &str)
        -> Result<Vec<u8>, UnwrapError>;
}
