//! Envelope decryption: remote DEK unwrap followed by local AES-CBC decrypt.
//!
//! # Lifecycle
//!
//! 1. The wrapped DEK is sent to the KMS decrypt endpoint and exchanged for
//!    plaintext key bytes. Any failure here aborts the invocation before a
//!    local decrypt is attempted.
//! 2. The stored password ciphertext is decrypted locally under that key and
//!    the deployment-fixed IV.
//! 3. A local decrypt failure is logged and converted into a null password —
//!    the invocation still completes. `STRICT_DECRYPT=true` propagates the
//!    failure instead.
//!
//! # Security invariants
//!
//! - The plaintext DEK and the decrypted password are **never** written to
//!   disk, logged, or included in traces.
//! - The DEK exists only as a transient buffer on the invocation path;
//!   nothing caches it between invocations.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::crypto::cipher::{self, CipherError};
use crate::kms::{KeyUnwrap, UnwrapError};
use crate::protocol::SensitiveValue;

/// Errors that abort an invocation of [`EnvelopeDecryptor::decrypt_sensitive_value`].
#[derive(Debug, Error)]
pub enum DecryptError {
    /// The remote unwrap tier failed; always fatal.
    #[error(transparent)]
    Unwrap(#[from] UnwrapError),

    /// The local cipher tier failed; fatal only in strict mode.
    #[error("local decrypt failed: {0}")]
    Cipher(#[from] CipherError),
}

/// Performs the two-phase envelope decryption for one invocation.
pub struct EnvelopeDecryptor {
    cfg: Config,
    kms: Arc<dyn KeyUnwrap>,
}

impl EnvelopeDecryptor {
    /// Build a decryptor from validated configuration and a KMS collaborator.
    pub fn new(cfg: Config, kms: Arc<dyn KeyUnwrap>) -> Self {
        Self { cfg, kms }
    }

    /// Unwrap the DEK remotely, then decrypt the stored password locally.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptError::Unwrap`] if the KMS call fails — the local
    /// decrypt is never attempted in that case. Returns
    /// [`DecryptError::Cipher`] only when `strict_decrypt` is set; otherwise
    /// a cipher failure yields `Ok` with a null password.
    pub async fn decrypt_sensitive_value(&self) -> Result<SensitiveValue, DecryptError> {
        let dek = self
            .kms
            .unwrap_key(&self.cfg.key_ocid, &self.cfg.dek_ciphertext)
            .await?;

        let decrypted_password = match cipher::decrypt_value(
            &self.cfg.encrypted_password,
            &dek,
            self.cfg.init_vector_string.as_bytes(),
        ) {
            Ok(plaintext) => Some(plaintext),
            Err(e) if self.cfg.strict_decrypt => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "local decrypt failed; returning null password");
                None
            }
        };

        Ok(SensitiveValue { decrypted_password })
    }
}
