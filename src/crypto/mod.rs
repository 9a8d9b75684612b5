//! AES-CBC decryption primitives for the locally stored secret.
//!
//! This module is intentionally free of AWS and HTTP dependencies.
//! It provides the low-level cipher operations used by the envelope
//! decryption flow: plain AES in CBC mode with PKCS#7 padding, over a
//! base64-encoded ciphertext and a deployment-fixed IV.

pub mod cipher;

pub use cipher::IV_LEN;
