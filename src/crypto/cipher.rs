//! AES-CBC/PKCS#7 decryption of the stored password ciphertext.
//!
//! The key is whatever the KMS unwrap returned: 16, 24, or 32 bytes selects
//! AES-128/192/256. The IV comes from deployment configuration and must match
//! the IV used when the ciphertext was produced.
//!
//! Decrypted bytes are converted to a string lossily; an invalid UTF-8
//! sequence becomes replacement characters rather than an error.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Byte length of an AES-CBC initialisation vector (one cipher block).
pub const IV_LEN: usize = 16;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Errors produced by the cipher layer.
///
/// Every variant belongs to the *local* error tier: the envelope decryption
/// flow converts these into a null password unless strict mode is enabled.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The ciphertext is not valid base64.
    #[error("ciphertext is not valid base64")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The IV is not exactly [`IV_LEN`] bytes.
    #[error("invalid IV length: expected {IV_LEN} bytes, got {0}")]
    InvalidIvLength(usize),

    /// The key is not a valid AES key length (16, 24, or 32 bytes).
    #[error("invalid key length: expected 16, 24, or 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The ciphertext is not a whole number of blocks, or the padding is
    /// corrupt (wrong key, wrong IV, or tampered data).
    #[error("ciphertext padding is invalid")]
    Unpad,
}

/// Decrypt a base64 AES-CBC/PKCS#7 ciphertext into a string.
///
/// # Errors
///
/// Returns [`CipherError::InvalidIvLength`] or [`CipherError::InvalidKeyLength`]
/// before touching the ciphertext, [`CipherError::InvalidBase64`] if it does
/// not decode, and [`CipherError::Unpad`] if decryption yields bad padding.
pub fn decrypt_value(ciphertext_b64: &str, key: &[u8], iv: &[u8]) -> Result<String, CipherError> {
    if iv.len() != IV_LEN {
        return Err(CipherError::InvalidIvLength(iv.len()));
    }

    let ciphertext = STANDARD.decode(ciphertext_b64)?;

    let plaintext = match key.len() {
        16 => Aes128CbcDec::new_from_slices(key, iv)
            .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext),
        24 => Aes192CbcDec::new_from_slices(key, iv)
            .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext),
        32 => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext),
        n => return Err(CipherError::InvalidKeyLength(n)),
    }
    .map_err(|_| CipherError::Unpad)?;

    Ok(String::from_utf8_lossy(&plaintext).into_owned())
}

/// Encrypt a plaintext under AES-CBC/PKCS#7, returning base64. Test fixture
/// counterpart of [`decrypt_value`].
#[cfg(test)]
pub fn encrypt_value(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<String, CipherError> {
    use aes::cipher::BlockEncryptMut;

    type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
    type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
    type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

    if iv.len() != IV_LEN {
        return Err(CipherError::InvalidIvLength(iv.len()));
    }

    let ciphertext = match key.len() {
        16 => Aes128CbcEnc::new_from_slices(key, iv)
            .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => Aes192CbcEnc::new_from_slices(key, iv)
            .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        32 => Aes256CbcEnc::new_from_slices(key, iv)
            .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        n => return Err(CipherError::InvalidKeyLength(n)),
    };

    Ok(STANDARD.encode(ciphertext))
}
