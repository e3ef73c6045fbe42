//! AES-256-GCM sealing of journal payloads.
//!
//! A sealed payload is the 12-byte nonce followed by the ciphertext and its
//! authentication tag. A fresh random nonce is drawn for every seal.

use crate::constants::{KEY_LENGTH, KEY_PADDING_BYTE, NONCE_LENGTH};
use crate::errors::{CryptoError, JournalError};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

/// Size of the GCM authentication tag in bytes.
const TAG_LENGTH: usize = 16;

/// A 256-bit journal key, wiped from memory on drop.
#[derive(Clone)]
pub struct JournalKey(Zeroizing<[u8; KEY_LENGTH]>);

impl JournalKey {
    /// Builds a key from a password.
    ///
    /// Passwords shorter than 32 bytes are padded with ASCII `'0'`; longer
    /// ones are truncated. Two passwords that only differ past the 32nd byte
    /// therefore give the same key.
    ///
    /// ```
    /// use daybook::crypto::JournalKey;
    ///
    /// let short = JournalKey::from_password("abc");
    /// let padded = JournalKey::from_password("abc00000000000000000000000000000");
    /// assert_eq!(short, padded);
    /// ```
    pub fn from_password(password: &str) -> Self {
        let mut key = Zeroizing::new([KEY_PADDING_BYTE; KEY_LENGTH]);
        let bytes = password.as_bytes();
        let len = bytes.len().min(KEY_LENGTH);
        key[..len].copy_from_slice(&bytes[..len]);
        JournalKey(key)
    }

    fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl PartialEq for JournalKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for JournalKey {}

impl fmt::Debug for JournalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JournalKey([REDACTED])")
    }
}

/// Encrypts `plaintext`, returning `nonce || ciphertext`.
///
/// # Errors
///
/// Returns [`CryptoError::Seal`] if the cipher rejects the input.
pub fn seal(key: &JournalKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CryptoError::Seal(e.to_string()))?;

    let mut sealed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypts a payload produced by [`seal`].
///
/// # Errors
///
/// Returns [`JournalError::CorruptStore`] when the payload is too short, the
/// key is wrong or the data was altered.
pub fn open(key: &JournalKey, sealed: &[u8]) -> Result<Vec<u8>, JournalError> {
    if sealed.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(JournalError::CorruptStore(
            "encrypted payload is too short".to_string(),
        ));
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LENGTH);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| JournalError::CorruptStore("wrong password or damaged file".to_string()))
}
