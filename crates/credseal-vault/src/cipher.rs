// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase-level envelope operations.
//!
//! [`encrypt`] and [`decrypt`] combine key derivation, the AEAD and the
//! envelope codec. [`EnvelopeCipher`] exposes the same operations through
//! the [`CipherService`] trait.

use credseal_core::{CipherService, CredsealError, DerivedKey};
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use crate::envelope::Envelope;
use crate::{crypto, kdf};

/// Number of random bytes in a generated master key (hex doubles it).
pub const MASTER_KEY_BYTES: usize = 32;

/// Encrypt `plaintext` under a key derived from `passphrase`.
///
/// Two calls with the same inputs produce different envelopes.
pub fn encrypt(plaintext: &str, passphrase: &SecretString) -> Result<String, CredsealError> {
    let key = kdf::derive_key(passphrase.expose_secret().as_bytes())?;
    let envelope = crypto::seal(&key, plaintext.as_bytes())?;
    Ok(envelope.to_string())
}

/// Recover the plaintext sealed in `envelope`.
///
/// The envelope is parsed before any key is derived, so malformed input
/// fails with [`CredsealError::Format`] without doing cipher work.
pub fn decrypt(envelope: &str, passphrase: &SecretString) -> Result<SecretString, CredsealError> {
    let envelope: Envelope = envelope.parse()?;
    let key = kdf::derive_key(passphrase.expose_secret().as_bytes())?;
    let plaintext = crypto::open(&key, &envelope)?;

    let text = std::str::from_utf8(&plaintext)
        .map_err(|_| CredsealError::decryption("decrypted secret is not valid UTF-8"))?;
    Ok(SecretString::from(text.to_owned()))
}

/// Generate a high-entropy master key: 32 random bytes as lowercase hex.
pub fn generate_master_key() -> Result<SecretString, CredsealError> {
    let mut bytes = Zeroizing::new([0u8; MASTER_KEY_BYTES]);
    crypto::fill_random(bytes.as_mut())
        .map_err(|_| CredsealError::encryption("failed to generate random master key"))?;
    Ok(SecretString::from(hex::encode(*bytes)))
}

/// Zero-sized [`CipherService`] backed by scrypt and AES-256-GCM.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeCipher;

impl CipherService for EnvelopeCipher {
    fn derive_key(&self, passphrase: &[u8]) -> Result<DerivedKey, CredsealError> {
        kdf::derive_key(passphrase)
    }

    fn encrypt(&self, plaintext: &str, passphrase: &SecretString) -> Result<String, CredsealError> {
        encrypt(plaintext, passphrase)
    }

    fn decrypt(&self, envelope: &str, passphrase: &SecretString) -> Result<SecretString, CredsealError> {
        decrypt(envelope, passphrase)
    }

    fn generate_master_key(&self) -> Result<SecretString, CredsealError> {
        generate_master_key()
    }
}
