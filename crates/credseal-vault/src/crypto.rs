// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Uses a 128-bit nonce and a detached 128-bit tag, with fixed associated
//! data bound into every call. Every call to [`seal`] draws a fresh random
//! nonce from the system CSPRNG.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use credseal_core::{CredsealError, KEY_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use crate::envelope::{Envelope, NONCE_LEN};

/// Associated data bound into every tag. Not secret, but must match on open.
pub const ASSOCIATED_DATA: &[u8] = b"parenting-assistant";

/// AES-256-GCM with a 16-byte nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypt `plaintext` under `key` with a random nonce.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Envelope, CredsealError> {
    let cipher = Aes256Gcm16::new_from_slice(key)
        .map_err(|_| CredsealError::encryption("failed to create AES-256-GCM key"))?;

    let mut nonce = [0u8; NONCE_LEN];
    fill_random(&mut nonce)
        .map_err(|_| CredsealError::encryption("failed to generate random nonce"))?;

    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&nonce), ASSOCIATED_DATA, &mut ciphertext)
        .map_err(|e| CredsealError::Encryption {
            message: "AES-256-GCM encryption failed".to_string(),
            source: Some(Box::new(e)),
        })?;

    Ok(Envelope {
        nonce,
        tag: tag.into(),
        ciphertext,
    })
}

/// Decrypt and authenticate `envelope` under `key`.
///
/// Fails if the key is wrong or any of nonce, tag or ciphertext was altered.
/// Nothing is returned unless the tag verifies.
pub fn open(key: &[u8; KEY_LEN], envelope: &Envelope) -> Result<Zeroizing<Vec<u8>>, CredsealError> {
    let cipher = Aes256Gcm16::new_from_slice(key)
        .map_err(|_| CredsealError::decryption("failed to create AES-256-GCM key"))?;

    let mut buffer = Zeroizing::new(envelope.ciphertext.clone());
    cipher
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(&envelope.nonce),
            ASSOCIATED_DATA,
            buffer.as_mut_slice(),
            Tag::<U16>::from_slice(&envelope.tag),
        )
        .map_err(|e| CredsealError::Decryption {
            message: "authentication failed -- wrong master key or corrupted data".to_string(),
            source: Some(Box::new(e)),
        })?;

    Ok(buffer)
}

/// Fill `buf` from the system CSPRNG.
pub fn fill_random(buf: &mut [u8]) -> Result<(), ring::error::Unspecified> {
    SystemRandom::new().fill(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        fill_random(&mut key).unwrap();
        key
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = test_key();
        let envelope = seal(&key, b"secret api key value").unwrap();
        let decrypted = open(&key, &envelope).unwrap();
        assert_eq!(decrypted.as_slice(), b"secret api key value");
    }

    #[test]
    fn seal_uses_fresh_nonce_each_time() {
        let key = test_key();
        let env1 = seal(&key, b"same input twice").unwrap();
        let env2 = seal(&key, b"same input twice").unwrap();
        assert_ne!(env1.nonce, env2.nonce);
        assert_ne!(env1.ciphertext, env2.ciphertext);
    }

    #[test]
    fn ciphertext_has_plaintext_length() {
        let key = test_key();
        let envelope = seal(&key, b"hello").unwrap();
        // Tag is detached, so no expansion.
        assert_eq!(envelope.ciphertext.len(), 5);
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let envelope = seal(&test_key(), b"secret data").unwrap();
        let result = open(&test_key(), &envelope);
        assert!(matches!(result, Err(CredsealError::Decryption { .. })));
    }

    #[test]
    fn tampered_parts_fail_authentication() {
        let key = test_key();
        let envelope = seal(&key, b"do not tamper").unwrap();

        let mut bad_ct = envelope.clone();
        bad_ct.ciphertext[0] ^= 0x01;
        let mut bad_tag = envelope.clone();
        bad_tag.tag[15] ^= 0x80;
        let mut bad_nonce = envelope.clone();
        bad_nonce.nonce[0] ^= 0x01;

        for tampered in [bad_ct, bad_tag, bad_nonce] {
            assert!(matches!(
                open(&key, &tampered),
                Err(CredsealError::Decryption { .. })
            ));
        }
    }

    #[test]
    fn associated_data_is_bound() {
        // Sealing without the fixed associated data must not open.
        let key = test_key();
        let cipher = Aes256Gcm16::new_from_slice(&key).unwrap();
        let nonce = [7u8; NONCE_LEN];
        let mut ciphertext = b"payload".to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::<U16>::from_slice(&nonce), b"", &mut ciphertext)
            .unwrap();
        let envelope = Envelope {
            nonce,
            tag: tag.into(),
            ciphertext,
        };
        assert!(open(&key, &envelope).is_err());
    }
}
