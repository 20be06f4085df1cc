// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait for passphrase-based envelope encryption.

use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::error::CredsealError;

/// Length in bytes of a derived symmetric key.
pub const KEY_LEN: usize = 32;

/// A 32-byte key derived from a passphrase, wiped from memory on drop.
pub type DerivedKey = Zeroizing<[u8; KEY_LEN]>;

/// Stateless envelope encryption keyed by an operator passphrase.
///
/// Implementations hold no state, so a single value can be shared freely
/// across threads.
pub trait CipherService: Send + Sync {
    /// Derives the symmetric key for `passphrase`. Deterministic, and defined
    /// for every input including the empty passphrase.
    fn derive_key(&self, passphrase: &[u8]) -> Result<DerivedKey, CredsealError>;

    /// Encrypts `plaintext` under `passphrase` and returns the envelope string.
    fn encrypt(&self, plaintext: &str, passphrase: &SecretString) -> Result<String, CredsealError>;

    /// Recovers the plaintext sealed in `envelope`.
    fn decrypt(&self, envelope: &str, passphrase: &SecretString) -> Result<SecretString, CredsealError>;

    /// Generates a fresh high-entropy passphrase.
    fn generate_master_key(&self) -> Result<SecretString, CredsealError>;
}
