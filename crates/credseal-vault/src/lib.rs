// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Envelope encryption for a single API credential.
//!
//! A passphrase (the master key) is stretched with scrypt into an AES-256-GCM
//! key. The credential is sealed into a `nonce:tag:ciphertext` hex envelope
//! that can live in ordinary configuration, and recovered once at startup by
//! [`load_credential`].

pub mod cipher;
pub mod crypto;
pub mod envelope;
pub mod kdf;
pub mod loader;
pub mod prompt;

pub use cipher::{decrypt, encrypt, generate_master_key, EnvelopeCipher};
pub use envelope::Envelope;
pub use kdf::derive_key;
pub use loader::{load_credential, load_credential_with, mask_secret, Credential, CredentialSource};
