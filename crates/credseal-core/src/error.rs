// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for credseal.

use thiserror::Error;

/// The error type shared by the cipher service, the credential loader and
/// the operator tooling.
///
/// Each failure kind is its own variant so callers can match on the kind
/// rather than on message text. None of these errors is transient.
#[derive(Debug, Error)]
pub enum CredsealError {
    /// The envelope is structurally invalid: wrong field count, a field that
    /// is not hex, or a nonce/tag of the wrong length.
    #[error("invalid envelope format: {0}")]
    Format(String),

    /// Authentication failed (wrong passphrase, corruption, tampering) or the
    /// authenticated plaintext could not be used.
    #[error("decryption failed: {message}")]
    Decryption {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The cipher or the entropy source faulted while encrypting.
    #[error("encryption failed: {message}")]
    Encryption {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No usable credential is configured, or a configuration value is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A configured encrypted credential could not be recovered.
    #[error("failed to load {name}: {source}")]
    Credential {
        name: String,
        source: Box<CredsealError>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CredsealError {
    /// Build a [`CredsealError::Decryption`] without an underlying cause.
    pub fn decryption(message: impl Into<String>) -> Self {
        Self::Decryption {
            message: message.into(),
            source: None,
        }
    }

    /// Build a [`CredsealError::Encryption`] without an underlying cause.
    pub fn encryption(message: impl Into<String>) -> Self {
        Self::Encryption {
            message: message.into(),
            source: None,
        }
    }
}
