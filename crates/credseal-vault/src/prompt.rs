// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator input for the encryption tool: hidden TTY prompts and
//! master keys passed through the environment.

use std::io::IsTerminal;

use credseal_core::CredsealError;
use secrecy::{ExposeSecret, SecretString};

/// Minimum length of a reused master key, counted in UTF-16 code units so
/// keys accepted by the previous tool stay valid.
pub const MIN_MASTER_KEY_LEN: usize = 32;

/// Read a secret from the terminal without echoing it.
///
/// Fails when stdin is not a terminal or the entry is empty.
pub fn prompt_secret(label: &str) -> Result<SecretString, CredsealError> {
    if !std::io::stdin().is_terminal() {
        return Err(CredsealError::Config(format!(
            "cannot prompt for {label}: stdin is not a terminal"
        )));
    }

    let value = rpassword::prompt_password(format!("{label}: "))
        .map_err(|e| CredsealError::Internal(format!("failed to read {label}: {e}")))?;
    if value.trim().is_empty() {
        return Err(CredsealError::Config(format!("empty {label} not allowed")));
    }
    Ok(SecretString::from(value))
}

/// Prompt for an existing master key and check its length.
pub fn prompt_master_key() -> Result<SecretString, CredsealError> {
    let key = prompt_secret("Master key")?;
    validate_master_key(&key)?;
    Ok(key)
}

/// Read an existing master key from the environment variable `var`.
pub fn master_key_from_env(var: &str) -> Result<SecretString, CredsealError> {
    let value = std::env::var(var)
        .map_err(|_| CredsealError::Config(format!("environment variable {var} is not set")))?;
    let key = SecretString::from(value);
    validate_master_key(&key)?;
    Ok(key)
}

/// Reject master keys shorter than [`MIN_MASTER_KEY_LEN`] UTF-16 code units.
pub fn validate_master_key(key: &SecretString) -> Result<(), CredsealError> {
    let len = key.expose_secret().encode_utf16().count();
    if len < MIN_MASTER_KEY_LEN {
        return Err(CredsealError::Config(format!(
            "master key must be at least {MIN_MASTER_KEY_LEN} characters long, got {len}"
        )));
    }
    Ok(())
}

/// Check that `secret` starts with `prefix` (e.g. `sk-` for OpenAI keys).
pub fn check_prefix(secret: &SecretString, prefix: &str) -> Result<(), CredsealError> {
    if secret.expose_secret().starts_with(prefix) {
        Ok(())
    } else {
        Err(CredsealError::Config(format!(
            "invalid secret format: must start with \"{prefix}\""
        )))
    }
}
