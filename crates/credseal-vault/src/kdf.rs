// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! scrypt key derivation from a passphrase.
//!
//! Parameters and salt are fixed (N = 2^14, r = 8, p = 1, salt `"salt"`) so
//! existing envelopes keep decrypting. Changing any of them changes every
//! derived key.

use credseal_core::{CredsealError, DerivedKey, KEY_LEN};
use zeroize::Zeroizing;

/// Salt shared by every derivation.
pub const SALT: &[u8] = b"salt";

/// log2 of the scrypt CPU/memory cost N.
pub const SCRYPT_LOG_N: u8 = 14;

/// scrypt block size.
pub const SCRYPT_R: u32 = 8;

/// scrypt parallelism.
pub const SCRYPT_P: u32 = 1;

/// Derive a 32-byte key from `passphrase`.
///
/// Deterministic and defined for every input, including the empty
/// passphrase. The key is wrapped in [`Zeroizing`] and wiped on drop.
pub fn derive_key(passphrase: &[u8]) -> Result<DerivedKey, CredsealError> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| CredsealError::Internal(format!("invalid scrypt parameters: {e}")))?;

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    scrypt::scrypt(passphrase, SALT, &params, output.as_mut())
        .map_err(|e| CredsealError::Internal(format!("scrypt key derivation failed: {e}")))?;

    Ok(output)
}
