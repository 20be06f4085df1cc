// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The textual envelope: `hex(nonce):hex(tag):hex(ciphertext)`.

use std::fmt;
use std::str::FromStr;

use credseal_core::CredsealError;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 16;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Separator between the three envelope fields.
pub const DELIMITER: char = ':';

/// A sealed secret: nonce, detached tag and ciphertext.
///
/// Parsing checks structure only (field count, hex, nonce and tag lengths);
/// authenticity is established by [`crate::crypto::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

impl FromStr for Envelope {
    type Err = CredsealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(DELIMITER).collect();
        let [nonce, tag, ciphertext] = fields.as_slice() else {
            return Err(CredsealError::Format(format!(
                "expected 3 `{DELIMITER}`-separated fields, found {}",
                fields.len()
            )));
        };

        Ok(Self {
            nonce: decode_fixed(nonce, "nonce")?,
            tag: decode_fixed(tag, "tag")?,
            ciphertext: decode_field(ciphertext, "ciphertext")?,
        })
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            hex::encode(self.nonce),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext)
        )
    }
}

fn decode_field(field: &str, name: &str) -> Result<Vec<u8>, CredsealError> {
    hex::decode(field).map_err(|e| CredsealError::Format(format!("{name} is not valid hex: {e}")))
}

fn decode_fixed<const N: usize>(field: &str, name: &str) -> Result<[u8; N], CredsealError> {
    let bytes = decode_field(field, name)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        CredsealError::Format(format!(
            "{name} must be {N} bytes, found {}",
            bytes.len()
        ))
    })
}
