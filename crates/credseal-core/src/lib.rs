// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for credseal.
//!
//! Holds the error taxonomy and the [`CipherService`] capability trait shared
//! by the vault and the binary.

pub mod error;
pub mod traits;

// Re-export key items at crate root for ergonomic imports.
pub use error::CredsealError;
pub use traits::{CipherService, DerivedKey, KEY_LEN};
