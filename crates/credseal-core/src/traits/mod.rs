// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by the credseal service crates.

pub mod cipher;

pub use cipher::{CipherService, DerivedKey, KEY_LEN};
