// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `credseal selftest` command implementation.

use colored::Colorize;
use credseal_core::CredsealError;
use credseal_vault::{cipher, mask_secret};
use secrecy::ExposeSecret;
use tracing::info;

/// Sample credential sealed during the self test.
const SAMPLE_SECRET: &str = "sk-test1234567890abcdefghijklmnopqrstuvwxyz";

/// Runs the `credseal selftest` command: round trip plus tamper detection
/// with a throwaway master key.
pub fn run_selftest() -> Result<(), CredsealError> {
    let master_key = cipher::generate_master_key()?;
    eprintln!("sample secret:  {}", mask_secret(SAMPLE_SECRET));
    eprintln!("master key:     {}", mask_secret(master_key.expose_secret()));

    let envelope = cipher::encrypt(SAMPLE_SECRET, &master_key)?;
    eprintln!("envelope:       {envelope}");

    let decrypted = cipher::decrypt(&envelope, &master_key)?;
    if decrypted.expose_secret() != SAMPLE_SECRET {
        return Err(CredsealError::Internal(
            "round trip produced a different secret".to_string(),
        ));
    }

    let tampered = tamper_last_digit(&envelope);
    match cipher::decrypt(&tampered, &master_key) {
        Err(CredsealError::Decryption { .. }) => {}
        Ok(_) => {
            return Err(CredsealError::Internal(
                "tampered envelope decrypted without error".to_string(),
            ));
        }
        Err(e) => {
            return Err(CredsealError::Internal(format!(
                "tampered envelope failed with unexpected error: {e}"
            )));
        }
    }

    info!("selftest passed");
    println!("{}", "selftest passed".green());
    Ok(())
}

/// Swap the last hex digit of the ciphertext for a different one.
fn tamper_last_digit(envelope: &str) -> String {
    let mut out = envelope.to_string();
    if let Some(last) = out.pop() {
        out.push(if last == '0' { '1' } else { '0' });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tamper_changes_only_the_last_digit() {
        assert_eq!(tamper_last_digit("aa:bb:c5"), "aa:bb:c0");
        assert_eq!(tamper_last_digit("aa:bb:c0"), "aa:bb:c1");
    }

    #[test]
    fn selftest_passes() {
        assert!(run_selftest().is_ok());
    }
}
