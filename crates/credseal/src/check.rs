// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `credseal check` command implementation.
//!
//! Runs the startup credential load exactly as a server would and reports
//! the outcome with the secret masked.

use std::io::{self, Write};

use credseal_config::CredsealConfig;
use credseal_core::CredsealError;
use credseal_vault::{load_credential, Credential};
use tracing::debug;

/// Runs the `credseal check` command.
pub fn run_check(config: &CredsealConfig) -> Result<(), CredsealError> {
    debug!(credential = ?config.credential, "checking credential configuration");
    let credential = load_credential(&config.credential)?;

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), config, &credential)
        .map_err(|e| CredsealError::Internal(format!("failed to write output: {e}")))
}

fn write_report(out: &mut impl Write, config: &CredsealConfig, credential: &Credential) -> io::Result<()> {
    writeln!(out, "credential:  {}", config.credential.name)?;
    writeln!(out, "source:      {}", credential.source())?;
    writeln!(out, "value:       {}", credential.masked())?;
    writeln!(
        out,
        "server:      port {} ({}), frontend {}",
        config.server.port, config.server.environment, config.server.frontend_url
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_masks_the_credential() {
        let mut config = CredsealConfig::default();
        config.credential.plaintext_secret = Some("sk-plain-text-key-0001".to_string());
        let credential = load_credential(&config.credential).unwrap();

        let mut out = Vec::new();
        write_report(&mut out, &config, &credential).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("source:      plaintext"));
        assert!(text.contains("sk-p...0001"));
        assert!(!text.contains("sk-plain-text-key-0001"));
        assert!(text.contains("port 5000 (development)"));
    }

    #[test]
    fn missing_credential_fails_check() {
        let config = CredsealConfig::default();
        assert!(matches!(run_check(&config), Err(CredsealError::Config(_))));
    }
}
