// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `credseal encrypt` command implementation.
//!
//! Reads a secret, picks a master key (generated, prompted, or taken from an
//! environment variable) and prints the resulting settings to stdout. Prompts
//! and guidance go to stderr. Nothing is written to disk.

use std::io::{self, BufRead, Write};

use clap::Args;
use colored::Colorize;
use credseal_core::CredsealError;
use credseal_vault::{cipher, prompt};
use secrecy::{ExposeSecret, SecretString};

/// Arguments for `credseal encrypt`.
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Generate a new master key instead of asking.
    #[arg(long, conflicts_with = "master_key_env")]
    pub generate: bool,

    /// Reuse the master key stored in this environment variable.
    #[arg(long, value_name = "VAR")]
    pub master_key_env: Option<String>,

    /// Read the secret from this environment variable instead of prompting.
    #[arg(long, value_name = "VAR")]
    pub secret_env: Option<String>,

    /// Reject secrets that do not start with this prefix (e.g. `sk-`).
    #[arg(long, value_name = "PREFIX")]
    pub require_prefix: Option<String>,
}

/// How the master key is obtained.
#[derive(Debug, PartialEq, Eq)]
enum KeyChoice {
    Generate,
    Prompt,
    Env(String),
}

/// Runs the `credseal encrypt` command.
pub fn run_encrypt(args: &EncryptArgs) -> Result<(), CredsealError> {
    eprintln!("{}\n", "credseal: credential encryption".bold());

    let secret = read_secret(args)?;
    if let Some(prefix) = &args.require_prefix {
        prompt::check_prefix(&secret, prefix)?;
    }

    let choice = if args.generate {
        KeyChoice::Generate
    } else if let Some(var) = &args.master_key_env {
        KeyChoice::Env(var.clone())
    } else {
        ask_key_choice()?
    };

    let (master_key, generated) = match choice {
        KeyChoice::Generate => (cipher::generate_master_key()?, true),
        KeyChoice::Prompt => (prompt::prompt_master_key()?, false),
        KeyChoice::Env(var) => (prompt::master_key_from_env(&var)?, false),
    };

    let envelope = cipher::encrypt(secret.expose_secret(), &master_key)?;

    eprintln!("{}", "Encryption successful. Add to your configuration:".green());
    let stdout = io::stdout();
    write_settings(&mut stdout.lock(), generated.then_some(&master_key), &envelope)
        .map_err(|e| CredsealError::Internal(format!("failed to write output: {e}")))?;

    if generated {
        eprintln!(
            "{}",
            "Store MASTER_KEY separately from ENCRYPTED_SECRET; the secret cannot be recovered without it."
                .yellow()
        );
    }
    eprintln!("You can now remove PLAINTEXT_SECRET from your configuration.");
    Ok(())
}

fn read_secret(args: &EncryptArgs) -> Result<SecretString, CredsealError> {
    match &args.secret_env {
        Some(var) => {
            let value = std::env::var(var)
                .map_err(|_| CredsealError::Config(format!("environment variable {var} is not set")))?;
            if value.trim().is_empty() {
                return Err(CredsealError::Config(format!("environment variable {var} is empty")));
            }
            Ok(SecretString::from(value))
        }
        None => prompt::prompt_secret("Secret to encrypt"),
    }
}

fn ask_key_choice() -> Result<KeyChoice, CredsealError> {
    eprintln!("Choose an option:");
    eprintln!("  1. Generate a new master key");
    eprintln!("  2. Use an existing master key");
    eprint!("\nEnter your choice (1 or 2): ");

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CredsealError::Internal(format!("failed to read choice: {e}")))?;
    parse_key_choice(&line)
}

fn parse_key_choice(input: &str) -> Result<KeyChoice, CredsealError> {
    match input.trim() {
        "1" => Ok(KeyChoice::Generate),
        "2" => Ok(KeyChoice::Prompt),
        other => Err(CredsealError::Config(format!(
            "invalid choice `{other}`: expected 1 or 2"
        ))),
    }
}

/// Write the configuration lines. `MASTER_KEY` is only printed when it was
/// generated by this run.
fn write_settings(
    out: &mut impl Write,
    master_key: Option<&SecretString>,
    envelope: &str,
) -> io::Result<()> {
    if let Some(key) = master_key {
        writeln!(out, "MASTER_KEY={}", key.expose_secret())?;
    }
    writeln!(out, "ENCRYPTED_SECRET={envelope}")?;
    out.flush()
}
