// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! credseal - protect an API credential at rest in configuration.
//!
//! This is the binary entry point: the operator encryption tool plus the
//! startup credential check.

mod check;
mod encrypt;
mod selftest;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use credseal_config::CredsealConfig;
use credseal_core::CredsealError;
use secrecy::ExposeSecret;

/// credseal - protect an API credential at rest in configuration.
#[derive(Parser, Debug)]
#[command(name = "credseal", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy (`check` only).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a secret and print the MASTER_KEY / ENCRYPTED_SECRET pair.
    Encrypt(encrypt::EncryptArgs),
    /// Print a freshly generated master key.
    Keygen,
    /// Load the configured credential once and report where it came from.
    Check,
    /// Encrypt and decrypt a sample credential to verify the cipher.
    Selftest,
}

/// Log level for commands that run without loading configuration.
const DEFAULT_LOG_LEVEL: &str = "info";

fn main() -> ExitCode {
    load_dotenv();
    let cli = Cli::parse();

    // Only `check` reads configuration.
    let result = match cli.command {
        Commands::Check => {
            let config = match load_config(cli.config.as_deref()) {
                Ok(config) => config,
                Err(errors) => {
                    credseal_config::render_errors(&errors);
                    return ExitCode::FAILURE;
                }
            };
            init_tracing(&config.log.level);
            check::run_check(&config)
        }
        Commands::Encrypt(args) => {
            init_tracing(DEFAULT_LOG_LEVEL);
            encrypt::run_encrypt(&args)
        }
        Commands::Keygen => {
            init_tracing(DEFAULT_LOG_LEVEL);
            run_keygen()
        }
        Commands::Selftest => {
            init_tracing(DEFAULT_LOG_LEVEL);
            selftest::run_selftest()
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Load `.env` from the working directory (or a parent) into the process
/// environment. Variables already set are left alone; a missing file is fine.
fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("{} failed to load .env file: {err}", "warning:".yellow().bold());
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<CredsealConfig, Vec<credseal_config::ConfigError>> {
    match path {
        Some(path) => credseal_config::load_and_validate_path(path),
        None => credseal_config::load_and_validate(),
    }
}

fn run_keygen() -> Result<(), CredsealError> {
    let key = credseal_vault::generate_master_key()?;
    println!("{}", key.expose_secret());
    Ok(())
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout only
/// carries command output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("credseal={level},credseal_vault={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
