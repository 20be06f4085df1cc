// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./credseal.toml` > `~/.config/credseal/credseal.toml` >
//! `/etc/credseal/credseal.toml`, then `CREDSEAL_SERVER_*` and `CREDSEAL_LOG_*`
//! overrides, then the credential variables (`CREDSEAL_CREDENTIAL_*`, and the
//! bare `ENCRYPTED_SECRET`, `MASTER_KEY` and `PLAINTEXT_SECRET`).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::debug;

use crate::model::CredsealConfig;

/// Local config file name, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "credseal.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/credseal/credseal.toml";

/// Prefix for environment overrides of the `server` and `log` sections.
pub const ENV_PREFIX: &str = "CREDSEAL_";

/// Sections reachable through `CREDSEAL_<SECTION>_<FIELD>`. The credential
/// section is merged separately by [`CREDENTIAL_ENV_VARS`].
pub const PREFIXED_ENV_SECTIONS: [&str; 2] = ["server", "log"];

/// Environment variables for the credential, mapped onto config keys.
///
/// These are read verbatim and never type-coerced: a master key made only of
/// digits must stay a string. Later entries win, so the bare names override
/// their `CREDSEAL_CREDENTIAL_*` forms.
pub const CREDENTIAL_ENV_VARS: [(&str, &str); 7] = [
    ("CREDSEAL_CREDENTIAL_NAME", "credential.name"),
    ("CREDSEAL_CREDENTIAL_ENCRYPTED_SECRET", "credential.encrypted_secret"),
    ("CREDSEAL_CREDENTIAL_MASTER_KEY", "credential.master_key"),
    ("CREDSEAL_CREDENTIAL_PLAINTEXT_SECRET", "credential.plaintext_secret"),
    ("ENCRYPTED_SECRET", "credential.encrypted_secret"),
    ("MASTER_KEY", "credential.master_key"),
    ("PLAINTEXT_SECRET", "credential.plaintext_secret"),
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/credseal/credseal.toml` (system-wide)
/// 3. `~/.config/credseal/credseal.toml` (user XDG config)
/// 4. `./credseal.toml` (local directory)
/// 5. `CREDSEAL_SERVER_*` and `CREDSEAL_LOG_*` environment variables
/// 6. `CREDSEAL_CREDENTIAL_*`, then `ENCRYPTED_SECRET`, `MASTER_KEY`,
///    `PLAINTEXT_SECRET`
pub fn load_config() -> Result<CredsealConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CredsealConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredsealConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CredsealConfig, figment::Error> {
    debug!(path = %path.display(), "loading config from explicit path");
    let figment = Figment::new()
        .merge(Serialized::defaults(CredsealConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider());
    merge_credential_env(figment).extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    let figment = Figment::new()
        .merge(Serialized::defaults(CredsealConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider());
    merge_credential_env(figment)
}

/// Path of the per-user config file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("credseal").join(LOCAL_CONFIG_FILE))
}

/// Create the `CREDSEAL_` environment provider for the `server` and `log`
/// sections.
///
/// Uses explicit section mapping rather than `Env::split("_")` because field
/// names contain underscores: `CREDSEAL_SERVER_FRONTEND_URL` must become
/// `server.frontend_url`, not `server.frontend.url`. Variables outside those
/// sections are skipped.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).filter_map(|key| map_env_key(key.as_str()).map(Into::into))
}

/// Map a prefix-stripped variable name (`SERVER_FRONTEND_URL`) onto its
/// dotted config key (`server.frontend_url`).
///
/// Returns `None` for names outside [`PREFIXED_ENV_SECTIONS`].
pub fn map_env_key(key: &str) -> Option<String> {
    let key = key.to_ascii_lowercase();
    PREFIXED_ENV_SECTIONS.iter().find_map(|section| {
        key.strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|field| !field.is_empty())
            .map(|field| format!("{section}.{field}"))
    })
}

/// Merge the credential variables as string values.
fn merge_credential_env(figment: Figment) -> Figment {
    CREDENTIAL_ENV_VARS
        .iter()
        .fold(figment, |figment, (var, key)| match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => {
                debug!(var = %var, "credential setting taken from environment");
                figment.merge((*key, value))
            }
            _ => figment,
        })
}
