// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for credseal.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level credseal configuration.
///
/// Every section is optional and defaults to sensible values, so an empty
/// file (or no file at all) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredsealConfig {
    /// The protected API credential.
    #[serde(default)]
    pub credential: CredentialConfig,

    /// Settings read by the HTTP server that consumes the credential.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Where the protected credential comes from.
///
/// Either `encrypted_secret` + `master_key`, or `plaintext_secret` as an
/// unencrypted fallback. Empty strings are treated as absent.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialConfig {
    /// Human-readable label used in log lines and errors.
    #[serde(default = "default_credential_name")]
    pub name: String,

    /// Envelope produced by `credseal encrypt` (`nonce:tag:ciphertext`, hex).
    #[serde(default)]
    pub encrypted_secret: Option<String>,

    /// Passphrase the envelope key is derived from.
    #[serde(default)]
    pub master_key: Option<String>,

    /// Unencrypted credential, used only when no encrypted pair is configured.
    #[serde(default)]
    pub plaintext_secret: Option<String>,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            name: default_credential_name(),
            encrypted_secret: None,
            master_key: None,
            plaintext_secret: None,
        }
    }
}

impl CredentialConfig {
    /// The envelope, if configured and non-blank.
    pub fn encrypted_secret(&self) -> Option<&str> {
        non_blank(self.encrypted_secret.as_deref())
    }

    /// The passphrase, if configured and non-blank.
    pub fn master_key(&self) -> Option<&str> {
        non_blank(self.master_key.as_deref())
    }

    /// The plaintext fallback, if configured and non-blank.
    pub fn plaintext_secret(&self) -> Option<&str> {
        non_blank(self.plaintext_secret.as_deref())
    }
}

// Secret values never reach log output through `{:?}`.
impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn presence(value: Option<&str>) -> &'static str {
            if value.is_some() { "[REDACTED]" } else { "None" }
        }

        f.debug_struct("CredentialConfig")
            .field("name", &self.name)
            .field("encrypted_secret", &presence(self.encrypted_secret()))
            .field("master_key", &presence(self.master_key()))
            .field("plaintext_secret", &presence(self.plaintext_secret()))
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_credential_name() -> String {
    "api key".to_string()
}

/// HTTP server settings consumed alongside the credential.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin of the browser frontend allowed by CORS.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Deployment environment name (development, production, test).
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            frontend_url: default_frontend_url(),
            environment: default_environment(),
        }
    }
}

impl ServerConfig {
    /// True when running with `environment = "production"`.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn default_port() -> u16 {
    5000
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_treated_as_absent() {
        let config = CredentialConfig {
            encrypted_secret: Some("   ".to_string()),
            master_key: Some(String::new()),
            plaintext_secret: Some("sk-plain".to_string()),
            ..Default::default()
        };
        assert_eq!(config.encrypted_secret(), None);
        assert_eq!(config.master_key(), None);
        assert_eq!(config.plaintext_secret(), Some("sk-plain"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = CredentialConfig {
            master_key: Some("super-secret-master-key".to_string()),
            plaintext_secret: Some("sk-live-123".to_string()),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-master-key"));
        assert!(!rendered.contains("sk-live-123"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(rendered.contains("api key"));
    }

    #[test]
    fn production_detection_is_case_insensitive() {
        let server = ServerConfig {
            environment: "Production".to_string(),
            ..Default::default()
        };
        assert!(server.is_production());
        assert!(!ServerConfig::default().is_production());
    }
}
