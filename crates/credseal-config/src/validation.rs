// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express. Whether a usable
//! credential is present is decided later by the credential loader, not here.

use crate::diagnostic::ConfigError;
use crate::model::CredsealConfig;

/// Log levels accepted by `log.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CredsealConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.credential.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "credential.name must not be empty".to_string(),
        });
    }

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be between 1 and 65535".to_string(),
        });
    }

    let url = config.server.frontend_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("server.frontend_url `{url}` must start with http:// or https://"),
        });
    }

    if config.server.environment.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.environment must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = CredsealConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = CredsealConfig::default();
        config.log.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "log.level"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = CredsealConfig::default();
        config.log.level = "WARN".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn port_zero_fails_validation() {
        let mut config = CredsealConfig::default();
        config.server.port = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "server.port"));
    }

    #[test]
    fn frontend_url_without_scheme_fails_validation() {
        let mut config = CredsealConfig::default();
        config.server.frontend_url = "localhost:3000".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "server.frontend_url"));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = CredsealConfig::default();
        config.credential.name = " ".to_string();
        config.server.port = 0;
        config.server.environment = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn missing_credential_is_not_a_validation_error() {
        let config = CredsealConfig::default();
        assert!(config.credential.encrypted_secret().is_none());
        assert!(config.credential.plaintext_secret().is_none());
        assert!(validate_config(&config).is_ok());
    }
}
