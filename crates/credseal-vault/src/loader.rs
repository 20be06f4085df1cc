// SPDX-FileCopyrightText: 2026 Credseal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot credential loading at startup.
//!
//! Decision order:
//! 1. `encrypted_secret` + `master_key` both set: decrypt, and fail hard if
//!    that fails. The plaintext fallback is never consulted in this case.
//! 2. `plaintext_secret` set: use it and warn.
//! 3. Neither: configuration error.

use std::fmt;
use std::sync::Arc;

use credseal_config::CredentialConfig;
use credseal_core::{CipherService, CredsealError};
use secrecy::{ExposeSecret, SecretString};
use strum::{Display, EnumString};
use tracing::{info, warn};

use crate::cipher::EnvelopeCipher;

/// Which configured form produced the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CredentialSource {
    Encrypted,
    Plaintext,
}

/// The loaded credential.
///
/// Immutable and cheap to clone; load it once at startup and share it.
#[derive(Clone)]
pub struct Credential {
    secret: Arc<SecretString>,
    source: CredentialSource,
}

impl Credential {
    fn new(secret: SecretString, source: CredentialSource) -> Self {
        Self {
            secret: Arc::new(secret),
            source,
        }
    }

    /// Where the credential came from.
    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// A masked rendering safe for logs.
    pub fn masked(&self) -> String {
        mask_secret(self.secret.expose_secret())
    }
}

impl ExposeSecret<str> for Credential {
    fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .field("secret", &self.masked())
            .finish()
    }
}

/// Load the credential using the default [`EnvelopeCipher`].
pub fn load_credential(config: &CredentialConfig) -> Result<Credential, CredsealError> {
    load_credential_with(&EnvelopeCipher, config)
}

/// Load the credential, decrypting through `cipher`.
pub fn load_credential_with<C>(cipher: &C, config: &CredentialConfig) -> Result<Credential, CredsealError>
where
    C: CipherService + ?Sized,
{
    let name = config.name.as_str();

    match (config.encrypted_secret(), config.master_key()) {
        (Some(envelope), Some(master_key)) => {
            let passphrase = SecretString::from(master_key.to_owned());
            let secret = cipher
                .decrypt(envelope, &passphrase)
                .map_err(|e| CredsealError::Credential {
                    name: name.to_string(),
                    source: Box::new(e),
                })?;
            info!(name = %name, "decrypted credential");
            return Ok(Credential::new(secret, CredentialSource::Encrypted));
        }
        (Some(_), None) => {
            warn!(name = %name, "ENCRYPTED_SECRET is set but MASTER_KEY is not; ignoring the envelope");
        }
        (None, Some(_)) => {
            warn!(name = %name, "MASTER_KEY is set but ENCRYPTED_SECRET is not; ignoring the master key");
        }
        (None, None) => {}
    }

    if let Some(plaintext) = config.plaintext_secret() {
        warn!(
            name = %name,
            "using plaintext credential; run `credseal encrypt` and set ENCRYPTED_SECRET + MASTER_KEY instead"
        );
        return Ok(Credential::new(
            SecretString::from(plaintext.to_owned()),
            CredentialSource::Plaintext,
        ));
    }

    Err(CredsealError::Config(format!(
        "no {name} configured: set ENCRYPTED_SECRET and MASTER_KEY, or PLAINTEXT_SECRET"
    )))
}

/// Mask a secret for display, e.g. `"sk-a...mnop"`.
///
/// Shows the first and last four characters; values shorter than ten
/// characters are fully masked.
pub fn mask_secret(value: &str) -> String {
    let count = value.chars().count();
    if count < 10 {
        return "****".to_string();
    }
    let prefix: String = value.chars().take(4).collect();
    let suffix: String = value.chars().skip(count - 4).collect();
    format!("{prefix}...{suffix}")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use credseal_core::DerivedKey;
    use tracing_test::traced_test;

    use super::*;
    use crate::cipher;

    const MASTER_KEY: &str = "test-master-key";

    fn config(
        encrypted: Option<&str>,
        master_key: Option<&str>,
        plaintext: Option<&str>,
    ) -> CredentialConfig {
        CredentialConfig {
            name: "OpenAI API key".to_string(),
            encrypted_secret: encrypted.map(str::to_string),
            master_key: master_key.map(str::to_string),
            plaintext_secret: plaintext.map(str::to_string),
        }
    }

    fn envelope_for(secret: &str) -> String {
        cipher::encrypt(secret, &SecretString::from(MASTER_KEY.to_string())).unwrap()
    }

    /// Counts decrypt calls and always fails them.
    #[derive(Default)]
    struct FailingCipher {
        decrypts: AtomicUsize,
    }

    impl CipherService for FailingCipher {
        fn derive_key(&self, passphrase: &[u8]) -> Result<DerivedKey, CredsealError> {
            EnvelopeCipher.derive_key(passphrase)
        }

        fn encrypt(&self, _: &str, _: &SecretString) -> Result<String, CredsealError> {
            Err(CredsealError::encryption("unused"))
        }

        fn decrypt(&self, _: &str, _: &SecretString) -> Result<SecretString, CredsealError> {
            self.decrypts.fetch_add(1, Ordering::SeqCst);
            Err(CredsealError::decryption("tag mismatch"))
        }

        fn generate_master_key(&self) -> Result<SecretString, CredsealError> {
            EnvelopeCipher.generate_master_key()
        }
    }

    #[test]
    #[traced_test]
    fn encrypted_pair_is_decrypted() {
        let envelope = envelope_for("sk-test-key-12345");
        let cfg = config(Some(&envelope), Some(MASTER_KEY), None);

        let credential = load_credential(&cfg).unwrap();
        assert_eq!(credential.expose_secret(), "sk-test-key-12345");
        assert_eq!(credential.source(), CredentialSource::Encrypted);
        assert!(logs_contain("decrypted credential"));
    }

    #[test]
    fn encrypted_pair_takes_precedence_over_fallback() {
        let envelope = envelope_for("sk-encrypted");
        let cfg = config(Some(&envelope), Some(MASTER_KEY), Some("sk-plain"));

        let credential = load_credential(&cfg).unwrap();
        assert_eq!(credential.expose_secret(), "sk-encrypted");
        assert_eq!(credential.source(), CredentialSource::Encrypted);
    }

    #[test]
    #[traced_test]
    fn plaintext_fallback_is_used_with_warning() {
        let cfg = config(None, None, Some("sk-plain-text-key"));

        let credential = load_credential(&cfg).unwrap();
        assert_eq!(credential.expose_secret(), "sk-plain-text-key");
        assert_eq!(credential.source(), CredentialSource::Plaintext);
        assert!(logs_contain("using plaintext credential"));
    }

    #[test]
    fn nothing_configured_is_a_config_error() {
        let cfg = config(None, None, None);
        match load_credential(&cfg) {
            Err(CredsealError::Config(message)) => {
                assert!(message.contains("OpenAI API key"));
                assert!(message.contains("ENCRYPTED_SECRET"));
                assert!(message.contains("PLAINTEXT_SECRET"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let cfg = config(Some("  "), Some(""), Some(" "));
        assert!(matches!(load_credential(&cfg), Err(CredsealError::Config(_))));
    }

    #[test]
    fn wrong_master_key_fails_without_fallback() {
        let envelope = envelope_for("sk-encrypted");
        let cfg = config(Some(&envelope), Some("wrong-key"), Some("sk-plain"));

        match load_credential(&cfg) {
            Err(CredsealError::Credential { name, source }) => {
                assert_eq!(name, "OpenAI API key");
                assert!(matches!(*source, CredsealError::Decryption { .. }));
            }
            other => panic!("expected credential error, got {other:?}"),
        }
    }

    #[test]
    #[traced_test]
    fn decrypt_failure_is_returned_not_logged() {
        let envelope = envelope_for("sk-encrypted");
        let cfg = config(Some(&envelope), Some("wrong-key"), None);

        assert!(load_credential(&cfg).is_err());
        assert!(!logs_contain("ERROR"));
        assert!(!logs_contain("decrypted credential"));
    }

    #[test]
    fn malformed_envelope_fails_with_format_cause() {
        let cfg = config(Some("invalid-format"), Some(MASTER_KEY), Some("sk-plain"));

        match load_credential(&cfg) {
            Err(CredsealError::Credential { source, .. }) => {
                assert!(matches!(*source, CredsealError::Format(_)));
            }
            other => panic!("expected credential error, got {other:?}"),
        }
    }

    #[test]
    fn custom_cipher_failure_is_fatal() {
        let cipher = FailingCipher::default();
        let cfg = config(Some("a:b:c"), Some(MASTER_KEY), Some("sk-plain"));

        let result = load_credential_with(&cipher, &cfg);
        assert!(matches!(result, Err(CredsealError::Credential { .. })));
        assert_eq!(cipher.decrypts.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[traced_test]
    fn half_configured_pair_falls_back_with_warning() {
        let cipher = FailingCipher::default();
        let cfg = config(Some("a:b:c"), None, Some("sk-plain"));

        let credential = load_credential_with(&cipher, &cfg).unwrap();
        assert_eq!(credential.expose_secret(), "sk-plain");
        assert_eq!(cipher.decrypts.load(Ordering::SeqCst), 0);
        assert!(logs_contain("MASTER_KEY is not"));
    }

    #[test]
    fn credential_clones_share_the_secret() {
        let cfg = config(None, None, Some("sk-shared-value"));
        let credential = load_credential(&cfg).unwrap();
        let clone = credential.clone();
        assert!(Arc::ptr_eq(&credential.secret, &clone.secret));
    }

    #[test]
    fn debug_output_is_masked() {
        let cfg = config(None, None, Some("sk-ant-REDACTED"));
        let credential = load_credential(&cfg).unwrap();
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("abcdefghijklmnop"));
        assert!(rendered.contains("sk-a...mnop"));
    }

    #[test]
    fn credential_source_displays_lowercase() {
        assert_eq!(CredentialSource::Encrypted.to_string(), "encrypted");
        assert_eq!("plaintext".parse::<CredentialSource>().unwrap(), CredentialSource::Plaintext);
    }

    #[test]
    fn mask_secret_long_value() {
        assert_eq!(mask_secret("sk-ant-REDACTED"), "sk-a...mnop");
    }

    #[test]
    fn mask_secret_short_value() {
        assert_eq!(mask_secret("short"), "****");
    }

    #[test]
    fn mask_secret_exact_boundary() {
        assert_eq!(mask_secret("1234567890"), "1234...7890");
    }

    #[test]
    fn mask_secret_handles_multibyte_characters() {
        assert_eq!(mask_secret("🔐🔐🔐🔐-middle-🚀🚀🚀🚀"), "🔐🔐🔐🔐...🚀🚀🚀🚀");
    }
}
