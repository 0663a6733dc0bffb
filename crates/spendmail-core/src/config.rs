//! Process configuration.

use spendmail_crypto::SecretCipher;
use tracing::warn;

use crate::error::{Error, Result};

/// Environment variable holding the credential-cipher passphrase.
pub const SECRET_KEY_VAR: &str = "SPENDMAIL_SECRET_KEY";

/// Fallback passphrase for development builds only.
///
/// Release builds refuse to start without [`SECRET_KEY_VAR`]; a hard-coded
/// key must never be reachable in production.
const DEV_SECRET_KEY: &str = "spendmail-dev-only-secret";

/// Configuration read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Passphrase the credential cipher key is derived from.
    pub secret_key: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error in release builds when [`SECRET_KEY_VAR`] is
    /// unset or empty. Debug builds fall back to a development key and log a
    /// warning instead.
    pub fn from_env() -> Result<Self> {
        Self::from_secret(std::env::var(SECRET_KEY_VAR).ok())
    }

    /// Resolves the passphrase from an optional environment value.
    fn from_secret(value: Option<String>) -> Result<Self> {
        match value {
            Some(secret_key) if !secret_key.is_empty() => Ok(Self { secret_key }),
            _ if cfg!(debug_assertions) => {
                warn!("{SECRET_KEY_VAR} is not set, falling back to the development key");
                Ok(Self {
                    secret_key: DEV_SECRET_KEY.to_string(),
                })
            }
            _ => Err(Error::Config(format!(
                "{SECRET_KEY_VAR} must be set to a non-empty passphrase"
            ))),
        }
    }

    /// Builds the credential cipher from the configured passphrase.
    ///
    /// Key stretching is deliberately slow; call once at startup and share
    /// the cipher.
    #[must_use]
    pub fn secret_cipher(&self) -> SecretCipher {
        SecretCipher::new(&self.secret_key)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_secret_key_is_used() {
        let config = Config::from_secret(Some("from-environment".to_string())).unwrap();
        assert_eq!(config.secret_key, "from-environment");
    }

    #[test]
    fn test_missing_secret_key_falls_back_in_debug_builds() {
        // Test binaries are debug builds, so the development fallback path
        // is the one exercised here.
        let config = Config::from_secret(None).unwrap();
        assert_eq!(config.secret_key, DEV_SECRET_KEY);

        let config = Config::from_secret(Some(String::new())).unwrap();
        assert_eq!(config.secret_key, DEV_SECRET_KEY);
    }

    #[test]
    fn test_cipher_roundtrip_from_config() {
        let config = Config {
            secret_key: "test passphrase".to_string(),
        };
        let cipher = config.secret_cipher();
        let stored = cipher.encrypt("app-password");
        assert_eq!(cipher.decrypt(&stored).unwrap(), "app-password");
    }
}
