//! Mail sync settings.

use serde::{Deserialize, Serialize};
use spendmail_crypto::SecretCipher;
use tracing::debug;

use crate::error::Result;

/// Default IMAP port (implicit TLS).
pub const DEFAULT_IMAP_PORT: u16 = 993;

/// Mailbox settings for transaction email sync.
///
/// The app password never leaves this struct in the clear: it is encrypted
/// on every save and only decrypted on read. Re-saving replaces the stored
/// value wholesale with a fresh IV and fresh ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailSettings {
    /// Mailbox address the transaction emails arrive at.
    pub email: String,
    /// IMAP server hostname.
    pub imap_host: String,
    /// IMAP server port.
    pub imap_port: u16,
    /// App password in `ivHex:cipherHex` form.
    pub encrypted_password: String,
}

impl MailSettings {
    /// Creates settings, encrypting the app password.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        imap_host: impl Into<String>,
        imap_port: u16,
        cipher: &SecretCipher,
        password: &str,
    ) -> Self {
        Self {
            email: email.into(),
            imap_host: imap_host.into(),
            imap_port,
            encrypted_password: cipher.encrypt(password),
        }
    }

    /// Replaces the stored app password with a freshly encrypted value.
    pub fn set_password(&mut self, cipher: &SecretCipher, password: &str) {
        self.encrypted_password = cipher.encrypt(password);
        debug!("Replaced encrypted app password for {}", self.email);
    }

    /// Decrypts the stored app password.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored value is corrupt or was encrypted
    /// under a different key. Both are worth surfacing to the operator
    /// rather than skipping.
    pub fn password(&self, cipher: &SecretCipher) -> Result<String> {
        Ok(cipher.decrypt(&self.encrypted_password)?)
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
    use spendmail_crypto::KEY_LEN;

    fn test_cipher() -> SecretCipher {
        SecretCipher::from_key([0x42; KEY_LEN])
    }

    fn test_settings(cipher: &SecretCipher) -> MailSettings {
        MailSettings::new(
            "me@example.com",
            "imap.example.com",
            DEFAULT_IMAP_PORT,
            cipher,
            "app-password",
        )
    }

    #[test]
    fn test_password_roundtrip() {
        let cipher = test_cipher();
        let settings = test_settings(&cipher);
        assert_ne!(settings.encrypted_password, "app-password");
        assert_eq!(settings.password(&cipher).unwrap(), "app-password");
    }

    #[test]
    fn test_set_password_replaces_wholesale() {
        let cipher = test_cipher();
        let mut settings = test_settings(&cipher);
        let before = settings.encrypted_password.clone();

        settings.set_password(&cipher, "rotated-password");
        assert_ne!(settings.encrypted_password, before);
        assert_eq!(settings.password(&cipher).unwrap(), "rotated-password");
    }

    #[test]
    fn test_resaving_same_password_changes_stored_value() {
        let cipher = test_cipher();
        let mut settings = test_settings(&cipher);
        let before = settings.encrypted_password.clone();

        settings.set_password(&cipher, "app-password");
        // Fresh IV: stored value differs even for the same plaintext.
        assert_ne!(settings.encrypted_password, before);
        assert_eq!(settings.password(&cipher).unwrap(), "app-password");
    }

    #[test]
    fn test_wrong_key_never_recovers_plaintext() {
        let cipher = test_cipher();
        let settings = test_settings(&cipher);

        // CBC without authentication: a wrong key usually errors on padding,
        // and can never silently yield the original plaintext.
        let other = SecretCipher::from_key([0x24; KEY_LEN]);
        assert_ne!(
            settings.password(&other).ok().as_deref(),
            Some("app-password")
        );
    }

    #[test]
    fn test_debug_form_keeps_password_encrypted() {
        let cipher = test_cipher();
        let settings = test_settings(&cipher);
        let debugged = format!("{settings:?}");
        assert!(!debugged.contains("app-password"));
    }
}
