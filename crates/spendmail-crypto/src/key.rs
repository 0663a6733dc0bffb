//! Key derivation from the configured passphrase.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Fixed key-derivation salt.
///
/// Hard-coded so that every deployment derives the same key from the same
/// passphrase and previously stored secrets keep decrypting. A
/// per-deployment salt would be stronger against offline dictionary attacks
/// on the passphrase, but would invalidate existing stored values.
const KDF_SALT: &[u8] = b"spendmail.mail-credentials.v1";

/// PBKDF2 iteration count.
const KDF_ROUNDS: u32 = 100_000;

/// Stretches a passphrase into a 32-byte cipher key.
///
/// Deterministic: the same passphrase always yields the same key, so the
/// derivation can run once at startup and the key be shared read-only for
/// the process lifetime.
#[must_use]
pub fn derive_key(passphrase: &str) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), KDF_SALT, KDF_ROUNDS, &mut key);
    key
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
    fn test_derivation_is_deterministic() {
        assert_eq!(derive_key("app-password-key"), derive_key("app-password-key"));
    }

    #[test]
    fn test_different_passphrases_yield_different_keys() {
        assert_ne!(derive_key("first"), derive_key("second"));
    }

    #[test]
    fn test_key_is_not_the_passphrase() {
        let key = derive_key("short");
        assert_eq!(key.len(), KEY_LEN);
        assert_ne!(&key[..5], b"short");
    }
}
