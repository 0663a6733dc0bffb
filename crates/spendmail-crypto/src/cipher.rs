//! AES-256-CBC cipher over the stored `ivHex:cipherHex` format.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::key::{KEY_LEN, derive_key};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Initialization vector length in bytes (AES block size).
const IV_LEN: usize = 16;

/// Symmetric cipher protecting mail credentials at rest.
///
/// Construct once at startup (key derivation is deliberately slow) and share
/// freely: the cipher holds only the derived key and is read-only, so
/// concurrent use needs no synchronization. Every [`encrypt`](Self::encrypt)
/// call draws a fresh random IV, so encrypting the same plaintext twice
/// produces different stored strings that decrypt identically.
///
/// CBC carries no authentication tag: decrypting with the wrong key surfaces
/// as a padding or UTF-8 error rather than a tag mismatch.
#[derive(Clone)]
pub struct SecretCipher {
    key: [u8; KEY_LEN],
}

impl SecretCipher {
    /// Creates a cipher by stretching `passphrase` into a key.
    #[must_use]
    pub fn new(passphrase: &str) -> Self {
        Self {
            key: derive_key(passphrase),
        }
    }

    /// Creates a cipher from an already-derived key.
    ///
    /// Useful for tests and key rotation tooling that manage raw keys.
    #[must_use]
    pub const fn from_key(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Encrypts a plaintext into the stored `ivHex:cipherHex` string.
    #[must_use]
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        format!("{}:{}", hex::encode(iv), hex::encode(ciphertext))
    }

    /// Decrypts a stored `ivHex:cipherHex` string back to the plaintext.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored string lacks the two-part format,
    /// either segment is not valid hex, the IV is not 16 bytes, the cipher
    /// rejects the padding (wrong key or corrupted ciphertext), or the
    /// plaintext is not UTF-8.
    pub fn decrypt(&self, stored: &str) -> Result<String> {
        let (iv_hex, cipher_hex) = stored
            .split_once(':')
            .ok_or_else(|| Error::MalformedSecret("missing ':' separator".to_string()))?;

        let iv: [u8; IV_LEN] = hex::decode(iv_hex)?
            .try_into()
            .map_err(|bytes: Vec<u8>| Error::InvalidIvLength(bytes.len()))?;
        let ciphertext = hex::decode(cipher_hex)?;

        let plaintext = Aes256CbcDec::new(&self.key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| Error::Decrypt)?;

        String::from_utf8(plaintext).map_err(Into::into)
    }
}

impl std::fmt::Debug for SecretCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("SecretCipher").finish_non_exhaustive()
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
    use proptest::prelude::*;

    fn test_cipher() -> SecretCipher {
        SecretCipher::from_key([0xAB; KEY_LEN])
    }

    #[test]
    fn test_roundtrip() {
        let cipher = test_cipher();
        let stored = cipher.encrypt("imap-app-password-123");
        assert_eq!(cipher.decrypt(&stored).unwrap(), "imap-app-password-123");
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let cipher = test_cipher();
        let stored = cipher.encrypt("");
        assert_eq!(cipher.decrypt(&stored).unwrap(), "");
    }

    #[test]
    fn test_unicode_plaintext_roundtrip() {
        let cipher = test_cipher();
        let stored = cipher.encrypt("mật khẩu ứng dụng ₫");
        assert_eq!(cipher.decrypt(&stored).unwrap(), "mật khẩu ứng dụng ₫");
    }

    #[test]
    fn test_fresh_iv_per_encryption() {
        let cipher = test_cipher();
        let first = cipher.encrypt("same plaintext");
        let second = cipher.encrypt("same plaintext");
        assert_ne!(first, second);
        assert_eq!(cipher.decrypt(&first).unwrap(), "same plaintext");
        assert_eq!(cipher.decrypt(&second).unwrap(), "same plaintext");
    }

    #[test]
    fn test_stored_format_shape() {
        let cipher = test_cipher();
        let stored = cipher.encrypt("shape");
        let (iv_hex, cipher_hex) = stored.split_once(':').unwrap();
        assert_eq!(iv_hex.len(), IV_LEN * 2);
        assert!(iv_hex.bytes().all(|b| b.is_ascii_hexdigit()));
        // PKCS#7 pads to whole blocks.
        assert_eq!(cipher_hex.len() % (IV_LEN * 2), 0);
    }

    #[test]
    fn test_missing_separator_errors() {
        let err = test_cipher().decrypt("deadbeef").unwrap_err();
        assert!(matches!(err, Error::MalformedSecret(_)));
    }

    #[test]
    fn test_non_hex_segment_errors() {
        let cipher = test_cipher();
        assert!(matches!(
            cipher.decrypt("zzzz:deadbeef").unwrap_err(),
            Error::HexDecode(_)
        ));
        let stored = cipher.encrypt("p");
        let (iv_hex, _) = stored.split_once(':').unwrap();
        assert!(matches!(
            cipher.decrypt(&format!("{iv_hex}:not-hex")).unwrap_err(),
            Error::HexDecode(_)
        ));
    }

    #[test]
    fn test_short_iv_errors() {
        let err = test_cipher().decrypt("deadbeef:deadbeef").unwrap_err();
        assert!(matches!(err, Error::InvalidIvLength(4)));
    }

    #[test]
    fn test_truncated_ciphertext_errors() {
        let cipher = test_cipher();
        let stored = cipher.encrypt("a longer app password");
        // Drop the final block (32 hex chars) to corrupt the padding.
        let truncated = &stored[..stored.len() - 32];
        assert!(cipher.decrypt(truncated).is_err());
    }

    #[test]
    fn test_wrong_key_never_recovers_plaintext() {
        let stored = test_cipher().encrypt("secret");
        // Unauthenticated CBC: the padding check usually rejects a wrong
        // key, and the original plaintext is never recovered either way.
        let other = SecretCipher::from_key([0x11; KEY_LEN]);
        assert_ne!(other.decrypt(&stored).ok().as_deref(), Some("secret"));
    }

    #[test]
    fn test_passphrase_constructor_roundtrip() {
        let cipher = SecretCipher::new("configured passphrase");
        let stored = cipher.encrypt("secret");
        assert_eq!(cipher.decrypt(&stored).unwrap(), "secret");

        let same_key = SecretCipher::new("configured passphrase");
        assert_eq!(same_key.decrypt(&stored).unwrap(), "secret");
    }

    proptest! {
        #[test]
        fn prop_roundtrip(plaintext in ".*") {
            let cipher = test_cipher();
            let stored = cipher.encrypt(&plaintext);
            prop_assert_eq!(cipher.decrypt(&stored).unwrap(), plaintext);
        }

        #[test]
        fn prop_decrypt_never_panics(stored in ".*") {
            let _ = test_cipher().decrypt(&stored);
        }
    }
}
