//! # spendmail-crypto
//!
//! Credential encryption at rest for `SpendMail`.
//!
//! Mail app-passwords are stored as a single text field in the settings
//! record, encrypted with AES-256-CBC under a key stretched from a
//! configured passphrase:
//!
//! - **Key derivation**: PBKDF2-HMAC-SHA256 with a fixed salt; the same
//!   passphrase always yields the same key, so derive once at startup
//!   ([`derive_key`])
//! - **Storage format**: `"{ivHex}:{cipherHex}"` with a fresh random 16-byte
//!   IV per encryption; the format is stable across versions
//! - **Failure mode**: decryption errors are surfaced, never swallowed,
//!   since they mean data corruption or a key mismatch
//!
//! ## Quick Start
//!
//! ```
//! use spendmail_crypto::SecretCipher;
//!
//! let cipher = SecretCipher::new("configured passphrase");
//!
//! let stored = cipher.encrypt("imap-app-password");
//! assert!(stored.contains(':'));
//!
//! let plaintext = cipher.decrypt(&stored)?;
//! assert_eq!(plaintext, "imap-app-password");
//! # Ok::<(), spendmail_crypto::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cipher;
mod error;
mod key;

pub use cipher::SecretCipher;
pub use error::{Error, Result};
pub use key::{KEY_LEN, derive_key};
