//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Credential cipher failure (key mismatch or corrupted stored value).
    #[error("Crypto error: {0}")]
    Crypto(#[from] spendmail_crypto::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backing record store failure.
    #[error("Store error: {0}")]
    Store(#[from] crate::import::StoreError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
