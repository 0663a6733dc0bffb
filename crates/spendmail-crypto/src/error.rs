//! Error types for cipher operations.

/// Result type alias for cipher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced when a stored secret cannot be decrypted.
///
/// Every variant is operationally significant: the stored value is corrupt
/// or was encrypted under a different key. Callers must not swallow these
/// the way they would an unparsed email.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stored string is not in `ivHex:cipherHex` form.
    #[error("Malformed stored secret: {0}")]
    MalformedSecret(String),

    /// One of the hex segments failed to decode.
    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Decoded initialization vector is not 16 bytes.
    #[error("Invalid initialization vector length: expected 16 bytes, got {0}")]
    InvalidIvLength(usize),

    /// Block cipher rejected the padding: wrong key or corrupted ciphertext.
    #[error("Decryption failed: wrong key or corrupted ciphertext")]
    Decrypt,

    /// Decrypted bytes are not valid UTF-8.
    #[error("Decrypted secret is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
