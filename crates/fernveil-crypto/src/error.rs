use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Input is not valid base64url.
    InvalidBase64,
    /// Key material did not decode to exactly 32 bytes.
    InvalidKeyLength { actual: usize },
    /// Decoded token is shorter than the fixed header plus MAC.
    InvalidTokenLength { min: usize, actual: usize },
    /// Token version byte is not 0x80.
    UnsupportedVersion(u8),
    /// HMAC-SHA256 over the token body did not match.
    HmacVerificationFailed,
    /// Ciphertext was empty or not block-aligned.
    DecryptionFailed,
    /// Recovered plaintext is not valid UTF-8.
    InvalidUtf8,
    /// The OS random source failed; no weak fallback is taken.
    CryptoUnavailable,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidBase64 => write!(f, "invalid base64url input"),
            CryptoError::InvalidKeyLength { actual } => {
                write!(f, "invalid key length: expected 32 bytes, got {actual}")
            }
            CryptoError::InvalidTokenLength { min, actual } => {
                write!(f, "invalid token length: need at least {min} bytes, got {actual}")
            }
            CryptoError::UnsupportedVersion(v) => {
                write!(f, "unsupported token version: 0x{v:02x}")
            }
            CryptoError::HmacVerificationFailed => write!(f, "HMAC verification failed"),
            CryptoError::DecryptionFailed => write!(f, "decryption failed"),
            CryptoError::InvalidUtf8 => write!(f, "plaintext is not valid UTF-8"),
            CryptoError::CryptoUnavailable => {
                write!(f, "cryptographically strong random source unavailable")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CryptoError {}
