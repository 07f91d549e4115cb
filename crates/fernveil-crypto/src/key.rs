//! Fernet key handling.
//!
//! A Fernet key is 32 raw bytes, transported as a 43-character unpadded
//! base64url string. It splits into two independent halves:
//! - `signing_key = key[0..16]` -- used only for HMAC-SHA256
//! - `encryption_key = key[16..32]` -- used only for AES-128-CBC

extern crate alloc;
use alloc::string::String;

use crate::CryptoError;
use crate::codec;

pub const KEY_LEN: usize = 32;
pub const HALF_KEY_LEN: usize = 16;

/// A 32-byte Fernet key.
///
/// The raw bytes are never printed; there is intentionally no `Debug` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct FernetKey {
    bytes: [u8; KEY_LEN],
}

impl core::fmt::Debug for FernetKey {
    /// Redacted: the raw key bytes are never printed.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FernetKey(<redacted>)")
    }
}

impl FernetKey {
    /// Wrap 32 raw key bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Decode a base64url key string, with or without `=` padding.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBase64`] if the string is not valid
    /// base64url, or [`CryptoError::InvalidKeyLength`] if it decodes to
    /// anything other than exactly 32 bytes. Both fail before any cipher
    /// operation is attempted.
    pub fn from_base64url(s: &str) -> Result<Self, CryptoError> {
        let decoded = codec::base64url_decode(s)?;
        let bytes: [u8; KEY_LEN] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                actual: decoded.len(),
            })?;
        Ok(Self { bytes })
    }

    /// Generate a fresh random key from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::CryptoUnavailable`] if the OS random source
    /// fails. There is no fallback to a weaker source.
    pub fn generate() -> Result<Self, CryptoError> {
        use rand::RngCore;
        let mut bytes = [0u8; KEY_LEN];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| CryptoError::CryptoUnavailable)?;
        Ok(Self { bytes })
    }

    /// Encode the key as a 43-character unpadded base64url string.
    #[must_use]
    pub fn to_base64url(&self) -> String {
        codec::base64url_encode(&self.bytes)
    }

    /// The first 16 bytes, used only for HMAC.
    #[must_use]
    pub fn signing_key(&self) -> &[u8; HALF_KEY_LEN] {
        self.bytes[..HALF_KEY_LEN]
            .try_into()
            .expect("key is exactly 32 bytes")
    }

    /// The last 16 bytes, used only for AES.
    #[must_use]
    pub fn encryption_key(&self) -> &[u8; HALF_KEY_LEN] {
        self.bytes[HALF_KEY_LEN..]
            .try_into()
            .expect("key is exactly 32 bytes")
    }
}
