//! Base64url and big-endian integer codecs for the token wire format.
//!
//! Fernet transports tokens and keys as base64url text with trailing `=`
//! padding stripped. Decoding tolerates both padded and unpadded input by
//! stripping any trailing padding before decoding.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::CryptoError;

/// Encode bytes as base64url with trailing `=` padding stripped.
#[must_use]
pub fn base64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a base64url string, tolerating absent or present `=` padding.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidBase64`] if the input contains characters
/// outside the `-`/`_` base64url alphabet.
pub fn base64url_decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    let trimmed = s.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .map_err(|_| CryptoError::InvalidBase64)
}

/// Encode an integer as 8 bytes, big-endian.
#[must_use]
pub fn encode_u64_be(n: u64) -> [u8; 8] {
    n.to_be_bytes()
}

/// Decode 8 big-endian bytes into an integer.
#[must_use]
pub fn decode_u64_be(bytes: &[u8; 8]) -> u64 {
    u64::from_be_bytes(*bytes)
}
