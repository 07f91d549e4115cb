//! PKCS7 padding for the AES-CBC layer.
//!
//! Padding is standard PKCS7. Unpadding is deliberately lenient: malformed
//! padding returns the data unchanged instead of failing. The tokens this
//! crate authenticates are HMAC-verified before any decryption, so by the
//! time unpadding runs the bytes are exactly what the encrypting side
//! produced; the lenient path only shows through for plaintexts that were
//! never padded by this crate.

extern crate alloc;
use alloc::vec::Vec;

/// Pad `data` to a multiple of `block_size` using PKCS7.
///
/// If the data length is already a multiple of `block_size`, a full block of
/// padding is appended (so there is always at least 1 byte of padding).
///
/// # Panics
///
/// Panics if `block_size` is 0 or greater than 255.
#[must_use]
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    assert!(
        (1..=255).contains(&block_size),
        "PKCS7 block_size must be in 1..=255, got {block_size}"
    );

    let pad_len = block_size - (data.len() % block_size);
    let pad_byte = pad_len as u8;

    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_byte);
    out
}

/// Remove PKCS7 padding, returning the data unchanged when the padding is
/// not well-formed.
///
/// The last byte is read as the claimed pad length. If it is outside
/// `1..=16`, longer than the data, or the trailing bytes do not all equal
/// the pad value, the input is returned as-is. This is NOT strict PKCS7
/// rejection; callers that need hard validation must check separately.
#[must_use]
pub fn pkcs7_unpad_lenient(data: &[u8]) -> &[u8] {
    let Some(&pad_byte) = data.last() else {
        return data;
    };
    let pad_len = pad_byte as usize;

    if pad_len == 0 || pad_len > 16 || pad_len > data.len() {
        return data;
    }

    let content_len = data.len() - pad_len;
    if data[content_len..].iter().any(|&b| b != pad_byte) {
        return data;
    }

    &data[..content_len]
}
