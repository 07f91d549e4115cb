//! Fernet token encryption.
//!
//! Implements the standard Fernet token format:
//!
//! ```text
//! base64url( version(1) || timestamp(8, big-endian) || IV(16) || ciphertext || HMAC-SHA256(32) )
//! ```
//!
//! The version byte is always `0x80`. The HMAC covers everything before the
//! MAC field. The timestamp records encryption time in Unix seconds; it is
//! carried but not re-validated on decode -- tokens here are opaque
//! field-level encryption, not session credentials, so expiry is a caller
//! concern.
//!
//! # Key split
//!
//! A 32-byte key is split as:
//! - `signing_key = key[0..16]` (first 16 bytes) -- used for HMAC
//! - `encryption_key = key[16..32]` (last 16 bytes) -- used for AES-128-CBC

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::key::{FernetKey, HALF_KEY_LEN};
use crate::{CryptoError, codec};

/// The only supported token version byte.
pub const VERSION: u8 = 0x80;
/// version(1) + timestamp(8) + IV(16).
pub const HEADER_LEN: usize = 25;
/// HMAC-SHA256 output length.
pub const HMAC_LEN: usize = 32;
/// Minimum decoded token length: header + MAC. A well-formed token is
/// always at least one AES block longer.
pub const MIN_TOKEN_LEN: usize = HEADER_LEN + HMAC_LEN;

const IV_OFFSET: usize = 9;

/// Fernet token cipher for authenticated symmetric encryption.
///
/// Holds a 32-byte key split into a signing key (HMAC-SHA256) and an
/// encryption key (AES-128-CBC). Encoding and decoding are pure functions
/// of (input, key); a single instance may be shared freely across threads.
pub struct FernetCipher {
    signing_key: [u8; HALF_KEY_LEN],
    encryption_key: [u8; HALF_KEY_LEN],
}

impl FernetCipher {
    /// Create a cipher from a key.
    #[must_use]
    pub fn new(key: &FernetKey) -> Self {
        Self {
            signing_key: *key.signing_key(),
            encryption_key: *key.encryption_key(),
        }
    }

    /// Encrypt `plaintext` into a token, stamped with the current time and a
    /// freshly generated random IV.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::CryptoUnavailable`] if the OS random source
    /// fails. There is no fallback to a weaker IV source.
    #[cfg(feature = "std")]
    pub fn encode(&self, plaintext: &str) -> Result<String, CryptoError> {
        let iv = generate_iv()?;
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock is after the Unix epoch")
            .as_secs();
        Ok(self.encode_with(plaintext.as_bytes(), now, &iv))
    }

    /// Encrypt `plaintext` with a specific timestamp and IV (for
    /// deterministic testing and for callers that manage their own clock).
    ///
    /// Returns the complete base64url token with padding stripped.
    #[must_use]
    pub fn encode_with(&self, plaintext: &[u8], timestamp: u64, iv: &[u8; 16]) -> String {
        let ciphertext = crate::aes_cbc::aes128_cbc_encrypt(&self.encryption_key, iv, plaintext);

        // msg = version || timestamp || IV || ciphertext
        let mut msg = Vec::with_capacity(HEADER_LEN + ciphertext.len() + HMAC_LEN);
        msg.push(VERSION);
        msg.extend_from_slice(&codec::encode_u64_be(timestamp));
        msg.extend_from_slice(iv);
        msg.extend_from_slice(&ciphertext);

        let mac = crate::hmac::hmac_sha256(&self.signing_key, &msg);
        msg.extend_from_slice(&mac);

        codec::base64url_encode(&msg)
    }

    /// Decrypt a token, verifying the HMAC and returning the plaintext as a
    /// UTF-8 string.
    ///
    /// # Errors
    ///
    /// Everything [`FernetCipher::decode_bytes`] returns, plus
    /// [`CryptoError::InvalidUtf8`] if the recovered bytes are not UTF-8.
    pub fn decode(&self, token: &str) -> Result<String, CryptoError> {
        let bytes = self.decode_bytes(token)?;
        String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8)
    }

    /// Decrypt a token, verifying the HMAC and returning the raw plaintext.
    ///
    /// Validation order: base64url decode, length, version byte, HMAC over
    /// everything before the MAC, then AES-CBC decryption. HMAC failure
    /// aborts before any decryption -- no partial plaintext ever exists.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBase64`] for undecodable input,
    /// [`CryptoError::InvalidTokenLength`] for tokens shorter than 57 bytes,
    /// [`CryptoError::UnsupportedVersion`] if the first byte is not `0x80`,
    /// [`CryptoError::HmacVerificationFailed`] on MAC mismatch, or
    /// [`CryptoError::DecryptionFailed`] if the ciphertext is not
    /// block-aligned.
    pub fn decode_bytes(&self, token: &str) -> Result<Vec<u8>, CryptoError> {
        let bytes = codec::base64url_decode(token)?;

        if bytes.len() < MIN_TOKEN_LEN {
            return Err(CryptoError::InvalidTokenLength {
                min: MIN_TOKEN_LEN,
                actual: bytes.len(),
            });
        }

        if bytes[0] != VERSION {
            return Err(CryptoError::UnsupportedVersion(bytes[0]));
        }

        let hmac_start = bytes.len() - HMAC_LEN;
        let signed = &bytes[..hmac_start];
        let received_mac: &[u8; HMAC_LEN] = bytes[hmac_start..]
            .try_into()
            .expect("MAC slice is exactly 32 bytes");

        crate::hmac::hmac_sha256_verify(&self.signing_key, signed, received_mac)?;

        let iv: [u8; 16] = signed[IV_OFFSET..HEADER_LEN]
            .try_into()
            .expect("IV slice is exactly 16 bytes");
        let ciphertext = &signed[HEADER_LEN..];

        crate::aes_cbc::aes128_cbc_decrypt(&self.encryption_key, &iv, ciphertext)
    }
}

/// Generate a fresh 16-byte IV from the OS random source.
///
/// # Errors
///
/// Returns [`CryptoError::CryptoUnavailable`] if the OS random source fails.
fn generate_iv() -> Result<[u8; 16], CryptoError> {
    use rand::RngCore;
    let mut iv = [0u8; 16];
    rand::rngs::OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|_| CryptoError::CryptoUnavailable)?;
    Ok(iv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher(fill: u8) -> FernetCipher {
        FernetCipher::new(&FernetKey::from_bytes([fill; 32]))
    }

    #[test]
    fn test_token_layout_deterministic() {
        let cipher = test_cipher(0x55);
        let iv = [0x11u8; 16];
        let timestamp = 1_700_000_000u64;

        let token = cipher.encode_with(b"hello", timestamp, &iv);
        let bytes = codec::base64url_decode(&token).unwrap();

        // 5-byte plaintext pads to one AES block.
        assert_eq!(bytes.len(), HEADER_LEN + 16 + HMAC_LEN);
        assert_eq!(bytes[0], VERSION);
        assert_eq!(&bytes[1..9], &codec::encode_u64_be(timestamp));
        assert_eq!(&bytes[9..25], &iv);
    }

    #[test]
    fn test_token_starts_with_heuristic_prefix() {
        // With the version byte 0x80 and a timestamp below 2^32 (any real
        // clock until 2106), the first six token characters are "gAAAAA".
        let cipher = test_cipher(0x42);
        let token = cipher.encode_with(b"prefix check", 1_700_000_000, &[0x07; 16]);
        assert!(token.starts_with("gAAAAA"), "got: {token}");
    }

    #[test]
    fn test_token_roundtrip_sizes() {
        let cipher = test_cipher(0x55);
        let iv = [0x23u8; 16];

        for size in [0, 1, 7, 15, 16, 17, 31, 32, 33, 100, 255, 256] {
            let data: Vec<u8> = (0..size).map(|i| (i & 0xFF) as u8).collect();
            let token = cipher.encode_with(&data, 1_700_000_000, &iv);

            let decrypted = cipher
                .decode_bytes(&token)
                .expect("roundtrip decryption should succeed");
            assert_eq!(decrypted, data, "roundtrip mismatch for size {size}");
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_token_encode_decode_roundtrip() {
        let cipher = test_cipher(0x42);
        let token = cipher.encode("sensitive value 123").unwrap();

        assert!(token.starts_with("gAAAAA"));
        assert!(!token.contains('='));
        assert_eq!(cipher.decode(&token).unwrap(), "sensitive value 123");
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_token_encode_uses_fresh_iv() {
        let cipher = test_cipher(0x42);
        let a = cipher.encode("same plaintext").unwrap();
        let b = cipher.encode("same plaintext").unwrap();
        assert_ne!(a, b, "two encodings must differ in IV");
    }

    #[test]
    fn test_token_decode_utf8_plaintext() {
        let cipher = test_cipher(0x42);
        let token = cipher.encode_with("身分證號 A123456789".as_bytes(), 1_700_000_000, &[9; 16]);
        assert_eq!(cipher.decode(&token).unwrap(), "身分證號 A123456789");
    }

    #[test]
    fn test_token_decode_non_utf8_plaintext() {
        let cipher = test_cipher(0x42);
        let token = cipher.encode_with(&[0xff, 0xfe, 0xfd], 1_700_000_000, &[9; 16]);
        assert_eq!(cipher.decode(&token), Err(CryptoError::InvalidUtf8));
        assert_eq!(
            cipher.decode_bytes(&token).unwrap(),
            vec![0xff, 0xfe, 0xfd]
        );
    }

    #[test]
    fn test_token_tamper_detection_by_region() {
        let cipher = test_cipher(0xCC);
        let token = cipher.encode_with(b"tamper detection test", 1_700_000_000, &[0x31; 16]);
        let bytes = codec::base64url_decode(&token).unwrap();
        let len = bytes.len();

        // Timestamp, IV, ciphertext, and MAC positions -- every flip must be
        // caught by HMAC verification (the version byte is checked first and
        // is covered by its own test).
        for &offset in &[1, 8, 9, 24, HEADER_LEN, len - HMAC_LEN, len - 1] {
            let mut corrupted = bytes.clone();
            corrupted[offset] ^= 0x01;
            let corrupted_token = codec::base64url_encode(&corrupted);
            assert_eq!(
                cipher.decode_bytes(&corrupted_token),
                Err(CryptoError::HmacVerificationFailed),
                "corrupting byte at offset {offset} should fail HMAC"
            );
        }
    }

    #[test]
    fn test_token_unsupported_version() {
        let cipher = test_cipher(0xAA);
        let token = cipher.encode_with(b"version test", 1_700_000_000, &[0x13; 16]);
        let mut bytes = codec::base64url_decode(&token).unwrap();

        // Version is rejected before the HMAC is even checked, so this holds
        // no matter what the rest of the token looks like.
        bytes[0] = 0x81;
        assert_eq!(
            cipher.decode_bytes(&codec::base64url_encode(&bytes)),
            Err(CryptoError::UnsupportedVersion(0x81))
        );

        bytes[0] = 0x00;
        assert_eq!(
            cipher.decode_bytes(&codec::base64url_encode(&bytes)),
            Err(CryptoError::UnsupportedVersion(0x00))
        );
    }

    #[test]
    fn test_token_too_short() {
        let cipher = test_cipher(0xAA);

        // 56 bytes is one short of the minimum.
        let short = codec::base64url_encode(&[0x80; MIN_TOKEN_LEN - 1]);
        assert_eq!(
            cipher.decode_bytes(&short),
            Err(CryptoError::InvalidTokenLength {
                min: MIN_TOKEN_LEN,
                actual: MIN_TOKEN_LEN - 1,
            })
        );

        assert_eq!(
            cipher.decode_bytes(""),
            Err(CryptoError::InvalidTokenLength {
                min: MIN_TOKEN_LEN,
                actual: 0,
            })
        );
    }

    #[test]
    fn test_token_minimum_length_no_ciphertext() {
        // Exactly 57 bytes passes the length check; with a valid MAC the
        // empty ciphertext is then rejected by the AES layer.
        let key = FernetKey::from_bytes([0xBB; 32]);
        let cipher = FernetCipher::new(&key);

        let mut msg = Vec::with_capacity(MIN_TOKEN_LEN);
        msg.push(VERSION);
        msg.extend_from_slice(&codec::encode_u64_be(1_700_000_000));
        msg.extend_from_slice(&[0x11; 16]);
        let mac = crate::hmac::hmac_sha256(key.signing_key(), &msg);
        msg.extend_from_slice(&mac);
        assert_eq!(msg.len(), MIN_TOKEN_LEN);

        assert_eq!(
            cipher.decode_bytes(&codec::base64url_encode(&msg)),
            Err(CryptoError::DecryptionFailed)
        );
    }

    #[test]
    fn test_token_non_block_aligned_ciphertext() {
        // Valid MAC over a 5-byte ciphertext -- rejected by the AES layer.
        let key = FernetKey::from_bytes([0xEE; 32]);
        let cipher = FernetCipher::new(&key);

        let mut msg = Vec::new();
        msg.push(VERSION);
        msg.extend_from_slice(&codec::encode_u64_be(1_700_000_000));
        msg.extend_from_slice(&[0x11; 16]);
        msg.extend_from_slice(&[0x22; 5]);
        let mac = crate::hmac::hmac_sha256(key.signing_key(), &msg);
        msg.extend_from_slice(&mac);

        assert_eq!(
            cipher.decode_bytes(&codec::base64url_encode(&msg)),
            Err(CryptoError::DecryptionFailed)
        );
    }

    #[test]
    fn test_token_wrong_key() {
        let cipher_a = test_cipher(0xAA);
        let cipher_b = test_cipher(0xBB);

        let token = cipher_a.encode_with(b"secret message", 1_700_000_000, &[0x77; 16]);
        assert_eq!(
            cipher_b.decode_bytes(&token),
            Err(CryptoError::HmacVerificationFailed)
        );
    }

    #[test]
    fn test_token_not_base64() {
        let cipher = test_cipher(0xAA);
        assert_eq!(
            cipher.decode_bytes("definitely not base64!!!"),
            Err(CryptoError::InvalidBase64)
        );
    }

    #[test]
    fn test_token_decode_accepts_padded_input() {
        let cipher = test_cipher(0x42);
        let token = cipher.encode_with(b"padding tolerance", 1_700_000_000, &[5; 16]);
        let padded = format!("{token}==");
        assert_eq!(
            cipher.decode_bytes(&padded).unwrap(),
            b"padding tolerance"
        );
    }
}
