//! AES-128-CBC encryption and decryption.
//!
//! Provides AES-128-CBC encryption with PKCS7 padding (handled externally via
//! [`crate::pkcs7`]) and decryption with lenient PKCS7 unpadding. The IV is
//! passed explicitly and is **not** prepended to the ciphertext output.
//!
//! The cipher key is the 16-byte half of a 32-byte Fernet key, so the mode
//! is always AES-128.

extern crate alloc;
use alloc::vec::Vec;

use aes::Aes128;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::CryptoError;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Encrypt `plaintext` with AES-128-CBC using the given `key` and `iv`.
///
/// The plaintext is PKCS7-padded before encryption, so the output is always
/// a non-empty multiple of 16 bytes. The returned ciphertext does **not**
/// include the IV -- callers must transmit or store the IV separately.
#[must_use]
pub fn aes128_cbc_encrypt(key: &[u8; 16], iv: &[u8; 16], plaintext: &[u8]) -> Vec<u8> {
    let padded = crate::pkcs7::pkcs7_pad(plaintext, 16);
    let encryptor = Aes128CbcEnc::new(key.into(), iv.into());

    let mut out = alloc::vec![0u8; padded.len()];
    encryptor
        .encrypt_padded_b2b_mut::<NoPadding>(&padded, &mut out)
        .expect("output buffer is block-aligned and same size as padded input");
    out
}

/// Decrypt `ciphertext` with AES-128-CBC using the given `key` and `iv`.
///
/// After decryption, PKCS7 padding is removed leniently -- malformed padding
/// leaves the decrypted bytes unchanged rather than failing (see
/// [`crate::pkcs7::pkcs7_unpad_lenient`]).
///
/// # Errors
///
/// Returns [`CryptoError::DecryptionFailed`] if the ciphertext is empty or
/// not a multiple of 16 bytes.
pub fn aes128_cbc_decrypt(
    key: &[u8; 16],
    iv: &[u8; 16],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(16) {
        return Err(CryptoError::DecryptionFailed);
    }

    let decryptor = Aes128CbcDec::new(key.into(), iv.into());

    let mut buf = ciphertext.to_vec();
    let decrypted = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    let unpadded = crate::pkcs7::pkcs7_unpad_lenient(decrypted);
    Ok(unpadded.to_vec())
}
