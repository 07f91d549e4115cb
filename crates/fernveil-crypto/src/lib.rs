//! Fernet-compatible authenticated token encryption.
//!
//! This crate implements the standard Fernet token format: AES-128-CBC
//! encryption with PKCS7 padding, authenticated by HMAC-SHA256, with a
//! version byte and big-endian timestamp in the header. Tokens are
//! transported as unpadded base64url strings.
//!
//! The building blocks (byte codec, padding, block cipher, MAC) are exposed
//! as modules; [`token::FernetCipher`] composes them into the wire format.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod aes_cbc;
pub mod codec;
pub mod error;
pub mod hmac;
pub mod key;
pub mod pkcs7;
pub mod token;

pub use error::CryptoError;
pub use key::FernetKey;
pub use token::FernetCipher;
