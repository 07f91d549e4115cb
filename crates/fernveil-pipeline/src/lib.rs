//! Sensitive-field scanning and batch decryption for JSON API responses.
//!
//! API responses carry Fernet-encrypted values in otherwise plaintext JSON.
//! This crate finds them and swaps in the plaintext:
//!
//! 1. [`scanner`] walks an arbitrary [`serde_json::Value`] and collects
//!    every string that looks like a Fernet token.
//! 2. A [`cipher::TokenCipher`] strategy decrypts the batch -- either
//!    locally with [`cipher::LocalCipher`], or by delegating the whole
//!    batch to an external endpoint with [`remote::RemoteDelegatingCipher`]
//!    when local key material is unavailable.
//! 3. [`decryptor::ResponseDecryptor`] rebuilds the response tree with each
//!    decrypted token replaced by its plaintext, leaving structure, key
//!    order, and every non-matching value untouched.
//!
//! A token that cannot be decrypted stays in place; one bad field never
//! fails the whole response.

pub mod cipher;
pub mod decryptor;
pub mod error;
pub mod logging;
pub mod remote;
pub mod scanner;
pub mod testing;

pub use cipher::{LocalCipher, TokenCipher};
pub use decryptor::ResponseDecryptor;
pub use error::PipelineError;
pub use remote::RemoteDelegatingCipher;
