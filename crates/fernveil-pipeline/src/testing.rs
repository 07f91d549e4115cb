//! Generic conformance assertions for [`TokenCipher`] implementations.
//!
//! These helpers validate invariants that every decryption strategy must
//! satisfy, regardless of whether it decrypts locally or delegates to an
//! endpoint.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fernveil_pipeline::testing;
//!
//! let cipher = LocalCipher::new(&key);
//! testing::assert_cipher_conformance(&cipher).await;
//! ```

use crate::cipher::TokenCipher;

/// Assert that an empty batch yields an empty mapping.
pub async fn assert_empty_batch_yields_empty_map(cipher: &impl TokenCipher) {
    let mapping = cipher.decrypt_batch(&[]).await;
    assert!(
        mapping.is_empty(),
        "empty batch must yield an empty mapping"
    );
}

/// Assert that undecryptable garbage never errors and never appears in the
/// mapping.
pub async fn assert_garbage_tokens_are_skipped(cipher: &impl TokenCipher) {
    let garbage = vec![
        "gAAAAAnot-actually-a-valid-token-but-heuristic-shaped-xxxx".to_string(),
        "not even base64url shaped !!!".to_string(),
        String::new(),
    ];
    let mapping = cipher.decrypt_batch(&garbage).await;
    for token in &garbage {
        assert!(
            !mapping.contains_key(token),
            "garbage token must not be mapped: {token}"
        );
    }
}

/// Assert that every key in the mapping came from the input batch.
pub async fn assert_mapping_keys_are_inputs(cipher: &impl TokenCipher, tokens: &[String]) {
    let mapping = cipher.decrypt_batch(tokens).await;
    for key in mapping.keys() {
        assert!(
            tokens.contains(key),
            "mapping key was not in the input batch: {key}"
        );
    }
}

/// Run all strategy-independent conformance checks.
///
/// This is a convenience that calls:
/// - [`assert_empty_batch_yields_empty_map`]
/// - [`assert_garbage_tokens_are_skipped`]
pub async fn assert_cipher_conformance(cipher: &impl TokenCipher) {
    assert_empty_batch_yields_empty_map(cipher).await;
    assert_garbage_tokens_are_skipped(cipher).await;
}
