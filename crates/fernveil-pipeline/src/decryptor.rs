//! Deep decryption of JSON response trees.

use std::collections::HashMap;

use serde_json::Value;

use crate::cipher::TokenCipher;
use crate::scanner;

/// Rewrites JSON values by replacing every decryptable token string with
/// its plaintext.
///
/// The strategy is fixed at construction: [`crate::cipher::LocalCipher`]
/// for in-process keys, [`crate::remote::RemoteDelegatingCipher`] for
/// hosts that delegate to an endpoint.
pub struct ResponseDecryptor<C: TokenCipher> {
    cipher: C,
}

impl<C: TokenCipher> ResponseDecryptor<C> {
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    /// Decrypt every token-looking string in `value`.
    ///
    /// Scans the tree for candidates, decrypts them in one batch, and
    /// rebuilds the tree with plaintext substituted. Structure, key order,
    /// and non-matching values are preserved exactly; a value with no
    /// candidates is returned as-is without a rebuild. Tokens that fail to
    /// decrypt stay in place -- this method cannot fail.
    pub async fn decrypt_deep(&self, value: Value) -> Value {
        let candidates = scanner::collect_tokens(&value);
        if candidates.is_empty() {
            return value;
        }

        let tokens: Vec<String> = candidates.into_iter().collect();
        let mapping = self.cipher.decrypt_batch(&tokens).await;
        if mapping.is_empty() {
            return value;
        }

        tracing::debug!(
            candidates = tokens.len(),
            decrypted = mapping.len(),
            "rebuilding response with decrypted fields"
        );
        rebuild(value, &mapping)
    }
}

/// Rebuild a value, replacing every string present in `mapping` with its
/// plaintext. Arrays and objects are reassembled in order; all other
/// values move through unchanged.
fn rebuild(value: Value, mapping: &HashMap<String, String>) -> Value {
    match value {
        Value::String(s) => match mapping.get(&s) {
            Some(plaintext) => Value::String(plaintext.clone()),
            None => Value::String(s),
        },
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| rebuild(v, mapping)).collect())
        }
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k, rebuild(v, mapping)))
                .collect(),
        ),
        other => other,
    }
}
