//! Token decryption strategies.
//!
//! The execution environment decides once, at construction time, whether
//! tokens are decrypted locally ([`LocalCipher`]) or delegated to an
//! external endpoint ([`crate::remote::RemoteDelegatingCipher`]). Both
//! implement [`TokenCipher`], so the rest of the pipeline is strategy-blind.

use std::collections::HashMap;

use fernveil_crypto::{FernetCipher, FernetKey};

use crate::error::PipelineError;

/// Batch token decryption capability.
///
/// `decrypt_batch` returns token → plaintext for every decryption that
/// succeeded. Failures are isolated per token: a token that cannot be
/// decrypted is simply absent from the map, and the call itself never
/// fails. Implementations must never return partial plaintext for a token
/// that failed authentication.
pub trait TokenCipher: Send + Sync {
    /// Decrypt a batch of candidate tokens.
    fn decrypt_batch(
        &self,
        tokens: &[String],
    ) -> impl Future<Output = HashMap<String, String>> + Send;
}

/// Local decryption with an in-process [`FernetCipher`].
pub struct LocalCipher {
    cipher: FernetCipher,
}

impl LocalCipher {
    /// Create a local strategy for the given key.
    #[must_use]
    pub fn new(key: &FernetKey) -> Self {
        Self {
            cipher: FernetCipher::new(key),
        }
    }

    /// Encrypt a plaintext into a token with the local key.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Crypto`] if the OS random source fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, PipelineError> {
        Ok(self.cipher.encode(plaintext)?)
    }
}

impl TokenCipher for LocalCipher {
    fn decrypt_batch(
        &self,
        tokens: &[String],
    ) -> impl Future<Output = HashMap<String, String>> + Send {
        // Local decoding is synchronous and each token is an independent
        // pure function of (token, key); the future resolves immediately.
        async move {
            let mut mapping = HashMap::with_capacity(tokens.len());
            for token in tokens {
                match self.cipher.decode(token) {
                    Ok(plaintext) => {
                        mapping.insert(token.clone(), plaintext);
                    }
                    Err(error) => {
                        tracing::debug!(%error, "token left undecrypted");
                    }
                }
            }
            mapping
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_cipher() -> (LocalCipher, FernetCipher) {
        let key = FernetKey::from_bytes([0x42; 32]);
        (LocalCipher::new(&key), FernetCipher::new(&key))
    }

    #[tokio::test]
    async fn test_decrypt_batch_all_valid() {
        let (local, cipher) = local_cipher();
        let tokens = vec![
            cipher.encode_with(b"alpha", 1_700_000_000, &[1; 16]),
            cipher.encode_with(b"beta", 1_700_000_000, &[2; 16]),
        ];

        let mapping = local.decrypt_batch(&tokens).await;
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&tokens[0]], "alpha");
        assert_eq!(mapping[&tokens[1]], "beta");
    }

    #[tokio::test]
    async fn test_decrypt_batch_isolates_failures() {
        let (local, cipher) = local_cipher();
        let good = cipher.encode_with(b"alpha", 1_700_000_000, &[1; 16]);
        let wrong_key = FernetCipher::new(&FernetKey::from_bytes([0x99; 32]))
            .encode_with(b"beta", 1_700_000_000, &[2; 16]);
        let tokens = vec![good.clone(), wrong_key, "not a token".to_string()];

        let mapping = local.decrypt_batch(&tokens).await;
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping[&good], "alpha");
    }

    #[tokio::test]
    async fn test_decrypt_batch_empty() {
        let (local, _) = local_cipher();
        assert!(local.decrypt_batch(&[]).await.is_empty());
    }

    #[test]
    fn test_encrypt_roundtrips_through_decode() {
        let (local, cipher) = local_cipher();
        let token = local.encrypt("round trip").unwrap();
        assert_eq!(cipher.decode(&token).unwrap(), "round trip");
    }
}
