//! Remote-delegating token cipher.
//!
//! Fallback strategy for hosts without local key material or strong crypto:
//! the whole candidate batch goes to an external decryption endpoint in one
//! request, and encryption is performed server-side.
//!
//! SECURITY CAVEAT: the symmetric key travels to the endpoint in the
//! request body. This matches the observed deployment, where the endpoint
//! is same-origin and development-only; it is not a pattern for crossing an
//! untrusted network.
//!
//! There is no timeout or cancellation contract here -- callers needing one
//! configure it on the [`reqwest::Client`] they pass in, or wrap the call
//! externally.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cipher::TokenCipher;
use crate::error::PipelineError;

/// Batch decryption request: `{ "tokens": [...], "key": "..." }`.
#[derive(Debug, Serialize)]
pub struct DecryptRequest<'a> {
    pub tokens: &'a [String],
    pub key: &'a str,
}

/// Batch decryption response, positionally aligned with the request's
/// `tokens` array. A `null` at position `i` means token `i` could not be
/// decrypted and must be left unchanged.
#[derive(Debug, Deserialize)]
pub struct DecryptResponse {
    pub values: Vec<Option<String>>,
}

/// Encryption request: `{ "text": "...", "key": "..." }`.
#[derive(Debug, Serialize)]
pub struct EncryptRequest<'a> {
    pub text: &'a str,
    pub key: &'a str,
}

/// Encryption response: `{ "token": "..." }`.
#[derive(Debug, Deserialize)]
pub struct EncryptResponse {
    pub token: Option<String>,
}

/// Token cipher that delegates all cryptography to an external endpoint.
pub struct RemoteDelegatingCipher {
    client: reqwest::Client,
    encrypt_url: String,
    decrypt_url: String,
    key: String,
}

impl RemoteDelegatingCipher {
    /// Create a delegating cipher with a default HTTP client.
    ///
    /// `key` is the base64url key string forwarded to the endpoint with
    /// every request (see the module-level security caveat).
    #[must_use]
    pub fn new(encrypt_url: impl Into<String>, decrypt_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), encrypt_url, decrypt_url, key)
    }

    /// Create a delegating cipher with a caller-configured HTTP client
    /// (timeouts, proxies, TLS policy).
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        encrypt_url: impl Into<String>,
        decrypt_url: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            encrypt_url: encrypt_url.into(),
            decrypt_url: decrypt_url.into(),
            key: key.into(),
        }
    }

    /// Encrypt a plaintext server-side.
    ///
    /// Unlike batch decryption, encryption failures propagate: a caller
    /// asking to encrypt has no original token to fall back to.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Transport`] on network failure,
    /// [`PipelineError::RemoteStatus`] on a non-2xx response, and
    /// [`PipelineError::MissingToken`] if the endpoint answered without a
    /// token.
    pub async fn encrypt(&self, text: &str) -> Result<String, PipelineError> {
        let response = self
            .client
            .post(&self.encrypt_url)
            .json(&EncryptRequest {
                text,
                key: &self.key,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::RemoteStatus(status.as_u16()));
        }

        let body: EncryptResponse = response.json().await?;
        body.token.ok_or(PipelineError::MissingToken)
    }

    async fn request_decrypt(
        &self,
        tokens: &[String],
    ) -> Result<HashMap<String, String>, PipelineError> {
        let response = self
            .client
            .post(&self.decrypt_url)
            .json(&DecryptRequest {
                tokens,
                key: &self.key,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::RemoteStatus(status.as_u16()));
        }

        let body: DecryptResponse = response.json().await?;
        if body.values.len() != tokens.len() {
            return Err(PipelineError::MisalignedResponse {
                sent: tokens.len(),
                got: body.values.len(),
            });
        }

        let mut mapping = HashMap::with_capacity(tokens.len());
        for (token, value) in tokens.iter().zip(body.values) {
            if let Some(plaintext) = value {
                mapping.insert(token.clone(), plaintext);
            }
        }
        Ok(mapping)
    }
}

impl TokenCipher for RemoteDelegatingCipher {
    /// One batched request per call. Transport failure, a non-2xx status,
    /// or a malformed response degrades to an empty mapping -- every token
    /// stays unchanged and the caller is never failed.
    fn decrypt_batch(
        &self,
        tokens: &[String],
    ) -> impl Future<Output = HashMap<String, String>> + Send {
        async move {
            if tokens.is_empty() {
                return HashMap::new();
            }
            match self.request_decrypt(tokens).await {
                Ok(mapping) => mapping,
                Err(error) => {
                    tracing::warn!(
                        %error,
                        tokens = tokens.len(),
                        "remote decryption unavailable, leaving tokens unchanged"
                    );
                    HashMap::new()
                }
            }
        }
    }
}
