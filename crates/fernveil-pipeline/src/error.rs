//! Error types for the decryption pipeline.

use fernveil_crypto::CryptoError;

/// Errors that can occur in the decryption pipeline.
///
/// Per-token decryption failures never surface as errors -- the affected
/// token is simply left in place. These variants cover key-level
/// configuration problems and the remote delegation path.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote endpoint returned status {0}")]
    RemoteStatus(u16),
    #[error("remote response misaligned: sent {sent} tokens, got {got} values")]
    MisalignedResponse { sent: usize, got: usize },
    #[error("remote endpoint returned no token")]
    MissingToken,
}
