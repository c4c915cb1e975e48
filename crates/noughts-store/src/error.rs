//! Error types for the store layer.

/// Errors that can occur while persisting or loading credentials.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading the backing file failed.
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// Writing or replacing the backing file failed.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    /// Serializing the credential set failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The backing file exists but does not parse as a credential set.
    /// Usually means the file was hand-edited or truncated.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
