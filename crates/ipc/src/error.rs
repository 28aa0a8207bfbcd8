//! Bridge errors.

/// Failure to decode or encode a bridge message.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Malformed bridge JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty bridge message")]
    EmptyMessage,
}
