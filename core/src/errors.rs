use thiserror::Error;

/// Errors that can arise while processing a single action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("failed to decode payload: {0}")]
    MalformedPayload(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("key already exists for device: {0}")]
    AlreadyExists(String),
    #[error("no key found for device: {0}")]
    NotFound(String),
    #[error("key verification failed for device: {0}")]
    Mismatch(String),
    #[error("state write not confirmed for address: {0}")]
    WriteFailed(String),
}
