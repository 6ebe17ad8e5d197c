use thiserror::Error;

use orderdesk_core::DomainError;

/// Store operation error.
///
/// `NotFound` and `Conflict` are expected outcomes of a request; `Unavailable`
/// means the store itself failed and must surface as an internal error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
