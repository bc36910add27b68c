use crate::types::DbId;

/// Domain-level error type shared across crates.
///
/// HTTP mapping lives in the API crate; this type only carries the
/// classification and a human-readable message.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested row does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The caller supplied an invalid or incomplete payload.
    #[error("{0}")]
    Validation(String),

    /// Credential verification failed.
    #[error("{0}")]
    Unauthorized(String),

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}
