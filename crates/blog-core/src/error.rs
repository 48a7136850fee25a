//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// Every storage failure is translated into one of these before it leaves a
/// repository. Services hand them back to callers untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Unique or foreign-key constraint rejected the write.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }

    /// Connectivity or driver failure unrelated to the data itself.
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Query(_))
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Domain errors - what the application layer reports to adapters.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage failure: {0}")]
    Storage(#[source] RepoError),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity, id } => DomainError::NotFound {
                entity_type: entity,
                id,
            },
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            other => DomainError::Storage(other),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
