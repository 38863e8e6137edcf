//! Per-request error taxonomy.
//!
//! Business rejections (`DuplicateCredential`, `InvalidCredential`,
//! `AlreadyBookmarked`, `Validation`) mean the request itself is invalid and
//! retrying will not help. `StorageUnavailable` and `Upstream` are faults of
//! a dependency; the same request may succeed later.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Username or email already belongs to an account.
    #[error("Username/Email already exists!")]
    DuplicateCredential,
    /// Unknown email or wrong password. The two are never distinguished.
    #[error("Invalid Email or Password!")]
    InvalidCredential,
    /// The (username, planet) pair is already saved.
    #[error("Already saved in your Universe!")]
    AlreadyBookmarked,
    /// Malformed or missing request input.
    #[error("{0}")]
    Validation(String),
    /// The persistence layer could not complete the operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    /// A third-party API failed or returned an unusable body.
    #[error("upstream service failed: {0}")]
    Upstream(String),
    /// A local failure unrelated to the request or a dependency.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateCredential => "duplicate_credential",
            Self::InvalidCredential => "invalid_credential",
            Self::AlreadyBookmarked => "already_bookmarked",
            Self::Validation(_) => "validation",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::Upstream(_) => "upstream",
            Self::Internal(_) => "internal",
        }
    }

    /// True when the failure lies with a dependency rather than the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_) | Self::Upstream(_))
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

/// Returns true when `err` is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_errors_not_retryable() {
        assert!(!ServiceError::DuplicateCredential.is_retryable());
        assert!(!ServiceError::InvalidCredential.is_retryable());
        assert!(!ServiceError::AlreadyBookmarked.is_retryable());
        assert!(!ServiceError::validation("bad").is_retryable());
    }

    #[test]
    fn test_dependency_errors_retryable() {
        assert!(ServiceError::StorageUnavailable("down".into()).is_retryable());
        assert!(ServiceError::Upstream("502".into()).is_retryable());
    }

    #[test]
    fn test_sqlx_errors_map_to_storage_unavailable() {
        let err: ServiceError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.code(), "storage_unavailable");
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }
}
