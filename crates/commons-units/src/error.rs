//! Normalized error type for content-store operations.
//!
//! Transport-agnostic: callers see actionable categories, not GraphQL or
//! HTTP details.

use thiserror::Error;

/// Normalized error for remote store and transport operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Entity not found by id.
    #[error("{entity} {id:?} not found")]
    NotFound { entity: &'static str, id: String },

    /// The operation conflicts with remote state, e.g. creating a unit for
    /// a language that already has one.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Request validation failed before any remote call.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The remote store is unreachable or the connection failed.
    #[error("store unavailable: {message}")]
    TransportUnavailable { message: String },

    /// The remote store returned an internal/unexpected error.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Whether retrying the same operation could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportUnavailable { .. })
    }

    /// Whether the fault was raised locally, before any network traffic.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::StoreError;

    #[test]
    fn display_includes_entity_and_id() {
        let err = StoreError::NotFound {
            entity: "unit",
            id: "u1".to_string(),
        };
        assert_eq!(err.to_string(), "unit \"u1\" not found");
    }

    #[test]
    fn only_transport_failures_are_retryable() {
        assert!(StoreError::TransportUnavailable {
            message: "timeout".to_string()
        }
        .is_retryable());
        assert!(!StoreError::Conflict {
            message: "duplicate unit".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn invalid_argument_is_a_validation_fault() {
        assert!(StoreError::InvalidArgument {
            message: "bad extension".to_string()
        }
        .is_validation());
        assert!(!StoreError::Internal {
            message: "boom".to_string()
        }
        .is_validation());
    }
}
