//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | UserNotFound | 404 |
//! | InvalidPlan | 400 |
//! | ValidationFailed | 400 |
//! | OperationFailed | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId};

/// Membership-specific errors.
///
/// `NotFound` and `UserNotFound` are always surfaced distinctly;
/// persistence failures collapse into `OperationFailed`, which keeps the
/// underlying cause attached for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipError {
    /// Membership was not found.
    NotFound(MembershipId),

    /// No user is registered under this email address.
    UserNotFound(String),

    /// Unrecognized membership plan.
    InvalidPlan(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// The store reported a failure; the original error is preserved.
    OperationFailed(DomainError),
}

impl MembershipError {
    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn user_not_found(email: impl Into<String>) -> Self {
        MembershipError::UserNotFound(email.into())
    }

    pub fn invalid_plan(plan: impl Into<String>) -> Self {
        MembershipError::InvalidPlan(plan.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn operation_failed(cause: DomainError) -> Self {
        MembershipError::OperationFailed(cause)
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) => ErrorCode::MembershipNotFound,
            MembershipError::UserNotFound(_) => ErrorCode::UserNotFound,
            MembershipError::InvalidPlan(_) => ErrorCode::InvalidPlan,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::OperationFailed(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFound(id) => format!("Membership not found: {}", id),
            MembershipError::UserNotFound(email) => {
                format!("No user registered with email: {}", email)
            }
            MembershipError::InvalidPlan(plan) => {
                format!("Invalid membership plan: {}", plan)
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::OperationFailed(cause) => {
                format!("Operation failed: {}", cause)
            }
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MembershipError::OperationFailed(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Port errors reaching a handler are persistence failures unless they
/// carry a more specific code. Lookup misses are modeled as `Option`, so
/// handlers construct `NotFound` themselves; everything arriving through
/// this conversion keeps its cause.
impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidPlan => {
                MembershipError::InvalidPlan(err.message.clone())
            }
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message.clone(),
            },
            _ => MembershipError::OperationFailed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_its_code() {
        let id = MembershipId::new();
        let err = MembershipError::not_found(id);
        assert_eq!(err.code(), ErrorCode::MembershipNotFound);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn user_not_found_names_the_email() {
        let err = MembershipError::user_not_found("reader@example.com");
        assert_eq!(err.code(), ErrorCode::UserNotFound);
        assert!(err.message().contains("reader@example.com"));
    }

    #[test]
    fn operation_failed_preserves_the_cause() {
        let cause = DomainError::new(ErrorCode::DatabaseError, "connection reset");
        let err = MembershipError::operation_failed(cause.clone());

        use std::error::Error;
        let source = err.source().expect("cause should be attached");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn domain_errors_convert_by_code() {
        let invalid = DomainError::new(ErrorCode::InvalidPlan, "Unknown membership plan: X");
        assert!(matches!(
            MembershipError::from(invalid),
            MembershipError::InvalidPlan(_)
        ));

        let validation = DomainError::validation("price_cents", "negative");
        assert!(matches!(
            MembershipError::from(validation),
            MembershipError::ValidationFailed { .. }
        ));

        let db = DomainError::new(ErrorCode::DatabaseError, "boom");
        assert!(matches!(
            MembershipError::from(db),
            MembershipError::OperationFailed(_)
        ));
    }
}
