//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to status
//! codes and a JSON envelope in `api::error`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request clashes with existing state, e.g. a duplicate unique key
    /// or an already-present follow/like edge.
    Conflict,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DomainError {
    #[schema(example = "conflict")]
    code: ErrorCode,
    #[schema(example = "username already registered")]
    message: String,
}

impl DomainError {
    /// Create a new error, panicking if the message is blank.
    ///
    /// # Panics
    /// Panics when `message` trims to the empty string; call sites always
    /// pass literals or formatted non-empty text.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(
            !message.trim().is_empty(),
            "domain error messages must not be blank"
        );
        Self { code, message }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(DomainError::unauthorized("who"), ErrorCode::Unauthorized)]
    #[case(DomainError::forbidden("no"), ErrorCode::Forbidden)]
    #[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
    #[case(DomainError::conflict("dup"), ErrorCode::Conflict)]
    #[case(DomainError::internal("boom"), ErrorCode::InternalError)]
    fn convenience_constructors_set_the_code(
        #[case] error: DomainError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn codes_serialise_as_snake_case() {
        let json = serde_json::to_value(DomainError::conflict("already liked"))
            .expect("serialisable error");
        assert_eq!(json["code"], "conflict");
        assert_eq!(json["message"], "already liked");
    }

    #[rstest]
    #[should_panic(expected = "must not be blank")]
    fn blank_messages_are_rejected() {
        let _ = DomainError::new(ErrorCode::NotFound, "   ");
    }
}
