//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`DomainError`] into Actix responses here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, ErrorCode};

/// Standard error envelope returned by every failing route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    #[schema(example = "conflict")]
    code: ErrorCode,
    #[schema(example = "post already liked")]
    message: String,
}

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self {
            code: value.code(),
            message: value.message().to_owned(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if matches!(self.code, ErrorCode::InternalError) {
            // Whatever detail reached the message, the client only ever
            // sees the generic text.
            let mut redacted = self.clone();
            redacted.message = "Internal server error".to_owned();
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::unauthorized("who"), StatusCode::UNAUTHORIZED)]
    #[case(DomainError::forbidden("no"), StatusCode::FORBIDDEN)]
    #[case(DomainError::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(DomainError::conflict("dup"), StatusCode::CONFLICT)]
    #[case(DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn domain_codes_map_to_http_statuses(
        #[case] error: DomainError,
        #[case] expected: StatusCode,
    ) {
        let api_error = ApiError::from(error);
        assert_eq!(api_error.status_code(), expected);
    }

    #[rstest]
    fn internal_errors_are_redacted_in_the_response() {
        let api_error = ApiError::from(DomainError::internal("connection string leaked"));

        let response = api_error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(response.into_body());
        let bytes = actix_rt::System::new()
            .block_on(body)
            .expect("body is readable");
        let text = String::from_utf8(bytes.to_vec()).expect("utf8 body");
        assert!(!text.contains("connection string"));
        assert!(text.contains("Internal server error"));
    }

    #[rstest]
    fn non_internal_messages_pass_through() {
        let api_error = ApiError::from(DomainError::conflict("post already liked"));

        assert_eq!(api_error.message(), "post already liked");
        assert_eq!(api_error.code(), ErrorCode::Conflict);
    }
}
