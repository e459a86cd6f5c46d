//! JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{AuthorizationError, ForbiddenReason};
use crate::domain::team::PolicyViolation;

/// Error categories returned to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    PermissionError,
    NotFoundError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::PermissionError => write!(f, "permission_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiErrorType::AuthenticationError, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiErrorType::PermissionError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }

    /// Translate a guard failure into an HTTP outcome
    ///
    /// With `conceal_all` every failure becomes a bare 404 so a caller cannot
    /// tell a missing team from a denied one. Store failures never expose
    /// their message.
    pub fn from_authorization(err: AuthorizationError, conceal_all: bool) -> Self {
        if conceal_all {
            return Self::not_found("Not found");
        }

        match &err {
            AuthorizationError::Unauthenticated => {
                Self::unauthorized("Authentication required").with_code("unauthenticated")
            }
            AuthorizationError::NotFound { .. } => Self::not_found(err.to_string()),
            AuthorizationError::Forbidden { reason, .. } => {
                Self::forbidden(err.to_string()).with_code(forbidden_code(reason))
            }
            AuthorizationError::Infrastructure(_) => {
                Self::internal("Authorization is temporarily unavailable")
            }
        }
    }
}

fn forbidden_code(reason: &ForbiddenReason) -> &'static str {
    match reason {
        ForbiddenReason::Policy(PolicyViolation::NotMember) => "not_member",
        ForbiddenReason::Policy(PolicyViolation::InactiveMembership) => "inactive_membership",
        ForbiddenReason::Policy(PolicyViolation::AdminRequired) => "admin_required",
        ForbiddenReason::Policy(PolicyViolation::OwnerRequired) => "owner_required",
        ForbiddenReason::InactiveUser => "inactive_user",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}
