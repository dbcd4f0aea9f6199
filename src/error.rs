/*
 * Responsibility
 * - Failure taxonomy of the authentication / authorization gate
 * - IntoResponse: HTTP status + `{ success: false, message, error }` body
 * - Internal detail (store errors, token errors) never reaches the body
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: &'static str,
    pub error: &'static str,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("no authentication token provided")]
    MissingToken,
    #[error("invalid authentication token")]
    InvalidToken,
    #[error("user does not exist")]
    UserNotFound,
    #[error("user not authenticated")]
    Unauthenticated,
    #[error("insufficient role permissions")]
    InsufficientRole,
    #[error("permission denied: {permission}")]
    PermissionDenied { permission: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken
            | AppError::InvalidToken
            | AppError::UserNotFound
            | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InsufficientRole | AppError::PermissionDenied { .. } => {
                StatusCode::FORBIDDEN
            }
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingToken => "MISSING_TOKEN",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::Unauthenticated => "UNAUTHORIZED",
            AppError::InsufficientRole => "INSUFFICIENT_ROLE",
            AppError::PermissionDenied { .. } => "FORBIDDEN",
            AppError::Internal => "SERVER_ERROR",
        }
    }

    /// Client-facing message. Clients match on these strings, keep them verbatim.
    pub fn message(&self) -> &'static str {
        match self {
            AppError::MissingToken => "未提供认证令牌",
            AppError::InvalidToken => "无效的认证令牌",
            AppError::UserNotFound => "用户不存在",
            AppError::Unauthenticated => "用户未认证",
            AppError::InsufficientRole => "角色权限不足",
            AppError::PermissionDenied { .. } => "权限不足",
            AppError::Internal => "服务器内部错误",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            message: self.message(),
            error: self.code(),
        };

        (self.status(), Json(body)).into_response()
    }
}
