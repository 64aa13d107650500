//! HTTP Error Handling
//!
//! 所有错误响应体统一为 `{"error": {"code": "..."}}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;
use crate::domain::user::ValidationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
}

impl ErrorResponse {
    pub fn new(code: &'static str) -> Self {
        Self {
            error: ErrorBody { code },
        }
    }
}

/// 错误码定义
pub mod code {
    pub const INVALID_USER_ID: &str = "INVALID_USER_ID";
    pub const INVALID_USER_NAME: &str = "INVALID_USER_NAME";
    pub const INVALID_USER_EMAIL: &str = "INVALID_USER_EMAIL";
    pub const INVALID_PASSWORD: &str = "INVALID_PASSWORD";
    pub const INEXISTING_USER: &str = "INEXISTING_USER";
    pub const MALFORMED_BODY: &str = "MALFORMED_BODY";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 路径中的 id 不是安全整数
    InvalidUserId(String),
    /// 字段校验失败
    InvalidField(ValidationError),
    /// 用户不存在（PUT / DELETE）
    UserNotFound,
    /// 请求体无法解析
    MalformedBody(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidUserId(_) | ApiError::InvalidField(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidUserId(_) => code::INVALID_USER_ID,
            ApiError::InvalidField(ValidationError::Username) => code::INVALID_USER_NAME,
            ApiError::InvalidField(ValidationError::Email) => code::INVALID_USER_EMAIL,
            ApiError::InvalidField(ValidationError::Password) => code::INVALID_PASSWORD,
            ApiError::UserNotFound => code::INEXISTING_USER,
            ApiError::MalformedBody(_) => code::MALFORMED_BODY,
            ApiError::Internal(_) => code::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_code = self.code();

        match &self {
            ApiError::InvalidUserId(raw) => {
                tracing::warn!(code = error_code, id = %raw, "Invalid user id");
            }
            ApiError::InvalidField(e) => {
                tracing::warn!(code = error_code, field = e.field(), "Invalid user field");
            }
            ApiError::UserNotFound => {
                tracing::warn!(code = error_code, "User not found");
            }
            ApiError::MalformedBody(msg) => {
                tracing::warn!(code = error_code, error = %msg, "Malformed request body");
            }
            ApiError::Internal(msg) => {
                tracing::error!(code = error_code, error = %msg, "Internal server error");
            }
        }

        (status, Json(ErrorResponse::new(error_code))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidField(e)
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { .. } => ApiError::UserNotFound,
            ApplicationError::Validation(e) => ApiError::InvalidField(e),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
        }
    }
}
