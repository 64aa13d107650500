//! User Context - Errors

use thiserror::Error;

/// 字段校验错误，每个变体对应一个失败的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid user's username: expected 4 to 32 characters")]
    Username,

    #[error("Invalid user's e-mail: expected local@domain.tld")]
    Email,

    #[error("Invalid user's password length: expected 8 to 256 characters")]
    Password,
}

impl ValidationError {
    /// 失败字段的列名
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Username => "username",
            ValidationError::Email => "email",
            ValidationError::Password => "password",
        }
    }
}
