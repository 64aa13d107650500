//! User Context - Entity

use serde::{Deserialize, Serialize};

use super::validation::{valid_email, valid_password, valid_username};
use super::ValidationError;

/// 用户主键，由存储层自增分配
pub type UserId = i64;

/// User 实体
///
/// 注意: password 以明文存储并原样返回，这是已知的安全缺陷，不在本服务范围内修复。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 待创建的用户（尚未分配 id）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// 按 username、email、password 的顺序校验，返回第一个失败的字段
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !valid_username(&self.username) {
            return Err(ValidationError::Username);
        }
        if !valid_email(&self.email) {
            return Err(ValidationError::Email);
        }
        if !valid_password(&self.password) {
            return Err(ValidationError::Password);
        }
        Ok(())
    }
}

/// 部分更新的变更集
///
/// 只有 `Some` 的字段会被校验并写入；`None` 表示保持原值。
/// 空字符串属于“已提供”，会按规则校验（因此被拒绝）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(&self.username, Some(username) if !valid_username(username)) {
            return Err(ValidationError::Username);
        }
        if matches!(&self.email, Some(email) if !valid_email(email)) {
            return Err(ValidationError::Email);
        }
        if matches!(&self.password, Some(password) if !valid_password(password)) {
            return Err(ValidationError::Password);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// 已提供字段的 (列名, 新值) 列表，顺序固定
    pub fn assignments(&self) -> Vec<(&'static str, &str)> {
        [
            ("username", self.username.as_deref()),
            ("email", self.email.as_deref()),
            ("password", self.password.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|value| (column, value)))
        .collect()
    }
}
