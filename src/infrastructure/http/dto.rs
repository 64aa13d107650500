//! HTTP DTOs
//!
//! 请求体解码：支持 JSON 与 URL-encoded 表单，其它类型按空请求体处理

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::Value;

use crate::domain::user::{
    valid_email, valid_password, valid_username, NewUser, UserChanges, ValidationError,
};
use crate::infrastructure::http::error::ApiError;

/// 请求体中单个字段的原始形态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    /// 未提供（或 JSON `null`）
    #[default]
    Missing,
    Text(String),
    /// 提供了非字符串的值
    NotText,
}

impl FieldValue {
    fn from_json(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(Value::String(s)) => FieldValue::Text(s),
            Some(_) => FieldValue::NotText,
        }
    }

    fn from_form(value: Option<String>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Text)
    }

    /// 已提供则必须是合法字符串；未提供视为保持原值
    fn optional(
        self,
        error: ValidationError,
        valid: fn(&str) -> bool,
    ) -> Result<Option<String>, ValidationError> {
        match self {
            FieldValue::Missing => Ok(None),
            FieldValue::Text(s) if valid(&s) => Ok(Some(s)),
            FieldValue::Text(_) | FieldValue::NotText => Err(error),
        }
    }

    fn required(
        self,
        error: ValidationError,
        valid: fn(&str) -> bool,
    ) -> Result<String, ValidationError> {
        self.optional(error, valid)?.ok_or(error)
    }
}

/// users 资源的请求体
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPayload {
    pub username: FieldValue,
    pub email: FieldValue,
    pub password: FieldValue,
}

impl UserPayload {
    fn from_json(value: Value) -> Result<Self, ApiError> {
        let Value::Object(mut fields) = value else {
            return Err(ApiError::MalformedBody(
                "request body must be a JSON object".to_string(),
            ));
        };

        Ok(Self {
            username: FieldValue::from_json(fields.remove("username")),
            email: FieldValue::from_json(fields.remove("email")),
            password: FieldValue::from_json(fields.remove("password")),
        })
    }

    fn from_form(mut fields: HashMap<String, String>) -> Self {
        Self {
            username: FieldValue::from_form(fields.remove("username")),
            email: FieldValue::from_form(fields.remove("email")),
            password: FieldValue::from_form(fields.remove("password")),
        }
    }

    /// 创建：三个字段都必须提供，按 username、email、password 顺序校验
    pub fn into_new_user(self) -> Result<NewUser, ValidationError> {
        let username = self.username.required(ValidationError::Username, valid_username)?;
        let email = self.email.required(ValidationError::Email, valid_email)?;
        let password = self
            .password
            .required(ValidationError::Password, valid_password)?;

        Ok(NewUser {
            username,
            email,
            password,
        })
    }

    /// 更新：只校验已提供的字段
    pub fn into_changes(self) -> Result<UserChanges, ValidationError> {
        let username = self.username.optional(ValidationError::Username, valid_username)?;
        let email = self.email.optional(ValidationError::Email, valid_email)?;
        let password = self
            .password
            .optional(ValidationError::Password, valid_password)?;

        Ok(UserChanges {
            username,
            email,
            password,
        })
    }
}

fn mime_essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

#[async_trait]
impl<S> FromRequest<S> for UserPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| mime_essence(v).to_ascii_lowercase())
            .unwrap_or_default();

        if content_type == "application/json" || content_type.ends_with("+json") {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
            Self::from_json(value)
        } else if content_type == "application/x-www-form-urlencoded" {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
            Ok(Self::from_form(fields))
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn decode(content_type: Option<&str>, body: &str) -> Result<UserPayload, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/users");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        UserPayload::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_json_body() {
        let payload = decode(
            Some("application/json"),
            r#"{"username":"alice","email":null,"password":8,"extra":true}"#,
        )
        .await
        .unwrap();

        assert_eq!(payload.username, FieldValue::Text("alice".to_string()));
        assert_eq!(payload.email, FieldValue::Missing);
        assert_eq!(payload.password, FieldValue::NotText);
    }

    #[tokio::test]
    async fn test_json_with_charset() {
        let payload = decode(Some("application/json; charset=utf-8"), r#"{"email":"a@b.co"}"#)
            .await
            .unwrap();
        assert_eq!(payload.email, FieldValue::Text("a@b.co".to_string()));
    }

    #[tokio::test]
    async fn test_form_body() {
        let payload = decode(
            Some("application/x-www-form-urlencoded"),
            "username=alice&email=a%40b.com",
        )
        .await
        .unwrap();

        assert_eq!(payload.username, FieldValue::Text("alice".to_string()));
        assert_eq!(payload.email, FieldValue::Text("a@b.com".to_string()));
        assert_eq!(payload.password, FieldValue::Missing);
    }

    #[tokio::test]
    async fn test_unknown_content_type_is_empty() {
        let payload = decode(Some("text/plain"), "username=alice").await.unwrap();
        assert_eq!(payload, UserPayload::default());

        let payload = decode(None, "").await.unwrap();
        assert_eq!(payload, UserPayload::default());
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let err = decode(Some("application/json"), "{not json").await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));

        let err = decode(Some("application/json"), "[1, 2]").await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[test]
    fn test_new_user_checks_fields_in_order() {
        let payload = UserPayload {
            username: FieldValue::Text("al".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.into_new_user(), Err(ValidationError::Username));

        let payload = UserPayload {
            username: FieldValue::Text("alice".to_string()),
            email: FieldValue::NotText,
            ..Default::default()
        };
        assert_eq!(payload.into_new_user(), Err(ValidationError::Email));

        let payload = UserPayload {
            username: FieldValue::Text("alice".to_string()),
            email: FieldValue::Text("a@b.com".to_string()),
            password: FieldValue::Missing,
        };
        assert_eq!(payload.into_new_user(), Err(ValidationError::Password));
    }

    #[test]
    fn test_changes_skip_missing_fields() {
        let payload = UserPayload {
            password: FieldValue::Text("new password".to_string()),
            ..Default::default()
        };
        assert_eq!(
            payload.into_changes(),
            Ok(UserChanges {
                password: Some("new password".to_string()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_changes_reject_empty_and_non_text() {
        let payload = UserPayload {
            username: FieldValue::Text(String::new()),
            ..Default::default()
        };
        assert_eq!(payload.into_changes(), Err(ValidationError::Username));

        let payload = UserPayload {
            email: FieldValue::NotText,
            ..Default::default()
        };
        assert_eq!(payload.into_changes(), Err(ValidationError::Email));
    }
}
