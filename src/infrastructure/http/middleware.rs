//! HTTP Middleware
//!
//! - 状态码错误日志中间件
//! - `/users/:id` 的 id 校验中间件

use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::user::UserId;
use crate::infrastructure::http::error::ApiError;

/// 2^53 - 1，可被双精度浮点精确表示的最大整数
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// 已通过校验的路径 id，由 [`user_id_guard`] 写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdParam(pub UserId);

/// 将路径片段解析为安全整数
///
/// 语法与 JavaScript 的 `Number(string)` 一致：
/// - 首尾空白忽略，空串或纯空白视为 `0`
/// - `0x` / `0o` / `0b` 前缀（大小写均可，不带符号）按对应进制解析
/// - 其余按十进制/指数字面量解析，小数部分必须为零（如 `12.0`、`1e3`）
///
/// 结果绝对值不超过 [`MAX_SAFE_INTEGER`]。
pub fn parse_safe_integer(raw: &str) -> Option<UserId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }

    if let Some(n) = parse_radix_literal(trimmed) {
        return (n <= MAX_SAFE_INTEGER as u64).then_some(n as i64);
    }

    let range = -MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER;
    if let Ok(n) = trimmed.parse::<i64>() {
        return range.contains(&n).then_some(n);
    }

    // `inf`/`nan` 之类的关键字在 JS 中不是数字字面量，且都不是安全整数
    let f: f64 = trimmed.parse().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// `0x1f` / `0o17` / `0b101`，溢出 u64 时返回 `None`
fn parse_radix_literal(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &s[2..];
    // from_str_radix 接受前导 `+`，JS 不接受
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// id 校验中间件
///
/// 挂在所有 `/users/:id` 路由上，非安全整数直接返回 406，不进入 handler
pub async fn user_id_guard(Path(raw): Path<String>, mut request: Request, next: Next) -> Response {
    match parse_safe_integer(&raw) {
        Some(id) => {
            request.extensions_mut().insert(UserIdParam(id));
            next.run(request).await
        }
        None => ApiError::InvalidUserId(raw).into_response(),
    }
}

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Extension, Router,
    };
    use tower::util::ServiceExt;

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_safe_integer("42"), Some(42));
        assert_eq!(parse_safe_integer("-7"), Some(-7));
        assert_eq!(parse_safe_integer("+5"), Some(5));
        assert_eq!(parse_safe_integer(" 9 "), Some(9));
        assert_eq!(parse_safe_integer("9007199254740991"), Some(MAX_SAFE_INTEGER));
    }

    #[test]
    fn test_parse_integral_floats() {
        assert_eq!(parse_safe_integer("12.0"), Some(12));
        assert_eq!(parse_safe_integer("1e3"), Some(1000));
    }

    #[test]
    fn test_parse_radix_prefixes() {
        assert_eq!(parse_safe_integer("0x10"), Some(16));
        assert_eq!(parse_safe_integer("0XfF"), Some(255));
        assert_eq!(parse_safe_integer("0o17"), Some(15));
        assert_eq!(parse_safe_integer("0b11"), Some(3));
        assert_eq!(parse_safe_integer(" 0x1F "), Some(31));
        assert_eq!(parse_safe_integer("0x1fffffffffffff"), Some(MAX_SAFE_INTEGER));
    }

    #[test]
    fn test_parse_rejects_bad_radix_literals() {
        assert_eq!(parse_safe_integer("0x"), None);
        assert_eq!(parse_safe_integer("0x+1"), None);
        assert_eq!(parse_safe_integer("-0x10"), None);
        assert_eq!(parse_safe_integer("0b12"), None);
        assert_eq!(parse_safe_integer("0o8"), None);
        assert_eq!(parse_safe_integer("0x20000000000000"), None);
        assert_eq!(parse_safe_integer("0xffffffffffffffffff"), None);
    }

    #[test]
    fn test_parse_blank_is_zero() {
        assert_eq!(parse_safe_integer(""), Some(0));
        assert_eq!(parse_safe_integer(" "), Some(0));
        assert_eq!(parse_safe_integer("\t\n"), Some(0));
    }

    #[test]
    fn test_parse_rejects_unsafe_values() {
        assert_eq!(parse_safe_integer("abc"), None);
        assert_eq!(parse_safe_integer("1.5"), None);
        assert_eq!(parse_safe_integer("NaN"), None);
        assert_eq!(parse_safe_integer("Infinity"), None);
        assert_eq!(parse_safe_integer("9007199254740992"), None);
        assert_eq!(parse_safe_integer("-9223372036854775808"), None);
        assert_eq!(parse_safe_integer("1e300"), None);
    }

    async fn echo_id(Extension(UserIdParam(id)): Extension<UserIdParam>) -> String {
        id.to_string()
    }

    async fn ok_handler() -> &'static str {
        "OK"
    }

    async fn not_found_handler() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn error_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/items/:id", get(echo_id))
            .route_layer(axum::middleware::from_fn(user_id_guard))
            .route("/ok", get(ok_handler))
            .route("/not-found", get(not_found_handler))
            .route("/error", get(error_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn get_path(uri: &str) -> (StatusCode, String) {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        let response = create_test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_guard_passes_parsed_id() {
        let (status, body) = get_path("/items/12").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "12");
    }

    #[tokio::test]
    async fn test_guard_accepts_hex_and_blank_ids() {
        let (status, body) = get_path("/items/0x10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "16");

        let (status, body) = get_path("/items/%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "0");
    }

    #[tokio::test]
    async fn test_guard_rejects_invalid_id() {
        let (status, body) = get_path("/items/abc").await;
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(body, r#"{"error":{"code":"INVALID_USER_ID"}}"#);
    }

    #[tokio::test]
    async fn test_ok_response_no_log() {
        let (status, _) = get_path("/ok").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_client_error_logs_warning() {
        let (status, _) = get_path("/not-found").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_error_logs_error() {
        let (status, _) = get_path("/error").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
