//! User Context - 字段校验规则

use once_cell::sync::Lazy;
use regex::Regex;

/// 用户名长度范围（按 UTF-16 码元计）
const USERNAME_LEN: std::ops::RangeInclusive<usize> = 4..=32;

/// 密码长度范围（按 UTF-16 码元计）
const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 8..=256;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// 长度按 UTF-16 码元计，BMP 之外的字符（如 emoji）占 2
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

pub fn valid_username(username: &str) -> bool {
    USERNAME_LEN.contains(&utf16_len(username))
}

/// `local@domain.tld`：`@` 前后都不能含空白或 `@`，且 `@` 之后必须有 `.`
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn valid_password(password: &str) -> bool {
    PASSWORD_LEN.contains(&utf16_len(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(!valid_username(""));
        assert!(!valid_username("abc"));
        assert!(valid_username("abcd"));
        assert!(valid_username(&"x".repeat(32)));
        assert!(!valid_username(&"x".repeat(33)));
    }

    #[test]
    fn test_username_counts_utf16_units_not_bytes() {
        // 4 个汉字 = 12 字节，4 个码元
        assert!(valid_username("测试用户"));
        assert!(valid_username(&"é".repeat(32)));
        assert!(!valid_username(&"é".repeat(33)));
    }

    #[test]
    fn test_astral_characters_count_as_two_units() {
        assert!(!valid_username("😀"));
        assert!(valid_username("😀😀"));
        assert!(valid_username("😀ab"));
        assert!(valid_username(&"😀".repeat(16)));
        assert!(!valid_username(&"😀".repeat(17)));

        assert!(!valid_password(&"😀".repeat(3)));
        assert!(valid_password(&"😀".repeat(4)));
        assert!(valid_password(&"😀".repeat(128)));
        assert!(!valid_password(&"😀".repeat(129)));
    }

    #[test]
    fn test_username_accepts_arbitrary_characters() {
        assert!(valid_username("a b\tc"));
        assert!(valid_username("@@@@"));
    }

    #[test]
    fn test_email_accepts_simple_address() {
        assert!(valid_email("a@b.co"));
        assert!(valid_email("first.last@mail.example.com"));
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@c.co"));
        assert!(!valid_email("@b.co"));
        assert!(!valid_email("a@@b.co"));
        assert!(!valid_email("a@b."));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(!valid_password("1234567"));
        assert!(valid_password("12345678"));
        assert!(valid_password(&"p".repeat(256)));
        assert!(!valid_password(&"p".repeat(257)));
    }
}
