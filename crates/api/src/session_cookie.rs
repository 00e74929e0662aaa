//! The `session` cookie: building, clearing and reading it.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};

pub const SESSION_COOKIE: &str = "session";

/// `Set-Cookie` value carrying `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> String {
    let max_age = Duration::seconds(i64::try_from(max_age_secs).unwrap_or(i64::MAX));
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
        .to_string()
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie(secure: bool) -> String {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
        .to_string()
}

/// Session token from the request's `Cookie` headers, if any.
///
/// Malformed cookie pairs are skipped. An empty value counts as absent.
pub fn read_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_attributes() {
        let c = session_cookie("tok", 2_592_000, false);
        assert!(c.starts_with("session=tok"));
        assert!(c.contains("HttpOnly"));
        assert!(c.contains("SameSite=Lax"));
        assert!(c.contains("Path=/"));
        assert!(c.contains("Max-Age=2592000"));
        assert!(!c.contains("Secure"));
    }

    #[test]
    fn secure_flag_in_production() {
        assert!(session_cookie("tok", 60, true).contains("Secure"));
        assert!(clear_session_cookie(true).contains("Secure"));
    }

    #[test]
    fn clear_cookie_expires_now() {
        let c = clear_session_cookie(false);
        assert!(c.starts_with("session="));
        assert!(c.contains("Max-Age=0"));
    }

    #[test]
    fn read_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; session=abc-123; lang=ko"));
        assert_eq!(read_session_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn read_token_across_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("session=xyz"));
        assert_eq!(read_session_token(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn missing_or_empty_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(read_session_token(&headers), None);
        headers.insert(COOKIE, HeaderValue::from_static("session="));
        assert_eq!(read_session_token(&headers), None);
    }
}
