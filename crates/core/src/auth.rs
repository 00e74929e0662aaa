//! Classification of authentication outcomes.
//!
//! The backend decides whether a sign-in or sign-up succeeds. This module
//! turns its failure codes into what the user sees: an HTTP status and
//! message for local auth, or an interstitial redirect page for OAuth.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// OAuth provider name sent to the backend.
pub const KAKAO_PROVIDER: &str = "kakao";

/// How long the interstitial page waits before moving on.
pub const OAUTH_REDIRECT_DELAY_MS: u64 = 5000;

pub const CODE_OAUTH_USER_NOT_FOUND: &str = "OAUTH_USER_NOT_FOUND";
pub const CODE_OAUTH_USER_ALREADY_SIGNED_UP: &str = "OAUTH_USER_ALREADY_SIGNED_UP";
pub const CODE_OAUTH_EMAIL_USED_BY_OTHER_PROVIDER: &str = "OAUTH_EMAIL_ALREADY_USED_FOR_OTHER_PROVIDER";
pub const CODE_USER_PASSWORD_MISMATCH: &str = "USER_PASSWORD_MISMATCH";
pub const CODE_USER_NOT_FOUND: &str = "USER_NOT_FOUND";

/// Which OAuth flow a callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthFlow {
    Signin,
    Signup,
}

impl AuthFlow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signin => "signin",
            Self::Signup => "signup",
        }
    }
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthFlow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signin" => Ok(Self::Signin),
            "signup" => Ok(Self::Signup),
            other => Err(CoreError::Validation(format!("Invalid type: {other}"))),
        }
    }
}

/// An informational page shown before redirecting to `goto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interstitial {
    pub message: String,
    pub goto: String,
    pub delay_ms: u64,
}

impl Interstitial {
    /// `/redirect?message=...&goto=...&delay=...` with the message
    /// percent-encoded (it is usually Korean).
    pub fn location(&self) -> String {
        format!(
            "/redirect?message={}&goto={}&delay={}",
            urlencoding::encode(&self.message),
            urlencoding::encode(&self.goto),
            self.delay_ms
        )
    }
}

/// Map a backend OAuth failure code to an interstitial, if the code is one
/// the user can act on. Codes that do not apply to `flow` yield `None`.
pub fn classify_oauth_failure(flow: AuthFlow, code: &str) -> Option<Interstitial> {
    let (message, goto) = match (flow, code) {
        (AuthFlow::Signin, CODE_OAUTH_USER_NOT_FOUND) => (
            "회원가입이 필요합니다. 5초 후 회원가입 페이지로 이동합니다.",
            "/signup",
        ),
        (AuthFlow::Signup, CODE_OAUTH_USER_ALREADY_SIGNED_UP) => (
            "이미 회원가입이 되어 있습니다. 5초 후 로그인 페이지로 이동합니다.",
            "/signin",
        ),
        (AuthFlow::Signup, CODE_OAUTH_EMAIL_USED_BY_OTHER_PROVIDER) => (
            "회원가입을 시도하신 \"kakao\"가 아닌 다른 서비스로 회원가입이 되어 있습니다. 5초 후 회원가입 페이지로 이동합니다.",
            "/signup",
        ),
        _ => return None,
    };
    Some(Interstitial {
        message: message.to_string(),
        goto: goto.to_string(),
        delay_ms: OAUTH_REDIRECT_DELAY_MS,
    })
}

/// User-facing result of a failed local sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthFailure {
    #[serde(skip)]
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

pub fn local_signin_failure(code: Option<&str>, message: Option<&str>) -> AuthFailure {
    match code {
        Some(CODE_USER_PASSWORD_MISMATCH) => AuthFailure {
            status: 401,
            message: "비밀번호가 일치하지 않습니다.".to_string(),
            code: code.map(str::to_string),
        },
        Some(CODE_USER_NOT_FOUND) => AuthFailure {
            status: 401,
            message: "존재하지 않는 사용자입니다.".to_string(),
            code: code.map(str::to_string),
        },
        _ => AuthFailure {
            status: 400,
            message: match message {
                Some(m) if !m.trim().is_empty() => m.to_string(),
                _ => generic_failure_message(Some("로그인에 실패했습니다."), code),
            },
            code: code.map(str::to_string),
        },
    }
}

/// `"<message> [error code: <code>]"` so support can see the raw cause.
pub fn generic_failure_message(message: Option<&str>, code: Option<&str>) -> String {
    let message = message.filter(|m| !m.trim().is_empty()).unwrap_or("요청을 처리하지 못했습니다.");
    match code {
        Some(code) => format!("{message} [error code: {code}]"),
        None => message.to_string(),
    }
}

/// Only same-origin absolute paths: `/dashboard` yes, `//evil.com`,
/// `https://evil.com` and `/\evil.com` no.
pub fn is_safe_redirect_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}
