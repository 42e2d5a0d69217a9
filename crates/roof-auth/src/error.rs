//! Mapping of Identity Toolkit error payloads onto [`AuthError`].
//!
//! Error bodies look like `{"error": {"code": 400, "message": "CODE : detail"}}`.
//! Only the leading code is significant; the optional detail after ` : ` is
//! kept for weak-password feedback.

use roof_core::AuthError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Translate a non-success response body into an [`AuthError`].
#[must_use]
pub fn from_response_body(status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => from_code(&envelope.error.message),
        Err(_) => AuthError::Rejected(format!("identity service returned HTTP {status}")),
    }
}

/// Translate an Identity Toolkit error code (optionally followed by ` : detail`).
#[must_use]
pub fn from_code(message: &str) -> AuthError {
    let (code, detail) = message
        .split_once(" : ")
        .map_or((message.trim(), None), |(code, detail)| {
            (code.trim(), Some(detail.trim()))
        });

    match code {
        "EMAIL_EXISTS" => AuthError::DuplicateAccount,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "WEAK_PASSWORD" => AuthError::WeakPassword(
            detail
                .unwrap_or("Password should be at least 6 characters")
                .to_string(),
        ),
        "INVALID_EMAIL" | "MISSING_EMAIL" => AuthError::InvalidEmail,
        "USER_DISABLED" => AuthError::UserDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        "" => AuthError::Rejected("identity service rejected the request".into()),
        other => AuthError::Rejected(match detail {
            Some(detail) => format!("{other}: {detail}"),
            None => other.to_string(),
        }),
    }
}

/// Transport-level failure (DNS, connect, timeout, unreadable body).
pub(crate) fn network(context: &str, error: &reqwest::Error) -> AuthError {
    AuthError::Network(format!("{context}: {error}"))
}
