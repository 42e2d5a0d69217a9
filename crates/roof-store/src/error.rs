//! Mapping of Firestore HTTP failures onto [`StoreError`].

use roof_core::{AuthError, StoreError};
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

/// Translate a non-success commit response.
#[must_use]
pub fn from_response(status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_default();

    match status {
        401 => StoreError::Unauthenticated,
        403 => StoreError::PermissionDenied(if message.is_empty() {
            "missing or insufficient permissions".into()
        } else {
            message
        }),
        _ if message.is_empty() => StoreError::Write(format!("HTTP {status}")),
        _ => StoreError::Write(format!("HTTP {status}: {message}")),
    }
}

/// The bearer credential could not be obtained.
#[must_use]
pub fn from_auth(error: AuthError) -> StoreError {
    match error {
        AuthError::Network(detail) => StoreError::Network(detail),
        _ => StoreError::Unauthenticated,
    }
}

pub(crate) fn network(context: &str, error: &reqwest::Error) -> StoreError {
    StoreError::Network(format!("{context}: {error}"))
}
