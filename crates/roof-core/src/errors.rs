//! Error types for the identity and document store gateways.
//!
//! Both kinds are caught at the form boundary and turned into a displayed
//! string. Callers should only rely on the `Display` output of [`AuthError`];
//! [`StoreError`] is always collapsed to one generic user-facing message.

use thiserror::Error;

/// Failures reported by an identity gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password is too weak: {0}")]
    WeakPassword(String),

    #[error("an account already exists for this email address")]
    DuplicateAccount,

    #[error("the email address is badly formatted")]
    InvalidEmail,

    #[error("this account has been disabled")]
    UserDisabled,

    #[error("too many attempts, try again later")]
    TooManyAttempts,

    #[error("network error: {0}")]
    Network(String),

    #[error("session storage error: {0}")]
    SessionStore(String),

    #[error("{0}")]
    Rejected(String),
}

/// Failures reported by a document store gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("document encoding failed: {0}")]
    Encode(String),
}

/// Errors raised by core type constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
