//! Log-in / sign-up form.
//!
//! The form never moves the member into the dashboard itself. A successful
//! submission only means the gateway accepted the credentials; the identity
//! notification that follows is what changes the screen.

use std::fmt;

use roof_core::IdentityGateway;
use thiserror::Error;

use crate::busy::BusyGuard;

/// Shortest password the sign-up and log-in fields accept.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Which tab of the landing form is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthMode {
    #[default]
    LogIn,
    SignUp,
}

impl AuthMode {
    /// Label of the submit button for this mode.
    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::LogIn => "Log In",
            Self::SignUp => "Create Account",
        }
    }

    #[must_use]
    pub const fn tab_label(self) -> &'static str {
        match self {
            Self::LogIn => "Log In",
            Self::SignUp => "Sign Up",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_label())
    }
}

/// Field constraint violated before anything was sent to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please enter your email address.")]
    MissingEmail,

    #[error("Please include an '@' in the email address.")]
    MalformedEmail,

    #[error("Please enter your password.")]
    MissingPassword,

    #[error("Password must be at least 6 characters.")]
    ShortPassword,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    mode: AuthMode,
    email: String,
    password: String,
    busy: bool,
    error: Option<String>,
}

impl AuthForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Message from the last failed submission.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch tabs. The typed credentials stay; the error does not.
    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.error = None;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Check the field constraints without submitting.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldError`] in field order.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.email.is_empty() {
            return Err(FieldError::MissingEmail);
        }
        if !self.email.contains('@') {
            return Err(FieldError::MalformedEmail);
        }
        if self.password.is_empty() {
            return Err(FieldError::MissingPassword);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FieldError::ShortPassword);
        }
        Ok(())
    }

    /// Submit the credentials for the current mode.
    ///
    /// Clears the previous error first. A constraint violation is shown
    /// without calling the gateway; a gateway failure is shown as its message.
    /// Returns `true` when the gateway accepted the credentials.
    pub async fn submit(&mut self, identity: &dyn IdentityGateway) -> bool {
        self.error = None;
        if let Err(violation) = self.validate() {
            self.error = Some(violation.to_string());
            return false;
        }

        let _busy = BusyGuard::acquire(&mut self.busy);
        let result = match self.mode {
            AuthMode::LogIn => identity.sign_in(&self.email, &self.password).await,
            AuthMode::SignUp => identity.create_account(&self.email, &self.password).await,
        };

        match result {
            Ok(accepted) => {
                tracing::debug!(uid = %accepted.uid, mode = %self.mode, "credentials accepted");
                true
            }
            Err(error) => {
                tracing::debug!(%error, mode = %self.mode, "credentials rejected");
                self.error = Some(error.to_string());
                false
            }
        }
    }
}
