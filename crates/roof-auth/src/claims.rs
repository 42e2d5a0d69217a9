use base64::Engine as _;
use chrono::{DateTime, Utc};
use roof_core::{AuthError, Identity};

/// Claims read from a Firebase ID token payload.
///
/// Decoding does NOT verify the signature. The token came straight from the
/// identity service over TLS and is only inspected for expiry and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTokenClaims {
    /// Firebase user ID (`user_id`, falling back to `sub`).
    pub user_id: String,
    /// Account email (`email` claim). Empty when the account has none.
    pub email: String,
    /// Token expiration time (from `exp` claim).
    pub expires_at: DateTime<Utc>,
}

impl IdTokenClaims {
    /// Decode the payload segment of an ID token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` if the token is not a three-part JWT, the
    /// payload is not base64url JSON, or the `exp`/user claims are missing.
    pub fn decode(id_token: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = id_token.split('.').collect();
        if parts.len() != 3 {
            return Err(AuthError::Rejected("invalid ID token format".into()));
        }
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| AuthError::Rejected(format!("ID token base64 decode failed: {e}")))?;
        let value: serde_json::Value = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::Rejected(format!("ID token JSON parse failed: {e}")))?;

        let exp = value["exp"]
            .as_i64()
            .ok_or_else(|| AuthError::Rejected("ID token missing exp claim".into()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::Rejected("ID token has invalid exp timestamp".into()))?;
        let user_id = value["user_id"]
            .as_str()
            .or_else(|| value["sub"].as_str())
            .ok_or_else(|| AuthError::Rejected("ID token missing user_id claim".into()))?
            .to_string();
        let email = value["email"].as_str().unwrap_or_default().to_string();

        Ok(Self {
            user_id,
            email,
            expires_at,
        })
    }

    #[must_use]
    pub fn to_identity(&self) -> Identity {
        Identity::new(self.user_id.clone(), self.email.clone())
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}
