//! Identity Toolkit / Secure Token REST client.
//!
//! | Operation      | Endpoint                                   |
//! |----------------|--------------------------------------------|
//! | create account | `{auth}/v1/accounts:signUp`                |
//! | sign in        | `{auth}/v1/accounts:signInWithPassword`    |
//! | refresh        | `{token}/v1/token` (refresh-token grant)   |
//!
//! Every request carries the project's web API key as the `key` query parameter.

use std::time::Duration;

use roof_config::FirebaseConfig;
use roof_core::{AuthError, Identity};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::claims::IdTokenClaims;
use crate::error;

/// Base URLs and API key for the identity REST APIs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth: String,
    pub token: String,
    pub api_key: String,
}

impl Endpoints {
    #[must_use]
    pub fn from_config(config: &FirebaseConfig) -> Self {
        Self {
            auth: config.auth_endpoint.clone(),
            token: config.token_endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, base: &str, path: &str) -> String {
        format!(
            "{}/v1/{path}?key={}",
            base.trim_end_matches('/'),
            urlencoding::encode(&self.api_key)
        )
    }
}

/// Tokens issued by a successful sign-up, sign-in, or refresh.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub id_token: String,
    pub refresh_token: String,
    pub claims: IdTokenClaims,
}

impl TokenGrant {
    fn new(id_token: String, refresh_token: String, email_hint: &str) -> Result<Self, AuthError> {
        let mut claims = IdTokenClaims::decode(&id_token)?;
        if claims.email.is_empty() {
            claims.email = email_hint.to_string();
        }
        Ok(Self {
            id_token,
            refresh_token,
            claims,
        })
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        self.claims.to_identity()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
}

/// Thin client over the identity REST endpoints.
#[derive(Debug, Clone)]
pub struct IdentityToolkit {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl IdentityToolkit {
    /// # Errors
    ///
    /// Returns `AuthError::Network` if the HTTP client cannot be constructed.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| error::network("build http client", &e))?;
        Ok(Self { http, endpoints })
    }

    /// Create an email/password account. The new account is signed in.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`AuthError`] (duplicate account, weak password, ...).
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<TokenGrant, AuthError> {
        let url = self.endpoints.url(&self.endpoints.auth, "accounts:signUp");
        self.password_request(&url, email, password, "sign up").await
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`AuthError`] (invalid credentials, disabled user, ...).
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenGrant, AuthError> {
        let url = self
            .endpoints
            .url(&self.endpoints.auth, "accounts:signInWithPassword");
        self.password_request(&url, email, password, "sign in").await
    }

    /// Exchange a refresh token for a fresh ID token.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`AuthError`]; an expired or revoked refresh token
    /// surfaces as `AuthError::Rejected`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AuthError> {
        let url = self.endpoints.url(&self.endpoints.token, "token");
        let body = serde_json::json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh_token,
        });
        let response: RefreshResponse = self.post_json(&url, &body, "refresh session").await?;
        TokenGrant::new(response.id_token, response.refresh_token, "")
    }

    async fn password_request(
        &self,
        url: &str,
        email: &str,
        password: &str,
        context: &str,
    ) -> Result<TokenGrant, AuthError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let response: PasswordResponse = self.post_json(url, &body, context).await?;
        let email_hint = if response.email.is_empty() {
            email
        } else {
            &response.email
        };
        TokenGrant::new(response.id_token, response.refresh_token, email_hint)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
        context: &str,
    ) -> Result<T, AuthError> {
        tracing::debug!(operation = context, "identity request");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| error::network(context, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let error = error::from_response_body(status.as_u16(), &body);
            tracing::debug!(operation = context, %status, %error, "identity request rejected");
            return Err(error);
        }

        resp.json::<T>()
            .await
            .map_err(|e| error::network(context, &e))
    }
}
