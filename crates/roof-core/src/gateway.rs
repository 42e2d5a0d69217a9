//! Gateway traits at the boundary between the session and hosted services.
//!
//! Implementations are constructed once by the process entry point and handed
//! to the session, which never reaches for ambient connection objects.

use async_trait::async_trait;

use crate::collection::CollectionPath;
use crate::document::NewDocument;
use crate::errors::{AuthError, StoreError};
use crate::feed::AuthSubscription;
use crate::identity::Identity;

/// Account creation, sign-in, sign-out, and observation of the signed-in user.
///
/// The subscription is the only authoritative source for auth state changes.
/// A successful `sign_in` does not by itself mean the caller should treat the
/// user as signed in; the matching notification does.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Register a new email/password account and sign it in.
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Sign in an existing email/password account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Observe the signed-in identity. Dropping the subscription releases it.
    fn subscribe(&self) -> AuthSubscription;
}

/// Append-only insertion of documents into named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its store-assigned ID.
    async fn insert(
        &self,
        collection: &CollectionPath,
        document: NewDocument,
    ) -> Result<String, StoreError>;
}

/// Supplies the bearer credential a document store uses to authorize writes.
#[async_trait]
pub trait BearerSource: Send + Sync {
    /// Current access token, or `None` when nobody is signed in.
    async fn bearer_token(&self) -> Result<Option<String>, AuthError>;
}
