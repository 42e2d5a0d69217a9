//! [`IdentityGateway`] backed by Firebase email/password auth.
//!
//! The gateway owns the in-memory session and the identity feed. Every change
//! of the signed-in user is published on the feed; callers of `sign_in` and
//! friends get the result too, but the feed is what the session reacts to.

use std::time::Duration;

use async_trait::async_trait;
use roof_config::{FirebaseConfig, GeneralConfig};
use roof_core::{
    AuthError, AuthSubscription, BearerSource, Identity, IdentityFeed, IdentityGateway,
};
use tokio::sync::Mutex;

use crate::rest::{Endpoints, IdentityToolkit, TokenGrant};
use crate::token_store::SessionStore;

/// Seconds before expiry at which an ID token is refreshed ahead of use.
const EXPIRY_BUFFER_SECS: i64 = 60;

pub struct FirebaseIdentity {
    toolkit: IdentityToolkit,
    feed: IdentityFeed,
    session: Mutex<Option<TokenGrant>>,
    store: Option<SessionStore>,
}

impl FirebaseIdentity {
    /// Build the gateway from configuration. Sessions persist to the default
    /// [`SessionStore`] when `general.persist_session` is on.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the HTTP client or session store cannot be set up.
    pub fn from_config(
        firebase: &FirebaseConfig,
        general: &GeneralConfig,
    ) -> Result<Self, AuthError> {
        let store = if general.persist_session {
            Some(SessionStore::default_location()?)
        } else {
            None
        };
        Self::new(
            Endpoints::from_config(firebase),
            general.request_timeout(),
            store,
        )
    }

    /// # Errors
    ///
    /// Returns `AuthError::Network` if the HTTP client cannot be constructed.
    pub fn new(
        endpoints: Endpoints,
        timeout: Duration,
        store: Option<SessionStore>,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            toolkit: IdentityToolkit::new(endpoints, timeout)?,
            feed: IdentityFeed::new(),
            session: Mutex::new(None),
            store,
        })
    }

    /// Restore a persisted session, then publish the initial notification.
    ///
    /// A stale or revoked refresh token is discarded and the member starts
    /// signed out. Calling this more than once re-publishes the current state.
    pub async fn start(&self) {
        let restored = match self.store.as_ref().and_then(SessionStore::load) {
            Some(refresh_token) => match self.toolkit.refresh(&refresh_token).await {
                Ok(grant) => Some(grant),
                Err(error) => {
                    tracing::warn!(%error, "failed to restore persisted session; signing out");
                    self.forget_persisted();
                    None
                }
            },
            None => None,
        };

        let mut session = self.session.lock().await;
        if let Some(grant) = restored {
            tracing::info!(uid = %grant.claims.user_id, "restored persisted session");
            self.persist(&grant);
            *session = Some(grant);
        }
        self.feed.publish(session.as_ref().map(TokenGrant::identity));
    }

    #[must_use]
    pub const fn feed(&self) -> &IdentityFeed {
        &self.feed
    }

    async fn establish(&self, grant: TokenGrant) -> Identity {
        let identity = grant.identity();
        self.persist(&grant);
        *self.session.lock().await = Some(grant);
        tracing::info!(uid = %identity.uid, "signed in");
        self.feed.publish(Some(identity.clone()));
        identity
    }

    fn persist(&self, grant: &TokenGrant) {
        if let Some(store) = &self.store
            && let Err(error) = store.store(&grant.refresh_token)
        {
            tracing::warn!(%error, "failed to persist session; it will not survive a restart");
        }
    }

    fn forget_persisted(&self) {
        if let Some(store) = &self.store
            && let Err(error) = store.delete()
        {
            tracing::warn!(%error, "failed to delete persisted session");
        }
    }
}

#[async_trait]
impl IdentityGateway for FirebaseIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let grant = self.toolkit.sign_up(email, password).await?;
        Ok(self.establish(grant).await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let grant = self.toolkit.sign_in_with_password(email, password).await?;
        Ok(self.establish(grant).await)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let previous = self.session.lock().await.take();
        if previous.is_none() {
            return Ok(());
        }

        tracing::info!("signed out");
        self.feed.publish(None);
        // The member is signed out either way; a token left on disk is only logged.
        self.forget_persisted();
        Ok(())
    }

    fn subscribe(&self) -> AuthSubscription {
        self.feed.subscribe()
    }
}

#[async_trait]
impl BearerSource for FirebaseIdentity {
    async fn bearer_token(&self) -> Result<Option<String>, AuthError> {
        let mut session = self.session.lock().await;
        let Some(grant) = session.as_ref() else {
            return Ok(None);
        };
        if !grant.claims.is_near_expiry(EXPIRY_BUFFER_SECS) {
            return Ok(Some(grant.id_token.clone()));
        }

        tracing::debug!("ID token near expiry; refreshing");
        let refresh_token = grant.refresh_token.clone();
        let refreshed = self.toolkit.refresh(&refresh_token).await;
        match refreshed {
            Ok(fresh) => {
                self.persist(&fresh);
                let token = fresh.id_token.clone();
                *session = Some(fresh);
                Ok(Some(token))
            }
            Err(error @ AuthError::Network(_)) => Err(error),
            Err(error) => {
                tracing::warn!(%error, "session refresh rejected; signing out");
                *session = None;
                drop(session);
                self.forget_persisted();
                self.feed.publish(None);
                Err(error)
            }
        }
    }
}
