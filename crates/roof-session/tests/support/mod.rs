//! In-memory gateways for driving a [`Session`] in tests.
//!
//! [`FakeIdentity`] records every call and publishes on its own feed the way
//! the real gateway does: a successful sign-in or sign-up publishes the new
//! identity, a sign-out publishes absence. Tests can also publish directly to
//! simulate changes the member did not cause.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use roof_core::{
    AuthError, AuthSubscription, CollectionPath, DocumentStore, Identity, IdentityFeed,
    IdentityGateway, NewDocument, StoreError,
};
use roof_session::Session;

pub const NAMESPACE: &str = "test-app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCall {
    CreateAccount { email: String, password: String },
    SignIn { email: String, password: String },
    SignOut,
}

#[derive(Default)]
pub struct FakeIdentity {
    feed: IdentityFeed,
    calls: Mutex<Vec<IdentityCall>>,
    failures: Mutex<VecDeque<AuthError>>,
    sign_out_failure: Mutex<Option<AuthError>>,
}

impl FakeIdentity {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next create-account or sign-in call fail with `error`.
    pub fn fail_next(&self, error: AuthError) {
        self.failures.lock().expect("failures lock").push_back(error);
    }

    /// Make sign-out fail without publishing anything.
    pub fn fail_sign_out(&self, error: AuthError) {
        *self.sign_out_failure.lock().expect("sign-out lock") = Some(error);
    }

    pub fn publish(&self, identity: Option<Identity>) {
        self.feed.publish(identity);
    }

    pub fn calls(&self) -> Vec<IdentityCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.feed.subscriber_count()
    }

    fn record(&self, call: IdentityCall) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn establish(&self, email: &str) -> Result<Identity, AuthError> {
        if let Some(error) = self.failures.lock().expect("failures lock").pop_front() {
            return Err(error);
        }
        let local = email.split('@').next().unwrap_or_default();
        let identity = Identity::new(format!("uid-{local}"), email);
        self.feed.publish(Some(identity.clone()));
        Ok(identity)
    }
}

#[async_trait]
impl IdentityGateway for FakeIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.record(IdentityCall::CreateAccount {
            email: email.into(),
            password: password.into(),
        });
        self.establish(email)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.record(IdentityCall::SignIn {
            email: email.into(),
            password: password.into(),
        });
        self.establish(email)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.record(IdentityCall::SignOut);
        if let Some(error) = self.sign_out_failure.lock().expect("sign-out lock").take() {
            return Err(error);
        }
        self.feed.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> AuthSubscription {
        self.feed.subscribe()
    }
}

#[derive(Default)]
pub struct FakeStore {
    inserts: Mutex<Vec<(CollectionPath, NewDocument)>>,
    failure: Mutex<Option<StoreError>>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next insert fail with `error`.
    pub fn fail_next(&self, error: StoreError) {
        *self.failure.lock().expect("failure lock") = Some(error);
    }

    pub fn inserts(&self) -> Vec<(CollectionPath, NewDocument)> {
        self.inserts.lock().expect("inserts lock").clone()
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn insert(
        &self,
        collection: &CollectionPath,
        document: NewDocument,
    ) -> Result<String, StoreError> {
        if let Some(error) = self.failure.lock().expect("failure lock").take() {
            return Err(error);
        }
        let mut inserts = self.inserts.lock().expect("inserts lock");
        inserts.push((collection.clone(), document));
        Ok(format!("doc-{}", inserts.len()))
    }
}

pub fn collection() -> CollectionPath {
    CollectionPath::assessments(NAMESPACE).expect("valid namespace")
}

pub fn mount(identity: &Arc<FakeIdentity>, store: &Arc<FakeStore>) -> Session {
    Session::mount(identity.clone(), store.clone(), collection())
}

pub fn member(email: &str) -> Identity {
    let local = email.split('@').next().unwrap_or_default();
    Identity::new(format!("uid-{local}"), email)
}

/// Mount a session and sign `email` in through an external notification.
pub fn signed_in_session(email: &str) -> (Arc<FakeIdentity>, Arc<FakeStore>, Session) {
    let identity = FakeIdentity::new();
    let store = FakeStore::new();
    let mut session = mount(&identity, &store);
    identity.publish(Some(member(email)));
    session.drain_notifications();
    (identity, store, session)
}
