//! # roof-auth
//!
//! Firebase email/password authentication for Rooftop Intel.
//!
//! Talks to the Identity Toolkit and Secure Token REST APIs with `reqwest`,
//! keeps the refresh token in the OS keychain (`keyring`) with a file
//! fallback, and publishes every sign-in and sign-out on an
//! [`roof_core::IdentityFeed`] so the session observes auth changes through a
//! single subscription.

pub mod claims;
pub mod error;
pub mod gateway;
pub mod rest;
pub mod token_store;

pub use claims::IdTokenClaims;
pub use gateway::FirebaseIdentity;
pub use rest::{Endpoints, IdentityToolkit, TokenGrant};
pub use token_store::SessionStore;
