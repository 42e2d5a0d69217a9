//! # roof-core
//!
//! Core types, gateway traits, and error types for Rooftop Intel.
//!
//! This crate provides the foundational types shared across all Rooftop crates:
//! - The signed-in [`Identity`] as reported by the identity gateway
//! - Assessment request drafts and the immutable records built from them
//! - The static DIY resource guide catalog
//! - The collection path convention for persisted assessments
//! - Gateway traits for identity and document storage
//! - The identity feed that fans auth notifications out to subscribers
//! - Error taxonomy for both gateways

pub mod assessment;
pub mod collection;
pub mod document;
pub mod errors;
pub mod feed;
pub mod gateway;
pub mod identity;
pub mod resources;

pub use assessment::{AssessmentDraft, AssessmentField, AssessmentRecord, AssessmentStatus};
pub use collection::CollectionPath;
pub use document::{NewDocument, ServerTimestamp};
pub use errors::{AuthError, CoreError, StoreError};
pub use feed::{AuthSubscription, IdentityFeed};
pub use gateway::{BearerSource, DocumentStore, IdentityGateway};
pub use identity::Identity;
