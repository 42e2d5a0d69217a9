//! # roof-store
//!
//! Firestore-backed [`roof_core::DocumentStore`].
//!
//! Inserts go through the REST `documents:commit` endpoint as a single write
//! that creates a new document (client-generated ID, must not already exist)
//! and asks the server to stamp every server-timestamp field with its own
//! request time.

pub mod client;
pub mod doc_id;
pub mod error;
pub mod value;

pub use client::FirestoreStore;
