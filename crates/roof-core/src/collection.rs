//! Collection path convention for persisted assessment requests.
//!
//! ```text
//! artifacts/{namespace}/public/data/assessments
//! ```
//!
//! Deployments sharing a namespace share the same collection. The namespace
//! comes from deployment configuration, never from user input.

use std::fmt;

use crate::errors::CoreError;

const ROOT_SEGMENT: &str = "artifacts";
const ASSESSMENTS_SUFFIX: [&str; 3] = ["public", "data", "assessments"];

/// Slash-separated path to a document collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Path to the public assessment collection of `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the namespace is empty or contains `/`.
    pub fn assessments(namespace: &str) -> Result<Self, CoreError> {
        validate_segment(namespace)?;

        let mut segments = Vec::with_capacity(2 + ASSESSMENTS_SUFFIX.len());
        segments.push(ROOT_SEGMENT.to_string());
        segments.push(namespace.to_string());
        segments.extend(ASSESSMENTS_SUFFIX.iter().map(ToString::to_string));
        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The deployment namespace this collection belongs to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.segments[1]
    }

    /// Last path segment, e.g. `assessments`.
    #[must_use]
    pub fn collection_id(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

fn validate_segment(segment: &str) -> Result<(), CoreError> {
    if segment.trim().is_empty() {
        return Err(CoreError::Validation("namespace must not be empty".into()));
    }
    if segment.contains('/') {
        return Err(CoreError::Validation(format!(
            "namespace '{segment}' must not contain '/'"
        )));
    }
    Ok(())
}
