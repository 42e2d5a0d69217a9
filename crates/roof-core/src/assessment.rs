//! Assessment requests: the editable draft and the immutable record built from it.
//!
//! ```text
//! AssessmentDraft --(required fields present + requester)--> AssessmentRecord --> NewDocument
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{NewDocument, ServerTimestamp};
use crate::errors::{CoreError, StoreError};
use crate::identity::Identity;

// ---------------------------------------------------------------------------
// AssessmentField
// ---------------------------------------------------------------------------

/// Editable field of an assessment request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentField {
    Address,
    Contact,
    Phone,
    Notes,
}

impl AssessmentField {
    pub const ALL: [Self; 4] = [Self::Address, Self::Contact, Self::Phone, Self::Notes];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Contact => "contact",
            Self::Phone => "phone",
            Self::Notes => "notes",
        }
    }

    /// Form label shown next to the field. Required fields end with `*`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Address => "Property Address*",
            Self::Contact => "On-Site Contact Name*",
            Self::Phone => "On-Site Contact Phone*",
            Self::Notes => "Notes (Optional)",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Notes)
    }
}

impl fmt::Display for AssessmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::Validation(format!("unknown assessment field '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// AssessmentStatus
// ---------------------------------------------------------------------------

/// Lifecycle status stored with a submitted request. New requests are always pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    #[default]
    Pending,
}

impl AssessmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssessmentDraft
// ---------------------------------------------------------------------------

/// Required fields were empty when the draft was turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .0.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", "))]
pub struct MissingRequired(pub Vec<AssessmentField>);

/// In-progress assessment request, mutated field by field as the user types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentDraft {
    pub address: String,
    pub contact: String,
    pub phone: String,
    pub notes: String,
}

impl AssessmentDraft {
    pub fn set(&mut self, field: AssessmentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AssessmentField::Address => self.address = value,
            AssessmentField::Contact => self.contact = value,
            AssessmentField::Phone => self.phone = value,
            AssessmentField::Notes => self.notes = value,
        }
    }

    #[must_use]
    pub fn get(&self, field: AssessmentField) -> &str {
        match field {
            AssessmentField::Address => &self.address,
            AssessmentField::Contact => &self.contact,
            AssessmentField::Phone => &self.phone,
            AssessmentField::Notes => &self.notes,
        }
    }

    /// Required fields that are currently empty, in form order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<AssessmentField> {
        AssessmentField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.get(*field).is_empty())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        AssessmentField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build the record to persist, stamped with the requester and a pending status.
    ///
    /// # Errors
    ///
    /// Returns [`MissingRequired`] if address, contact, or phone is empty.
    pub fn to_record(&self, requester: &Identity) -> Result<AssessmentRecord, MissingRequired> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(MissingRequired(missing));
        }

        Ok(AssessmentRecord {
            address: self.address.clone(),
            contact: self.contact.clone(),
            phone: self.phone.clone(),
            notes: self.notes.clone(),
            requester_email: requester.email.clone(),
            requester_id: requester.uid.clone(),
            status: AssessmentStatus::Pending,
            submitted_at: ServerTimestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// AssessmentRecord
// ---------------------------------------------------------------------------

/// Immutable assessment request as written to the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub address: String,
    pub contact: String,
    pub phone: String,
    pub notes: String,
    pub requester_email: String,
    pub requester_id: String,
    pub status: AssessmentStatus,
    #[serde(skip)]
    pub submitted_at: ServerTimestamp,
}

impl AssessmentRecord {
    /// Name of the server-assigned submission timestamp field.
    pub const SUBMITTED_AT: &'static str = "submittedAt";

    /// Encode for insertion, leaving the submission time to the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if serialization fails.
    pub fn to_document(&self) -> Result<NewDocument, StoreError> {
        Ok(NewDocument::from_serializable(self)?.with_server_timestamp(Self::SUBMITTED_AT))
    }
}
