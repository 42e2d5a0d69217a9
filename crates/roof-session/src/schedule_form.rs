//! Schedule-assessment form.

use roof_core::{AssessmentDraft, AssessmentField, CollectionPath, DocumentStore, Identity};

use crate::busy::BusyGuard;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill out all required fields.";
pub const SUBMITTED_MESSAGE: &str =
    "Your assessment request has been submitted! We will contact you shortly to confirm a time.";
pub const SUBMIT_FAILED_MESSAGE: &str =
    "There was an error submitting your request. Please try again.";

/// Inline message shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Error(&'static str),
    Success(&'static str),
}

impl Notice {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Error(message) | Self::Success(message) => message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleForm {
    draft: AssessmentDraft,
    busy: bool,
    notice: Option<Notice>,
}

impl ScheduleForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn draft(&self) -> &AssessmentDraft {
        &self.draft
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Outcome of the last submission. Stays until the next attempt.
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn set(&mut self, field: AssessmentField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Submit the draft as a pending assessment request from `requester`.
    ///
    /// Missing required fields fail without touching the store. On success the
    /// draft is cleared; on failure it is kept so the member can retry.
    /// Returns the new document ID on success.
    pub async fn submit(
        &mut self,
        requester: &Identity,
        store: &dyn DocumentStore,
        collection: &CollectionPath,
    ) -> Option<String> {
        self.notice = None;
        let _busy = BusyGuard::acquire(&mut self.busy);

        let record = match self.draft.to_record(requester) {
            Ok(record) => record,
            Err(missing) => {
                tracing::debug!(%missing, "assessment request incomplete");
                self.notice = Some(Notice::Error(MISSING_FIELDS_MESSAGE));
                return None;
            }
        };

        let inserted = match record.to_document() {
            Ok(document) => store.insert(collection, document).await,
            Err(error) => Err(error),
        };

        match inserted {
            Ok(id) => {
                tracing::info!(document = %id, %collection, "assessment request submitted");
                self.notice = Some(Notice::Success(SUBMITTED_MESSAGE));
                self.draft.clear();
                Some(id)
            }
            Err(error) => {
                tracing::error!(%error, "failed to submit assessment request");
                self.notice = Some(Notice::Error(SUBMIT_FAILED_MESSAGE));
                None
            }
        }
    }
}
