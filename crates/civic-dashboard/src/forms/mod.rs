//! Create/update forms: draft ownership, coercion, and submission.
//!
//! # Design
//! - Drafts hold raw text exactly as typed; coercion happens at submit time.
//! - The backend is the only validator. Empty or non-numeric identifiers are
//!   sent as `null` and the backend decides.
//! - A failed submit keeps the form open with the draft intact.

mod drafts;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiResult};

pub use drafts::{
    CitizenDraft, CitizenEditDraft, DepartmentDraft, GrievanceDraft, ServiceDraft,
    ServiceRequestDraft,
};

/// Editable record behind a form.
#[async_trait]
pub trait Draft: Clone + Send + Sync {
    /// Record returned by the backend on success.
    type Created: Send;
    /// Entity name recorded in logs.
    const ENTITY: &'static str;
    /// Message surfaced when a failure carries no detail.
    const FAILURE_FALLBACK: &'static str;

    /// Draft a freshly opened form starts from.
    fn fresh() -> Self;

    /// Coerce the draft and send it to the backend.
    async fn submit(&self, client: &ApiClient) -> ApiResult<Self::Created>;
}

/// Parse an identifier field; blank or unparseable text yields `None`.
#[must_use]
pub fn parse_optional_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Text field mapped to `None` when blank.
#[must_use]
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Lifecycle of a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    /// Hidden.
    Closed,
    /// Open and accepting edits.
    Editing,
    /// Awaiting the backend.
    Submitting,
}

/// Result of [`FormController::submit`].
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// The backend accepted the record; the form is closed.
    Created(T),
    /// The backend or transport refused it; the form stays open.
    Rejected(String),
    /// Submit was called while the form was not editing.
    NotEditing,
}

/// Form state machine around a [`Draft`].
#[derive(Clone, Debug)]
pub struct FormController<D> {
    phase: FormPhase,
    draft: D,
    error: Option<String>,
}

impl<D: Draft> Default for FormController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Draft> FormController<D> {
    /// Closed form holding a fresh draft.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Closed,
            draft: D::fresh(),
            error: None,
        }
    }

    /// Open with a fresh draft.
    pub fn open(&mut self) {
        self.open_with(D::fresh());
    }

    /// Open pre-filled with `draft`.
    pub fn open_with(&mut self, draft: D) {
        self.draft = draft;
        self.error = None;
        self.phase = FormPhase::Editing;
    }

    /// Close and discard the draft.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Apply an edit to the draft. Ignored unless the form is editing.
    pub fn edit(&mut self, change: impl FnOnce(&mut D)) -> bool {
        if self.phase != FormPhase::Editing {
            return false;
        }
        change(&mut self.draft);
        true
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Whether the form is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    /// Draft as currently edited.
    #[must_use]
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    /// Message from the last failed submit.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Send the draft. Success closes and resets the form; failure keeps the
    /// draft and records the message.
    pub async fn submit(&mut self, client: &ApiClient) -> SubmitOutcome<D::Created> {
        if self.phase != FormPhase::Editing {
            return SubmitOutcome::NotEditing;
        }
        self.phase = FormPhase::Submitting;
        self.error = None;

        match self.draft.submit(client).await {
            Ok(created) => {
                info!(entity = D::ENTITY, "record saved");
                self.reset();
                SubmitOutcome::Created(created)
            }
            Err(err) => {
                let message = err.user_message(D::FAILURE_FALLBACK);
                warn!(entity = D::ENTITY, status = ?err.status(), error = %err, "submit failed");
                self.error = Some(message.clone());
                self.phase = FormPhase::Editing;
                SubmitOutcome::Rejected(message)
            }
        }
    }

    fn reset(&mut self) {
        self.phase = FormPhase::Closed;
        self.draft = D::fresh();
        self.error = None;
    }
}
