//! All-or-nothing page loads tied to a page's lifetime.
//!
//! # Design
//! - A snapshot fetches every endpoint a page needs; the first failure aborts
//!   the rest and nothing is committed.
//! - Loads race against the page scope. An unmounted page resolves its load as
//!   cancelled without committing or notifying.
//! - Failures reach the operator through a [`Notifier`]; they never panic.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::forms::{Draft, FormController, SubmitOutcome};
use crate::state::ViewState;

/// Everything a page fetches on mount, loaded as one unit.
#[async_trait]
pub trait PageSnapshot: Sized + Send {
    /// Page name recorded in logs.
    const PAGE: &'static str;
    /// Notice delivered when the load fails.
    const LOAD_FAILURE: &'static str;

    /// Issue the page's requests concurrently; the first error wins.
    async fn fetch(client: &ApiClient) -> ApiResult<Self>;
}

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Completed action.
    Success,
    /// Failed load or submit.
    Error,
}

/// Blocking message surfaced to the operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown verbatim.
    pub message: String,
}

impl Notice {
    /// Success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for operator notices.
pub trait Notifier: Send + Sync {
    /// Deliver one notice.
    fn notify(&self, notice: Notice);
}

/// Notifier that keeps every notice in memory.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    /// Notices delivered so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        if let Ok(mut guard) = self.notices.lock() {
            guard.push(notice);
        }
    }
}

/// Lifetime of a mounted page. Dropping the scope unmounts the page.
#[derive(Debug, Default)]
pub struct PageScope {
    token: CancellationToken,
}

/// Cloneable handle able to unmount a page from another task.
#[derive(Clone, Debug)]
pub struct ScopeHandle {
    token: CancellationToken,
}

impl PageScope {
    /// Fresh, mounted scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that can unmount this scope.
    #[must_use]
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            token: self.token.clone(),
        }
    }

    /// Cancel in-flight loads.
    pub fn unmount(&self) {
        self.token.cancel();
    }

    /// Whether the page has been unmounted.
    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for PageScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl ScopeHandle {
    /// Cancel in-flight loads of the owning page.
    pub fn unmount(&self) {
        self.token.cancel();
    }

    /// Whether the owning page has been unmounted.
    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Result of one page load.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Every request succeeded and the snapshot was committed.
    Loaded,
    /// A request failed; the previous snapshot is untouched.
    Failed(ApiError),
    /// The page was unmounted before the load finished.
    Cancelled,
}

impl LoadOutcome {
    /// Whether the snapshot was committed.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }
}

/// Drives page loads against the gateway and reports failures.
#[derive(Clone)]
pub struct Orchestrator {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl Orchestrator {
    /// Orchestrator over `client` reporting through `notifier`.
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// Gateway used for loads and submits.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Deliver a notice to the operator.
    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    /// Load a page snapshot and commit it in one transition.
    pub async fn load<S: PageSnapshot>(
        &self,
        scope: &PageScope,
        state: &mut ViewState<S>,
    ) -> LoadOutcome {
        if scope.is_unmounted() {
            return LoadOutcome::Cancelled;
        }
        state.begin();
        debug!(page = S::PAGE, "page load started");

        let fetched = tokio::select! {
            biased;
            () = scope.token.cancelled() => None,
            result = S::fetch(&self.client) => Some(result),
        };

        match fetched {
            None => {
                state.abandon();
                debug!(page = S::PAGE, "page unmounted; load discarded");
                LoadOutcome::Cancelled
            }
            Some(Ok(snapshot)) => {
                state.commit(snapshot);
                info!(page = S::PAGE, "page snapshot committed");
                LoadOutcome::Loaded
            }
            Some(Err(err)) => {
                state.abandon();
                warn!(page = S::PAGE, error = %err, "page load failed");
                self.notify(Notice::error(S::LOAD_FAILURE));
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Submit `form`; reload the page on success, notify on failure.
    pub async fn submit_and_reload<D: Draft, S: PageSnapshot>(
        &self,
        scope: &PageScope,
        state: &mut ViewState<S>,
        form: &mut FormController<D>,
    ) -> SubmitOutcome<D::Created> {
        let outcome = form.submit(&self.client).await;
        match &outcome {
            SubmitOutcome::Created(_) => {
                self.load(scope, state).await;
            }
            SubmitOutcome::Rejected(message) => self.notify(Notice::error(message.clone())),
            SubmitOutcome::NotEditing => {}
        }
        outcome
    }
}
