//! Pages: what each screen fetches, filters, and submits.
//!
//! # Design
//! - A page owns its scope and view state; nothing is shared between pages.
//! - Derived rows are computed on demand from the committed snapshot.

mod citizen_logs;
mod citizens;
mod dashboard;
mod departments;
mod grievances;
mod service_requests;
mod services;

use crate::forms::{Draft, FormController, SubmitOutcome};
use crate::orchestrator::{LoadOutcome, Orchestrator, PageScope, PageSnapshot, ScopeHandle};
use crate::state::ViewState;

pub use citizen_logs::CitizenLogsSnapshot;
pub use citizens::{CitizensPage, CitizensSnapshot};
pub use dashboard::{DashboardSnapshot, RECENT_REQUESTS_SHOWN, RecentRow, ReportsSnapshot};
pub use departments::{DepartmentsPage, DepartmentsSnapshot};
pub use grievances::{GrievanceRow, GrievancesPage, GrievancesSnapshot};
pub use service_requests::{RequestRow, ServiceRequestsPage, ServiceRequestsSnapshot};
pub use services::{ServiceRow, ServicesPage, ServicesSnapshot};

/// Mounted page: its lifetime scope plus view state.
#[derive(Debug)]
pub struct Page<S> {
    scope: PageScope,
    view: ViewState<S>,
}

impl<S: PageSnapshot + Default> Default for Page<S> {
    fn default() -> Self {
        Self::mount()
    }
}

impl<S: PageSnapshot + Default> Page<S> {
    /// Mount with an empty snapshot. Nothing is fetched until [`Page::load`].
    #[must_use]
    pub fn mount() -> Self {
        Self {
            scope: PageScope::new(),
            view: ViewState::default(),
        }
    }
}

impl<S: PageSnapshot> Page<S> {
    /// Fetch and commit the page snapshot.
    pub async fn load(&mut self, orchestrator: &Orchestrator) -> LoadOutcome {
        orchestrator.load(&self.scope, &mut self.view).await
    }

    /// Submit `form` and reload on success.
    pub async fn submit<D: Draft>(
        &mut self,
        orchestrator: &Orchestrator,
        form: &mut FormController<D>,
    ) -> SubmitOutcome<D::Created> {
        orchestrator
            .submit_and_reload(&self.scope, &mut self.view, form)
            .await
    }

    /// View state as last committed.
    #[must_use]
    pub const fn view(&self) -> &ViewState<S> {
        &self.view
    }

    /// Committed snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &S {
        self.view.data()
    }

    /// Handle that unmounts this page from another task.
    #[must_use]
    pub fn handle(&self) -> ScopeHandle {
        self.scope.handle()
    }
}

#[cfg(test)]
pub(crate) fn test_orchestrator(
    server: &httpmock::MockServer,
) -> (Orchestrator, std::sync::Arc<crate::orchestrator::NoticeLog>) {
    use std::sync::Arc;

    use crate::orchestrator::{NoticeLog, Notifier};

    let log = Arc::new(NoticeLog::default());
    let notifier: Arc<dyn Notifier> = log.clone();
    (Orchestrator::new(crate::api::client_for(server), notifier), log)
}
