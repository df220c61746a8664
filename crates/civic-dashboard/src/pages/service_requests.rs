//! Service requests page: status tabs, filtered list, and the filing form.

use async_trait::async_trait;
use civic_api_models::{RequestId, RequestStatus, ServiceRequest};
use serde::Serialize;

use super::Page;
use crate::api::{ApiClient, ApiResult, Pagination};
use crate::forms::{FormController, ServiceRequestDraft, SubmitOutcome};
use crate::logic::{
    self, Badge, StatusCounts, StatusFilter, StatusSet, StatusTab, filter_by_status,
    status_counts,
};
use crate::orchestrator::{LoadOutcome, Orchestrator, PageSnapshot};

/// Every service request, in backend order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ServiceRequestsSnapshot {
    /// Requests as listed by the backend.
    pub requests: Vec<ServiceRequest>,
}

#[async_trait]
impl PageSnapshot for ServiceRequestsSnapshot {
    const PAGE: &'static str = "service-requests";
    const LOAD_FAILURE: &'static str = "Error fetching requests";

    async fn fetch(client: &ApiClient) -> ApiResult<Self> {
        let requests = client.list_service_requests(Pagination::default()).await?;
        Ok(Self { requests })
    }
}

/// Display row for one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequestRow {
    /// Request id.
    pub id: RequestId,
    /// Citizen id, blank when absent.
    pub citizen_id: String,
    /// Service id, blank when absent.
    pub service_id: String,
    /// Payment id, blank when absent.
    pub payment_id: String,
    /// Filing date or `N/A`.
    pub date: String,
    /// Status label.
    pub status: String,
    /// Status badge.
    pub badge: Badge,
}

fn id_text(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

impl ServiceRequestsSnapshot {
    /// Per-status counts including `All`.
    #[must_use]
    pub fn counts(&self) -> StatusCounts<RequestStatus> {
        status_counts(&self.requests)
    }

    /// Rows passing `filter`, in backend order.
    #[must_use]
    pub fn rows(&self, filter: &StatusFilter<RequestStatus>) -> Vec<RequestRow> {
        filter_by_status(&self.requests, filter)
            .into_iter()
            .map(|request| RequestRow {
                id: request.id,
                citizen_id: id_text(request.citizen_id),
                service_id: id_text(request.service_id),
                payment_id: id_text(request.payment_id),
                date: logic::display_day(request.request_date),
                status: request.status.label().to_string(),
                badge: request.status.badge(),
            })
            .collect()
    }
}

/// Mounted service requests page.
#[derive(Debug, Default)]
pub struct ServiceRequestsPage {
    page: Page<ServiceRequestsSnapshot>,
    filter: StatusFilter<RequestStatus>,
    form: FormController<ServiceRequestDraft>,
}

impl ServiceRequestsPage {
    /// Mount with the `All` filter and a closed form.
    #[must_use]
    pub fn mount() -> Self {
        Self::default()
    }

    /// Fetch the request list.
    pub async fn load(&mut self, orchestrator: &Orchestrator) -> LoadOutcome {
        self.page.load(orchestrator).await
    }

    /// Underlying page.
    #[must_use]
    pub const fn page(&self) -> &Page<ServiceRequestsSnapshot> {
        &self.page
    }

    /// Change the active filter.
    pub fn set_filter(&mut self, filter: StatusFilter<RequestStatus>) {
        self.filter = filter;
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> &StatusFilter<RequestStatus> {
        &self.filter
    }

    /// Filter tabs with counts, `All` first.
    #[must_use]
    pub fn tabs(&self) -> Vec<StatusTab> {
        self.page.snapshot().counts().tabs()
    }

    /// Rows under the active filter.
    #[must_use]
    pub fn visible(&self) -> Vec<RequestRow> {
        self.page.snapshot().rows(&self.filter)
    }

    /// Filing form.
    pub const fn form(&mut self) -> &mut FormController<ServiceRequestDraft> {
        &mut self.form
    }

    /// Submit the filing form; reloads the page on success.
    pub async fn submit(&mut self, orchestrator: &Orchestrator) -> SubmitOutcome<ServiceRequest> {
        self.page.submit(orchestrator, &mut self.form).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::orchestrator::Notice;
    use crate::pages::test_orchestrator;

    #[tokio::test]
    async fn counts_and_filtering_use_request_statuses() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/service-requests");
            then.status(200).json_body(json!([
                {"Request_ID": 1, "Citizen_ID": 2, "Service_ID": 3, "Payment_ID": null,
                 "Request_Date": "2024-02-01", "Status": "Pending"},
                {"Request_ID": 2, "Citizen_ID": 2, "Service_ID": 4, "Payment_ID": 11,
                 "Request_Date": "2024-02-02T09:30:00", "Status": "Completed"},
                {"Request_ID": 3, "Citizen_ID": null, "Service_ID": 4, "Payment_ID": null,
                 "Request_Date": null, "Status": "On Hold"}
            ]));
        });
        let (orchestrator, _log) = test_orchestrator(&server);

        let mut page = ServiceRequestsPage::mount();
        assert!(page.load(&orchestrator).await.is_loaded());

        let counts = page.page().snapshot().counts();
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.known_total(), 2);
        assert_eq!(counts.unrecognized(), 1);

        page.set_filter(StatusFilter::parse("Completed"));
        let rows = page.visible();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2024-02-02");
        assert_eq!(rows[0].payment_id, "11");
        assert_eq!(rows[0].badge, Badge::Success);

        page.set_filter(StatusFilter::All);
        let all = page.visible();
        assert_eq!(all[2].citizen_id, "");
        assert_eq!(all[2].badge, Badge::Info);
    }

    #[tokio::test]
    async fn failed_load_notifies_once() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/service-requests");
            then.status(503);
        });
        let (orchestrator, log) = test_orchestrator(&server);

        let mut page = ServiceRequestsPage::mount();
        assert!(!page.load(&orchestrator).await.is_loaded());
        assert!(page.page().snapshot().requests.is_empty());
        assert_eq!(log.notices(), vec![Notice::error("Error fetching requests")]);
    }
}
