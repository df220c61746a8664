//! Grievances page: status tabs, filtered list, and the filing form.

use async_trait::async_trait;
use civic_api_models::{Citizen, Department, Grievance, GrievanceId, GrievanceStatus};
use serde::Serialize;

use super::Page;
use crate::api::{ApiClient, ApiResult, Pagination};
use crate::forms::{FormController, GrievanceDraft, SubmitOutcome};
use crate::logic::{
    self, Badge, StatusCounts, StatusFilter, StatusSet, StatusTab, filter_by_status,
    status_counts,
};
use crate::orchestrator::{LoadOutcome, Orchestrator, PageSnapshot};

/// Grievances plus the lookups needed to name their references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GrievancesSnapshot {
    /// Every grievance, in backend order.
    pub grievances: Vec<Grievance>,
    /// Departments for name resolution.
    pub departments: Vec<Department>,
    /// Citizens for name resolution.
    pub citizens: Vec<Citizen>,
}

#[async_trait]
impl PageSnapshot for GrievancesSnapshot {
    const PAGE: &'static str = "grievances";
    const LOAD_FAILURE: &'static str = "Error fetching data";

    async fn fetch(client: &ApiClient) -> ApiResult<Self> {
        let (grievances, departments, citizens) = tokio::try_join!(
            client.list_grievances(Pagination::default()),
            client.list_departments(),
            client.list_citizens(Pagination::default()),
        )?;
        Ok(Self {
            grievances,
            departments,
            citizens,
        })
    }
}

/// Display row for one grievance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GrievanceRow {
    /// Grievance id.
    pub id: GrievanceId,
    /// Citizen name or `Unknown`.
    pub citizen: String,
    /// Department name or `Unknown`.
    pub department: String,
    /// Complaint text.
    pub description: String,
    /// Status label.
    pub status: String,
    /// Status badge.
    pub badge: Badge,
    /// Filing date or `N/A`.
    pub date: String,
}

impl GrievancesSnapshot {
    /// Per-status counts including `All`.
    #[must_use]
    pub fn counts(&self) -> StatusCounts<GrievanceStatus> {
        status_counts(&self.grievances)
    }

    /// Rows passing `filter`, in backend order.
    #[must_use]
    pub fn rows(&self, filter: &StatusFilter<GrievanceStatus>) -> Vec<GrievanceRow> {
        filter_by_status(&self.grievances, filter)
            .into_iter()
            .map(|grievance| GrievanceRow {
                id: grievance.id,
                citizen: logic::citizen_name(&self.citizens, grievance.citizen_id).to_string(),
                department: logic::department_name(&self.departments, grievance.department_id)
                    .to_string(),
                description: grievance.description.clone().unwrap_or_default(),
                status: grievance.status.label().to_string(),
                badge: grievance.status.badge(),
                date: logic::display_day(grievance.date),
            })
            .collect()
    }
}

/// Mounted grievances page.
#[derive(Debug, Default)]
pub struct GrievancesPage {
    page: Page<GrievancesSnapshot>,
    filter: StatusFilter<GrievanceStatus>,
    form: FormController<GrievanceDraft>,
}

impl GrievancesPage {
    /// Mount with the `All` filter and a closed form.
    #[must_use]
    pub fn mount() -> Self {
        Self::default()
    }

    /// Fetch grievances, departments, and citizens together.
    pub async fn load(&mut self, orchestrator: &Orchestrator) -> LoadOutcome {
        self.page.load(orchestrator).await
    }

    /// Underlying page.
    #[must_use]
    pub const fn page(&self) -> &Page<GrievancesSnapshot> {
        &self.page
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> &StatusFilter<GrievanceStatus> {
        &self.filter
    }

    /// Change the active filter.
    pub fn set_filter(&mut self, filter: StatusFilter<GrievanceStatus>) {
        self.filter = filter;
    }

    /// Filter tabs with counts, `All` first.
    #[must_use]
    pub fn tabs(&self) -> Vec<StatusTab> {
        self.page.snapshot().counts().tabs()
    }

    /// Rows under the active filter.
    #[must_use]
    pub fn visible(&self) -> Vec<GrievanceRow> {
        self.page.snapshot().rows(&self.filter)
    }

    /// Filing form.
    pub const fn form(&mut self) -> &mut FormController<GrievanceDraft> {
        &mut self.form
    }

    /// Submit the filing form; reloads the page on success.
    pub async fn submit(&mut self, orchestrator: &Orchestrator) -> SubmitOutcome<Grievance> {
        self.page.submit(orchestrator, &mut self.form).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::forms::FormPhase;
    use crate::orchestrator::Notice;
    use crate::pages::test_orchestrator;

    fn mock_lookups(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200).json_body(json!([
                {"Department_ID": 1, "Department_Name": "Revenue"},
                {"Department_ID": 2, "Department_Name": "Water Works"}
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/citizens");
            then.status(200)
                .json_body(json!([{"Citizen_ID": 5, "Name": "Anil"}]));
        });
    }

    #[tokio::test]
    async fn tabs_and_rows_follow_the_filter() {
        let server = MockServer::start_async().await;
        mock_lookups(&server);
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/grievances")
                .query_param("skip", "0")
                .query_param("limit", "100");
            then.status(200).json_body(json!([
                {"Grievance_ID": 1, "Citizen_ID": 5, "Department_ID": 2,
                 "Description": "Leak", "Status": "Open", "Date": "2024-04-01"},
                {"Grievance_ID": 2, "Citizen_ID": 9, "Department_ID": 1,
                 "Description": "Noise", "Status": "Open", "Date": null},
                {"Grievance_ID": 3, "Citizen_ID": 5, "Department_ID": 7,
                 "Description": "Pothole", "Status": "Resolved", "Date": "2024-04-03"}
            ]));
        });
        let (orchestrator, _log) = test_orchestrator(&server);

        let mut page = GrievancesPage::mount();
        assert!(page.load(&orchestrator).await.is_loaded());

        let tabs: Vec<(String, usize)> = page
            .tabs()
            .into_iter()
            .map(|tab| (tab.label, tab.count))
            .collect();
        assert_eq!(
            tabs,
            vec![
                ("All".to_string(), 3),
                ("Open".to_string(), 2),
                ("In Progress".to_string(), 0),
                ("Resolved".to_string(), 1),
            ]
        );

        page.set_filter(StatusFilter::parse("Open"));
        let rows = page.visible();
        assert_eq!(rows.iter().map(|row| row.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rows[0].department, "Water Works");
        assert_eq!(rows[0].citizen, "Anil");
        assert_eq!(rows[1].citizen, logic::UNKNOWN);
        assert_eq!(rows[1].date, logic::NO_DATE);
        assert_eq!(rows[0].badge, Badge::Danger);

        page.set_filter(StatusFilter::Only(GrievanceStatus::Resolved));
        assert_eq!(page.visible()[0].department, logic::UNKNOWN);
    }

    #[tokio::test]
    async fn rejected_grievance_keeps_form_and_skips_reload() {
        let server = MockServer::start_async().await;
        let reload = server.mock(|when, then| {
            when.method(GET).path("/api/grievances");
            then.status(200).json_body(json!([]));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/grievances");
            then.status(400)
                .json_body(json!({"detail": "Citizen has too many open grievances"}));
        });
        let (orchestrator, log) = test_orchestrator(&server);

        let mut page = GrievancesPage::mount();
        page.form().open();
        page.form().edit(|draft| {
            draft.citizen_id = "5".to_string();
            draft.description = "Leak".to_string();
        });
        let outcome = page.submit(&orchestrator).await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(page.form().phase(), FormPhase::Editing);
        assert_eq!(page.form().draft().description, "Leak");
        assert_eq!(reload.hits(), 0);
        assert_eq!(
            log.notices(),
            vec![Notice::error("Citizen has too many open grievances")]
        );
    }
}
