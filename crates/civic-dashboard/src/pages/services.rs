//! Services catalogue with owning departments.

use async_trait::async_trait;
use civic_api_models::{Department, Service, ServiceId};
use serde::Serialize;

use super::Page;
use crate::api::{ApiClient, ApiResult};
use crate::forms::{FormController, ServiceDraft, SubmitOutcome};
use crate::logic::{self, Tone, service_type_tone};
use crate::orchestrator::{LoadOutcome, Orchestrator, PageSnapshot};

/// Services and the departments that own them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ServicesSnapshot {
    /// Every service.
    pub services: Vec<Service>,
    /// Departments for name resolution.
    pub departments: Vec<Department>,
}

#[async_trait]
impl PageSnapshot for ServicesSnapshot {
    const PAGE: &'static str = "services";
    const LOAD_FAILURE: &'static str = "Error fetching data";

    async fn fetch(client: &ApiClient) -> ApiResult<Self> {
        let (services, departments) =
            tokio::try_join!(client.list_services(), client.list_departments())?;
        Ok(Self {
            services,
            departments,
        })
    }
}

/// Display row for one service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceRow {
    /// Service id.
    pub id: ServiceId,
    /// Service name.
    pub name: String,
    /// Category label.
    pub service_type: String,
    /// Category colour.
    pub tone: Tone,
    /// Department name or `Unknown`.
    pub department: String,
}

impl ServicesSnapshot {
    /// One row per service, in backend order.
    #[must_use]
    pub fn rows(&self) -> Vec<ServiceRow> {
        self.services
            .iter()
            .map(|service| ServiceRow {
                id: service.id,
                name: service.name.clone(),
                service_type: service.service_type.as_str().to_string(),
                tone: service_type_tone(&service.service_type),
                department: logic::department_name(&self.departments, service.department_id)
                    .to_string(),
            })
            .collect()
    }
}

/// Mounted services page.
#[derive(Debug, Default)]
pub struct ServicesPage {
    page: Page<ServicesSnapshot>,
    form: FormController<ServiceDraft>,
}

impl ServicesPage {
    /// Mount with a closed form.
    #[must_use]
    pub fn mount() -> Self {
        Self::default()
    }

    /// Fetch services and departments together.
    pub async fn load(&mut self, orchestrator: &Orchestrator) -> LoadOutcome {
        self.page.load(orchestrator).await
    }

    /// Underlying page.
    #[must_use]
    pub const fn page(&self) -> &Page<ServicesSnapshot> {
        &self.page
    }

    /// Rows for the committed snapshot.
    #[must_use]
    pub fn rows(&self) -> Vec<ServiceRow> {
        self.page.snapshot().rows()
    }

    /// Creation form.
    pub const fn form(&mut self) -> &mut FormController<ServiceDraft> {
        &mut self.form
    }

    /// Submit the creation form; reloads the page on success.
    pub async fn submit(&mut self, orchestrator: &Orchestrator) -> SubmitOutcome<Service> {
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

    #[tokio::test]
    async fn rows_resolve_departments_and_tones() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(200).json_body(json!([
                {"Service_ID": 1, "Service_Name": "Birth Certificate",
                 "Service_Type": "Certificate", "Department_ID": 1},
                {"Service_ID": 2, "Service_Name": "Tree Felling",
                 "Service_Type": "Permit", "Department_ID": null}
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200)
                .json_body(json!([{"Department_ID": 1, "Department_Name": "Registry"}]));
        });
        let (orchestrator, _log) = test_orchestrator(&server);

        let mut page = ServicesPage::mount();
        assert!(page.load(&orchestrator).await.is_loaded());
        let rows = page.rows();
        assert_eq!(rows[0].department, "Registry");
        assert_eq!(rows[0].tone, Tone::Blue);
        assert_eq!(rows[1].department, logic::UNKNOWN);
        assert_eq!(rows[1].service_type, "Permit");
        assert_eq!(rows[1].tone, Tone::Neutral);
    }

    #[tokio::test]
    async fn blank_department_is_rejected_and_form_stays_open() {
        let server = MockServer::start_async().await;
        let services = server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(200).json_body(json!([]));
        });
        let departments = server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200).json_body(json!([]));
        });
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/services").json_body(json!({
                "Service_Name": "Water Connection",
                "Service_Type": "Utility",
                "Department_ID": null
            }));
            then.status(422).json_body(json!({
                "detail": [{"loc": ["body", "Department_ID"], "msg": "Field required"}]
            }));
        });
        let (orchestrator, log) = test_orchestrator(&server);

        let mut page = ServicesPage::mount();
        page.form().open();
        page.form().edit(|draft| {
            draft.name = "Water Connection".to_string();
            draft.service_type = "Utility".to_string();
            draft.department_id = String::new();
        });
        let outcome = page.submit(&orchestrator).await;

        create.assert();
        let SubmitOutcome::Rejected(message) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(message, "Department_ID: Field required");
        assert_eq!(page.form().phase(), FormPhase::Editing);
        assert_eq!(page.form().draft().name, "Water Connection");
        assert_eq!(page.form().error(), Some("Department_ID: Field required"));
        assert_eq!(services.hits(), 0);
        assert_eq!(departments.hits(), 0);
        assert_eq!(log.notices(), vec![Notice::error(message)]);
    }

    #[tokio::test]
    async fn accepted_service_closes_form_and_reloads() {
        let server = MockServer::start_async().await;
        let services = server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(200).json_body(json!([
                {"Service_ID": 8, "Service_Name": "Water Connection",
                 "Service_Type": "Utility", "Department_ID": 2}
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200)
                .json_body(json!([{"Department_ID": 2, "Department_Name": "Water Works"}]));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/services");
            then.status(200).json_body(json!({
                "Service_ID": 8, "Service_Name": "Water Connection",
                "Service_Type": "Utility", "Department_ID": 2
            }));
        });
        let (orchestrator, log) = test_orchestrator(&server);

        let mut page = ServicesPage::mount();
        page.form().open();
        page.form().edit(|draft| {
            draft.name = "Water Connection".to_string();
            draft.service_type = "Utility".to_string();
            draft.department_id = "2".to_string();
        });
        let outcome = page.submit(&orchestrator).await;

        assert!(matches!(outcome, SubmitOutcome::Created(ref service) if service.id == 8));
        assert!(!page.form().is_open());
        assert_eq!(services.hits(), 1);
        assert_eq!(page.rows()[0].department, "Water Works");
        assert!(log.notices().is_empty());
    }
}
