//! Departments page.

use async_trait::async_trait;
use civic_api_models::Department;
use serde::Serialize;

use super::Page;
use crate::api::{ApiClient, ApiResult};
use crate::forms::{DepartmentDraft, FormController, SubmitOutcome};
use crate::orchestrator::{LoadOutcome, Orchestrator, PageSnapshot};

/// Every department.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DepartmentsSnapshot {
    /// Departments as listed by the backend.
    pub departments: Vec<Department>,
}

#[async_trait]
impl PageSnapshot for DepartmentsSnapshot {
    const PAGE: &'static str = "departments";
    const LOAD_FAILURE: &'static str = "Error fetching departments";

    async fn fetch(client: &ApiClient) -> ApiResult<Self> {
        let departments = client.list_departments().await?;
        Ok(Self { departments })
    }
}

/// Mounted departments page.
#[derive(Debug, Default)]
pub struct DepartmentsPage {
    page: Page<DepartmentsSnapshot>,
    form: FormController<DepartmentDraft>,
}

impl DepartmentsPage {
    /// Mount with a closed form.
    #[must_use]
    pub fn mount() -> Self {
        Self::default()
    }

    /// Fetch the department list.
    pub async fn load(&mut self, orchestrator: &Orchestrator) -> LoadOutcome {
        self.page.load(orchestrator).await
    }

    /// Underlying page.
    #[must_use]
    pub const fn page(&self) -> &Page<DepartmentsSnapshot> {
        &self.page
    }

    /// Creation form.
    pub const fn form(&mut self) -> &mut FormController<DepartmentDraft> {
        &mut self.form
    }

    /// Submit the creation form; reloads on success.
    pub async fn submit(&mut self, orchestrator: &Orchestrator) -> SubmitOutcome<Department> {
        self.page.submit(orchestrator, &mut self.form).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::pages::test_orchestrator;

    #[tokio::test]
    async fn created_department_appears_after_reload() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/departments")
                .json_body(json!({"Department_Name": "Parks"}));
            then.status(200)
                .json_body(json!({"Department_ID": 3, "Department_Name": "Parks"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200)
                .json_body(json!([{"Department_ID": 3, "Department_Name": "Parks"}]));
        });
        let (orchestrator, _log) = test_orchestrator(&server);

        let mut page = DepartmentsPage::mount();
        page.form().open();
        page.form().edit(|draft| draft.name = " Parks ".to_string());
        let outcome = page.submit(&orchestrator).await;

        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert!(page.page().view().is_loaded());
        assert_eq!(page.page().snapshot().departments[0].name, "Parks");
    }
}
