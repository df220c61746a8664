//! Citizens page: register, edit, and remove citizens.

use async_trait::async_trait;
use civic_api_models::{Citizen, CitizenId};
use serde::Serialize;
use tracing::{info, warn};

use super::Page;
use crate::api::{ApiClient, ApiError, ApiResult, Pagination};
use crate::forms::{CitizenDraft, CitizenEditDraft, FormController, SubmitOutcome};
use crate::orchestrator::{LoadOutcome, Notice, Orchestrator, PageSnapshot};

/// Registered citizens, in backend order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CitizensSnapshot {
    /// Citizens as listed by the backend.
    pub citizens: Vec<Citizen>,
}

#[async_trait]
impl PageSnapshot for CitizensSnapshot {
    const PAGE: &'static str = "citizens";
    const LOAD_FAILURE: &'static str = "Error fetching citizens";

    async fn fetch(client: &ApiClient) -> ApiResult<Self> {
        let citizens = client.list_citizens(Pagination::default()).await?;
        Ok(Self { citizens })
    }
}

/// Mounted citizens page.
#[derive(Debug, Default)]
pub struct CitizensPage {
    page: Page<CitizensSnapshot>,
    create: FormController<CitizenDraft>,
    edit: FormController<CitizenEditDraft>,
}

impl CitizensPage {
    /// Mount with both forms closed.
    #[must_use]
    pub fn mount() -> Self {
        Self::default()
    }

    /// Fetch the citizen list.
    pub async fn load(&mut self, orchestrator: &Orchestrator) -> LoadOutcome {
        self.page.load(orchestrator).await
    }

    /// Underlying page.
    #[must_use]
    pub const fn page(&self) -> &Page<CitizensSnapshot> {
        &self.page
    }

    /// Registration form.
    pub const fn create_form(&mut self) -> &mut FormController<CitizenDraft> {
        &mut self.create
    }

    /// Edit form.
    pub const fn edit_form(&mut self) -> &mut FormController<CitizenEditDraft> {
        &mut self.edit
    }

    /// Open the edit form for a loaded citizen. Returns `false` when the id is
    /// not in the current snapshot.
    pub fn begin_edit(&mut self, id: CitizenId) -> bool {
        let Some(citizen) = self
            .page
            .snapshot()
            .citizens
            .iter()
            .find(|citizen| citizen.id == id)
        else {
            return false;
        };
        let draft = CitizenEditDraft::from_citizen(citizen);
        self.edit.open_with(draft);
        true
    }

    /// Open the edit form for a citizen fetched on its own, e.g. one outside
    /// the listed page.
    pub fn begin_edit_from(&mut self, citizen: &Citizen) {
        self.edit.open_with(CitizenEditDraft::from_citizen(citizen));
    }

    /// Submit the registration form; reloads on success.
    pub async fn submit_create(&mut self, orchestrator: &Orchestrator) -> SubmitOutcome<Citizen> {
        self.page.submit(orchestrator, &mut self.create).await
    }

    /// Submit the edit form; reloads on success.
    pub async fn submit_edit(&mut self, orchestrator: &Orchestrator) -> SubmitOutcome<Citizen> {
        self.page.submit(orchestrator, &mut self.edit).await
    }

    /// Delete a citizen and reload the list.
    ///
    /// # Errors
    /// Returns the gateway error after notifying the operator.
    pub async fn delete(
        &mut self,
        orchestrator: &Orchestrator,
        id: CitizenId,
    ) -> Result<(), ApiError> {
        match orchestrator.client().delete_citizen(id).await {
            Ok(()) => {
                info!(citizen_id = id, "citizen deleted");
                let reload = self.load(orchestrator).await;
                if !reload.is_loaded() {
                    warn!(citizen_id = id, ?reload, "citizen list not refreshed after delete");
                }
                Ok(())
            }
            Err(err) => {
                warn!(citizen_id = id, error = %err, "citizen delete failed");
                orchestrator.notify(Notice::error(
                    err.user_message("An unexpected error occurred while deleting the citizen."),
                ));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::forms::FormPhase;
    use crate::pages::test_orchestrator;

    #[tokio::test]
    async fn edit_prefills_from_snapshot_and_reloads() {
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/citizens");
            then.status(200).json_body(json!([
                {"Citizen_ID": 4, "Name": "Lata", "Phone": "98450", "Address": null}
            ]));
        });
        let update = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/citizens/4")
                .json_body(json!({"Name": "Lata Rao", "Phone": "98450"}));
            then.status(200)
                .json_body(json!({"Citizen_ID": 4, "Name": "Lata Rao", "Phone": "98450"}));
        });
        let (orchestrator, _log) = test_orchestrator(&server);

        let mut page = CitizensPage::mount();
        assert!(page.load(&orchestrator).await.is_loaded());
        assert!(!page.begin_edit(99));
        assert!(page.begin_edit(4));
        assert_eq!(page.edit_form().draft().phone, "98450");
        page.edit_form()
            .edit(|draft| draft.name = "Lata Rao".to_string());

        let outcome = page.submit_edit(&orchestrator).await;
        update.assert();
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(page.edit_form().phase(), FormPhase::Closed);
        assert_eq!(list.hits(), 2);
    }

    #[tokio::test]
    async fn edit_from_fetched_citizen_outside_listed_page() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/citizens");
            then.status(200).json_body(json!([]));
        });
        let update = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/citizens/150")
                .json_body(json!({"Name": "Kiran", "Address": "Ward 9"}));
            then.status(200)
                .json_body(json!({"Citizen_ID": 150, "Name": "Kiran", "Address": "Ward 9"}));
        });
        let (orchestrator, _log) = test_orchestrator(&server);
        let citizen: Citizen = serde_json::from_value(
            json!({"Citizen_ID": 150, "Name": "Kiran", "Address": "Ward 9"}),
        )
        .expect("citizen");

        let mut page = CitizensPage::mount();
        page.begin_edit_from(&citizen);
        assert_eq!(page.edit_form().phase(), FormPhase::Editing);
        let outcome = page.submit_edit(&orchestrator).await;
        update.assert();
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
    }

    #[tokio::test]
    async fn refused_delete_is_notified() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/api/citizens/4");
            then.status(404).json_body(json!({"detail": "Citizen not found"}));
        });
        let (orchestrator, log) = test_orchestrator(&server);

        let mut page = CitizensPage::mount();
        let err = page
            .delete(&orchestrator, 4)
            .await
            .expect_err("delete refused");
        assert_eq!(err.status(), Some(404));
        assert_eq!(log.notices(), vec![Notice::error("Citizen not found")]);
    }
}
