//! Citizen activity log, maintained by the backend.

use async_trait::async_trait;
use civic_api_models::CitizenLog;
use serde::Serialize;

use crate::api::{ApiClient, ApiResult};
use crate::orchestrator::PageSnapshot;

/// Log entries, newest first as returned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CitizenLogsSnapshot {
    /// Entries as listed by the backend.
    pub logs: Vec<CitizenLog>,
}

#[async_trait]
impl PageSnapshot for CitizenLogsSnapshot {
    const PAGE: &'static str = "citizen-logs";
    const LOAD_FAILURE: &'static str = "Error fetching citizen logs";

    async fn fetch(client: &ApiClient) -> ApiResult<Self> {
        let logs = client.citizen_logs().await?;
        Ok(Self { logs })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::pages::{Page, test_orchestrator};

    #[tokio::test]
    async fn logs_keep_backend_order() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/citizen-logs");
            then.status(200).json_body(json!([
                {"Log_ID": 9, "Citizen_ID": 1, "Citizen_Name": "Asha",
                 "Total_Services": 3, "Log_Date": "2024-06-02 10:00:00"},
                {"Log_ID": 4, "Citizen_ID": 2, "Citizen_Name": "Ravi",
                 "Total_Services": 1, "Log_Date": "2024-05-30 08:15:00"}
            ]));
        });
        let (orchestrator, _log) = test_orchestrator(&server);

        let mut page = Page::<CitizenLogsSnapshot>::mount();
        assert!(page.load(&orchestrator).await.is_loaded());
        let ids: Vec<i64> = page.snapshot().logs.iter().map(|log| log.id).collect();
        assert_eq!(ids, vec![9, 4]);
    }
}
