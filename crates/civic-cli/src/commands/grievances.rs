use civic_api_models::GrievanceStatus;
use civic_dashboard::pages::GrievancesPage;

use super::status_filter;
use crate::cli::{GrievanceCreateArgs, StatusArgs};
use crate::client::{AppContext, CliResult, created, loaded, until_interrupted};
use crate::output::{render_grievance, render_grievances};

pub(crate) async fn handle_grievance_list(
    ctx: &AppContext,
    args: StatusArgs,
) -> CliResult<String> {
    let filter = status_filter::<GrievanceStatus>(&args.status)?;
    let mut page = GrievancesPage::mount();
    let handle = page.page().handle();
    loaded(until_interrupted(&handle, page.load(&ctx.orchestrator)).await)?;
    page.set_filter(filter);
    render_grievances(
        page.filter().label(),
        &page.tabs(),
        &page.visible(),
        ctx.output,
    )
}

pub(crate) async fn handle_grievance_create(
    ctx: &AppContext,
    args: GrievanceCreateArgs,
) -> CliResult<String> {
    let mut page = GrievancesPage::mount();
    let handle = page.page().handle();
    page.form().open();
    page.form().edit(|draft| {
        draft.citizen_id = args.citizen_id;
        draft.department_id = args.department_id;
        draft.description = args.description;
        if let Some(status) = args.status {
            draft.status = status;
        }
        if let Some(date) = args.date {
            draft.date = date;
        }
    });
    let grievance = created(until_interrupted(&handle, page.submit(&ctx.orchestrator)).await)?;
    render_grievance(&grievance, ctx.output)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::{Value, json};

    use super::*;
    use crate::cli::OutputFormat;
    use crate::client::context_with;

    fn mock_page(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/api/grievances");
            then.status(200).json_body(json!([
                {"Grievance_ID": 1, "Citizen_ID": 1, "Department_ID": 1,
                 "Description": "Burst pipe", "Status": "Open", "Date": "2024-04-01"},
                {"Grievance_ID": 2, "Citizen_ID": 9, "Department_ID": 1,
                 "Description": "Low pressure", "Status": "Open", "Date": null},
                {"Grievance_ID": 3, "Citizen_ID": 1, "Department_ID": 2,
                 "Description": "Pothole", "Status": "Resolved", "Date": "2024-04-03"}
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200)
                .json_body(json!([{"Department_ID": 1, "Department_Name": "Water"}]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/citizens");
            then.status(200)
                .json_body(json!([{"Citizen_ID": 1, "Name": "Asha"}]));
        });
    }

    #[tokio::test]
    async fn open_tab_lists_open_grievances_in_order() {
        let server = MockServer::start_async().await;
        mock_page(&server);
        let (ctx, _log) = context_with(&server, OutputFormat::Json);

        let text = handle_grievance_list(
            &ctx,
            StatusArgs {
                status: "Open".to_string(),
            },
        )
        .await
        .expect("list renders");
        let parsed: Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(parsed["filter"], json!("Open"));
        assert_eq!(
            parsed["tabs"],
            json!([
                {"label": "All", "count": 3},
                {"label": "Open", "count": 2},
                {"label": "In Progress", "count": 0},
                {"label": "Resolved", "count": 1}
            ])
        );
        let ids: Vec<i64> = parsed["rows"]
            .as_array()
            .expect("rows")
            .iter()
            .filter_map(|row| row["id"].as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(parsed["rows"][1]["citizen"], json!("Unknown"));
        assert_eq!(parsed["rows"][1]["date"], json!("N/A"));
    }

    #[tokio::test]
    async fn empty_tab_renders_empty_state() {
        let server = MockServer::start_async().await;
        mock_page(&server);
        let (ctx, _log) = context_with(&server, OutputFormat::Table);

        let text = handle_grievance_list(
            &ctx,
            StatusArgs {
                status: "In Progress".to_string(),
            },
        )
        .await
        .expect("list renders");
        assert!(text.ends_with("No grievances found."));
    }

    #[tokio::test]
    async fn rejected_grievance_is_reported() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/grievances");
            then.status(500).body("");
        });
        let (ctx, log) = context_with(&server, OutputFormat::Table);

        let err = handle_grievance_create(
            &ctx,
            GrievanceCreateArgs {
                description: "Streetlight out".to_string(),
                ..GrievanceCreateArgs::default()
            },
        )
        .await
        .expect_err("backend fails");
        assert_eq!(err.exit_code(), 2);
        let notices = log.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("500"));
    }
}
