use civic_dashboard::pages::ServicesPage;

use crate::cli::{IdArgs, ServiceCreateArgs};
use crate::client::{AppContext, CliError, CliResult, created, loaded, until_interrupted};
use crate::output::{render_service, render_services};

pub(crate) async fn handle_service_list(ctx: &AppContext) -> CliResult<String> {
    let mut page = ServicesPage::mount();
    let handle = page.page().handle();
    loaded(until_interrupted(&handle, page.load(&ctx.orchestrator)).await)?;
    render_services(&page.rows(), ctx.output)
}

pub(crate) async fn handle_service_show(ctx: &AppContext, args: IdArgs) -> CliResult<String> {
    let service = ctx
        .client()
        .get_service(args.id)
        .await
        .map_err(|err| CliError::api(format!("failed to fetch service {}", args.id), err))?;
    render_service(&service, ctx.output)
}

pub(crate) async fn handle_service_create(
    ctx: &AppContext,
    args: ServiceCreateArgs,
) -> CliResult<String> {
    let mut page = ServicesPage::mount();
    let handle = page.page().handle();
    page.form().open();
    page.form().edit(|draft| {
        draft.name = args.name;
        draft.service_type = args.service_type;
        draft.department_id = args.department_id;
    });
    let service = created(until_interrupted(&handle, page.submit(&ctx.orchestrator)).await)?;
    render_service(&service, ctx.output)
}

#[cfg(test)]
mod tests {
    use civic_dashboard::orchestrator::Notice;
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::client::context_with;

    #[tokio::test]
    async fn list_shows_type_tone_and_department() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(200).json_body(json!([
                {"Service_ID": 1, "Service_Name": "Birth Certificate",
                 "Service_Type": "Certificate", "Department_ID": 1},
                {"Service_ID": 2, "Service_Name": "Tree Felling",
                 "Service_Type": "Permit", "Department_ID": 7}
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/departments");
            then.status(200)
                .json_body(json!([{"Department_ID": 1, "Department_Name": "Registry"}]));
        });
        let (ctx, _log) = context_with(&server, OutputFormat::Table);

        let text = handle_service_list(&ctx).await.expect("list renders");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("Certificate (blue)"));
        assert!(lines[1].ends_with("Registry"));
        assert!(lines[2].contains("Permit (gray)"));
        assert!(lines[2].ends_with("Unknown"));
    }

    #[tokio::test]
    async fn blank_department_is_sent_as_null_and_rejected() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/services").json_body(json!({
                "Service_Name": "Water Connection",
                "Service_Type": "Utility",
                "Department_ID": null
            }));
            then.status(422).json_body(json!({
                "detail": [{"loc": ["body", "Department_ID"],
                            "msg": "Input should be a valid integer"}]
            }));
        });
        let reload = server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(200).json_body(json!([]));
        });
        let (ctx, log) = context_with(&server, OutputFormat::Table);

        let err = handle_service_create(
            &ctx,
            ServiceCreateArgs {
                name: "Water Connection".to_string(),
                service_type: "Utility".to_string(),
                department_id: String::new(),
            },
        )
        .await
        .expect_err("backend rejects");

        create.assert();
        assert_eq!(reload.hits(), 0);
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            log.notices(),
            vec![Notice::error(
                "Department_ID: Input should be a valid integer"
            )]
        );
    }

    #[tokio::test]
    async fn show_renders_missing_department_as_dash() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/services/2");
            then.status(200).json_body(json!({
                "Service_ID": 2, "Service_Name": "Tree Felling",
                "Service_Type": "Permit", "Department_ID": null
            }));
        });
        let (ctx, _log) = context_with(&server, OutputFormat::Table);

        let text = handle_service_show(&ctx, IdArgs { id: 2 })
            .await
            .expect("service renders");
        assert_eq!(
            text,
            "id: 2\nname: Tree Felling\ntype: Permit\ndepartment: -"
        );
    }
}
