use civic_api_models::RequestStatus;
use civic_dashboard::pages::ServiceRequestsPage;

use super::status_filter;
use crate::cli::{RequestCreateArgs, StatusArgs};
use crate::client::{AppContext, CliResult, created, loaded, until_interrupted};
use crate::output::{render_request, render_requests};

pub(crate) async fn handle_request_list(ctx: &AppContext, args: StatusArgs) -> CliResult<String> {
    let filter = status_filter::<RequestStatus>(&args.status)?;
    let mut page = ServiceRequestsPage::mount();
    let handle = page.page().handle();
    loaded(until_interrupted(&handle, page.load(&ctx.orchestrator)).await)?;
    page.set_filter(filter);
    render_requests(
        page.filter().label(),
        &page.tabs(),
        &page.visible(),
        ctx.output,
    )
}

pub(crate) async fn handle_request_create(
    ctx: &AppContext,
    args: RequestCreateArgs,
) -> CliResult<String> {
    let mut page = ServiceRequestsPage::mount();
    let handle = page.page().handle();
    page.form().open();
    page.form().edit(|draft| {
        draft.citizen_id = args.citizen_id;
        draft.service_id = args.service_id;
        draft.payment_id = args.payment_id;
        if let Some(date) = args.date {
            draft.request_date = date;
        }
        if let Some(status) = args.status {
            draft.status = status;
        }
    });
    let request = created(until_interrupted(&handle, page.submit(&ctx.orchestrator)).await)?;
    render_request(&request, ctx.output)
}
