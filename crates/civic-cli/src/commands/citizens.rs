use civic_dashboard::pages::{CitizenLogsSnapshot, CitizensPage, Page};

use crate::cli::{CitizenCreateArgs, CitizenUpdateArgs, IdArgs};
use crate::client::{AppContext, CliError, CliResult, created, loaded, until_interrupted};
use crate::output::{render_citizen, render_citizen_logs, render_citizens};

pub(crate) async fn handle_citizen_list(ctx: &AppContext) -> CliResult<String> {
    let mut page = CitizensPage::mount();
    let handle = page.page().handle();
    loaded(until_interrupted(&handle, page.load(&ctx.orchestrator)).await)?;
    render_citizens(&page.page().snapshot().citizens, ctx.output)
}

pub(crate) async fn handle_citizen_show(ctx: &AppContext, args: IdArgs) -> CliResult<String> {
    let citizen = ctx
        .client()
        .get_citizen(args.id)
        .await
        .map_err(|err| CliError::api(format!("failed to fetch citizen {}", args.id), err))?;
    render_citizen(&citizen, ctx.output)
}

pub(crate) async fn handle_citizen_create(
    ctx: &AppContext,
    args: CitizenCreateArgs,
) -> CliResult<String> {
    let mut page = CitizensPage::mount();
    let handle = page.page().handle();
    page.create_form().open();
    page.create_form().edit(|draft| {
        draft.name = args.name;
        draft.phone = args.phone;
        draft.address = args.address;
    });
    let citizen = created(until_interrupted(&handle, page.submit_create(&ctx.orchestrator)).await)?;
    render_citizen(&citizen, ctx.output)
}

pub(crate) async fn handle_citizen_update(
    ctx: &AppContext,
    args: CitizenUpdateArgs,
) -> CliResult<String> {
    let current = match ctx.client().get_citizen(args.id).await {
        Ok(citizen) => citizen,
        Err(err) if err.status() == Some(404) => {
            return Err(CliError::validation(format!(
                "citizen {} not found",
                args.id
            )));
        }
        Err(err) => {
            return Err(CliError::api(
                format!("failed to fetch citizen {}", args.id),
                err,
            ));
        }
    };
    let mut page = CitizensPage::mount();
    let handle = page.page().handle();
    page.begin_edit_from(&current);
    page.edit_form().edit(|draft| {
        if let Some(name) = args.name {
            draft.name = name;
        }
        if let Some(phone) = args.phone {
            draft.phone = phone;
        }
        if let Some(address) = args.address {
            draft.address = address;
        }
    });
    let citizen = created(until_interrupted(&handle, page.submit_edit(&ctx.orchestrator)).await)?;
    render_citizen(&citizen, ctx.output)
}

pub(crate) async fn handle_citizen_delete(ctx: &AppContext, args: IdArgs) -> CliResult<String> {
    let mut page = CitizensPage::mount();
    let handle = page.page().handle();
    until_interrupted(&handle, page.delete(&ctx.orchestrator, args.id))
        .await
        .map_err(|err| CliError::Reported {
            rejected: err.is_rejection(),
        })?;
    Ok(format!("Citizen {} deleted.", args.id))
}

pub(crate) async fn handle_citizen_logs(ctx: &AppContext) -> CliResult<String> {
    let mut page = Page::<CitizenLogsSnapshot>::mount();
    let handle = page.handle();
    loaded(until_interrupted(&handle, page.load(&ctx.orchestrator)).await)?;
    render_citizen_logs(&page.snapshot().logs, ctx.output)
}
