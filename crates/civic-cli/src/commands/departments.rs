use civic_dashboard::pages::DepartmentsPage;

use crate::cli::{DepartmentCreateArgs, IdArgs};
use crate::client::{AppContext, CliError, CliResult, created, loaded, until_interrupted};
use crate::output::{render_department, render_departments};

pub(crate) async fn handle_department_list(ctx: &AppContext) -> CliResult<String> {
    let mut page = DepartmentsPage::mount();
    let handle = page.page().handle();
    loaded(until_interrupted(&handle, page.load(&ctx.orchestrator)).await)?;
    render_departments(&page.page().snapshot().departments, ctx.output)
}

pub(crate) async fn handle_department_show(ctx: &AppContext, args: IdArgs) -> CliResult<String> {
    let department = ctx
        .client()
        .get_department(args.id)
        .await
        .map_err(|err| CliError::api(format!("failed to fetch department {}", args.id), err))?;
    render_department(&department, ctx.output)
}

pub(crate) async fn handle_department_create(
    ctx: &AppContext,
    args: DepartmentCreateArgs,
) -> CliResult<String> {
    let mut page = DepartmentsPage::mount();
    let handle = page.page().handle();
    page.form().open();
    page.form().edit(|draft| draft.name = args.name);
    let department = created(until_interrupted(&handle, page.submit(&ctx.orchestrator)).await)?;
    render_department(&department, ctx.output)
}
