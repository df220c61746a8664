use civic_dashboard::pages::{DashboardSnapshot, Page, ReportsSnapshot};

use crate::cli::DashboardArgs;
use crate::client::{AppContext, CliResult, loaded, until_interrupted};
use crate::output::{render_dashboard, render_reports};

pub(crate) async fn handle_dashboard(ctx: &AppContext, args: DashboardArgs) -> CliResult<String> {
    if args.reports {
        let mut page = Page::<ReportsSnapshot>::mount();
        let handle = page.handle();
        loaded(until_interrupted(&handle, page.load(&ctx.orchestrator)).await)?;
        return render_reports(page.snapshot(), ctx.output);
    }

    let mut page = Page::<DashboardSnapshot>::mount();
    let handle = page.handle();
    loaded(until_interrupted(&handle, page.load(&ctx.orchestrator)).await)?;
    render_dashboard(page.snapshot(), ctx.output)
}
