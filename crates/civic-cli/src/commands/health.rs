use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_health;

pub(crate) async fn handle_health(ctx: &AppContext) -> CliResult<String> {
    let health = ctx
        .client()
        .health()
        .await
        .map_err(|err| CliError::api("health check failed", err))?;
    render_health(&health, ctx.output)
}
