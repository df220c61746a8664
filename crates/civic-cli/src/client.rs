//! Client wiring, error types, and the operator notice sink for the CLI.

use std::fmt::{self, Display, Formatter};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use civic_dashboard::api::{ApiClient, ApiError};
use civic_dashboard::forms::SubmitOutcome;
use civic_dashboard::orchestrator::{
    LoadOutcome, Notice, NoticeLevel, Notifier, Orchestrator, ScopeHandle,
};
use tracing::{info, warn};
use url::Url;

use crate::cli::OutputFormat;

/// CLI-level error type separating operator mistakes from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
    /// Already shown to the operator through the notice sink.
    Reported { rejected: bool },
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Wrap a gateway error with what the command was doing.
    pub(crate) fn api(context: impl Display + Send + Sync + 'static, error: ApiError) -> Self {
        Self::Failure(anyhow::Error::new(error).context(context))
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Reported { rejected: true } => 2,
            Self::Failure(_) | Self::Reported { rejected: false } => 3,
        }
    }

    /// Message for stderr; `None` when the notice sink already printed it.
    pub(crate) fn display_message(&self) -> Option<String> {
        match self {
            Self::Validation(message) => Some(message.clone()),
            Self::Failure(error) => Some(format!("{error:#}")),
            Self::Reported { .. } => None,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Notice sink printing to stderr.
#[derive(Debug, Default)]
pub(crate) struct CliNotifier;

impl Notifier for CliNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => {
                warn!(message = %notice.message, "operator notice");
                eprintln!("error: {}", notice.message);
            }
            NoticeLevel::Success => {
                info!(message = %notice.message, "operator notice");
                eprintln!("{}", notice.message);
            }
        }
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) orchestrator: Orchestrator,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Build the gateway for `base_url` and route notices to stderr.
    pub(crate) fn connect(
        base_url: &Url,
        timeout: Option<Duration>,
        trace_id: &str,
        output: OutputFormat,
    ) -> CliResult<Self> {
        let http = ApiClient::http_client(trace_id, timeout)
            .map_err(|err| CliError::api("failed to build HTTP client", err))?;
        let client = ApiClient::new(http, base_url.clone());
        let notifier: Arc<dyn Notifier> = Arc::new(CliNotifier);
        Ok(Self {
            orchestrator: Orchestrator::new(client, notifier),
            output,
        })
    }

    pub(crate) const fn client(&self) -> &ApiClient {
        self.orchestrator.client()
    }
}

/// Parse and validate a base URL flag.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Drive `work` to completion, unmounting the page on Ctrl-C.
///
/// After an interrupt the page's load resolves as cancelled, so `work` still
/// finishes promptly.
pub(crate) async fn until_interrupted<F: Future>(handle: &ScopeHandle, work: F) -> F::Output {
    tokio::pin!(work);
    tokio::select! {
        output = &mut work => output,
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("interrupted; unmounting page");
            handle.unmount();
            work.await
        }
    }
}

/// Map a page load outcome onto the CLI's error taxonomy.
pub(crate) fn loaded(outcome: LoadOutcome) -> CliResult<()> {
    match outcome {
        LoadOutcome::Loaded => Ok(()),
        LoadOutcome::Failed(_) => Err(CliError::Reported { rejected: false }),
        LoadOutcome::Cancelled => Err(CliError::failure(anyhow!(
            "interrupted before the page finished loading"
        ))),
    }
}

/// Map a form submission onto the created record or a reported rejection.
pub(crate) fn created<T>(outcome: SubmitOutcome<T>) -> CliResult<T> {
    match outcome {
        SubmitOutcome::Created(record) => Ok(record),
        SubmitOutcome::Rejected(_) => Err(CliError::Reported { rejected: true }),
        SubmitOutcome::NotEditing => Err(CliError::failure(anyhow!("form was not open"))),
    }
}

#[cfg(test)]
pub(crate) fn context_with(
    server: &httpmock::MockServer,
    output: OutputFormat,
) -> (AppContext, Arc<civic_dashboard::orchestrator::NoticeLog>) {
    use civic_dashboard::orchestrator::NoticeLog;

    let base = parse_url(&format!("{}/api", server.base_url())).expect("mock server URL");
    let http = ApiClient::http_client("test-trace", None).expect("HTTP client");
    let log = Arc::new(NoticeLog::default());
    let notifier: Arc<dyn Notifier> = log.clone();
    let ctx = AppContext {
        orchestrator: Orchestrator::new(ApiClient::new(http, base), notifier),
        output,
    };
    (ctx, log)
}

#[cfg(test)]
mod tests {
    use civic_dashboard::orchestrator::PageScope;

    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(CliError::validation("bad status").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("boom")).exit_code(), 3);
        assert_eq!(CliError::Reported { rejected: true }.exit_code(), 2);
        assert_eq!(CliError::Reported { rejected: false }.exit_code(), 3);
        assert_eq!(CliError::Reported { rejected: true }.display_message(), None);
    }

    #[test]
    fn api_errors_keep_their_context() {
        let err = CliError::api(
            "failed to fetch citizen 4",
            ApiError::RequestFailed {
                endpoint: "citizens/4".to_string(),
                status: Some(404),
                message: "Citizen not found".to_string(),
            },
        );
        let message = err.display_message().expect("message");
        assert!(message.starts_with("failed to fetch citizen 4"));
        assert!(message.contains("Citizen not found"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn parse_url_rejects_invalid_input() {
        let err = parse_url("not-a-url").expect_err("invalid URL should fail");
        assert!(err.contains("invalid URL"));
    }

    #[test]
    fn submission_outcomes_map_to_exit_codes() {
        assert_eq!(created(SubmitOutcome::Created(7)).expect("created"), 7);
        let rejected = created::<i32>(SubmitOutcome::Rejected("nope".to_string()))
            .expect_err("rejected");
        assert_eq!(rejected.exit_code(), 2);
        assert!(loaded(LoadOutcome::Cancelled).is_err());
    }

    #[tokio::test]
    async fn finished_work_is_returned_without_interrupt() {
        let scope = PageScope::new();
        let value = until_interrupted(&scope.handle(), async { 5 }).await;
        assert_eq!(value, 5);
        assert!(!scope.is_unmounted());
    }
}
