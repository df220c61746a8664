//! Command handlers, one module per page. Each returns the rendered output.

pub(crate) mod citizens;
pub(crate) mod dashboard;
pub(crate) mod departments;
pub(crate) mod grievances;
pub(crate) mod health;
pub(crate) mod requests;
pub(crate) mod services;

use civic_dashboard::logic::{ALL_LABEL, StatusFilter, StatusSet};

use crate::client::{CliError, CliResult};

/// Parse a `--status` flag, rejecting labels outside the tab set.
pub(crate) fn status_filter<S: StatusSet>(label: &str) -> CliResult<StatusFilter<S>> {
    let filter = StatusFilter::<S>::parse(label);
    if let StatusFilter::Only(status) = &filter
        && !S::known().contains(status)
    {
        let choices: Vec<String> = std::iter::once(ALL_LABEL.to_string())
            .chain(S::known().iter().map(|known| known.label().to_string()))
            .collect();
        return Err(CliError::validation(format!(
            "unknown status '{label}' (expected one of: {})",
            choices.join(", ")
        )));
    }
    Ok(filter)
}
