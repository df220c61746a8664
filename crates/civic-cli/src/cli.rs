//! Argument parsing and command dispatch for the `civic` binary.

use std::time::Duration;

use civic_dashboard::api::DEFAULT_API_URL;
use civic_dashboard::logic::ALL_LABEL;
use civic_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::citizens::{
    handle_citizen_create, handle_citizen_delete, handle_citizen_list, handle_citizen_logs,
    handle_citizen_show, handle_citizen_update,
};
use crate::commands::dashboard::handle_dashboard;
use crate::commands::departments::{
    handle_department_create, handle_department_list, handle_department_show,
};
use crate::commands::grievances::{handle_grievance_create, handle_grievance_list};
use crate::commands::health::handle_health;
use crate::commands::requests::{handle_request_create, handle_request_list};
use crate::commands::services::{handle_service_create, handle_service_list, handle_service_show};

/// Parses CLI arguments, installs logging, executes the requested command,
/// and prints its output. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.into(),
        build_sha: env!("CARGO_PKG_VERSION"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let command = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();
    let timeout = cli.timeout.map(Duration::from_secs);
    let result = match AppContext::connect(&cli.api_url, timeout, &trace_id, cli.output) {
        Ok(ctx) => dispatch(&ctx, cli.command).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => {
            info!(command, trace_id = %trace_id, "command succeeded");
            0
        }
        Err(err) => {
            let exit_code = err.exit_code();
            if let Some(message) = err.display_message() {
                eprintln!("error: {message}");
            }
            warn!(command, trace_id = %trace_id, exit_code, "command failed");
            exit_code
        }
    }
}

async fn dispatch(ctx: &AppContext, command: Command) -> CliResult<()> {
    let rendered = match command {
        Command::Dashboard(args) => handle_dashboard(ctx, args).await?,
        Command::Citizens(citizens) => match citizens {
            CitizenCommand::List => handle_citizen_list(ctx).await?,
            CitizenCommand::Show(args) => handle_citizen_show(ctx, args).await?,
            CitizenCommand::Create(args) => handle_citizen_create(ctx, args).await?,
            CitizenCommand::Update(args) => handle_citizen_update(ctx, args).await?,
            CitizenCommand::Delete(args) => handle_citizen_delete(ctx, args).await?,
            CitizenCommand::Logs => handle_citizen_logs(ctx).await?,
        },
        Command::Departments(departments) => match departments {
            DepartmentCommand::List => handle_department_list(ctx).await?,
            DepartmentCommand::Show(args) => handle_department_show(ctx, args).await?,
            DepartmentCommand::Create(args) => handle_department_create(ctx, args).await?,
        },
        Command::Services(services) => match services {
            ServiceCommand::List => handle_service_list(ctx).await?,
            ServiceCommand::Show(args) => handle_service_show(ctx, args).await?,
            ServiceCommand::Create(args) => handle_service_create(ctx, args).await?,
        },
        Command::Requests(requests) => match requests {
            RequestCommand::List(args) => handle_request_list(ctx, args).await?,
            RequestCommand::Create(args) => handle_request_create(ctx, args).await?,
        },
        Command::Grievances(grievances) => match grievances {
            GrievanceCommand::List(args) => handle_grievance_list(ctx, args).await?,
            GrievanceCommand::Create(args) => handle_grievance_create(ctx, args).await?,
        },
        Command::Health => handle_health(ctx).await?,
    };
    println!("{rendered}");
    Ok(())
}

#[derive(Parser)]
#[command(name = "civic", about = "Administration client for municipal citizen services")]
struct Cli {
    /// Base URL of the REST API, including its path prefix.
    #[arg(
        long,
        global = true,
        env = "CIVIC_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    api_url: Url,
    /// Per-request timeout in seconds; unset means no timeout.
    #[arg(long, global = true, env = "CIVIC_HTTP_TIMEOUT_SECS")]
    timeout: Option<u64>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    /// Log level or filter directive; `RUST_LOG` takes precedence.
    #[arg(
        long,
        global = true,
        env = "CIVIC_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    /// Log line format written to stderr.
    #[arg(
        long,
        global = true,
        env = "CIVIC_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormatArg::Pretty
    )]
    log_format: LogFormatArg,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Headline counters, charts, and the latest requests.
    Dashboard(DashboardArgs),
    /// Register, inspect, edit, and remove citizens.
    #[command(subcommand)]
    Citizens(CitizenCommand),
    /// List and create departments.
    #[command(subcommand)]
    Departments(DepartmentCommand),
    /// List and create services.
    #[command(subcommand)]
    Services(ServiceCommand),
    /// List and file service requests.
    #[command(subcommand)]
    Requests(RequestCommand),
    /// List and lodge grievances.
    #[command(subcommand)]
    Grievances(GrievanceCommand),
    /// Probe the backend's health endpoint.
    Health,
}

#[derive(Subcommand)]
pub(crate) enum CitizenCommand {
    /// List registered citizens.
    List,
    /// Show one citizen.
    Show(IdArgs),
    /// Register a citizen.
    Create(CitizenCreateArgs),
    /// Edit a citizen; omitted fields keep their current value.
    Update(CitizenUpdateArgs),
    /// Remove a citizen.
    Delete(IdArgs),
    /// Citizen activity log.
    Logs,
}

#[derive(Subcommand)]
pub(crate) enum DepartmentCommand {
    /// List departments.
    List,
    /// Show one department.
    Show(IdArgs),
    /// Create a department.
    Create(DepartmentCreateArgs),
}

#[derive(Subcommand)]
pub(crate) enum ServiceCommand {
    /// List services with their departments.
    List,
    /// Show one service.
    Show(IdArgs),
    /// Create a service.
    Create(ServiceCreateArgs),
}

#[derive(Subcommand)]
pub(crate) enum RequestCommand {
    /// List service requests with status tabs.
    List(StatusArgs),
    /// File a service request.
    Create(RequestCreateArgs),
}

#[derive(Subcommand)]
pub(crate) enum GrievanceCommand {
    /// List grievances with status tabs.
    List(StatusArgs),
    /// Lodge a grievance.
    Create(GrievanceCreateArgs),
}

#[derive(Args, Default)]
pub(crate) struct DashboardArgs {
    /// Show the monthly trends and department performance reports instead.
    #[arg(long)]
    pub(crate) reports: bool,
}

#[derive(Args)]
pub(crate) struct IdArgs {
    #[arg(help = "Record identifier")]
    pub(crate) id: i64,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    /// Status tab to show.
    #[arg(long, default_value = ALL_LABEL)]
    pub(crate) status: String,
}

#[derive(Args, Default)]
pub(crate) struct CitizenCreateArgs {
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    #[arg(long, default_value = "")]
    pub(crate) phone: String,
    #[arg(long, default_value = "")]
    pub(crate) address: String,
}

/// Omitted or blank fields keep their stored value; the backend offers no way
/// to clear a phone or address once set.
#[derive(Args, Default)]
pub(crate) struct CitizenUpdateArgs {
    #[arg(help = "Citizen identifier")]
    pub(crate) id: i64,
    #[arg(long, help = "New name; blank keeps the current one")]
    pub(crate) name: Option<String>,
    #[arg(long, help = "New phone; blank keeps the current one (cannot be cleared)")]
    pub(crate) phone: Option<String>,
    #[arg(long, help = "New address; blank keeps the current one (cannot be cleared)")]
    pub(crate) address: Option<String>,
}

#[derive(Args, Default)]
pub(crate) struct DepartmentCreateArgs {
    #[arg(long, default_value = "")]
    pub(crate) name: String,
}

#[derive(Args, Default)]
pub(crate) struct ServiceCreateArgs {
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Certificate, Utility, or Grievance.
    #[arg(long = "type", default_value = "")]
    pub(crate) service_type: String,
    /// Owning department; empty sends no department.
    #[arg(long, default_value = "")]
    pub(crate) department_id: String,
}

#[derive(Args, Default)]
pub(crate) struct RequestCreateArgs {
    #[arg(long, default_value = "")]
    pub(crate) citizen_id: String,
    #[arg(long, default_value = "")]
    pub(crate) service_id: String,
    #[arg(long, default_value = "")]
    pub(crate) payment_id: String,
    /// Filing date as YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub(crate) date: Option<String>,
    /// Initial status; defaults to Pending.
    #[arg(long)]
    pub(crate) status: Option<String>,
}

#[derive(Args, Default)]
pub(crate) struct GrievanceCreateArgs {
    #[arg(long, default_value = "")]
    pub(crate) citizen_id: String,
    #[arg(long, default_value = "")]
    pub(crate) department_id: String,
    #[arg(long, default_value = "")]
    pub(crate) description: String,
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Lodging date as YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub(crate) date: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    #[default]
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Dashboard(args) if args.reports => "dashboard_reports",
        Command::Dashboard(_) => "dashboard",
        Command::Citizens(CitizenCommand::List) => "citizens_list",
        Command::Citizens(CitizenCommand::Show(_)) => "citizens_show",
        Command::Citizens(CitizenCommand::Create(_)) => "citizens_create",
        Command::Citizens(CitizenCommand::Update(_)) => "citizens_update",
        Command::Citizens(CitizenCommand::Delete(_)) => "citizens_delete",
        Command::Citizens(CitizenCommand::Logs) => "citizens_logs",
        Command::Departments(DepartmentCommand::List) => "departments_list",
        Command::Departments(DepartmentCommand::Show(_)) => "departments_show",
        Command::Departments(DepartmentCommand::Create(_)) => "departments_create",
        Command::Services(ServiceCommand::List) => "services_list",
        Command::Services(ServiceCommand::Show(_)) => "services_show",
        Command::Services(ServiceCommand::Create(_)) => "services_create",
        Command::Requests(RequestCommand::List(_)) => "requests_list",
        Command::Requests(RequestCommand::Create(_)) => "requests_create",
        Command::Grievances(GrievanceCommand::List(_)) => "grievances_list",
        Command::Grievances(GrievanceCommand::Create(_)) => "grievances_create",
        Command::Health => "health",
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let cli = Cli::try_parse_from(["civic", "health"]).expect("parse");
        assert_eq!(cli.api_url.as_str(), "http://localhost:8000/api");
        assert_eq!(cli.timeout, None);
        assert_eq!(cli.output, OutputFormat::Table);
        assert_eq!(cli.log_format, LogFormatArg::Pretty);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "civic",
            "grievances",
            "list",
            "--status",
            "In Progress",
            "--output",
            "json",
            "--timeout",
            "5",
        ])
        .expect("parse");
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.timeout, Some(5));
        match cli.command {
            Command::Grievances(GrievanceCommand::List(args)) => {
                assert_eq!(args.status, "In Progress");
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn blank_department_is_accepted_as_text() {
        let cli = Cli::try_parse_from([
            "civic",
            "services",
            "create",
            "--name",
            "Water Connection",
            "--type",
            "Utility",
        ])
        .expect("parse");
        match cli.command {
            Command::Services(ServiceCommand::Create(args)) => {
                assert_eq!(args.department_id, "");
                assert_eq!(args.service_type, "Utility");
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn citizen_update_help_says_blank_keeps_value() {
        let mut command = Cli::command();
        let update = command
            .find_subcommand_mut("citizens")
            .and_then(|citizens| citizens.find_subcommand_mut("update"))
            .expect("citizens update");
        let phone = update
            .get_arguments()
            .find(|arg| arg.get_id() == "phone")
            .and_then(|arg| arg.get_help())
            .map(ToString::to_string)
            .expect("phone help");
        assert!(phone.contains("cannot be cleared"));
    }

    #[test]
    fn command_label_matches_variants() {
        assert_eq!(
            command_label(&Command::Dashboard(DashboardArgs { reports: true })),
            "dashboard_reports"
        );
        assert_eq!(
            command_label(&Command::Citizens(CitizenCommand::Delete(IdArgs { id: 1 }))),
            "citizens_delete"
        );
        assert_eq!(command_label(&Command::Health), "health");
    }
}
