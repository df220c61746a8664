//! Output renderers and formatting helpers for CLI commands.
//!
//! Renderers return the full text so handlers stay free of I/O; `cli.rs`
//! prints whatever comes back.

use anyhow::anyhow;
use civic_api_models::{
    AggregateRow, Citizen, CitizenLog, Department, Grievance, HealthStatus, Service,
    ServiceRequest,
};
use civic_dashboard::logic::{self, PieSlice, Series, StatCard, StatusTab};
use civic_dashboard::pages::{
    DashboardSnapshot, GrievanceRow, RecentRow, ReportsSnapshot, RequestRow, ServiceRow,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const BAR_WIDTH: usize = 30;
const NO_DATA: &str = "  (no data)";

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

fn render<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce() -> Vec<String>,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(value),
        OutputFormat::Table => Ok(table().join("\n")),
    }
}

#[derive(Serialize)]
struct DashboardView {
    cards: [StatCard; 4],
    charts: Vec<Series>,
    grievances_by_department: Vec<PieSlice>,
    recent_requests: Vec<RecentRow>,
}

pub(crate) fn render_dashboard(
    snapshot: &DashboardSnapshot,
    format: OutputFormat,
) -> CliResult<String> {
    let view = DashboardView {
        cards: snapshot.cards(),
        charts: snapshot.series(),
        grievances_by_department: snapshot.grievance_pie(),
        recent_requests: snapshot.recent_rows(),
    };
    render(&view, format, || {
        let mut lines = card_lines(&view.cards);
        for series in &view.charts {
            lines.push(String::new());
            lines.extend(series_lines(series));
        }
        lines.push(String::new());
        lines.extend(pie_lines(&view.grievances_by_department));
        lines.push(String::new());
        lines.extend(recent_lines(&view.recent_requests));
        lines
    })
}

pub(crate) fn render_reports(snapshot: &ReportsSnapshot, format: OutputFormat) -> CliResult<String> {
    render(snapshot, format, || {
        let mut lines = aggregate_lines("Monthly Trends", &snapshot.monthly_trends);
        lines.push(String::new());
        lines.extend(aggregate_lines(
            "Department Performance Report",
            &snapshot.department_performance,
        ));
        lines
    })
}

fn card_lines(cards: &[StatCard]) -> Vec<String> {
    cards
        .iter()
        .map(|card| format!("{:<18} {}", card.title, card.value))
        .collect()
}

fn series_lines(series: &Series) -> Vec<String> {
    let mut lines = vec![series.title.to_string()];
    if series.points.is_empty() {
        lines.push(NO_DATA.to_string());
        return lines;
    }
    let max = series.max_value();
    let width = label_width(series.points.iter().map(|point| point.label.as_str()));
    for point in &series.points {
        lines.push(format!(
            "  {:<width$} {:<bar_width$} {}",
            point.label,
            bar(point.value, max),
            format_value(point.value),
            bar_width = BAR_WIDTH,
        ));
    }
    lines
}

fn pie_lines(slices: &[PieSlice]) -> Vec<String> {
    let mut lines = vec!["Grievances by Department".to_string()];
    if slices.is_empty() {
        lines.push(NO_DATA.to_string());
        return lines;
    }
    let width = label_width(slices.iter().map(|slice| slice.label.as_str()));
    for slice in slices {
        lines.push(format!(
            "  {:<width$} {:>6.1}% {:>6} {}",
            slice.label, slice.share, slice.value, slice.color
        ));
    }
    lines
}

fn recent_lines(rows: &[RecentRow]) -> Vec<String> {
    let mut lines = vec!["Recent Requests".to_string()];
    if rows.is_empty() {
        lines.push("No recent requests.".to_string());
        return lines;
    }
    lines.push(format!(
        "{:<6} {:<20} {:<24} {:<20} {:<10} STATUS",
        "ID", "CITIZEN", "SERVICE", "DEPARTMENT", "DATE"
    ));
    for row in rows {
        lines.push(format!(
            "{:<6} {:<20} {:<24} {:<20} {:<10} {} ({})",
            row.request_id,
            row.citizen,
            row.service,
            row.department,
            row.date,
            row.status,
            row.badge.as_str()
        ));
    }
    lines
}

fn aggregate_lines(title: &str, rows: &[AggregateRow]) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    if rows.is_empty() {
        lines.push(NO_DATA.to_string());
        return lines;
    }
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .map(|(key, value)| format!("{key}={}", cell_text(value)))
            .collect();
        lines.push(format!("  {}", cells.join("  ")));
    }
    lines
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|label| label.chars().count()).max().unwrap_or(0)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(value: f64, max: f64) -> String {
    if value.is_nan() || value <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let scale = BAR_WIDTH as f64;
    let filled = (value / max * scale).round().clamp(1.0, scale) as usize;
    "#".repeat(filled)
}

fn format_value(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn optional(value: Option<&str>) -> &str {
    value.filter(|text| !text.trim().is_empty()).unwrap_or("-")
}

fn optional_id(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |id| id.to_string())
}

pub(crate) fn render_citizens(citizens: &[Citizen], format: OutputFormat) -> CliResult<String> {
    render(citizens, format, || {
        if citizens.is_empty() {
            return vec!["No citizens found.".to_string()];
        }
        let mut lines = vec![format!("{:<6} {:<24} {:<14} ADDRESS", "ID", "NAME", "PHONE")];
        for citizen in citizens {
            lines.push(format!(
                "{:<6} {:<24} {:<14} {}",
                citizen.id,
                citizen.name,
                optional(citizen.phone.as_deref()),
                optional(citizen.address.as_deref())
            ));
        }
        lines
    })
}

pub(crate) fn render_citizen(citizen: &Citizen, format: OutputFormat) -> CliResult<String> {
    render(citizen, format, || {
        vec![
            format!("id: {}", citizen.id),
            format!("name: {}", citizen.name),
            format!("phone: {}", optional(citizen.phone.as_deref())),
            format!("address: {}", optional(citizen.address.as_deref())),
        ]
    })
}

pub(crate) fn render_citizen_logs(logs: &[CitizenLog], format: OutputFormat) -> CliResult<String> {
    render(logs, format, || {
        if logs.is_empty() {
            return vec!["No citizen logs found.".to_string()];
        }
        let mut lines = vec![format!(
            "{:<6} {:<8} {:<24} {:>8} DATE",
            "LOG", "CITIZEN", "NAME", "SERVICES"
        )];
        for log in logs {
            lines.push(format!(
                "{:<6} {:<8} {:<24} {:>8} {}",
                log.id,
                log.citizen_id,
                log.citizen_name.as_deref().unwrap_or(logic::UNKNOWN),
                log.total_services,
                log.log_date.as_deref().unwrap_or(logic::NO_DATE)
            ));
        }
        lines
    })
}

pub(crate) fn render_departments(
    departments: &[Department],
    format: OutputFormat,
) -> CliResult<String> {
    render(departments, format, || {
        if departments.is_empty() {
            return vec!["No departments found.".to_string()];
        }
        let mut lines = vec![format!("{:<6} NAME", "ID")];
        lines.extend(
            departments
                .iter()
                .map(|department| format!("{:<6} {}", department.id, department.name)),
        );
        lines
    })
}

pub(crate) fn render_department(
    department: &Department,
    format: OutputFormat,
) -> CliResult<String> {
    render(department, format, || {
        vec![
            format!("id: {}", department.id),
            format!("name: {}", department.name),
        ]
    })
}

pub(crate) fn render_services(rows: &[ServiceRow], format: OutputFormat) -> CliResult<String> {
    render(rows, format, || {
        if rows.is_empty() {
            return vec!["No services found.".to_string()];
        }
        let mut lines = vec![format!(
            "{:<6} {:<28} {:<20} DEPARTMENT",
            "ID", "NAME", "TYPE"
        )];
        for row in rows {
            let kind = format!("{} ({})", row.service_type, row.tone.as_str());
            lines.push(format!(
                "{:<6} {:<28} {:<20} {}",
                row.id, row.name, kind, row.department
            ));
        }
        lines
    })
}

pub(crate) fn render_service(service: &Service, format: OutputFormat) -> CliResult<String> {
    render(service, format, || {
        vec![
            format!("id: {}", service.id),
            format!("name: {}", service.name),
            format!("type: {}", service.service_type.as_str()),
            format!("department: {}", optional_id(service.department_id)),
        ]
    })
}

#[derive(Serialize)]
struct FilteredList<'a, R> {
    filter: &'a str,
    tabs: &'a [StatusTab],
    rows: &'a [R],
}

fn tab_line(tabs: &[StatusTab], active: &str) -> String {
    tabs.iter()
        .map(|tab| {
            if tab.label == active {
                format!("[{} ({})]", tab.label, tab.count)
            } else {
                format!("{} ({})", tab.label, tab.count)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub(crate) fn render_requests(
    filter: &str,
    tabs: &[StatusTab],
    rows: &[RequestRow],
    format: OutputFormat,
) -> CliResult<String> {
    let list = FilteredList { filter, tabs, rows };
    render(&list, format, || {
        let mut lines = vec![tab_line(tabs, filter)];
        if rows.is_empty() {
            lines.push("No service requests found.".to_string());
            return lines;
        }
        lines.push(format!(
            "{:<6} {:<8} {:<8} {:<8} {:<10} STATUS",
            "ID", "CITIZEN", "SERVICE", "PAYMENT", "DATE"
        ));
        for row in rows {
            lines.push(format!(
                "{:<6} {:<8} {:<8} {:<8} {:<10} {} ({})",
                row.id,
                row.citizen_id,
                row.service_id,
                row.payment_id,
                row.date,
                row.status,
                row.badge.as_str()
            ));
        }
        lines
    })
}

pub(crate) fn render_request(request: &ServiceRequest, format: OutputFormat) -> CliResult<String> {
    render(request, format, || {
        vec![
            format!("id: {}", request.id),
            format!("citizen: {}", optional_id(request.citizen_id)),
            format!("service: {}", optional_id(request.service_id)),
            format!("payment: {}", optional_id(request.payment_id)),
            format!("date: {}", logic::display_day(request.request_date)),
            format!("status: {}", request.status.as_str()),
        ]
    })
}

pub(crate) fn render_grievances(
    filter: &str,
    tabs: &[StatusTab],
    rows: &[GrievanceRow],
    format: OutputFormat,
) -> CliResult<String> {
    let list = FilteredList { filter, tabs, rows };
    render(&list, format, || {
        let mut lines = vec![tab_line(tabs, filter)];
        if rows.is_empty() {
            lines.push("No grievances found.".to_string());
            return lines;
        }
        lines.push(format!(
            "{:<6} {:<20} {:<20} {:<18} {:<10} DESCRIPTION",
            "ID", "CITIZEN", "DEPARTMENT", "STATUS", "DATE"
        ));
        for row in rows {
            let status = format!("{} ({})", row.status, row.badge.as_str());
            lines.push(format!(
                "{:<6} {:<20} {:<20} {:<18} {:<10} {}",
                row.id, row.citizen, row.department, status, row.date, row.description
            ));
        }
        lines
    })
}

pub(crate) fn render_grievance(grievance: &Grievance, format: OutputFormat) -> CliResult<String> {
    render(grievance, format, || {
        vec![
            format!("id: {}", grievance.id),
            format!("citizen: {}", optional_id(grievance.citizen_id)),
            format!("department: {}", optional_id(grievance.department_id)),
            format!("status: {}", grievance.status.as_str()),
            format!("date: {}", logic::display_day(grievance.date)),
            format!(
                "description: {}",
                optional(grievance.description.as_deref())
            ),
        ]
    })
}

pub(crate) fn render_health(health: &HealthStatus, format: OutputFormat) -> CliResult<String> {
    render(health, format, || vec![format!("status: {}", health.status)])
}
