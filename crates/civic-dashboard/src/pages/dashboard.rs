//! Analytics dashboard: headline counters, charts, and recent requests.

use async_trait::async_trait;
use civic_api_models::{
    AggregateRow, DashboardStats, DepartmentGrievances, DepartmentPerformance,
    DepartmentServiceCount, PaymentSummary, PendingRequest, RecentRequest, ServiceRevenue,
};
use serde::Serialize;

use crate::api::{ApiClient, ApiResult};
use crate::logic::{
    self, PieSlice, Series, StatCard, StatusSet, department_performance_series,
    department_service_series, grievance_slices, payment_summary_series, pending_request_series,
    service_revenue_series, stat_cards,
};
use crate::orchestrator::PageSnapshot;

/// Recent requests shown on the dashboard.
pub const RECENT_REQUESTS_SHOWN: u32 = 5;

/// Everything the dashboard renders, fetched together.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Headline counters.
    pub stats: DashboardStats,
    /// Latest requests, newest first.
    pub recent_requests: Vec<RecentRequest>,
    /// Services per department.
    pub department_services: Vec<DepartmentServiceCount>,
    /// Requests still pending.
    pub pending_requests: Vec<PendingRequest>,
    /// Payment totals per status.
    pub payment_summary: Vec<PaymentSummary>,
    /// Grievances per department.
    pub grievances_by_department: Vec<DepartmentGrievances>,
    /// Performance score per department.
    pub department_performance: Vec<DepartmentPerformance>,
    /// Revenue per service.
    pub service_revenue: Vec<ServiceRevenue>,
}

#[async_trait]
impl PageSnapshot for DashboardSnapshot {
    const PAGE: &'static str = "dashboard";
    const LOAD_FAILURE: &'static str = "Error loading dashboard data";

    async fn fetch(client: &ApiClient) -> ApiResult<Self> {
        let (
            stats,
            recent_requests,
            department_services,
            pending_requests,
            payment_summary,
            grievances_by_department,
            department_performance,
            service_revenue,
        ) = tokio::try_join!(
            client.dashboard_stats(),
            client.recent_requests(RECENT_REQUESTS_SHOWN),
            client.department_service_count(),
            client.pending_requests(),
            client.payment_summary(),
            client.grievances_by_department(),
            client.department_performance_function(),
            client.service_revenue_function(),
        )?;
        Ok(Self {
            stats,
            recent_requests,
            department_services,
            pending_requests,
            payment_summary,
            grievances_by_department,
            department_performance,
            service_revenue,
        })
    }
}

/// Row of the recent requests table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecentRow {
    /// Request id.
    pub request_id: i64,
    /// Citizen name or `Unknown`.
    pub citizen: String,
    /// Service name or `Unknown`.
    pub service: String,
    /// Department name or `Unknown`.
    pub department: String,
    /// Filing date or `N/A`.
    pub date: String,
    /// Status label.
    pub status: String,
    /// Status badge.
    pub badge: logic::Badge,
}

impl DashboardSnapshot {
    /// Headline cards.
    #[must_use]
    pub fn cards(&self) -> [StatCard; 4] {
        stat_cards(Some(&self.stats))
    }

    /// Bar and line series in display order.
    #[must_use]
    pub fn series(&self) -> Vec<Series> {
        vec![
            department_service_series(&self.department_services),
            department_performance_series(&self.department_performance),
            service_revenue_series(&self.service_revenue),
            payment_summary_series(&self.payment_summary),
            pending_request_series(&self.pending_requests),
        ]
    }

    /// Grievances-by-department pie.
    #[must_use]
    pub fn grievance_pie(&self) -> Vec<PieSlice> {
        grievance_slices(&self.grievances_by_department)
    }

    /// Recent requests with placeholders for missing names and dates.
    #[must_use]
    pub fn recent_rows(&self) -> Vec<RecentRow> {
        let name = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or(logic::UNKNOWN)
                .to_string()
        };
        self.recent_requests
            .iter()
            .map(|request| RecentRow {
                request_id: request.request_id,
                citizen: name(&request.citizen_name),
                service: name(&request.service_name),
                department: name(&request.department_name),
                date: logic::display_date(request.request_date.as_deref()),
                status: request.status.label().to_string(),
                badge: request.status.badge(),
            })
            .collect()
    }
}

/// Backend-shaped reports shown beneath the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReportsSnapshot {
    /// Monthly request and grievance trends.
    pub monthly_trends: Vec<AggregateRow>,
    /// Department performance view.
    pub department_performance: Vec<AggregateRow>,
}

#[async_trait]
impl PageSnapshot for ReportsSnapshot {
    const PAGE: &'static str = "reports";
    const LOAD_FAILURE: &'static str = "Error loading dashboard reports";

    async fn fetch(client: &ApiClient) -> ApiResult<Self> {
        let (monthly_trends, department_performance) =
            tokio::try_join!(client.monthly_trends(), client.department_performance())?;
        Ok(Self {
            monthly_trends,
            department_performance,
        })
    }
}
