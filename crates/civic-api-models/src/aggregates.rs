//! Read-only aggregates computed by the backend.

use serde::{Deserialize, Serialize};

use crate::de;
use crate::{CitizenId, RequestId, RequestStatus};

/// Row of a report whose columns are backend-defined.
pub type AggregateRow = serde_json::Map<String, serde_json::Value>;

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// Number of registered citizens.
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub total_citizens: u64,
    /// Number of service requests filed.
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub total_requests: u64,
    /// Number of grievances filed.
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub total_grievances: u64,
    /// Sum of completed payments.
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub total_revenue: f64,
}

/// Joined row for the recent service requests table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentRequest {
    /// Request identifier.
    #[serde(rename = "Request_ID")]
    pub request_id: RequestId,
    /// Requesting citizen.
    #[serde(rename = "Citizen_Name", default)]
    pub citizen_name: Option<String>,
    /// Requested service.
    #[serde(rename = "Service_Name", default)]
    pub service_name: Option<String>,
    /// Department owning the service.
    #[serde(rename = "Department_Name", default)]
    pub department_name: Option<String>,
    /// Filing date or datetime, as sent.
    #[serde(rename = "Request_Date", default)]
    pub request_date: Option<String>,
    /// Current status.
    #[serde(rename = "Status")]
    pub status: RequestStatus,
}

/// Number of services per department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentServiceCount {
    /// Department display name.
    #[serde(rename = "Department_Name", default, deserialize_with = "de::null_as_default")]
    pub department_name: String,
    /// Services owned by the department.
    #[serde(rename = "Total_Services", default, deserialize_with = "de::null_as_default")]
    pub total_services: u64,
}

/// Request still awaiting processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingRequest {
    /// Request identifier.
    #[serde(rename = "Request_ID")]
    pub request_id: RequestId,
    /// Requesting citizen.
    #[serde(rename = "Citizen_Name", default)]
    pub citizen_name: Option<String>,
    /// Requested service.
    #[serde(rename = "Service_Name", default)]
    pub service_name: Option<String>,
    /// Filing date, as sent.
    #[serde(rename = "Request_Date", default)]
    pub request_date: Option<String>,
}

/// Payment totals grouped by payment status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSummary {
    /// Payment status label.
    #[serde(rename = "Status", default, deserialize_with = "de::null_as_default")]
    pub status: String,
    /// Sum of amounts with that status.
    #[serde(rename = "Total_Amount", default, deserialize_with = "de::lenient_f64")]
    pub total_amount: f64,
}

/// Number of grievances per department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentGrievances {
    /// Department display name.
    #[serde(rename = "Department_Name", default, deserialize_with = "de::null_as_default")]
    pub department_name: String,
    /// Grievances filed against the department.
    #[serde(rename = "Total_Grievances", default, deserialize_with = "de::null_as_default")]
    pub total_grievances: u64,
}

/// Performance score computed per department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentPerformance {
    /// Department display name.
    #[serde(rename = "Department_Name", default, deserialize_with = "de::null_as_default")]
    pub department_name: String,
    /// Score as computed by the backend.
    #[serde(rename = "Performance", default, deserialize_with = "de::lenient_f64")]
    pub performance: f64,
}

/// Revenue earned per service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRevenue {
    /// Service display name.
    #[serde(rename = "Service_Name", default, deserialize_with = "de::null_as_default")]
    pub service_name: String,
    /// Revenue collected for the service.
    #[serde(rename = "Total_Revenue", default, deserialize_with = "de::lenient_f64")]
    pub total_revenue: f64,
}

/// Trigger-maintained activity log entry for a citizen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CitizenLog {
    /// Log entry identifier.
    #[serde(rename = "Log_ID")]
    pub id: i64,
    /// Citizen the entry belongs to.
    #[serde(rename = "Citizen_ID")]
    pub citizen_id: CitizenId,
    /// Citizen display name.
    #[serde(rename = "Citizen_Name", default)]
    pub citizen_name: Option<String>,
    /// Services the citizen has requested so far.
    #[serde(rename = "Total_Services", default, deserialize_with = "de::null_as_default")]
    pub total_services: u64,
    /// Timestamp of the entry, as sent.
    #[serde(rename = "Log_Date", default)]
    pub log_date: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// `healthy` when the backend is up.
    pub status: String,
}
