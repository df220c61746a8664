#![forbid(unsafe_code)]
#![warn(
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the civic services API.
//!
//! Field names on the wire follow the backend's column naming
//! (`Citizen_ID`, `Department_Name`, ...). Rust-side names are snake_case and
//! mapped with serde renames. Extra fields sent by the backend are ignored.
//! Status and type columns decode into enumerations that keep any unknown
//! value verbatim instead of rejecting the whole payload.

mod aggregates;
mod de;
mod problem;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use aggregates::{
    AggregateRow, CitizenLog, DashboardStats, DepartmentGrievances, DepartmentPerformance,
    DepartmentServiceCount, HealthStatus, PaymentSummary, PendingRequest, RecentRequest,
    ServiceRevenue,
};
pub use de::parse_date_prefix;
pub use problem::{ErrorBody, ErrorDetail, ValidationIssue};

/// Identifier of a citizen record.
pub type CitizenId = i64;
/// Identifier of a department record.
pub type DepartmentId = i64;
/// Identifier of a service record.
pub type ServiceId = i64;
/// Identifier of a service request record.
pub type RequestId = i64;
/// Identifier of a payment record.
pub type PaymentId = i64;
/// Identifier of a grievance record.
pub type GrievanceId = i64;

/// Registered citizen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citizen {
    /// Primary key.
    #[serde(rename = "Citizen_ID")]
    pub id: CitizenId,
    /// Full name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Contact phone number.
    #[serde(rename = "Phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(rename = "Address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Payload for `POST /citizens`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCitizen {
    /// Full name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Contact phone number.
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(rename = "Address")]
    pub address: Option<String>,
}

/// Payload for `PUT /citizens/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CitizenUpdate {
    /// Replacement name.
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement phone number.
    #[serde(rename = "Phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Replacement address.
    #[serde(rename = "Address", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CitizenUpdate {
    /// Whether the update carries no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.address.is_none()
    }
}

/// Municipal department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    /// Primary key.
    #[serde(rename = "Department_ID")]
    pub id: DepartmentId,
    /// Display name.
    #[serde(rename = "Department_Name")]
    pub name: String,
}

/// Payload for `POST /departments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDepartment {
    /// Display name.
    #[serde(rename = "Department_Name")]
    pub name: String,
}

/// Category of a municipal service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    /// Certificates (birth, residence, ...).
    Certificate,
    /// Utility connections and bills.
    Utility,
    /// Grievance-handling services.
    Grievance,
    /// Any value outside the known set, kept verbatim.
    Other(String),
}

impl ServiceType {
    /// Wire label for the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Certificate => "Certificate",
            Self::Utility => "Utility",
            Self::Grievance => "Grievance",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ServiceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Certificate" => Self::Certificate,
            "Utility" => Self::Utility,
            "Grievance" => Self::Grievance,
            _ => Self::Other(value),
        }
    }
}

impl From<ServiceType> for String {
    fn from(value: ServiceType) -> Self {
        match value {
            ServiceType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Service offered by a department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    /// Primary key.
    #[serde(rename = "Service_ID")]
    pub id: ServiceId,
    /// Display name.
    #[serde(rename = "Service_Name")]
    pub name: String,
    /// Service category.
    #[serde(rename = "Service_Type")]
    pub service_type: ServiceType,
    /// Owning department.
    #[serde(rename = "Department_ID", default)]
    pub department_id: Option<DepartmentId>,
}

/// Payload for `POST /services`.
///
/// `department_id` is always serialised; an empty selection is sent as
/// `null` so the backend reports the missing department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewService {
    /// Display name.
    #[serde(rename = "Service_Name")]
    pub name: String,
    /// Service category as entered.
    #[serde(rename = "Service_Type")]
    pub service_type: String,
    /// Owning department.
    #[serde(rename = "Department_ID")]
    pub department_id: Option<DepartmentId>,
}

/// Lifecycle of a service request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    /// Submitted, not yet picked up.
    Pending,
    /// Being worked on.
    Processing,
    /// Delivered to the citizen.
    Completed,
    /// Declined by the department.
    Rejected,
    /// Any value outside the known set, kept verbatim.
    Other(String),
}

impl RequestStatus {
    /// Wire label for the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for RequestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => Self::Pending,
            "Processing" => Self::Processing,
            "Completed" => Self::Completed,
            "Rejected" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl From<RequestStatus> for String {
    fn from(value: RequestStatus) -> Self {
        match value {
            RequestStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Citizen request for a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceRequest {
    /// Primary key.
    #[serde(rename = "Request_ID")]
    pub id: RequestId,
    /// Requesting citizen.
    #[serde(rename = "Citizen_ID", default)]
    pub citizen_id: Option<CitizenId>,
    /// Requested service.
    #[serde(rename = "Service_ID", default)]
    pub service_id: Option<ServiceId>,
    /// Linked payment, when one was made.
    #[serde(rename = "Payment_ID", default)]
    pub payment_id: Option<PaymentId>,
    /// Day the request was filed.
    #[serde(
        rename = "Request_Date",
        default,
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_date: Option<NaiveDate>,
    /// Current status.
    #[serde(rename = "Status")]
    pub status: RequestStatus,
}

/// Payload for `POST /service-requests`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewServiceRequest {
    /// Requesting citizen.
    #[serde(rename = "Citizen_ID")]
    pub citizen_id: Option<CitizenId>,
    /// Requested service.
    #[serde(rename = "Service_ID")]
    pub service_id: Option<ServiceId>,
    /// Linked payment.
    #[serde(rename = "Payment_ID")]
    pub payment_id: Option<PaymentId>,
    /// Filing date as entered (`YYYY-MM-DD`).
    #[serde(rename = "Request_Date")]
    pub request_date: Option<String>,
    /// Initial status as entered.
    #[serde(rename = "Status")]
    pub status: String,
}

/// Lifecycle of a grievance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GrievanceStatus {
    /// Filed and awaiting action.
    Open,
    /// Under investigation.
    InProgress,
    /// Closed out.
    Resolved,
    /// Any value outside the known set, kept verbatim.
    Other(String),
}

impl GrievanceStatus {
    /// Wire label for the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for GrievanceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Open" => Self::Open,
            "In Progress" => Self::InProgress,
            "Resolved" => Self::Resolved,
            _ => Self::Other(value),
        }
    }
}

impl From<GrievanceStatus> for String {
    fn from(value: GrievanceStatus) -> Self {
        match value {
            GrievanceStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Complaint raised by a citizen against a department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grievance {
    /// Primary key.
    #[serde(rename = "Grievance_ID")]
    pub id: GrievanceId,
    /// Complaining citizen.
    #[serde(rename = "Citizen_ID", default)]
    pub citizen_id: Option<CitizenId>,
    /// Department the complaint is filed against.
    #[serde(rename = "Department_ID", default)]
    pub department_id: Option<DepartmentId>,
    /// Free-text description.
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    /// Current status.
    #[serde(rename = "Status")]
    pub status: GrievanceStatus,
    /// Filing date.
    #[serde(
        rename = "Date",
        default,
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
}

/// Payload for `POST /grievances`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewGrievance {
    /// Complaining citizen.
    #[serde(rename = "Citizen_ID")]
    pub citizen_id: Option<CitizenId>,
    /// Department the complaint is filed against.
    #[serde(rename = "Department_ID")]
    pub department_id: Option<DepartmentId>,
    /// Free-text description.
    #[serde(rename = "Description")]
    pub description: String,
    /// Initial status as entered.
    #[serde(rename = "Status")]
    pub status: String,
    /// Filing date as entered (`YYYY-MM-DD`).
    #[serde(rename = "Date")]
    pub date: String,
}
