//! Id to display-name resolution against loaded collections.

use civic_api_models::{Citizen, CitizenId, Department, DepartmentId, Service, ServiceId};

/// Placeholder shown for ids with no loaded record.
pub const UNKNOWN: &str = "Unknown";

/// Name of the department with `id`, or [`UNKNOWN`].
#[must_use]
pub fn department_name(departments: &[Department], id: Option<DepartmentId>) -> &str {
    id.and_then(|id| departments.iter().find(|dept| dept.id == id))
        .map_or(UNKNOWN, |dept| dept.name.as_str())
}

/// Name of the citizen with `id`, or [`UNKNOWN`].
#[must_use]
pub fn citizen_name(citizens: &[Citizen], id: Option<CitizenId>) -> &str {
    id.and_then(|id| citizens.iter().find(|citizen| citizen.id == id))
        .map_or(UNKNOWN, |citizen| citizen.name.as_str())
}

/// Name of the service with `id`, or [`UNKNOWN`].
#[must_use]
pub fn service_name(services: &[Service], id: Option<ServiceId>) -> &str {
    id.and_then(|id| services.iter().find(|service| service.id == id))
        .map_or(UNKNOWN, |service| service.name.as_str())
}
