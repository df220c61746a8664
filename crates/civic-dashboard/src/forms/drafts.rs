//! Drafts for every record the dashboard can create or edit.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use civic_api_models::{
    Citizen, CitizenId, CitizenUpdate, Department, Grievance, NewCitizen, NewDepartment,
    NewGrievance, NewService, NewServiceRequest, RequestStatus, Service, ServiceRequest,
};

use super::{Draft, optional_text, parse_optional_id};
use crate::api::{ApiClient, ApiResult};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn iso_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// New citizen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CitizenDraft {
    /// Full name.
    pub name: String,
    /// Phone; blank is sent as `null`.
    pub phone: String,
    /// Address; blank is sent as `null`.
    pub address: String,
}

impl CitizenDraft {
    fn payload(&self) -> NewCitizen {
        NewCitizen {
            name: self.name.trim().to_string(),
            phone: optional_text(&self.phone),
            address: optional_text(&self.address),
        }
    }
}

#[async_trait]
impl Draft for CitizenDraft {
    type Created = Citizen;
    const ENTITY: &'static str = "citizen";
    const FAILURE_FALLBACK: &'static str =
        "An unexpected error occurred while creating the citizen.";

    fn fresh() -> Self {
        Self::default()
    }

    async fn submit(&self, client: &ApiClient) -> ApiResult<Citizen> {
        client.create_citizen(&self.payload()).await
    }
}

/// Edit of an existing citizen. Blank fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CitizenEditDraft {
    /// Citizen being edited.
    pub id: CitizenId,
    /// Replacement name.
    pub name: String,
    /// Replacement phone.
    pub phone: String,
    /// Replacement address.
    pub address: String,
}

impl CitizenEditDraft {
    /// Draft pre-filled from a loaded citizen.
    #[must_use]
    pub fn from_citizen(citizen: &Citizen) -> Self {
        Self {
            id: citizen.id,
            name: citizen.name.clone(),
            phone: citizen.phone.clone().unwrap_or_default(),
            address: citizen.address.clone().unwrap_or_default(),
        }
    }

    fn payload(&self) -> CitizenUpdate {
        CitizenUpdate {
            name: optional_text(&self.name),
            phone: optional_text(&self.phone),
            address: optional_text(&self.address),
        }
    }
}

#[async_trait]
impl Draft for CitizenEditDraft {
    type Created = Citizen;
    const ENTITY: &'static str = "citizen";
    const FAILURE_FALLBACK: &'static str =
        "An unexpected error occurred while updating the citizen.";

    fn fresh() -> Self {
        Self::default()
    }

    async fn submit(&self, client: &ApiClient) -> ApiResult<Citizen> {
        client.update_citizen(self.id, &self.payload()).await
    }
}

/// New department.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepartmentDraft {
    /// Department name.
    pub name: String,
}

#[async_trait]
impl Draft for DepartmentDraft {
    type Created = Department;
    const ENTITY: &'static str = "department";
    const FAILURE_FALLBACK: &'static str =
        "An unexpected error occurred while creating the department.";

    fn fresh() -> Self {
        Self::default()
    }

    async fn submit(&self, client: &ApiClient) -> ApiResult<Department> {
        let payload = NewDepartment {
            name: self.name.trim().to_string(),
        };
        client.create_department(&payload).await
    }
}

/// New service. The department id is typed as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    /// Service name.
    pub name: String,
    /// Category as typed.
    pub service_type: String,
    /// Owning department id as typed.
    pub department_id: String,
}

impl ServiceDraft {
    fn payload(&self) -> NewService {
        NewService {
            name: self.name.clone(),
            service_type: self.service_type.clone(),
            department_id: parse_optional_id(&self.department_id),
        }
    }
}

#[async_trait]
impl Draft for ServiceDraft {
    type Created = Service;
    const ENTITY: &'static str = "service";
    const FAILURE_FALLBACK: &'static str =
        "An unexpected error occurred while creating the service.";

    fn fresh() -> Self {
        Self::default()
    }

    async fn submit(&self, client: &ApiClient) -> ApiResult<Service> {
        client.create_service(&self.payload()).await
    }
}

/// New service request; opens as `Pending` dated today.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceRequestDraft {
    /// Requesting citizen id as typed.
    pub citizen_id: String,
    /// Requested service id as typed.
    pub service_id: String,
    /// Payment id as typed.
    pub payment_id: String,
    /// Filing date, `YYYY-MM-DD`.
    pub request_date: String,
    /// Initial status.
    pub status: String,
}

impl ServiceRequestDraft {
    /// Fresh draft dated `day`.
    #[must_use]
    pub fn dated(day: NaiveDate) -> Self {
        Self {
            citizen_id: String::new(),
            service_id: String::new(),
            payment_id: String::new(),
            request_date: iso_day(day),
            status: RequestStatus::Pending.as_str().to_string(),
        }
    }

    fn payload(&self) -> NewServiceRequest {
        NewServiceRequest {
            citizen_id: parse_optional_id(&self.citizen_id),
            service_id: parse_optional_id(&self.service_id),
            payment_id: parse_optional_id(&self.payment_id),
            request_date: optional_text(&self.request_date),
            status: self.status.clone(),
        }
    }
}

#[async_trait]
impl Draft for ServiceRequestDraft {
    type Created = ServiceRequest;
    const ENTITY: &'static str = "service request";
    const FAILURE_FALLBACK: &'static str =
        "An unexpected error occurred while creating the service request.";

    fn fresh() -> Self {
        Self::dated(today())
    }

    async fn submit(&self, client: &ApiClient) -> ApiResult<ServiceRequest> {
        client.create_service_request(&self.payload()).await
    }
}

/// New grievance; opens dated today with no status chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrievanceDraft {
    /// Complaining citizen id as typed.
    pub citizen_id: String,
    /// Department id as typed.
    pub department_id: String,
    /// Complaint text.
    pub description: String,
    /// Initial status; empty until chosen.
    pub status: String,
    /// Filing date, `YYYY-MM-DD`.
    pub date: String,
}

impl GrievanceDraft {
    /// Fresh draft dated `day`.
    #[must_use]
    pub fn dated(day: NaiveDate) -> Self {
        Self {
            citizen_id: String::new(),
            department_id: String::new(),
            description: String::new(),
            status: String::new(),
            date: iso_day(day),
        }
    }

    fn payload(&self) -> NewGrievance {
        NewGrievance {
            citizen_id: parse_optional_id(&self.citizen_id),
            department_id: parse_optional_id(&self.department_id),
            description: self.description.clone(),
            status: self.status.clone(),
            date: self.date.clone(),
        }
    }
}

#[async_trait]
impl Draft for GrievanceDraft {
    type Created = Grievance;
    const ENTITY: &'static str = "grievance";
    const FAILURE_FALLBACK: &'static str =
        "An unexpected error occurred while creating the grievance.";

    fn fresh() -> Self {
        Self::dated(today())
    }

    async fn submit(&self, client: &ApiClient) -> ApiResult<Grievance> {
        client.create_grievance(&self.payload()).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::api::client_for;
    use crate::forms::{FormController, SubmitOutcome};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).expect("valid date")
    }

    #[test]
    fn dated_drafts_default_to_the_given_day() {
        let grievance = GrievanceDraft::dated(day());
        assert_eq!(grievance.date, "2024-07-15");
        assert_eq!(grievance.status, "");

        let request = ServiceRequestDraft::dated(day());
        assert_eq!(request.request_date, "2024-07-15");
        assert_eq!(request.status, "Pending");
    }

    #[test]
    fn fresh_drafts_are_dated_today() {
        let today = iso_day(today());
        assert_eq!(GrievanceDraft::fresh().date, today);
        assert_eq!(ServiceRequestDraft::fresh().request_date, today);
    }

    #[test]
    fn grievance_payload_nulls_blank_ids() {
        let mut draft = GrievanceDraft::dated(day());
        draft.citizen_id = "12".to_string();
        draft.description = "Streetlight broken".to_string();
        draft.status = "Open".to_string();
        let body = serde_json::to_value(draft.payload()).expect("serialise");
        assert_eq!(
            body,
            json!({
                "Citizen_ID": 12,
                "Department_ID": null,
                "Description": "Streetlight broken",
                "Status": "Open",
                "Date": "2024-07-15"
            })
        );
    }

    #[test]
    fn citizen_edit_prefills_and_skips_blank_fields() {
        let citizen = Citizen {
            id: 3,
            name: "Kiran".to_string(),
            phone: None,
            address: Some("4 Hill Rd".to_string()),
        };
        let mut draft = CitizenEditDraft::from_citizen(&citizen);
        assert_eq!(draft.address, "4 Hill Rd");
        draft.name.clear();
        let update = draft.payload();
        assert_eq!(update.name, None);
        assert_eq!(update.phone, None);
        assert_eq!(update.address.as_deref(), Some("4 Hill Rd"));
    }

    #[tokio::test]
    async fn service_request_submit_posts_coerced_ids() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/service-requests").json_body(json!({
                "Citizen_ID": 4,
                "Service_ID": 2,
                "Payment_ID": null,
                "Request_Date": "2024-07-15",
                "Status": "Pending"
            }));
            then.status(200).json_body(json!({
                "Request_ID": 31, "Citizen_ID": 4, "Service_ID": 2,
                "Payment_ID": null, "Request_Date": "2024-07-15", "Status": "Pending"
            }));
        });

        let mut form = FormController::<ServiceRequestDraft>::new();
        form.open_with(ServiceRequestDraft::dated(day()));
        form.edit(|draft| {
            draft.citizen_id = "4".to_string();
            draft.service_id = "2".to_string();
        });
        let outcome = form.submit(&client_for(&server)).await;

        mock.assert();
        let SubmitOutcome::Created(request) = outcome else {
            panic!("expected creation");
        };
        assert_eq!(request.id, 31);
        assert_eq!(request.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn citizen_create_omits_blank_contact_fields() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/citizens").json_body(json!({
                "Name": "Devi",
                "Phone": null,
                "Address": "9 Lake View"
            }));
            then.status(200)
                .json_body(json!({"Citizen_ID": 10, "Name": "Devi", "Address": "9 Lake View"}));
        });

        let mut form = FormController::<CitizenDraft>::new();
        form.open();
        form.edit(|draft| {
            draft.name = "Devi".to_string();
            draft.address = "9 Lake View".to_string();
        });
        let outcome = form.submit(&client_for(&server)).await;
        mock.assert();
        assert!(matches!(outcome, SubmitOutcome::Created(ref citizen) if citizen.id == 10));
    }
}
