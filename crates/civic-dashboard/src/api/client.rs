//! REST gateway: one method per backend endpoint.

use std::time::Duration;

use civic_api_models::{
    AggregateRow, Citizen, CitizenId, CitizenLog, CitizenUpdate, DashboardStats, Department,
    DepartmentGrievances, DepartmentId, DepartmentPerformance, DepartmentServiceCount, Grievance,
    HealthStatus, NewCitizen, NewDepartment, NewGrievance, NewService, NewServiceRequest,
    PaymentSummary, PendingRequest, RecentRequest, Service, ServiceId, ServiceRequest,
    ServiceRevenue,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::{ApiError, ApiResult, classify_failure};

/// Header carrying the per-process request identifier.
pub const HEADER_REQUEST_ID: &str = "x-request-id";
/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
/// Page size used by list endpoints unless told otherwise.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;
/// Rows requested by `recent_requests` when no limit is given.
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// `skip`/`limit` window for paginated list endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// Rows to skip.
    pub skip: u32,
    /// Maximum rows to return.
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Pagination {
    fn query(self) -> [(&'static str, String); 2] {
        [
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Typed client for the civic services REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Wrap an HTTP client; the base URL is normalised to end with `/`.
    #[must_use]
    pub fn new(http: Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    /// Build the HTTP client used by [`ApiClient::new`].
    ///
    /// No timeout is applied unless one is passed.
    ///
    /// # Errors
    /// Fails with [`ApiError::ClientSetup`] when the request id is not a valid
    /// header value or the TLS backend fails to initialise.
    pub fn http_client(request_id: &str, timeout: Option<Duration>) -> ApiResult<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let request_id =
            HeaderValue::from_str(request_id).map_err(|_| ApiError::ClientSetup {
                message: "request identifier contains invalid characters".to_string(),
            })?;
        headers.insert(HEADER_REQUEST_ID, request_id);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|err| ApiError::ClientSetup {
            message: err.to_string(),
        })
    }

    /// Client for `base_url` tagged with a fresh request id.
    ///
    /// # Errors
    /// Fails when `base_url` does not parse or the HTTP client cannot be built.
    pub fn connect(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let url = Url::parse(base_url).map_err(|source| ApiError::InvalidEndpoint {
            path: base_url.to_string(),
            source,
        })?;
        let request_id = Uuid::new_v4().to_string();
        let http = Self::http_client(&request_id, timeout)?;
        tracing::debug!(base_url = %url, request_id = %request_id, "api client configured");
        Ok(Self::new(http, url))
    }

    /// Normalised API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headline counters.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get_json("dashboard/stats", &[]).await
    }

    /// Most recent service requests, joined with names.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn recent_requests(&self, limit: u32) -> ApiResult<Vec<RecentRequest>> {
        self.get_json(
            "dashboard/recent-requests",
            &[("limit", limit.to_string())],
        )
        .await
    }

    /// Department performance report (backend-defined columns).
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn department_performance(&self) -> ApiResult<Vec<AggregateRow>> {
        self.get_json("dashboard/department-performance", &[]).await
    }

    /// Monthly trend report (backend-defined columns).
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn monthly_trends(&self) -> ApiResult<Vec<AggregateRow>> {
        self.get_json("dashboard/monthly-trends", &[]).await
    }

    /// Per-department performance scores.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn department_performance_function(&self) -> ApiResult<Vec<DepartmentPerformance>> {
        self.get_json("dashboard/department-performance-function", &[])
            .await
    }

    /// Per-service revenue.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn service_revenue_function(&self) -> ApiResult<Vec<ServiceRevenue>> {
        self.get_json("dashboard/service-revenue-function", &[])
            .await
    }

    /// Page of citizens.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn list_citizens(&self, page: Pagination) -> ApiResult<Vec<Citizen>> {
        self.get_json("citizens", &page.query()).await
    }

    /// Single citizen.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn get_citizen(&self, id: CitizenId) -> ApiResult<Citizen> {
        self.get_json(&format!("citizens/{id}"), &[]).await
    }

    /// Register a citizen.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] when the backend rejects the record.
    pub async fn create_citizen(&self, payload: &NewCitizen) -> ApiResult<Citizen> {
        self.send_json(Method::POST, "citizens", payload).await
    }

    /// Update a citizen in place.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] when the backend rejects the update.
    pub async fn update_citizen(
        &self,
        id: CitizenId,
        payload: &CitizenUpdate,
    ) -> ApiResult<Citizen> {
        self.send_json(Method::PUT, &format!("citizens/{id}"), payload)
            .await
    }

    /// Remove a citizen.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] when the backend refuses the delete.
    pub async fn delete_citizen(&self, id: CitizenId) -> ApiResult<()> {
        let path = format!("citizens/{id}");
        let url = self.endpoint(&path)?;
        self.execute(&path, self.http.delete(url)).await?;
        Ok(())
    }

    /// Trigger-maintained citizen activity log.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn citizen_logs(&self) -> ApiResult<Vec<CitizenLog>> {
        self.get_json("citizen-logs", &[]).await
    }

    /// All departments.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn list_departments(&self) -> ApiResult<Vec<Department>> {
        self.get_json("departments", &[]).await
    }

    /// Single department.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn get_department(&self, id: DepartmentId) -> ApiResult<Department> {
        self.get_json(&format!("departments/{id}"), &[]).await
    }

    /// Create a department.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] when the backend rejects the record.
    pub async fn create_department(&self, payload: &NewDepartment) -> ApiResult<Department> {
        self.send_json(Method::POST, "departments", payload).await
    }

    /// All services.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn list_services(&self) -> ApiResult<Vec<Service>> {
        self.get_json("services", &[]).await
    }

    /// Single service.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn get_service(&self, id: ServiceId) -> ApiResult<Service> {
        self.get_json(&format!("services/{id}"), &[]).await
    }

    /// Create a service.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] when the backend rejects the record.
    pub async fn create_service(&self, payload: &NewService) -> ApiResult<Service> {
        self.send_json(Method::POST, "services", payload).await
    }

    /// Page of service requests.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn list_service_requests(&self, page: Pagination) -> ApiResult<Vec<ServiceRequest>> {
        self.get_json("service-requests", &page.query()).await
    }

    /// File a service request.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] when the backend rejects the record.
    pub async fn create_service_request(
        &self,
        payload: &NewServiceRequest,
    ) -> ApiResult<ServiceRequest> {
        self.send_json(Method::POST, "service-requests", payload)
            .await
    }

    /// Page of grievances.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn list_grievances(&self, page: Pagination) -> ApiResult<Vec<Grievance>> {
        self.get_json("grievances", &page.query()).await
    }

    /// File a grievance.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] when the backend rejects the record.
    pub async fn create_grievance(&self, payload: &NewGrievance) -> ApiResult<Grievance> {
        self.send_json(Method::POST, "grievances", payload).await
    }

    /// Services per department.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn department_service_count(&self) -> ApiResult<Vec<DepartmentServiceCount>> {
        self.get_json("procedures/department-service-count", &[])
            .await
    }

    /// Requests still pending.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn pending_requests(&self) -> ApiResult<Vec<PendingRequest>> {
        self.get_json("procedures/pending-requests", &[]).await
    }

    /// Payment totals by payment status.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn payment_summary(&self) -> ApiResult<Vec<PaymentSummary>> {
        self.get_json("procedures/payment-summary", &[]).await
    }

    /// Grievances per department.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] on transport or backend errors.
    pub async fn grievances_by_department(&self) -> ApiResult<Vec<DepartmentGrievances>> {
        self.get_json("procedures/grievances-by-department", &[])
            .await
    }

    /// Backend liveness probe at the server root.
    ///
    /// # Errors
    /// Fails with [`ApiError::RequestFailed`] when the backend is unreachable.
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.get_json("/health", &[]).await
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|source| ApiError::InvalidEndpoint {
                path: path.to_string(),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        let response = self.execute(path, self.http.get(url)).await?;
        read_json(path, response).await
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        let response = self
            .execute(path, self.http.request(method, url).json(body))
            .await?;
        read_json(path, response).await
    }

    async fn execute(&self, path: &str, request: RequestBuilder) -> ApiResult<Response> {
        tracing::debug!(endpoint = path, "api request");
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::transport(path, &err))?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let err = classify_failure(path, response).await;
            tracing::debug!(endpoint = path, status = ?err.status(), "api request rejected");
            Err(err)
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> ApiResult<T> {
    let status = response.status();
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::decode(path, status, &err))
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
