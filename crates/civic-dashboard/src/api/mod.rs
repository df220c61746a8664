//! Gateway to the civic services REST backend.

mod client;
mod error;

pub use client::{
    ApiClient, DEFAULT_API_URL, DEFAULT_PAGE_LIMIT, DEFAULT_RECENT_LIMIT, HEADER_REQUEST_ID,
    Pagination,
};
pub use error::{ApiError, ApiResult};

#[cfg(test)]
pub(crate) use client::tests::client_for;
