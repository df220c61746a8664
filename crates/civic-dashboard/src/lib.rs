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
#![allow(clippy::module_name_repetitions)]
//! Client-side core of the civic services dashboard.
//!
//! Layout:
//! - [`api`]: typed gateway over the REST backend.
//! - [`state`]: per-page view state.
//! - [`orchestrator`]: all-or-nothing page loads bound to a page scope.
//! - [`logic`]: pure derivations (status counts, filters, lookups, charts).
//! - [`forms`]: draft ownership and submission.
//! - [`pages`]: what each screen fetches and shows.

pub mod api;
pub mod forms;
pub mod logic;
pub mod orchestrator;
pub mod pages;
pub mod state;

pub use civic_api_models as models;
