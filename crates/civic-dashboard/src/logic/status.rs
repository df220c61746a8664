//! Status filters and per-status counts.
//!
//! # Design
//! - Matching is exact on the decoded status; unknown values never match a
//!   known bucket.
//! - Counts are recomputed from the collection on every call; nothing is cached.

use civic_api_models::{Grievance, GrievanceStatus, RecentRequest, RequestStatus, ServiceRequest};
use serde::Serialize;

use super::category::Badge;

/// Label of the implicit bucket holding every record.
pub const ALL_LABEL: &str = "All";

/// Closed set of statuses a page filters on.
pub trait StatusSet: Clone + PartialEq {
    /// Known statuses in display order.
    fn known() -> Vec<Self>;
    /// Display label (the wire value).
    fn label(&self) -> &str;
    /// Parse a label; unknown labels are kept verbatim.
    fn from_label(label: &str) -> Self;
    /// Badge style for the status.
    fn badge(&self) -> Badge;
}

/// Record carrying a status of a [`StatusSet`].
pub trait HasStatus {
    /// Status enumeration of the record.
    type Status: StatusSet;
    /// Current status.
    fn status(&self) -> &Self::Status;
}

impl StatusSet for GrievanceStatus {
    fn known() -> Vec<Self> {
        vec![Self::Open, Self::InProgress, Self::Resolved]
    }

    fn label(&self) -> &str {
        self.as_str()
    }

    fn from_label(label: &str) -> Self {
        Self::from(label.to_string())
    }

    fn badge(&self) -> Badge {
        match self {
            Self::Open => Badge::Danger,
            Self::InProgress => Badge::Warning,
            Self::Resolved => Badge::Success,
            Self::Other(_) => Badge::Info,
        }
    }
}

impl StatusSet for RequestStatus {
    fn known() -> Vec<Self> {
        vec![
            Self::Completed,
            Self::Pending,
            Self::Processing,
            Self::Rejected,
        ]
    }

    fn label(&self) -> &str {
        self.as_str()
    }

    fn from_label(label: &str) -> Self {
        Self::from(label.to_string())
    }

    fn badge(&self) -> Badge {
        match self {
            Self::Completed => Badge::Success,
            Self::Pending => Badge::Warning,
            Self::Rejected => Badge::Danger,
            Self::Processing | Self::Other(_) => Badge::Info,
        }
    }
}

impl HasStatus for Grievance {
    type Status = GrievanceStatus;

    fn status(&self) -> &GrievanceStatus {
        &self.status
    }
}

impl HasStatus for ServiceRequest {
    type Status = RequestStatus;

    fn status(&self) -> &RequestStatus {
        &self.status
    }
}

impl HasStatus for RecentRequest {
    type Status = RequestStatus;

    fn status(&self) -> &RequestStatus {
        &self.status
    }
}

/// Active status filter of a list page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusFilter<S> {
    /// Every record.
    All,
    /// Records whose status equals the value.
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        Self::All
    }
}

impl<S: StatusSet> StatusFilter<S> {
    /// Parse a filter label; `All` selects everything.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label == ALL_LABEL {
            Self::All
        } else {
            Self::Only(S::from_label(label))
        }
    }

    /// Display label of the filter.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Only(status) => status.label(),
        }
    }

    /// Whether a status passes the filter.
    #[must_use]
    pub fn matches(&self, status: &S) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

/// Records passing `filter`, in their original order.
#[must_use]
pub fn filter_by_status<'a, T: HasStatus>(
    records: &'a [T],
    filter: &StatusFilter<T::Status>,
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| filter.matches(record.status()))
        .collect()
}

/// Count of records per known status plus the `All` total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusCounts<S> {
    total: usize,
    buckets: Vec<(S, usize)>,
}

/// One filter tab: label and record count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusTab {
    /// Filter label.
    pub label: String,
    /// Records the filter would show.
    pub count: usize,
}

impl<S: StatusSet> StatusCounts<S> {
    /// Number of records in the `All` bucket.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Records the given filter would show.
    #[must_use]
    pub fn count(&self, filter: &StatusFilter<S>) -> usize {
        match filter {
            StatusFilter::All => self.total,
            StatusFilter::Only(status) => self
                .buckets
                .iter()
                .find(|(bucket, _)| bucket == status)
                .map_or(0, |(_, count)| *count),
        }
    }

    /// Sum over the known buckets, excluding `All`.
    #[must_use]
    pub fn known_total(&self) -> usize {
        self.buckets.iter().map(|(_, count)| count).sum()
    }

    /// Records whose status is outside the known set.
    #[must_use]
    pub fn unrecognized(&self) -> usize {
        self.total.saturating_sub(self.known_total())
    }

    /// Filter tabs in display order, `All` first.
    #[must_use]
    pub fn tabs(&self) -> Vec<StatusTab> {
        std::iter::once(StatusTab {
            label: ALL_LABEL.to_string(),
            count: self.total,
        })
        .chain(self.buckets.iter().map(|(status, count)| StatusTab {
            label: status.label().to_string(),
            count: *count,
        }))
        .collect()
    }
}

/// Count records per known status.
#[must_use]
pub fn status_counts<T: HasStatus>(records: &[T]) -> StatusCounts<T::Status> {
    let buckets = T::Status::known()
        .into_iter()
        .map(|status| {
            let count = records
                .iter()
                .filter(|record| record.status() == &status)
                .count();
            (status, count)
        })
        .collect();
    StatusCounts {
        total: records.len(),
        buckets,
    }
}
