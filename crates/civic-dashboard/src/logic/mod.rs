//! Pure derivations recomputed from view state on every render.

mod category;
mod charts;
mod lookup;
mod status;

pub use category::{Badge, Tone, service_type_tone};
pub use charts::{
    NO_DATE, PALETTE, PieSlice, Series, SeriesPoint, StatCard, department_performance_series,
    department_service_series, display_date, display_day, format_rupees, grievance_slices,
    group_thousands, palette_color, payment_summary_series, pending_request_series,
    service_revenue_series, stat_cards,
};
pub use lookup::{UNKNOWN, citizen_name, department_name, service_name};
pub use status::{
    ALL_LABEL, HasStatus, StatusCounts, StatusFilter, StatusSet, StatusTab, filter_by_status,
    status_counts,
};
