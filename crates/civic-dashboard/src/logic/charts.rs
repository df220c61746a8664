//! Chart series and stat cards derived from dashboard aggregates.
//!
//! # Design
//! - Series are plain data; renderers pick their own drawing.
//! - Missing labels and values never fail a render: names fall back to
//!   `Unknown`, numbers to zero.

use chrono::NaiveDate;
use civic_api_models::{
    DashboardStats, DepartmentGrievances, DepartmentPerformance, DepartmentServiceCount,
    PaymentSummary, PendingRequest, ServiceRevenue,
};
use serde::Serialize;

use super::lookup::UNKNOWN;

/// Colours cycled across chart slices.
pub const PALETTE: [&str; 5] = ["#4f46e5", "#22c55e", "#f97316", "#ef4444", "#06b6d4"];

/// Placeholder for absent dates.
pub const NO_DATE: &str = "N/A";

/// Palette colour for the slice at `index`.
#[must_use]
pub const fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One labelled value in a bar or line series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Category or x-axis label.
    pub label: String,
    /// Plotted value.
    pub value: f64,
}

/// Titled series of points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    /// Chart heading.
    pub title: &'static str,
    /// Points in backend order.
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Largest value, or zero for an empty series.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .map(|point| point.value)
            .fold(0.0, f64::max)
    }
}

/// One slice of a pie chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSlice {
    /// Slice label.
    pub label: String,
    /// Raw value.
    pub value: u64,
    /// Percentage of the total, zero when the total is zero.
    pub share: f64,
    /// Fill colour from [`PALETTE`].
    pub color: &'static str,
}

/// Headline number on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatCard {
    /// Card title.
    pub title: &'static str,
    /// Rendered value.
    pub value: String,
}

fn series<T>(
    title: &'static str,
    rows: &[T],
    point: impl Fn(&T) -> (String, f64),
) -> Series {
    Series {
        title,
        points: rows
            .iter()
            .map(|row| {
                let (label, value) = point(row);
                SeriesPoint { label, value }
            })
            .collect(),
    }
}

fn label_or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_plot(value: u64) -> f64 {
    value as f64
}

#[allow(clippy::cast_precision_loss)]
fn id_plot(id: i64) -> f64 {
    id as f64
}

/// Services offered per department.
#[must_use]
pub fn department_service_series(rows: &[DepartmentServiceCount]) -> Series {
    series("Department-wise Services", rows, |row| {
        (
            label_or_unknown(&row.department_name),
            as_plot(row.total_services),
        )
    })
}

/// Performance score per department.
#[must_use]
pub fn department_performance_series(rows: &[DepartmentPerformance]) -> Series {
    series("Department Performance", rows, |row| {
        (label_or_unknown(&row.department_name), row.performance)
    })
}

/// Revenue collected per service.
#[must_use]
pub fn service_revenue_series(rows: &[ServiceRevenue]) -> Series {
    series("Service Revenue", rows, |row| {
        (label_or_unknown(&row.service_name), row.total_revenue)
    })
}

/// Payment totals per payment status.
#[must_use]
pub fn payment_summary_series(rows: &[PaymentSummary]) -> Series {
    series("Payment Summary", rows, |row| {
        (label_or_unknown(&row.status), row.total_amount)
    })
}

/// Pending requests plotted by citizen against request id.
#[must_use]
pub fn pending_request_series(rows: &[PendingRequest]) -> Series {
    series("Pending Requests Trend", rows, |row| {
        (
            label_or_unknown(row.citizen_name.as_deref().unwrap_or_default()),
            id_plot(row.request_id),
        )
    })
}

/// Grievance share per department.
#[must_use]
pub fn grievance_slices(rows: &[DepartmentGrievances]) -> Vec<PieSlice> {
    let total: u64 = rows.iter().map(|row| row.total_grievances).sum();
    rows.iter()
        .enumerate()
        .map(|(index, row)| PieSlice {
            label: label_or_unknown(&row.department_name),
            value: row.total_grievances,
            share: if total == 0 {
                0.0
            } else {
                as_plot(row.total_grievances) * 100.0 / as_plot(total)
            },
            color: palette_color(index),
        })
        .collect()
}

/// The four headline cards; absent stats render as zero.
#[must_use]
pub fn stat_cards(stats: Option<&DashboardStats>) -> [StatCard; 4] {
    let stats = stats.cloned().unwrap_or_default();
    [
        StatCard {
            title: "Total Citizens",
            value: group_thousands(stats.total_citizens),
        },
        StatCard {
            title: "Service Requests",
            value: group_thousands(stats.total_requests),
        },
        StatCard {
            title: "Total Grievances",
            value: group_thousands(stats.total_grievances),
        },
        StatCard {
            title: "Total Revenue",
            value: format_rupees(stats.total_revenue),
        },
    ]
}

/// Digits grouped in threes with commas.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Amount with the rupee sign, grouped digits, and up to two decimals.
#[must_use]
pub fn format_rupees(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }
    let cents = (amount.abs() * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{sign}₹{whole}"),
        frac if frac % 10 == 0 => format!("{sign}₹{whole}.{}", frac / 10),
        frac => format!("{sign}₹{whole}.{frac:02}"),
    }
}

/// Date text as returned by the backend, or [`NO_DATE`].
#[must_use]
pub fn display_date(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map_or_else(|| NO_DATE.to_string(), |text| text.chars().take(10).collect())
}

/// Calendar date as `YYYY-MM-DD`, or [`NO_DATE`].
#[must_use]
pub fn display_day(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| NO_DATE.to_string(), |day| day.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_by_index() {
        assert_eq!(palette_color(0), "#4f46e5");
        assert_eq!(palette_color(4), "#06b6d4");
        assert_eq!(palette_color(5), "#4f46e5");
        assert_eq!(palette_color(12), "#f97316");
    }

    #[test]
    fn grievance_slices_carry_shares_and_colours() {
        let rows = vec![
            DepartmentGrievances {
                department_name: "Revenue".to_string(),
                total_grievances: 3,
            },
            DepartmentGrievances {
                department_name: String::new(),
                total_grievances: 1,
            },
        ];
        let slices = grievance_slices(&rows);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].share - 75.0).abs() < f64::EPSILON);
        assert!((slices[1].share - 25.0).abs() < f64::EPSILON);
        assert_eq!(slices[1].label, UNKNOWN);
        assert_eq!(slices[1].color, "#22c55e");
    }

    #[test]
    fn grievance_slices_handle_zero_total() {
        let rows = vec![DepartmentGrievances {
            department_name: "Revenue".to_string(),
            total_grievances: 0,
        }];
        let slices = grievance_slices(&rows);
        assert!(slices[0].share.abs() < f64::EPSILON);
        assert!(grievance_slices(&[]).is_empty());
    }

    #[test]
    fn series_keep_backend_order() {
        let rows = vec![
            ServiceRevenue {
                service_name: "Water Connection".to_string(),
                total_revenue: 1500.5,
            },
            ServiceRevenue {
                service_name: "Birth Certificate".to_string(),
                total_revenue: 200.0,
            },
        ];
        let series = service_revenue_series(&rows);
        assert_eq!(series.points[0].label, "Water Connection");
        assert!((series.max_value() - 1500.5).abs() < f64::EPSILON);

        let pending = pending_request_series(&[PendingRequest {
            request_id: 42,
            citizen_name: None,
            service_name: None,
            request_date: None,
        }]);
        assert_eq!(pending.points[0].label, UNKNOWN);
        assert!((pending.points[0].value - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stat_cards_default_to_zero() {
        let cards = stat_cards(None);
        assert_eq!(cards[0].value, "0");
        assert_eq!(cards[3].value, "₹0");
    }

    #[test]
    fn stat_cards_group_revenue() {
        let stats = DashboardStats {
            total_citizens: 12_500,
            total_requests: 7,
            total_grievances: 0,
            total_revenue: 1_234_567.5,
        };
        let cards = stat_cards(Some(&stats));
        assert_eq!(cards[0].value, "12,500");
        assert_eq!(cards[1].value, "7");
        assert_eq!(cards[3].value, "₹1,234,567.5");
    }

    #[test]
    fn rupees_round_to_two_decimals() {
        assert_eq!(format_rupees(999.999), "₹1,000");
        assert_eq!(format_rupees(1000.25), "₹1,000.25");
        assert_eq!(format_rupees(-50.0), "-₹50");
        assert_eq!(format_rupees(f64::NAN), "₹0");
    }

    #[test]
    fn dates_fall_back_to_placeholder() {
        assert_eq!(display_date(Some("2024-03-05T10:00:00")), "2024-03-05");
        assert_eq!(display_date(Some("  ")), NO_DATE);
        assert_eq!(display_date(None), NO_DATE);
        assert_eq!(
            display_day(NaiveDate::from_ymd_opt(2024, 1, 9)),
            "2024-01-09"
        );
        assert_eq!(display_day(None), NO_DATE);
    }
}
