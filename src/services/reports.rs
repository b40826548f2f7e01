// Reports service — the custom report builder.
// Reports are built from a fixed metric catalog; nothing here renders or
// exports, it only owns the saved definitions.

use chrono::Utc;
use serde::Deserialize;

use crate::error::CoreError;
use crate::state::AppState;
use crate::types::{CustomReport, ReportSchedule};
use crate::util::validate_bounded_string;

/// Metric catalog, grouped by console section.
pub const METRIC_CATALOG: &[(&str, &[&str])] = &[
    (
        "Finance",
        &[
            "MRR",
            "Revenue Composition",
            "Client Profitability",
            "Contribution Margin",
            "Cash Collected",
        ],
    ),
    (
        "People",
        &[
            "Staff Utilization",
            "Team Capacity",
            "Velocity",
            "First-Pass Acceptance (FPA)",
        ],
    ),
    (
        "Work",
        &["On-time SLA", "Queue Turnaround Time", "Revision Rates"],
    ),
    (
        "Clients",
        &["Client Health Score", "Plan Usage", "NPS Score", "Renewal Pipeline"],
    ),
];

/// Selectable date ranges.
pub const DATE_RANGES: &[&str] = &[
    "Last 7 Days",
    "Last 30 Days",
    "This Quarter",
    "Last 6 Months",
];

fn catalog_contains(metric: &str) -> bool {
    METRIC_CATALOG
        .iter()
        .flat_map(|(_, metrics)| metrics.iter())
        .any(|m| *m == metric)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub name: String,
    pub metrics: Vec<String>,
    pub date_range: String,
    #[serde(default)]
    pub schedule: Option<ReportSchedule>,
}

/// Save a new custom report definition at the front of the list.
pub fn create_report(
    state: &AppState,
    request: CreateReportRequest,
) -> Result<CustomReport, CoreError> {
    let name = validate_bounded_string(&request.name, "name", 1, 120)?;
    if request.metrics.is_empty() {
        return Err(CoreError::validation(
            "metrics",
            "select at least one metric".to_string(),
        ));
    }
    for metric in &request.metrics {
        if !catalog_contains(metric) {
            return Err(CoreError::validation(
                "metrics",
                format!("unknown metric '{metric}'"),
            ));
        }
    }
    if !DATE_RANGES.contains(&request.date_range.as_str()) {
        return Err(CoreError::validation(
            "dateRange",
            format!("unknown date range '{}'", request.date_range),
        ));
    }

    let report = CustomReport {
        id: state.allocate_id(),
        name,
        created_at: Utc::now(),
        metrics: request.metrics,
        date_range: request.date_range,
        schedule: request.schedule.unwrap_or(ReportSchedule::None),
    };

    let mut reports = state.reports.lock().map_err(|_| CoreError::LockPoisoned)?;
    reports.insert(0, report.clone());
    log::info!("report '{}' saved with {} metrics", report.name, report.metrics.len());
    Ok(report)
}

/// Delete a saved report definition.
pub fn delete_report(state: &AppState, id: u64) -> Result<(), CoreError> {
    let mut reports = state.reports.lock().map_err(|_| CoreError::LockPoisoned)?;
    let before = reports.len();
    reports.retain(|r| r.id != id);
    if reports.len() == before {
        return Err(CoreError::ReportNotFound(id));
    }
    Ok(())
}
