// Dashboard service — assembles the full read model for the presentation
// layer. Metrics are recomputed from current collections on every call;
// the caller decides when to refresh (pull-based, no reactivity).

use chrono::{DateTime, Utc};

use crate::latency;
use crate::metrics;
use crate::state::AppState;
use crate::types::{
    ActivityEntry, Board, CashMetrics, Client, CoordinatorStatus, CustomReport, FpaMetrics,
    Invoice, MarginMetrics, OnboardingPipeline, RevenueSlice, SlaBreakdown, StaffMember,
    TeamCapacity, WorkspaceSettings,
};

/// p95 latency budget for snapshot assembly. The state is in-memory, so
/// anything slower than this means a pathological collection size.
const DASHBOARD_LATENCY_BUDGET_MS: u128 = 50;

/// Everything the console renders from, in one snapshot.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub cash: CashMetrics,
    pub margin: MarginMetrics,
    pub fpa: FpaMetrics,
    pub revenue_composition: Vec<RevenueSlice>,
    pub sla: SlaBreakdown,
    pub board: Board,
    pub staff: Vec<StaffMember>,
    pub capacity: Vec<TeamCapacity>,
    pub invoices: Vec<Invoice>,
    pub clients: Vec<Client>,
    pub onboarding: OnboardingPipeline,
    pub reports: Vec<CustomReport>,
    pub activity: Vec<ActivityEntry>,
    pub coordinator: CoordinatorStatus,
    pub advisory: String,
    pub workspace: WorkspaceSettings,
}

/// Result type for dashboard data loading
#[derive(Debug, serde::Serialize)]
#[allow(clippy::large_enum_variant)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardResult {
    Success { data: DashboardData },
    Error { message: String },
}

/// Build the dashboard snapshot as of `now`.
pub fn get_dashboard_data(state: &AppState, now: DateTime<Utc>) -> DashboardResult {
    let started = std::time::Instant::now();

    let config = state.config_snapshot();
    let board = state.board_snapshot();
    let staff = state.staff_snapshot();
    let invoices = state.invoices_snapshot();
    let financials = state.financials_snapshot();

    let cash = metrics::compute_cash_metrics(&invoices, now, config.trend_dead_zone);
    let margin = metrics::compute_margin_metrics(&financials, config.trend_dead_zone);
    let fpa = metrics::compute_fpa_metrics(&staff, config.fpa_baseline, config.trend_dead_zone);
    let revenue_composition = metrics::revenue_composition(&financials);
    let sla = metrics::sla_breakdown(&board);

    let data = DashboardData {
        cash,
        margin,
        fpa,
        revenue_composition,
        sla,
        board,
        staff,
        capacity: state.capacity_snapshot(),
        invoices,
        clients: state.clients_snapshot(),
        onboarding: state.onboarding_snapshot(),
        reports: state.reports_snapshot(),
        activity: state.activity_snapshot(),
        coordinator: state.coordinator_status(),
        advisory: state.advisory_message(),
        workspace: state.workspace_snapshot(),
    };

    latency::record(
        "get_dashboard_data",
        started.elapsed().as_millis(),
        DASHBOARD_LATENCY_BUDGET_MS,
    );

    DashboardResult::Success { data }
}
