use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Time-pressure classification for a task. Drives urgency display and
/// rebalance eligibility (only `Healthy` tasks may be relocated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaStatus {
    Healthy,
    Warning,
    Danger,
}

/// The three named lanes of the production board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LaneId {
    Todo,
    InProgress,
    Review,
}

impl LaneId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Review => "review",
        }
    }
}

impl std::fmt::Display for LaneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work on the board. Mutated only by relocation between lanes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub client: String,
    pub title: String,
    /// Work type label ("Design", "Web", "Motion", ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub due: DateTime<Utc>,
    pub sla_status: SlaStatus,
    /// Two-letter initials code weakly referencing a staff member by
    /// derived-initials match. Not a foreign key.
    pub assignee: String,
}

/// The production board: three ordered lanes. A task id appears in exactly
/// one lane at a time; new arrivals are inserted at the front of a lane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub review: Vec<Task>,
}

impl Board {
    pub fn lane(&self, id: LaneId) -> &Vec<Task> {
        match id {
            LaneId::Todo => &self.todo,
            LaneId::InProgress => &self.in_progress,
            LaneId::Review => &self.review,
        }
    }

    pub fn lane_mut(&mut self, id: LaneId) -> &mut Vec<Task> {
        match id {
            LaneId::Todo => &mut self.todo,
            LaneId::InProgress => &mut self.in_progress,
            LaneId::Review => &mut self.review,
        }
    }

    /// All task ids across the three lanes, in lane order. Used by the
    /// conservation checks in tests and by the SLA breakdown.
    pub fn task_ids(&self) -> Vec<u64> {
        self.todo
            .iter()
            .chain(self.in_progress.iter())
            .chain(self.review.iter())
            .map(|t| t.id)
            .collect()
    }

    pub fn total_tasks(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.review.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffStatus {
    Healthy,
    Risk,
    Burnout,
    Under,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionRole {
    Admin,
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub team: String,
    /// Percentage of available capacity consumed by assigned work.
    /// May exceed 100 (overloaded).
    pub utilization: f64,
    /// Deliverables per week.
    pub velocity: u32,
    /// First-pass acceptance percentage.
    pub fpa: f64,
    pub status: StaffStatus,
    pub timezone: String,
    pub email: String,
    pub permission_role: PermissionRole,
}

/// Per-team person-hour allocation. `team` matches `StaffMember::team` by
/// name only; there is no enforced referential integrity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCapacity {
    pub team: String,
    pub allocated: f64,
    pub available: f64,
    pub utilization: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Overdue,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: u64,
    pub client_name: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
    pub description: String,
}

/// One period of the fixed historical financial series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinancials {
    pub month: String,
    pub revenue: f64,
    pub costs: f64,
    pub margin: f64,
    pub mrr: f64,
    pub boosters: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Enterprise,
    Growth,
    Pro,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub plan: Plan,
    pub mrr: f64,
    /// Health score, 0–100.
    pub health: u32,
    pub nps: i32,
    pub renewal: NaiveDate,
    /// Plan usage percentage.
    pub usage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingClient {
    pub id: u64,
    pub name: String,
    pub stage: String,
    /// Launch progress, 0–100.
    pub progress: u8,
    pub eta: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Pending,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingCandidate {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub stage: String,
    pub status: CandidateStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingPipeline {
    pub clients: Vec<OnboardingClient>,
    pub staff: Vec<OnboardingCandidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSchedule {
    None,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReport {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Metric names, validated against the report metric catalog.
    pub metrics: Vec<String>,
    pub date_range: String,
    pub schedule: ReportSchedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Alert,
    Success,
    Info,
    Neutral,
}

/// Read-only notification feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: u64,
    pub kind: ActivityKind,
    pub message: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSettings {
    pub name: String,
    /// Subdomain slug; the presentation layer appends the platform suffix.
    pub url_slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Assistant,
}

/// Follow-up action a scripted assistant reply can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssistantAction {
    ShowDetails,
    OptimizeSpend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: u64,
    pub sender: ChatSender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<AssistantAction>,
}

/// Trend classification after applying the dead-zone threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

/// Month-to-date cash collection metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashMetrics {
    pub cash_collected: f64,
    /// Collected as a percentage of everything invoiced this month.
    pub collected_percentage: f64,
    /// Absolute trend magnitude vs the previous calendar month.
    pub cash_trend_value: f64,
    pub cash_trend_direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginMetrics {
    pub contribution_margin: f64,
    pub margin_trend_value: f64,
    pub margin_trend_direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FpaMetrics {
    pub average_fpa: f64,
    pub fpa_trend_value: f64,
    pub fpa_trend_direction: TrendDirection,
}

/// Per-month revenue split between retainer (MRR) and booster/overage work.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSlice {
    pub month: String,
    pub retainer: f64,
    pub boosters: f64,
}

/// Count of board tasks per SLA status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaBreakdown {
    pub healthy: usize,
    pub warning: usize,
    pub danger: usize,
    pub total: usize,
}

/// Rebalance coordinator lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatorStatus {
    #[default]
    Idle,
    Rebalancing,
}

impl CoordinatorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Rebalancing => "rebalancing",
        }
    }
}

/// Audit record for one rebalance attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceRun {
    pub id: String,
    pub started_at: DateTime<Utc>,
    /// Outcome tag: "success", "noCandidate", "resolutionFailed" or "error".
    pub outcome: String,
    pub message: String,
    /// JSON payload with the affected task/team on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Tunable constants for the state core. All fields default to the values
/// the original console shipped with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    /// Prior-period FPA average used as the trend baseline. No historical
    /// staff series exists, so this is configuration, not derived data.
    #[serde(default = "default_fpa_baseline")]
    pub fpa_baseline: f64,
    /// Person-hours returned to a team when one of its tasks is rebalanced.
    #[serde(default = "default_rebalance_hours_freed")]
    pub rebalance_hours_freed: f64,
    /// Utilization percentage points relieved from the affected staff member.
    #[serde(default = "default_rebalance_utilization_relief")]
    pub rebalance_utilization_relief: f64,
    /// Dead-zone threshold suppressing trend noise around zero.
    #[serde(default = "default_trend_dead_zone")]
    pub trend_dead_zone: f64,
    /// Maximum rebalance run records kept in memory.
    #[serde(default = "default_run_history_limit")]
    pub run_history_limit: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            fpa_baseline: default_fpa_baseline(),
            rebalance_hours_freed: default_rebalance_hours_freed(),
            rebalance_utilization_relief: default_rebalance_utilization_relief(),
            trend_dead_zone: default_trend_dead_zone(),
            run_history_limit: default_run_history_limit(),
        }
    }
}

fn default_fpa_baseline() -> f64 {
    88.0
}

fn default_rebalance_hours_freed() -> f64 {
    8.0
}

fn default_rebalance_utilization_relief() -> f64 {
    5.0
}

fn default_trend_dead_zone() -> f64 {
    0.1
}

fn default_run_history_limit() -> usize {
    100
}
