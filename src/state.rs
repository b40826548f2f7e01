use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::seed::{self, SeedData, DEFAULT_ADVISORY, FIRST_ALLOCATED_ID};
use crate::types::{
    ActivityEntry, Board, ChatMessage, Client, CoordinatorStatus, CoreConfig, CustomReport,
    Invoice, MonthlyFinancials, OnboardingPipeline, RebalanceRun, StaffMember, TeamCapacity,
    WorkspaceSettings,
};

/// All process-resident console state. Collections are mutually referenced
/// only by value-matching (team name, assignee initials); nothing here
/// enforces referential integrity, matching the original console.
///
/// Operations are single-mutator and run to completion; the locks exist so
/// the state can be shared with a presentation shell, not for concurrent
/// writers.
pub struct AppState {
    pub config: RwLock<CoreConfig>,
    pub board: Mutex<Board>,
    pub staff: Mutex<Vec<StaffMember>>,
    pub capacity: Mutex<Vec<TeamCapacity>>,
    pub invoices: Mutex<Vec<Invoice>>,
    pub financials: Mutex<Vec<MonthlyFinancials>>,
    pub clients: Mutex<Vec<Client>>,
    pub onboarding: Mutex<OnboardingPipeline>,
    pub reports: Mutex<Vec<CustomReport>>,
    pub activity: Mutex<Vec<ActivityEntry>>,
    pub chat: Mutex<Vec<ChatMessage>>,
    pub workspace: Mutex<WorkspaceSettings>,
    pub coordinator: Mutex<CoordinatorStatus>,
    /// Current capacity-panel advisory message.
    pub advisory: Mutex<String>,
    /// Bounded, most-recent-first rebalance audit trail.
    pub run_history: Mutex<Vec<RebalanceRun>>,
    next_id: AtomicU64,
}

impl AppState {
    /// Fresh state seeded with the demo dataset positioned around `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_dataset(seed::demo_dataset(now))
    }

    pub fn with_dataset(data: SeedData) -> Self {
        Self {
            config: RwLock::new(CoreConfig::default()),
            board: Mutex::new(data.board),
            staff: Mutex::new(data.staff),
            capacity: Mutex::new(data.capacity),
            invoices: Mutex::new(data.invoices),
            financials: Mutex::new(data.financials),
            clients: Mutex::new(data.clients),
            onboarding: Mutex::new(data.onboarding),
            reports: Mutex::new(data.reports),
            activity: Mutex::new(data.activity),
            chat: Mutex::new(data.chat),
            workspace: Mutex::new(data.workspace),
            coordinator: Mutex::new(CoordinatorStatus::Idle),
            advisory: Mutex::new(data.advisory),
            run_history: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(FIRST_ALLOCATED_ID),
        }
    }

    /// Empty state for tests that build their own collections.
    pub fn empty() -> Self {
        Self::with_dataset(SeedData {
            board: Board::default(),
            staff: Vec::new(),
            capacity: Vec::new(),
            invoices: Vec::new(),
            financials: Vec::new(),
            clients: Vec::new(),
            onboarding: OnboardingPipeline::default(),
            reports: Vec::new(),
            activity: Vec::new(),
            chat: Vec::new(),
            workspace: WorkspaceSettings::default(),
            advisory: DEFAULT_ADVISORY.to_string(),
        })
    }

    /// Allocate the next record id. Seed records stay below the floor, so
    /// allocated ids never collide with them.
    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn config_snapshot(&self) -> CoreConfig {
        self.config
            .read()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    pub fn board_snapshot(&self) -> Board {
        self.board.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn staff_snapshot(&self) -> Vec<StaffMember> {
        self.staff.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn capacity_snapshot(&self) -> Vec<TeamCapacity> {
        self.capacity.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn invoices_snapshot(&self) -> Vec<Invoice> {
        self.invoices.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn financials_snapshot(&self) -> Vec<MonthlyFinancials> {
        self.financials.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn clients_snapshot(&self) -> Vec<Client> {
        self.clients.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn onboarding_snapshot(&self) -> OnboardingPipeline {
        self.onboarding.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn reports_snapshot(&self) -> Vec<CustomReport> {
        self.reports.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn activity_snapshot(&self) -> Vec<ActivityEntry> {
        self.activity.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn chat_snapshot(&self) -> Vec<ChatMessage> {
        self.chat.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn workspace_snapshot(&self) -> WorkspaceSettings {
        self.workspace.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn coordinator_status(&self) -> CoordinatorStatus {
        self.coordinator
            .lock()
            .map(|g| *g)
            .unwrap_or(CoordinatorStatus::Idle)
    }

    pub fn advisory_message(&self) -> String {
        self.advisory
            .lock()
            .map(|g| g.clone())
            .unwrap_or_else(|_| DEFAULT_ADVISORY.to_string())
    }

    pub fn set_advisory(&self, message: impl Into<String>) {
        if let Ok(mut guard) = self.advisory.lock() {
            *guard = message.into();
        }
    }

    /// Restore the default capacity warning. The caller decides when —
    /// the core carries no timers.
    pub fn reset_advisory(&self) {
        self.set_advisory(DEFAULT_ADVISORY);
    }

    /// Record a rebalance attempt, most recent first, trimmed to the
    /// configured history limit.
    pub fn push_run(&self, run: RebalanceRun) -> Result<(), CoreError> {
        let limit = self.config_snapshot().run_history_limit;
        let mut guard = self.run_history.lock().map_err(|_| CoreError::LockPoisoned)?;
        guard.insert(0, run);
        if guard.len() > limit {
            guard.truncate(limit);
        }
        Ok(())
    }

    pub fn run_history_snapshot(&self, limit: usize) -> Vec<RebalanceRun> {
        self.run_history
            .lock()
            .map(|g| g.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0)
            .single()
            .expect("UTC datetime is always unambiguous")
    }

    #[test]
    fn new_state_is_seeded() {
        let state = AppState::new(now());
        assert_eq!(state.board_snapshot().total_tasks(), 6);
        assert_eq!(state.staff_snapshot().len(), 5);
        assert_eq!(state.capacity_snapshot().len(), 5);
        assert_eq!(state.invoices_snapshot().len(), 7);
        assert_eq!(state.clients_snapshot().len(), 5);
        assert_eq!(state.coordinator_status(), CoordinatorStatus::Idle);
        assert_eq!(state.advisory_message(), DEFAULT_ADVISORY);
    }

    #[test]
    fn allocated_ids_are_monotonic_and_above_seed_range() {
        let state = AppState::new(now());
        let a = state.allocate_id();
        let b = state.allocate_id();
        assert!(a >= FIRST_ALLOCATED_ID);
        assert_eq!(b, a + 1);
    }

    #[test]
    fn run_history_trims_to_limit() {
        let state = AppState::empty();
        if let Ok(mut config) = state.config.write() {
            config.run_history_limit = 3;
        }
        for n in 0..5 {
            state
                .push_run(RebalanceRun {
                    id: format!("run-{n}"),
                    started_at: now(),
                    outcome: "noCandidate".to_string(),
                    message: "none".to_string(),
                    context: None,
                })
                .unwrap();
        }
        let history = state.run_history_snapshot(10);
        assert_eq!(history.len(), 3);
        // Most recent first.
        assert_eq!(history[0].id, "run-4");
        assert_eq!(history[2].id, "run-2");
    }

    #[test]
    fn advisory_reset_restores_default() {
        let state = AppState::empty();
        state.set_advisory("Success! Something moved.");
        assert_ne!(state.advisory_message(), DEFAULT_ADVISORY);
        state.reset_advisory();
        assert_eq!(state.advisory_message(), DEFAULT_ADVISORY);
    }
}
