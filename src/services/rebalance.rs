// Rebalance coordinator — the scripted load-leveling action.
//
// Deliberately a narrow, deterministic policy: the first SLA-healthy task in
// production is relocated to the front of the queue, and the owning team's
// capacity pressure is relieved by fixed amounts. Tasks already under time
// pressure (warning/danger) are never candidates.

use chrono::Utc;

use crate::error::CoreError;
use crate::state::AppState;
use crate::types::{CoordinatorStatus, RebalanceRun, SlaStatus};
use crate::util::initials;

/// Outcome of one rebalance attempt. `NoCandidate` and `ResolutionFailed`
/// are expected, reportable results, not faults.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RebalanceOutcome {
    Success {
        message: String,
        task_id: u64,
        team: String,
    },
    NoCandidate {
        message: String,
    },
    ResolutionFailed {
        message: String,
    },
    Busy {
        message: String,
    },
    Error {
        message: String,
    },
}

impl RebalanceOutcome {
    pub fn status_tag(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::NoCandidate { .. } => "noCandidate",
            Self::ResolutionFailed { .. } => "resolutionFailed",
            Self::Busy { .. } => "busy",
            Self::Error { .. } => "error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Success { message, .. }
            | Self::NoCandidate { message }
            | Self::ResolutionFailed { message }
            | Self::Busy { message }
            | Self::Error { message } => message,
        }
    }
}

/// Run one rebalance pass.
///
/// Re-entrant triggers are rejected with `Busy` while a pass is in flight.
/// The mutation is atomic: every check runs before any collection is
/// touched, so a failed pass leaves the board, staff and capacity exactly
/// as they were.
pub fn auto_rebalance(state: &AppState) -> RebalanceOutcome {
    match state.coordinator.lock() {
        Ok(mut status) => {
            if *status == CoordinatorStatus::Rebalancing {
                return RebalanceOutcome::Busy {
                    message: "A rebalance is already in progress.".to_string(),
                };
            }
            *status = CoordinatorStatus::Rebalancing;
        }
        Err(_) => {
            return RebalanceOutcome::Error {
                message: CoreError::LockPoisoned.to_string(),
            }
        }
    }

    let outcome = run_pass(state);
    record_run(state, &outcome);

    if let Ok(mut status) = state.coordinator.lock() {
        *status = CoordinatorStatus::Idle;
    }

    outcome
}

fn run_pass(state: &AppState) -> RebalanceOutcome {
    let config = state.config_snapshot();

    let mut board = match state.board.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return RebalanceOutcome::Error {
                message: CoreError::LockPoisoned.to_string(),
            }
        }
    };
    let mut staff = match state.staff.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return RebalanceOutcome::Error {
                message: CoreError::LockPoisoned.to_string(),
            }
        }
    };
    let mut capacity = match state.capacity.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return RebalanceOutcome::Error {
                message: CoreError::LockPoisoned.to_string(),
            }
        }
    };

    let candidate_index = board
        .in_progress
        .iter()
        .position(|t| t.sla_status == SlaStatus::Healthy);
    let candidate_index = match candidate_index {
        Some(index) => index,
        None => {
            log::info!("rebalance found no SLA-healthy task in production");
            return RebalanceOutcome::NoCandidate {
                message: "AI analysis complete: No non-urgent tasks are available to rebalance \
                          at this time."
                    .to_string(),
            };
        }
    };

    // Resolve the assignee before touching anything. Names with fewer than
    // two components have no initials code and are skipped.
    let assignee = board.in_progress[candidate_index].assignee.clone();
    let member_index = staff
        .iter()
        .position(|s| initials(&s.name).as_deref() == Some(assignee.as_str()));
    let member_index = match member_index {
        Some(index) if !staff[index].team.is_empty() => index,
        _ => {
            log::error!("could not resolve assignee '{assignee}' to a staffed team");
            return RebalanceOutcome::ResolutionFailed {
                message: "An error occurred while rebalancing. Could not find the assigned \
                          staff member's team."
                    .to_string(),
            };
        }
    };
    let team = staff[member_index].team.clone();

    // All checks passed — apply the three-collection mutation.
    let task = board.in_progress.remove(candidate_index);
    let task_id = task.id;
    let title = task.title.clone();
    board.todo.insert(0, task);

    if let Some(row) = capacity.iter_mut().find(|c| c.team == team) {
        row.allocated = (row.allocated - config.rebalance_hours_freed).max(0.0);
    }
    let member = &mut staff[member_index];
    member.utilization = (member.utilization - config.rebalance_utilization_relief).max(0.0);

    let message = format!(
        "Success! Moved \"{title}\" to the 'Now / Next' queue to free up capacity in the \
         {team} team."
    );
    state.set_advisory(message.clone());
    log::info!("rebalanced task {task_id} off the {team} team");

    RebalanceOutcome::Success {
        message,
        task_id,
        team,
    }
}

fn record_run(state: &AppState, outcome: &RebalanceOutcome) {
    let context = match outcome {
        RebalanceOutcome::Success { task_id, team, .. } => Some(
            serde_json::json!({ "taskId": task_id, "team": team }).to_string(),
        ),
        _ => None,
    };
    let run = RebalanceRun {
        id: uuid::Uuid::new_v4().to_string(),
        started_at: Utc::now(),
        outcome: outcome.status_tag().to_string(),
        message: outcome.message().to_string(),
        context,
    };
    if let Err(err) = state.push_run(run) {
        log::warn!("failed to record rebalance run: {err}");
    }
}
