// Board service — owns the kanban task-movement semantics.
// A task id lives in exactly one lane; every mutation preserves that.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::CoreError;
use crate::state::AppState;
use crate::types::{LaneId, SlaStatus, Task};
use crate::util::validate_bounded_string;

/// Result of a task move. `Noop` is a reported success without mutation.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MoveTaskResult {
    Moved { task: Task, from: LaneId, to: LaneId },
    Noop { task_id: u64, lane: LaneId },
    NotFound { message: String },
    Error { message: String },
}

/// Move a task between lanes.
///
/// Same-lane moves are no-ops (no reordering). A missing task id fails with
/// `NotFound` and leaves every lane untouched. On success the task is
/// removed from the source lane (preserving the order of the rest) and
/// inserted at the front of the destination lane.
pub fn move_task(state: &AppState, task_id: u64, source: LaneId, dest: LaneId) -> MoveTaskResult {
    if source == dest {
        return MoveTaskResult::Noop {
            task_id,
            lane: source,
        };
    }

    let mut board = match state.board.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return MoveTaskResult::Error {
                message: CoreError::LockPoisoned.to_string(),
            }
        }
    };

    let source_lane = board.lane_mut(source);
    let index = match source_lane.iter().position(|t| t.id == task_id) {
        Some(index) => index,
        None => {
            log::warn!(
                "move rejected: task {} not in '{}' lane",
                task_id,
                source.as_str()
            );
            return MoveTaskResult::NotFound {
                message: CoreError::TaskNotFound {
                    id: task_id,
                    lane: source,
                }
                .to_string(),
            };
        }
    };

    let task = source_lane.remove(index);
    board.lane_mut(dest).insert(0, task.clone());
    log::info!(
        "task {} moved {} -> {}",
        task_id,
        source.as_str(),
        dest.as_str()
    );

    MoveTaskResult::Moved {
        task,
        from: source,
        to: dest,
    }
}

/// Request payload for the new-brief flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBriefRequest {
    pub client: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub due: DateTime<Utc>,
    #[serde(default)]
    pub sla_status: Option<SlaStatus>,
    pub assignee: String,
}

/// Create a new brief at the front of the `todo` lane.
pub fn create_brief(state: &AppState, request: CreateBriefRequest) -> Result<Task, CoreError> {
    let client = validate_bounded_string(&request.client, "client", 1, 120)?;
    let title = validate_bounded_string(&request.title, "title", 1, 280)?;
    let kind = validate_bounded_string(&request.kind, "type", 1, 40)?;
    let assignee = validate_bounded_string(&request.assignee, "assignee", 2, 8)?;

    let task = Task {
        id: state.allocate_id(),
        client,
        title,
        kind,
        due: request.due,
        sla_status: request.sla_status.unwrap_or(SlaStatus::Healthy),
        assignee,
    };

    let mut board = state.board.lock().map_err(|_| CoreError::LockPoisoned)?;
    board.todo.insert(0, task.clone());
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0)
            .single()
            .expect("UTC datetime is always unambiguous")
    }

    fn seeded_state() -> AppState {
        AppState::new(now())
    }

    fn id_multiset(state: &AppState) -> BTreeMap<u64, usize> {
        let mut counts = BTreeMap::new();
        for id in state.board_snapshot().task_ids() {
            *counts.entry(id).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn moved_task_lands_at_front_of_destination() {
        let state = seeded_state();
        let result = move_task(&state, 105, LaneId::InProgress, LaneId::Review);
        assert!(matches!(result, MoveTaskResult::Moved { .. }));

        let board = state.board_snapshot();
        assert_eq!(board.review[0].id, 105);
        assert!(board.in_progress.iter().all(|t| t.id != 105));
    }

    #[test]
    fn source_lane_order_is_preserved_after_removal() {
        let state = seeded_state();
        move_task(&state, 104, LaneId::InProgress, LaneId::Todo);
        let board = state.board_snapshot();
        let remaining: Vec<u64> = board.in_progress.iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![103, 105]);
    }

    #[test]
    fn task_id_multiset_is_conserved_across_any_sequence() {
        let state = seeded_state();
        let before = id_multiset(&state);

        move_task(&state, 101, LaneId::Todo, LaneId::InProgress);
        move_task(&state, 103, LaneId::InProgress, LaneId::Review);
        move_task(&state, 999, LaneId::Todo, LaneId::Review); // not found
        move_task(&state, 106, LaneId::Review, LaneId::Review); // no-op
        move_task(&state, 101, LaneId::InProgress, LaneId::Todo);

        assert_eq!(id_multiset(&state), before);
        assert_eq!(state.board_snapshot().total_tasks(), 6);
    }

    #[test]
    fn same_lane_move_is_a_reported_noop() {
        let state = seeded_state();
        let before = state.board_snapshot();
        let result = move_task(&state, 103, LaneId::InProgress, LaneId::InProgress);
        assert!(matches!(result, MoveTaskResult::Noop { task_id: 103, .. }));
        assert_eq!(state.board_snapshot(), before);
    }

    #[test]
    fn missing_task_fails_without_mutation() {
        let state = seeded_state();
        let before = state.board_snapshot();
        let result = move_task(&state, 101, LaneId::Review, LaneId::Todo);
        match result {
            MoveTaskResult::NotFound { message } => {
                assert!(message.contains("101"));
                assert!(message.contains("review"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(state.board_snapshot(), before);
    }

    #[test]
    fn notfound_serializes_with_status_tag() {
        let state = seeded_state();
        let result = move_task(&state, 999, LaneId::Todo, LaneId::Review);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "notfound");
    }

    #[test]
    fn create_brief_front_inserts_into_todo() {
        let state = seeded_state();
        let task = create_brief(
            &state,
            CreateBriefRequest {
                client: "Stark Industries".to_string(),
                title: "Launch teaser".to_string(),
                kind: "Motion".to_string(),
                due: now(),
                sla_status: None,
                assignee: "SC".to_string(),
            },
        )
        .unwrap();

        assert!(task.id >= crate::seed::FIRST_ALLOCATED_ID);
        assert_eq!(task.sla_status, SlaStatus::Healthy);
        let board = state.board_snapshot();
        assert_eq!(board.todo[0].id, task.id);
        assert_eq!(board.todo.len(), 3);
    }

    #[test]
    fn create_brief_rejects_blank_title() {
        let state = seeded_state();
        let err = create_brief(
            &state,
            CreateBriefRequest {
                client: "Acme Corp".to_string(),
                title: "   ".to_string(),
                kind: "Design".to_string(),
                due: now(),
                sla_status: None,
                assignee: "AJ".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "title", .. }));
    }
}
