// People service — staff intake and workspace access control.

use serde::Deserialize;

use crate::error::CoreError;
use crate::state::AppState;
use crate::types::{CandidateStatus, OnboardingCandidate, PermissionRole};
use crate::util::{validate_bounded_string, validate_email};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteStaffRequest {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Invite a new staff member. The invitee enters the onboarding intake —
/// they become a `StaffMember` only once intake completes (out of scope).
pub fn invite_staff(
    state: &AppState,
    request: InviteStaffRequest,
) -> Result<OnboardingCandidate, CoreError> {
    let name = validate_bounded_string(&request.name, "name", 1, 120)?;
    let email = validate_email(&request.email, "email")?;
    let role = validate_bounded_string(&request.role, "role", 1, 60)?;

    let candidate = OnboardingCandidate {
        id: state.allocate_id(),
        name,
        role,
        stage: "Invite Sent".to_string(),
        status: CandidateStatus::Waiting,
    };

    let mut onboarding = state.onboarding.lock().map_err(|_| CoreError::LockPoisoned)?;
    onboarding.staff.push(candidate.clone());
    log::info!("invite sent to {email} for '{}'", candidate.name);
    Ok(candidate)
}

/// Change a staff member's workspace permission role.
pub fn update_permission_role(
    state: &AppState,
    staff_id: u64,
    role: PermissionRole,
) -> Result<(), CoreError> {
    let mut staff = state.staff.lock().map_err(|_| CoreError::LockPoisoned)?;
    let member = staff
        .iter_mut()
        .find(|s| s.id == staff_id)
        .ok_or(CoreError::StaffNotFound(staff_id))?;
    member.permission_role = role;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn seeded_state() -> AppState {
        AppState::new(
            Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0)
                .single()
                .expect("UTC datetime is always unambiguous"),
        )
    }

    #[test]
    fn invite_appends_waiting_candidate_to_intake() {
        let state = seeded_state();
        let candidate = invite_staff(
            &state,
            InviteStaffRequest {
                name: "Jane Doe".to_string(),
                email: "jane.doe@example.com".to_string(),
                role: "Copywriter".to_string(),
            },
        )
        .unwrap();

        assert_eq!(candidate.stage, "Invite Sent");
        assert_eq!(candidate.status, CandidateStatus::Waiting);

        let onboarding = state.onboarding_snapshot();
        assert_eq!(onboarding.staff.len(), 3);
        assert_eq!(onboarding.staff.last().unwrap().id, candidate.id);
        // The staff roster itself is untouched until intake completes.
        assert_eq!(state.staff_snapshot().len(), 5);
    }

    #[test]
    fn invite_rejects_malformed_email() {
        let state = seeded_state();
        let err = invite_staff(
            &state,
            InviteStaffRequest {
                name: "Jane Doe".to_string(),
                email: "not-an-email".to_string(),
                role: "Copywriter".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "email", .. }));
        assert_eq!(state.onboarding_snapshot().staff.len(), 2);
    }

    #[test]
    fn permission_role_updates_in_place() {
        let state = seeded_state();
        update_permission_role(&state, 5, PermissionRole::Admin).unwrap();
        let staff = state.staff_snapshot();
        let marcus = staff.iter().find(|s| s.id == 5).unwrap();
        assert_eq!(marcus.permission_role, PermissionRole::Admin);
    }

    #[test]
    fn permission_role_unknown_staff_fails() {
        let state = seeded_state();
        assert!(matches!(
            update_permission_role(&state, 404, PermissionRole::Member),
            Err(CoreError::StaffNotFound(404))
        ));
    }
}
