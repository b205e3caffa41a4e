use raincatch_schemas::{
    assessment::AssessmentRecord,
    profile::{ProfileField, ProfilePatch, PropertyProfile},
};
use serde::{Deserialize, Serialize};

/// Everything the front end needs to render the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub profile: PropertyProfile,
    pub assessment: Option<AssessmentRecord>,
    pub calculation_done: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    Loading,
    Done,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.calculation_done {
            SessionPhase::Done
        } else {
            SessionPhase::Idle
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Shallow-merges the given fields into the current profile.
    SetProfile(ProfilePatch),
    ReplaceProfile(PropertyProfile),
    UpdateField(ProfileField),
    AttachAssessment(Box<AssessmentRecord>),
    ClearAssessment,
    SetCalculationDone(bool),
    SetLoading(bool),
    SetError(Option<String>),
    Reset,
}

/// Applies one action to a state, producing the next state.
pub fn reduce(state: &SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::SetProfile(patch) => SessionState {
            profile: patch.apply_to(state.profile.clone()),
            ..state.clone()
        },
        SessionAction::ReplaceProfile(profile) => SessionState {
            profile,
            ..state.clone()
        },
        SessionAction::UpdateField(field) => SessionState {
            profile: field.apply_to(state.profile.clone()),
            ..state.clone()
        },
        SessionAction::AttachAssessment(record) => SessionState {
            assessment: Some(*record),
            ..state.clone()
        },
        SessionAction::ClearAssessment => SessionState {
            assessment: None,
            calculation_done: false,
            ..state.clone()
        },
        SessionAction::SetCalculationDone(done) => SessionState {
            calculation_done: done,
            ..state.clone()
        },
        SessionAction::SetLoading(loading) => SessionState {
            loading,
            ..state.clone()
        },
        SessionAction::SetError(error) => SessionState {
            error,
            ..state.clone()
        },
        SessionAction::Reset => SessionState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raincatch_schemas::profile::SoilType;

    #[test]
    fn later_keys_win_on_merge() {
        let state = SessionState::default();
        let first = reduce(
            &state,
            SessionAction::SetProfile(ProfilePatch {
                name: Some("First".to_string()),
                dwellers: Some(6),
                ..Default::default()
            }),
        );
        let second = reduce(
            &first,
            SessionAction::SetProfile(ProfilePatch {
                name: Some("Second".to_string()),
                ..Default::default()
            }),
        );
        assert_eq!(second.profile.name, "Second");
        assert_eq!(second.profile.dwellers, 6);
        // The input state is left untouched.
        assert_eq!(state.profile.name, "");
    }

    #[test]
    fn update_field_changes_one_value() {
        let state = reduce(
            &SessionState::default(),
            SessionAction::UpdateField(ProfileField::SoilType(SoilType::Sandy)),
        );
        assert_eq!(state.profile.soil_type, SoilType::Sandy);
        assert_eq!(state.profile.roof_area, 100.0);
    }

    #[test]
    fn reset_restores_defaults_and_clears_flags() {
        let mut state = SessionState::default();
        for action in [
            SessionAction::SetLoading(true),
            SessionAction::SetCalculationDone(true),
            SessionAction::SetError(Some("boom".to_string())),
            SessionAction::UpdateField(ProfileField::Dwellers(9)),
        ] {
            state = reduce(&state, action);
        }
        assert_eq!(state.phase(), SessionPhase::Loading);

        let state = reduce(&state, SessionAction::Reset);
        assert_eq!(state, SessionState::default());
        assert_eq!(state.phase(), SessionPhase::Idle);
    }

    #[test]
    fn clearing_assessment_leaves_profile_alone() {
        let done = reduce(
            &reduce(
                &SessionState::default(),
                SessionAction::UpdateField(ProfileField::Dwellers(3)),
            ),
            SessionAction::SetCalculationDone(true),
        );
        assert_eq!(done.phase(), SessionPhase::Done);

        let cleared = reduce(&done, SessionAction::ClearAssessment);
        assert_eq!(cleared.phase(), SessionPhase::Idle);
        assert!(cleared.assessment.is_none());
        assert_eq!(cleared.profile.dwellers, 3);
    }
}
