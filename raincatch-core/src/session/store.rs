use super::state::{reduce, SessionAction, SessionPhase, SessionState};
use crate::{
    assessment::{engine::AssessmentEngine, new_record},
    collaborators::{AssessmentStore, FeedbackSink},
    error::RaincatchError,
    validation::{validate_feedback, validate_profile},
};
use log::{debug, warn};
use raincatch_schemas::{
    feedback::Feedback,
    profile::{ProfileField, ProfilePatch, PropertyProfile},
};

type Observer = Box<dyn FnMut(&SessionState)>;

/// Holds the single session record and notifies observers after every change.
#[derive(Default)]
pub struct SessionStore {
    state: SessionState,
    observers: Vec<Observer>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Registers a callback that receives the new state after each dispatch.
    pub fn subscribe<F: FnMut(&SessionState) + 'static>(&mut self, observer: F) {
        self.observers.push(Box::new(observer));
    }

    pub fn dispatch(&mut self, action: SessionAction) {
        debug!("Dispatching {:?}", action);
        self.state = reduce(&self.state, action);
        for observer in self.observers.iter_mut() {
            observer(&self.state);
        }
    }

    pub fn set_profile(&mut self, patch: ProfilePatch) {
        self.dispatch(SessionAction::SetProfile(patch));
    }

    pub fn update_field(&mut self, field: ProfileField) {
        self.dispatch(SessionAction::UpdateField(field));
    }

    pub fn set_calculation_done(&mut self, done: bool) {
        self.dispatch(SessionAction::SetCalculationDone(done));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.dispatch(SessionAction::SetLoading(loading));
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.dispatch(SessionAction::SetError(error));
    }

    pub fn reset(&mut self) {
        self.dispatch(SessionAction::Reset);
    }

    /// Runs one assessment cycle for `profile`.
    ///
    /// Any earlier result is dropped first. Invalid input leaves the session
    /// Idle with the error set and never reaches the engine. A successful run
    /// ends in Done with the new record attached; an engine failure ends in
    /// Idle with the error set and no record.
    pub fn submit(
        &mut self,
        profile: PropertyProfile,
        engine: &mut AssessmentEngine,
    ) -> Result<(), RaincatchError> {
        self.dispatch(SessionAction::ClearAssessment);

        if let Err(errors) = validate_profile(&profile) {
            warn!("Rejected profile for '{}': {}", profile.name, errors);
            self.set_error(Some(errors.to_string()));
            return Err(errors.into());
        }

        self.set_loading(true);
        self.set_error(None);
        self.dispatch(SessionAction::ReplaceProfile(profile.clone()));

        let outcome = engine.run_assessment(&profile);
        match outcome {
            Ok(result) => {
                let record = new_record(profile, result);
                self.dispatch(SessionAction::AttachAssessment(Box::new(record)));
                self.set_calculation_done(true);
                self.set_loading(false);
                Ok(())
            }
            Err(e) => {
                warn!("Assessment failed: {}", e);
                self.dispatch(SessionAction::ClearAssessment);
                self.set_error(Some(format!("Calculation failed. Please try again. ({})", e)));
                self.set_loading(false);
                Err(e)
            }
        }
    }

    /// Hands the current assessment to `store`.
    ///
    /// A storage failure drops the session back to Idle with the error set.
    pub fn save<S: AssessmentStore + ?Sized>(&mut self, store: &mut S) -> Result<(), RaincatchError> {
        let Some(record) = self.state.assessment.clone() else {
            return Err(RaincatchError::NoAssessment);
        };

        if let Err(e) = store.save_assessment(&record) {
            warn!("Saving assessment {} failed: {}", record.assessment_id, e);
            self.set_calculation_done(false);
            self.set_error(Some(format!("Failed to save assessment: {}", e)));
            return Err(e);
        }
        Ok(())
    }

    /// Validates and forwards feedback. Failures are reported through the session error.
    pub fn send_feedback<S: FeedbackSink + ?Sized>(
        &mut self,
        sink: &mut S,
        feedback: &Feedback,
    ) -> Result<(), RaincatchError> {
        if let Err(errors) = validate_feedback(feedback) {
            self.set_error(Some(errors.to_string()));
            return Err(errors.into());
        }

        if let Err(e) = sink.submit_feedback(feedback) {
            self.set_error(Some("Failed to submit feedback. Please try again.".to_string()));
            return Err(e);
        }
        Ok(())
    }
}
