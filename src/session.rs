//! Submit lifecycle state machine
//!
//! The Session owns the state of one submit attempt: Idle through
//! Submitting to Success or Failed. Nothing else transitions SessionState.
//! Transitions are synchronous; the actual network call is spawned by the
//! caller, which reports back through `resolve` with the generation it was
//! handed at submit time. Resolutions carrying a stale generation (the user
//! reset or dismissed while the request was in flight) are discarded.

use tracing::{debug, info, warn};

use crate::api::{PlanRequest, PlanResult};
use crate::draft::{Draft, ErrorSet};
use crate::validate::validate;

/// Lifecycle state of the current submit attempt
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Nothing in flight, nothing to show
    #[default]
    Idle,
    /// Request in flight; holds the submitted body snapshot
    Submitting(PlanRequest),
    /// Service answered with a plan
    Success(PlanResult),
    /// Normalized failure message for the banner
    Failed(String),
}

impl SessionState {
    /// Whether a request is currently in flight
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A request is already in flight; nothing changed
    Ignored,
    /// Validation failed; state unchanged, errors go back to the form
    Rejected(ErrorSet),
    /// Transitioned to Submitting; caller spawns the network call and
    /// resolves with this generation
    Accepted { generation: u64, request: PlanRequest },
}

/// One submit lifecycle, from Idle through to Success or Failed
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    /// Bumped on every accepted submit and every reset/dismiss, so stale
    /// async resolutions can be recognized and dropped
    generation: u64,
}

impl Session {
    /// Create a session in the Idle state
    pub fn new() -> Self {
        debug!("Session::new: called");
        Self::default()
    }

    /// Current lifecycle state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current generation (advances on submit, reset, and dismiss)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Attempt to submit the draft
    ///
    /// Re-entrancy guard first, then validation, then the transition to
    /// Submitting. A prior Failed or Success state does not block a new
    /// submit; its stored result/error is replaced.
    pub fn on_submit(&mut self, draft: &Draft) -> SubmitOutcome {
        debug!(state = ?std::mem::discriminant(&self.state), "Session::on_submit: called");
        if self.state.is_submitting() {
            debug!("Session::on_submit: already submitting, ignored");
            return SubmitOutcome::Ignored;
        }

        let errors = validate(draft);
        if !errors.is_empty() {
            debug!(error_count = errors.len(), "Session::on_submit: validation rejected");
            return SubmitOutcome::Rejected(errors);
        }

        let request = PlanRequest::from_draft(draft);
        self.generation += 1;
        self.state = SessionState::Submitting(request.clone());
        info!(generation = self.generation, "Session::on_submit: accepted");
        SubmitOutcome::Accepted {
            generation: self.generation,
            request,
        }
    }

    /// Apply the outcome of the async network call
    ///
    /// Only honored while still Submitting and only for the current
    /// generation; anything else arrived too late and is dropped.
    pub fn resolve(&mut self, generation: u64, result: Result<PlanResult, String>) {
        debug!(generation, current = self.generation, "Session::resolve: called");
        if generation != self.generation || !self.state.is_submitting() {
            warn!(generation, current = self.generation, "Session::resolve: stale resolution discarded");
            return;
        }

        self.state = match result {
            Ok(plan) => {
                info!("Session::resolve: success");
                SessionState::Success(plan)
            }
            Err(message) => {
                info!(%message, "Session::resolve: failed");
                SessionState::Failed(message)
            }
        };
    }

    /// Dismiss a failure banner: Failed -> Idle, draft untouched
    pub fn dismiss_error(&mut self) {
        debug!("Session::dismiss_error: called");
        if matches!(self.state, SessionState::Failed(_)) {
            self.generation += 1;
            self.state = SessionState::Idle;
        }
    }

    /// Reset after a result: Success | Failed -> Idle, stored data discarded
    ///
    /// The generation bump makes any still-in-flight request resolve as
    /// stale. The form layer clears the draft alongside this call when the
    /// user starts a wholly new plan.
    pub fn reset(&mut self) {
        debug!("Session::reset: called");
        self.generation += 1;
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{Field, Preference};

    fn valid_draft() -> Draft {
        let mut draft = Draft::new();
        draft.origin = "New York".to_string();
        draft.start_date = "2026-09-01".to_string();
        draft.end_date = "2026-09-08".to_string();
        draft.budget = "2000".to_string();
        draft.set_preference(Preference::Beach, true);
        draft
    }

    fn accept(session: &mut Session, draft: &Draft) -> u64 {
        match session.on_submit(draft) {
            SubmitOutcome::Accepted { generation, .. } => generation,
            other => panic!("expected Accepted, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let session = Session::new();
        assert_eq!(*session.state(), SessionState::Idle);
    }

    #[test]
    fn test_invalid_draft_rejected_without_transition() {
        let mut session = Session::new();
        let outcome = session.on_submit(&Draft::new());

        match outcome {
            SubmitOutcome::Rejected(errors) => {
                assert!(errors.get(Field::Origin).is_some());
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        // Rejection never touches the session state
        assert_eq!(*session.state(), SessionState::Idle);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_submit_transitions_to_submitting() {
        let mut session = Session::new();
        let draft = valid_draft();
        let generation = accept(&mut session, &draft);

        assert_eq!(generation, 1);
        assert!(session.state().is_submitting());
        match session.state() {
            SessionState::Submitting(request) => assert_eq!(request.origin, "New York"),
            other => panic!("expected Submitting, got {:?}", other),
        }
    }

    #[test]
    fn test_reentrant_submit_ignored() {
        let mut session = Session::new();
        let draft = valid_draft();
        accept(&mut session, &draft);

        assert_eq!(session.on_submit(&draft), SubmitOutcome::Ignored);
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_resolve_success() {
        let mut session = Session::new();
        let generation = accept(&mut session, &valid_draft());

        let plan = PlanResult {
            destination: Some("Paris".to_string()),
            ..Default::default()
        };
        session.resolve(generation, Ok(plan));

        match session.state() {
            SessionState::Success(result) => assert_eq!(result.destination.as_deref(), Some("Paris")),
            other => panic!("expected Success, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_failure_preserves_message() {
        let mut session = Session::new();
        let generation = accept(&mut session, &valid_draft());

        session.resolve(generation, Err("Budget too low".to_string()));
        assert_eq!(*session.state(), SessionState::Failed("Budget too low".to_string()));
    }

    #[test]
    fn test_stale_resolution_after_reset_discarded() {
        let mut session = Session::new();
        let generation = accept(&mut session, &valid_draft());

        // User resets while the request is still in flight
        session.reset();
        assert_eq!(*session.state(), SessionState::Idle);

        // Late response must not resurrect the session
        session.resolve(generation, Ok(PlanResult::default()));
        assert_eq!(*session.state(), SessionState::Idle);
    }

    #[test]
    fn test_stale_generation_discarded_when_resubmitted() {
        let mut session = Session::new();
        let draft = valid_draft();
        let first = accept(&mut session, &draft);

        session.resolve(first, Err("timeout".to_string()));
        session.dismiss_error();
        let second = accept(&mut session, &draft);
        assert!(second > first);

        // A stray duplicate of the first resolution does nothing
        session.resolve(first, Ok(PlanResult::default()));
        assert!(session.state().is_submitting());

        session.resolve(second, Ok(PlanResult::default()));
        assert!(matches!(session.state(), SessionState::Success(_)));
    }

    #[test]
    fn test_dismiss_error_returns_to_idle() {
        let mut session = Session::new();
        let generation = accept(&mut session, &valid_draft());
        session.resolve(generation, Err("boom".to_string()));

        session.dismiss_error();
        assert_eq!(*session.state(), SessionState::Idle);

        // Dismiss outside Failed is a no-op
        session.dismiss_error();
        assert_eq!(*session.state(), SessionState::Idle);
    }

    #[test]
    fn test_resubmit_allowed_from_failed_and_success() {
        let mut session = Session::new();
        let draft = valid_draft();

        let generation = accept(&mut session, &draft);
        session.resolve(generation, Err("boom".to_string()));

        // Straight from Failed, no dismiss needed
        let generation = accept(&mut session, &draft);
        session.resolve(generation, Ok(PlanResult::default()));

        // And again from Success
        accept(&mut session, &draft);
        assert!(session.state().is_submitting());
    }
}
