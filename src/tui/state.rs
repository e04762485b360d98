//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here. The draft is
//! owned and mutated only through this module; the session is the sole
//! owner of the submit lifecycle.

use std::time::Instant;

use rand::seq::IndexedRandom;
use tracing::debug;

use crate::api::PlanRequest;
use crate::draft::{Draft, ErrorSet, Field, Preference};
use crate::session::{Session, SessionState, SubmitOutcome};

/// Fun words for the submit spinner
pub const PLANNING_WORDS: &[&str] = &[
    "Planning",
    "Packing",
    "Routing",
    "Mapping",
    "Scouting",
    "Charting",
    "Booking",
    "Wandering",
];

/// Focusable elements of the form, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Origin,
    StartDate,
    EndDate,
    Preference(Preference),
    Budget,
    Simulation,
    PaymentToken,
    Submit,
}

impl Focus {
    /// The error-set key behind this focus element, if it has one
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Origin => Some(Field::Origin),
            Self::StartDate => Some(Field::StartDate),
            Self::EndDate => Some(Field::EndDate),
            Self::Preference(_) => Some(Field::Preferences),
            Self::Budget => Some(Field::Budget),
            Self::PaymentToken => Some(Field::PaymentToken),
            Self::Simulation | Self::Submit => None,
        }
    }

    /// Whether this element edits free text
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Origin | Self::StartDate | Self::EndDate | Self::Budget | Self::PaymentToken)
    }
}

/// Dispatched submit request the runner still has to spawn
#[derive(Debug, Clone)]
pub struct PendingSubmit {
    pub generation: u64,
    pub request: PlanRequest,
}

/// Main TUI application state
#[derive(Debug)]
pub struct AppState {
    /// In-progress form state (single owner)
    pub draft: Draft,
    /// Errors from the last rejected submit, minus optimistic clears
    pub errors: ErrorSet,
    /// Currently focused form element
    pub focus: Focus,
    /// Submit lifecycle state machine (single owner)
    pub session: Session,
    /// Accepted submit waiting for the runner to spawn the network call
    pub pending_submit: Option<PendingSubmit>,
    /// Should the app quit
    pub should_quit: bool,
    /// Scroll offset for the result view
    pub result_scroll: usize,
    /// Max scroll offset, updated during render with viewport awareness
    pub result_max_scroll: usize,
    /// Spinner word for the in-flight overlay
    pub planning_word: String,
    /// When the in-flight request started (for elapsed display)
    pub submit_started: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            draft: Draft::new(),
            errors: ErrorSet::new(),
            focus: Focus::Origin,
            session: Session::new(),
            pending_submit: None,
            should_quit: false,
            result_scroll: 0,
            result_max_scroll: 0,
            planning_word: String::new(),
            submit_started: None,
        }
    }
}

impl AppState {
    /// Create new AppState
    pub fn new() -> Self {
        debug!("AppState::new: called");
        Self::default()
    }

    /// Focus traversal order for the current draft
    ///
    /// The payment token only appears while the simulation toggle is on;
    /// its stored value survives either way.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Origin, Focus::StartDate, Focus::EndDate];
        order.extend(Preference::ALL.map(Focus::Preference));
        order.push(Focus::Budget);
        order.push(Focus::Simulation);
        if self.draft.allow_booking_simulation {
            order.push(Focus::PaymentToken);
        }
        order.push(Focus::Submit);
        order
    }

    /// Move focus to the next element
    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + 1) % order.len()];
        debug!(?self.focus, "AppState::focus_next: moved");
    }

    /// Move focus to the previous element
    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + order.len() - 1) % order.len()];
        debug!(?self.focus, "AppState::focus_prev: moved");
    }

    /// Mutate a draft text field and optimistically clear its error
    ///
    /// Clearing is a UX affordance, not correctness-bearing: the full
    /// validator runs again on the next submit.
    pub fn edit_text(&mut self, focus: Focus, edit: impl FnOnce(&mut String)) {
        let buffer = match focus {
            Focus::Origin => &mut self.draft.origin,
            Focus::StartDate => &mut self.draft.start_date,
            Focus::EndDate => &mut self.draft.end_date,
            Focus::Budget => &mut self.draft.budget,
            Focus::PaymentToken => &mut self.draft.payment_token,
            _ => return,
        };
        edit(buffer);
        if let Some(field) = focus.field() {
            self.errors.clear(field);
        }
    }

    /// Toggle a preference checkbox and clear the aggregate error
    pub fn toggle_preference(&mut self, pref: Preference) {
        debug!(?pref, "AppState::toggle_preference: called");
        self.draft.toggle_preference(pref);
        self.errors.clear(Field::Preferences);
    }

    /// Toggle the booking simulation flag
    ///
    /// Turning it off can leave the payment token focused on a now-hidden
    /// field, so focus snaps back to the toggle.
    pub fn toggle_simulation(&mut self) {
        debug!("AppState::toggle_simulation: called");
        self.draft.allow_booking_simulation = !self.draft.allow_booking_simulation;
        if !self.draft.allow_booking_simulation && self.focus == Focus::PaymentToken {
            self.focus = Focus::Simulation;
        }
    }

    /// Attempt a submit; on acceptance the runner spawns the network call
    pub fn submit(&mut self) {
        debug!("AppState::submit: called");
        match self.session.on_submit(&self.draft) {
            SubmitOutcome::Ignored => {
                debug!("AppState::submit: ignored, already submitting");
            }
            SubmitOutcome::Rejected(errors) => {
                debug!(error_count = errors.len(), "AppState::submit: rejected");
                self.errors = errors;
            }
            SubmitOutcome::Accepted { generation, request } => {
                debug!(generation, "AppState::submit: accepted");
                self.errors = ErrorSet::new();
                let mut rng = rand::rng();
                self.planning_word = PLANNING_WORDS.choose(&mut rng).unwrap_or(&"Planning").to_string();
                self.submit_started = Some(Instant::now());
                self.pending_submit = Some(PendingSubmit { generation, request });
            }
        }
    }

    /// Take the pending submit for the runner to spawn
    pub fn take_pending_submit(&mut self) -> Option<PendingSubmit> {
        self.pending_submit.take()
    }

    /// Apply the async outcome of a submit
    pub fn resolve_submit(&mut self, generation: u64, result: Result<crate::api::PlanResult, String>) {
        debug!(generation, ok = result.is_ok(), "AppState::resolve_submit: called");
        self.session.resolve(generation, result);
        if !self.session.state().is_submitting() {
            self.submit_started = None;
            self.result_scroll = 0;
        }
    }

    /// Dismiss the failure banner, keeping the draft for a retry
    pub fn dismiss_error(&mut self) {
        debug!("AppState::dismiss_error: called");
        self.session.dismiss_error();
    }

    /// Start a wholly new plan: clear result, draft, and errors
    pub fn reset(&mut self) {
        debug!("AppState::reset: called");
        self.session.reset();
        self.draft = Draft::new();
        self.errors = ErrorSet::new();
        self.focus = Focus::Origin;
        self.result_scroll = 0;
        self.result_max_scroll = 0;
    }

    /// Whether a request is in flight (form input disabled)
    pub fn is_submitting(&self) -> bool {
        self.session.state().is_submitting()
    }

    /// Failure message for the banner, if any
    pub fn failure_message(&self) -> Option<&str> {
        match self.session.state() {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Scroll the result view up
    pub fn result_scroll_up(&mut self, lines: usize) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    /// Scroll the result view down, clamped to the last rendered max
    pub fn result_scroll_down(&mut self, lines: usize) {
        self.result_scroll = self.result_scroll.saturating_add(lines).min(self.result_max_scroll);
    }
}
