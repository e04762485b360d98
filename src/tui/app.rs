//! TUI application - event handling
//!
//! The App owns the AppState and handles all keyboard events. It does no
//! rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::{AppState, Focus};
use crate::session::SessionState;

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        debug!("App::new: called");
        Self { state: AppState::new() }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Force quit always works, even mid-submit
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        // Submit disabled while a request is in flight: the Submitting
        // state plus ignored input is the mutual-exclusion mechanism
        if self.state.is_submitting() {
            debug!("App::handle_key: submitting, input ignored");
            return false;
        }

        match self.state.session.state() {
            SessionState::Success(_) => self.handle_result_key(key),
            _ => self.handle_form_key(key),
        }

        self.state.should_quit
    }

    /// Keys on the result view
    fn handle_result_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_result_key: called");
        match key.code {
            KeyCode::Char('n') | KeyCode::Enter => {
                debug!("App::handle_result_key: new plan requested");
                self.state.reset();
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.result_scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.state.result_scroll_down(1),
            KeyCode::PageUp => self.state.result_scroll_up(10),
            KeyCode::PageDown => self.state.result_scroll_down(10),
            KeyCode::Char('q') => {
                debug!("App::handle_result_key: quit");
                self.state.should_quit = true;
            }
            _ => {}
        }
    }

    /// Keys on the form view (Idle or Failed)
    fn handle_form_key(&mut self, key: KeyEvent) {
        debug!(?key, focus = ?self.state.focus, "App::handle_form_key: called");
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                // Esc dismisses the failure banner; otherwise quits
                if self.state.failure_message().is_some() {
                    debug!("App::handle_form_key: dismissing error banner");
                    self.state.dismiss_error();
                } else {
                    debug!("App::handle_form_key: quit");
                    self.state.should_quit = true;
                }
            }

            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.state.focus_next(),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.state.focus_prev(),

            (KeyCode::Enter, _) => {
                debug!("App::handle_form_key: submit attempt");
                self.state.submit();
            }

            (KeyCode::Char(' '), _) => match self.state.focus {
                Focus::Preference(pref) => self.state.toggle_preference(pref),
                Focus::Simulation => self.state.toggle_simulation(),
                Focus::Submit => self.state.submit(),
                focus if focus.is_text() => {
                    self.state.edit_text(focus, |s| s.push(' '));
                }
                _ => {}
            },

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let focus = self.state.focus;
                if focus.is_text() {
                    self.state.edit_text(focus, |s| s.push(c));
                }
            }

            (KeyCode::Backspace, _) => {
                let focus = self.state.focus;
                if focus.is_text() {
                    self.state.edit_text(focus, |s| {
                        s.pop();
                    });
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PlanResult;
    use crate::draft::{Field, Preference};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn fill_valid_form(app: &mut App) {
        type_text(app, "Boston"); // Origin
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "2026-09-01"); // StartDate
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "2026-09-08"); // EndDate
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char(' '))); // Beach checkbox
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Tab)); // past Nature/Food/Museum to Budget
        }
        type_text(app, "1500"); // Budget
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut app = App::new();
        type_text(&mut app, "Boston");
        assert_eq!(app.state().draft.origin, "Boston");

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state().draft.origin, "Bosto");
    }

    #[test]
    fn test_space_toggles_checkbox() {
        let mut app = App::new();
        app.state_mut().focus = Focus::Preference(Preference::Food);
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.state().draft.preference(Preference::Food));
    }

    #[test]
    fn test_enter_submits_and_surfaces_errors() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.state().errors.get(Field::Origin).is_some());

        // Editing the field clears its error without re-validation
        type_text(&mut app, "B");
        assert!(app.state().errors.get(Field::Origin).is_none());
        assert!(app.state().errors.get(Field::Budget).is_some());
    }

    #[test]
    fn test_full_form_submits() {
        let mut app = App::new();
        fill_valid_form(&mut app);
        app.handle_key(key(KeyCode::Enter));

        assert!(app.state().errors.is_empty());
        assert!(app.state().is_submitting());
    }

    #[test]
    fn test_input_ignored_while_submitting() {
        let mut app = App::new();
        fill_valid_form(&mut app);
        app.handle_key(key(KeyCode::Enter));
        let origin_before = app.state().draft.origin.clone();

        type_text(&mut app, "xyz");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state().draft.origin, origin_before);
        // Only the original submit is pending
        assert!(app.state_mut().take_pending_submit().is_some());
        assert!(app.state_mut().take_pending_submit().is_none());
    }

    #[test]
    fn test_esc_dismisses_banner_before_quitting() {
        let mut app = App::new();
        fill_valid_form(&mut app);
        app.handle_key(key(KeyCode::Enter));
        let pending = app.state_mut().take_pending_submit().unwrap();
        app.state_mut().resolve_submit(pending.generation, Err("boom".to_string()));

        app.handle_key(key(KeyCode::Esc));
        assert!(app.state().failure_message().is_none());
        assert!(!app.state().should_quit);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_result_view_reset_on_n() {
        let mut app = App::new();
        fill_valid_form(&mut app);
        app.handle_key(key(KeyCode::Enter));
        let pending = app.state_mut().take_pending_submit().unwrap();
        app.state_mut().resolve_submit(pending.generation, Ok(PlanResult::default()));

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(*app.state().session.state(), crate::session::SessionState::Idle);
        assert!(app.state().draft.origin.is_empty());
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = App::new();
        fill_valid_form(&mut app);
        app.handle_key(key(KeyCode::Enter));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }
}
