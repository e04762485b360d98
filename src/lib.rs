//! Vacation Planner - terminal client for the AI vacation planning service
//!
//! Collects trip parameters in a form, submits them to the planning service,
//! and renders the returned itinerary. The core is the submit lifecycle:
//! pure client-side validation, a single request-response exchange, and
//! defensive rendering of a response where every field is optional.
//!
//! # Modules
//!
//! - [`draft`] - form state, preference flags, field-level errors
//! - [`validate`] - pure draft validation
//! - [`session`] - Idle/Submitting/Success/Failed state machine
//! - [`api`] - wire types, HTTP client, error normalization
//! - [`tui`] - terminal form and result views
//! - [`config`] - configuration types and loading

pub mod api;
pub mod cli;
pub mod config;
pub mod draft;
pub mod session;
pub mod tui;
pub mod validate;

// Re-export commonly used types
pub use api::{PlanClient, PlanError, PlanRequest, PlanResult};
pub use config::{BackendConfig, Config};
pub use draft::{Draft, ErrorSet, Field, Preference};
pub use session::{Session, SessionState, SubmitOutcome};
pub use validate::validate;
