//! Client-side draft validation
//!
//! One pure function mapping a Draft to an ErrorSet. No I/O, no short
//! circuiting: every rule is evaluated on every call so all violations are
//! reported simultaneously.

use chrono::NaiveDate;
use tracing::debug;

use crate::draft::{Draft, ErrorSet, Field};

/// Parse a draft date field as an ISO calendar date
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Validate a draft, returning every violated rule keyed by field
///
/// An empty ErrorSet means the draft is submit-eligible. The date ordering
/// rule only fires when both dates are present and parse, so a field never
/// carries both an absence error and an ordering error in the same pass.
pub fn validate(draft: &Draft) -> ErrorSet {
    debug!("validate: called");
    let mut errors = ErrorSet::new();

    if draft.origin.trim().is_empty() {
        errors.insert(Field::Origin, "Origin city is required");
    }

    let start = parse_date(&draft.start_date);
    let end = parse_date(&draft.end_date);

    if draft.start_date.trim().is_empty() {
        errors.insert(Field::StartDate, "Start date is required");
    } else if start.is_none() {
        errors.insert(Field::StartDate, "Enter a valid date (YYYY-MM-DD)");
    }

    if draft.end_date.trim().is_empty() {
        errors.insert(Field::EndDate, "End date is required");
    } else if end.is_none() {
        errors.insert(Field::EndDate, "Enter a valid date (YYYY-MM-DD)");
    }

    if let (Some(start), Some(end)) = (start, end)
        && start >= end
    {
        errors.insert(Field::EndDate, "End date must be after start date");
    }

    match draft.budget_value() {
        Some(budget) if budget > 0.0 => {}
        _ => {
            errors.insert(Field::Budget, "Budget must be greater than 0");
        }
    }

    if !draft.any_preference() {
        // One aggregate error for the group, not one per checkbox
        errors.insert(Field::Preferences, "Select at least one preference");
    }

    if draft.allow_booking_simulation && draft.payment_token.trim().is_empty() {
        errors.insert(
            Field::PaymentToken,
            "Payment token is required when booking simulation is enabled",
        );
    }

    debug!(error_count = errors.len(), "validate: done");
    errors
}
