//! Draft form state and field-level error tracking
//!
//! The Draft is the in-progress, user-editable form state before submission.
//! It is owned and exclusively mutated by the form layer until a submit
//! attempt succeeds or the user resets. Pure data, no rendering logic.

use std::collections::BTreeMap;

use tracing::debug;

/// Trip preference flags (fixed enumeration)
///
/// Preference updates are keyed by this enum rather than by field-name
/// strings, so there is no prefix parsing anywhere in the input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Preference {
    Beach,
    Nature,
    Food,
    Museum,
}

impl Preference {
    /// All preferences in display order
    pub const ALL: [Preference; 4] = [Self::Beach, Self::Nature, Self::Food, Self::Museum];

    /// Display label for the checkbox
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beach => "Beach",
            Self::Nature => "Nature",
            Self::Food => "Food",
            Self::Museum => "Museum",
        }
    }
}

/// Form fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Origin,
    StartDate,
    EndDate,
    /// Aggregate key for the preference group (one error, not per-checkbox)
    Preferences,
    Budget,
    PaymentToken,
}

/// Field-to-message mapping produced by validation
///
/// Recomputed wholesale on each submit attempt. Individual entries are
/// cleared optimistically when the user edits the corresponding field;
/// full re-validation always runs again at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSet {
    entries: BTreeMap<Field, String>,
}

impl ErrorSet {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error message for a field (last write wins)
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        let message = message.into();
        debug!(?field, %message, "ErrorSet::insert: called");
        self.entries.insert(field, message);
    }

    /// Clear the entry for a field, if any
    pub fn clear(&mut self, field: Field) {
        if self.entries.remove(&field).is_some() {
            debug!(?field, "ErrorSet::clear: cleared entry");
        }
    }

    /// Get the message for a field, if any
    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    /// An empty set means the draft is submit-eligible
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields currently in error
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fields currently in error, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.keys().copied()
    }
}

/// In-progress form state
///
/// Text fields hold raw input exactly as typed; the validator decides what
/// parses. Toggling the booking simulation off does not clear a previously
/// typed payment token - the validator only looks at it while the flag is on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub origin: String,
    /// ISO calendar date as typed (YYYY-MM-DD)
    pub start_date: String,
    /// ISO calendar date as typed (YYYY-MM-DD)
    pub end_date: String,
    preferences: [bool; 4],
    /// Raw budget text; must parse to a positive number
    pub budget: String,
    pub allow_booking_simulation: bool,
    pub payment_token: String,
}

impl Draft {
    /// Create an empty draft
    pub fn new() -> Self {
        debug!("Draft::new: called");
        Self::default()
    }

    /// Whether the given preference flag is set
    pub fn preference(&self, pref: Preference) -> bool {
        self.preferences[Self::pref_index(pref)]
    }

    /// Set a preference flag by enum key
    pub fn set_preference(&mut self, pref: Preference, value: bool) {
        debug!(?pref, value, "Draft::set_preference: called");
        self.preferences[Self::pref_index(pref)] = value;
    }

    /// Flip a preference flag by enum key
    pub fn toggle_preference(&mut self, pref: Preference) {
        let current = self.preference(pref);
        self.set_preference(pref, !current);
    }

    /// Whether at least one preference flag is set
    pub fn any_preference(&self) -> bool {
        self.preferences.iter().any(|p| *p)
    }

    /// Budget parsed as a number, if the raw text parses
    pub fn budget_value(&self) -> Option<f64> {
        self.budget.trim().parse::<f64>().ok()
    }

    fn pref_index(pref: Preference) -> usize {
        match pref {
            Preference::Beach => 0,
            Preference::Nature => 1,
            Preference::Food => 2,
            Preference::Museum => 3,
        }
    }
}
