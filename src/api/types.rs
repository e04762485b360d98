//! Wire types for the planning service
//!
//! The request mirrors the service's camelCase contract exactly. The
//! response is treated as semi-structured: every field the server may omit
//! is an Option, and rendering decides what to show.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::draft::{Draft, Preference};

/// Preference flags as the service expects them (fixed four-key object)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceFlags {
    pub beach: bool,
    pub nature: bool,
    pub food: bool,
    pub museum: bool,
}

/// Request body for `POST /plan-vacation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub origin: String,
    pub start_date: String,
    pub end_date: String,
    pub preferences: PreferenceFlags,
    pub budget: f64,
    pub allow_booking_simulation: bool,
    pub payment_token: String,
}

impl PlanRequest {
    /// Build a request body from a validated draft
    ///
    /// Callers run the validator first; an unparseable budget here would
    /// mean validation was skipped, and serializes as 0.
    pub fn from_draft(draft: &Draft) -> Self {
        debug!("PlanRequest::from_draft: called");
        Self {
            origin: draft.origin.trim().to_string(),
            start_date: draft.start_date.trim().to_string(),
            end_date: draft.end_date.trim().to_string(),
            preferences: PreferenceFlags {
                beach: draft.preference(Preference::Beach),
                nature: draft.preference(Preference::Nature),
                food: draft.preference(Preference::Food),
                museum: draft.preference(Preference::Museum),
            },
            budget: draft.budget_value().unwrap_or(0.0),
            allow_booking_simulation: draft.allow_booking_simulation,
            payment_token: draft.payment_token.clone(),
        }
    }
}

/// One day of the returned itinerary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// Day number; rendering falls back to 1-based position when absent
    pub day: Option<u32>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub activities: Option<Vec<String>>,
}

/// Simulated hotel booking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelBooking {
    #[serde(default)]
    pub name: String,
    pub price: Option<f64>,
    pub nights: Option<u32>,
}

/// Simulated flight booking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightBooking {
    #[serde(default)]
    pub airline: String,
    pub price: Option<f64>,
    pub route: Option<String>,
}

/// Booking simulation results; hotel and flight are independently optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSimulation {
    pub hotel: Option<HotelBooking>,
    pub flight: Option<FlightBooking>,
}

/// Response payload from the planning service
///
/// Decoded verbatim, no schema enforcement beyond optional-field access.
/// `total_estimated_cost` is parsed but intentionally never rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub destination: Option<String>,
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub booking_simulation: Option<BookingSimulation>,
    pub total_estimated_cost: Option<f64>,
}

impl PlanResult {
    /// Itinerary days, or an empty slice when the section is absent
    pub fn days(&self) -> &[ItineraryDay] {
        self.itinerary.as_deref().unwrap_or(&[])
    }
}
