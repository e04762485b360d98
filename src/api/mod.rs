//! Planning service API: wire types, client, error normalization

mod client;
mod error;
mod types;

pub use client::PlanClient;
pub use error::{DEFAULT_FAILURE_MESSAGE, PlanError};
pub use types::{BookingSimulation, FlightBooking, HotelBooking, ItineraryDay, PlanRequest, PlanResult, PreferenceFlags};
