//! Fundamental types for the Surety consensus core.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: party identities, flight keys, status codes, outbound events,
//! request ticks, and protocol parameters.

pub mod events;
pub mod flight;
pub mod params;
pub mod party;
pub mod tick;

pub use events::SuretyEvent;
pub use flight::{FlightKey, FlightStatus};
pub use party::PartyId;
pub use tick::Tick;
