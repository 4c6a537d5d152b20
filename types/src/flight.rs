//! Flight identity and flight-status codes.

use crate::party::PartyId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite identity of a flight: operating airline, flight code, and
/// scheduled departure (an opaque epoch value supplied by the caller).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightKey {
    pub airline: PartyId,
    pub flight_code: String,
    pub departure: u64,
}

impl FlightKey {
    pub fn new(airline: PartyId, flight_code: impl Into<String>, departure: u64) -> Self {
        Self {
            airline,
            flight_code: flight_code.into(),
            departure,
        }
    }

    /// Stable byte encoding of the key, used for deterministic seed
    /// derivation when sharding a status request.
    pub fn seed_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            self.airline.as_bytes().len() + self.flight_code.len() + 8,
        );
        bytes.extend_from_slice(self.airline.as_bytes());
        bytes.extend_from_slice(self.flight_code.as_bytes());
        bytes.extend_from_slice(&self.departure.to_be_bytes());
        bytes
    }
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.airline, self.flight_code, self.departure)
    }
}

/// The real-world status of a flight as reported by oracles.
///
/// The numeric codes match the wire values the report-submitting nodes use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    Unknown,
    OnTime,
    LateAirline,
    LateWeather,
    LateTechnical,
    LateOther,
}

impl FlightStatus {
    /// The wire code for this status.
    pub fn code(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::OnTime => 10,
            Self::LateAirline => 20,
            Self::LateWeather => 30,
            Self::LateTechnical => 40,
            Self::LateOther => 50,
        }
    }

    /// Parse a wire code. Returns `None` for codes outside the enumeration.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            10 => Some(Self::OnTime),
            20 => Some(Self::LateAirline),
            30 => Some(Self::LateWeather),
            40 => Some(Self::LateTechnical),
            50 => Some(Self::LateOther),
            _ => None,
        }
    }

    /// Whether this status attributes the delay to the airline.
    /// External payout logic keys off this.
    pub fn is_airline_fault(&self) -> bool {
        matches!(self, Self::LateAirline)
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::OnTime => "on-time",
            Self::LateAirline => "late-airline",
            Self::LateWeather => "late-weather",
            Self::LateTechnical => "late-technical",
            Self::LateOther => "late-other",
        };
        write!(f, "{name}")
    }
}
