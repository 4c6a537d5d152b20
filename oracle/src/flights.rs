//! Registered flights and their resolved status.

use crate::error::OracleError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surety_types::{FlightKey, FlightStatus, Tick};

/// A flight registered by a funded airline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Flight {
    pub key: FlightKey,
    pub registered_at: Tick,
    /// `Unknown` until a status request for this flight resolves.
    pub status: FlightStatus,
}

/// Table of registered flights.
///
/// The eligibility of the registering airline is the consensus layer's
/// check; this table only stores.
#[derive(Clone, Debug, Default)]
pub struct FlightRegistry {
    flights: HashMap<FlightKey, Flight>,
}

impl FlightRegistry {
    pub fn new() -> Self {
        Self {
            flights: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: FlightKey, now: Tick) -> Result<(), OracleError> {
        if self.flights.contains_key(&key) {
            return Err(OracleError::FlightAlreadyRegistered(key.to_string()));
        }
        self.flights.insert(
            key.clone(),
            Flight {
                key,
                registered_at: now,
                status: FlightStatus::Unknown,
            },
        );
        Ok(())
    }

    pub fn is_registered(&self, key: &FlightKey) -> bool {
        self.flights.contains_key(key)
    }

    /// Stamp a resolved status onto a flight. No-op for unregistered keys
    /// (a status request can target a flight the registry never saw).
    pub fn set_status(&mut self, key: &FlightKey, status: FlightStatus) {
        if let Some(flight) = self.flights.get_mut(key) {
            flight.status = status;
        }
    }

    /// The flight's stored status; `Unknown` for unregistered flights.
    pub fn status_of(&self, key: &FlightKey) -> FlightStatus {
        self.flights
            .get(key)
            .map(|f| f.status)
            .unwrap_or(FlightStatus::Unknown)
    }

    pub fn flight(&self, key: &FlightKey) -> Option<&Flight> {
        self.flights.get(key)
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }
}
