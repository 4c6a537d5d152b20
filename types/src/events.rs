//! Outbound events emitted by the consensus core.
//!
//! The core never pushes: events accumulate in the emitting component's
//! buffer and the surrounding orchestration layer drains them after each
//! state-changing call.

use crate::flight::{FlightKey, FlightStatus};
use crate::party::PartyId;
use serde::{Deserialize, Serialize};

/// Everything the core tells its collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuretyEvent {
    /// A funded airline proposed a nominee for admission.
    AirlineNominated { nominee: PartyId },

    /// An airline paid its participation funding (first effective payment only).
    AirlineFunded { airline: PartyId, amount: u128 },

    /// An admission request reached quorum; the nominee holds a seat.
    AirlineRegistered { airline: PartyId, name: String },

    /// A funded airline registered a flight.
    FlightRegistered { flight: FlightKey },

    /// A flight-status request was opened, sharded to one index label.
    FlightStatusRequested { index: u8, flight: FlightKey },

    /// A flight-status request resolved to a final answer.
    FlightStatusResolved {
        flight: FlightKey,
        status: FlightStatus,
    },
}
