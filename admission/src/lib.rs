//! Airline admission consensus.
//!
//! Decides whether a nominee may join the voter registry. Two regimes:
//!
//! - **Bootstrap**: while the registry knows at most four airlines, a single
//!   funded airline's nomination admits the nominee outright.
//! - **Threshold**: from the fifth airline on, admission needs votes from
//!   half or more of the admitted airlines, with the admitted count re-read
//!   live at every vote.
//!
//! The regime is fixed per request at the moment the request is first
//! opened, so a request never changes rules mid-flight.

pub mod admission;
pub mod error;

pub use admission::{AdmissionOutcome, AdmissionPhase, AirlineAdmission, Ballot};
pub use error::AdmissionError;
