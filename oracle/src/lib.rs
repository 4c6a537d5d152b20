//! Flight-status oracle consensus.
//!
//! A pool of report-submitting nodes ("oracles") decides the real-world
//! status of a flight. Each oracle is assigned three shard-index labels at
//! registration; a status request is tagged with one label, so only the
//! subset of oracles holding it needs to respond. The request resolves to
//! the first status code reported by [`MIN_ORACLE_RESPONSES`] independent
//! oracles.
//!
//! ## Module overview
//!
//! - [`assignment`] — deterministic shard-index assignment.
//! - [`flights`] — registered flights and their resolved status.
//! - [`consensus`] — request lifecycle and report quorum.
//! - [`error`] — oracle error types.
//!
//! [`MIN_ORACLE_RESPONSES`]: surety_types::params::MIN_ORACLE_RESPONSES

pub mod assignment;
pub mod consensus;
pub mod error;
pub mod flights;

pub use assignment::ShardAssignment;
pub use consensus::{OracleConsensus, ReportOutcome, StatusRequestKey};
pub use error::OracleError;
pub use flights::{Flight, FlightRegistry};
