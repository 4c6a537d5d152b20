//! Protocol constants shared by the consensus components and their
//! collaborators.
//!
//! Monetary amounts are denominated in the substrate's smallest unit
//! (an opaque u128). Payment validation happens in the collaborator that
//! accepts the funds; the constants live here so both sides agree on them.

/// Largest registry population still in the bootstrap phase: while the
/// number of known airlines is at or below this, a single funded
/// airline's nomination admits a nominee outright.
pub const BOOTSTRAP_POPULATION_LIMIT: usize = 4;

/// Distinct matching reports required to resolve a flight-status request.
/// Three independent oracles must agree on the same status code.
pub const MIN_ORACLE_RESPONSES: usize = 3;

/// Number of shard-index labels (labels are `0..INDEX_SPACE`).
pub const INDEX_SPACE: u8 = 10;

/// Shard-index labels assigned to each oracle at registration.
pub const INDEXES_PER_ORACLE: usize = 3;

/// Minimum airline participation funding (10 units of 1e18).
pub const AIRLINE_FUNDING_MINIMUM: u128 = 10_000_000_000_000_000_000;

/// Oracle self-registration fee (1 unit of 1e18).
pub const ORACLE_REGISTRATION_FEE: u128 = 1_000_000_000_000_000_000;
