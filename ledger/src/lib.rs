//! Request ledger — the generic vote tally engine.
//!
//! Both consensus protocols (airline admission, flight-status oracle) tally
//! through this one engine, parameterized by a caller-supplied quorum
//! predicate. Centralizing the duplicate-vote and quorum-crossing logic here
//! is what keeps the two protocols from ever diverging on the anti-replay
//! invariant.
//!
//! ## Module overview
//!
//! - [`request`] — per-request tally record and vote outcomes.
//! - [`ledger`] — the keyed request container and vote routing.
//! - [`error`] — ledger error types.

pub mod error;
pub mod ledger;
pub mod request;

pub use error::LedgerError;
pub use ledger::RequestLedger;
pub use request::{LateVotePolicy, RequestStatus, Tally, VoteOutcome, VoteRequest};
