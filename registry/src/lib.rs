//! Voter registry — the known population of admission voters.
//!
//! Tracks every known airline (pending nominees included) and its admission
//! and funding flags. The registry is the single source of truth for the
//! population counts the admission quorum arithmetic reads; nothing else in
//! the core writes to it.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{Voter, VoterRegistry};
