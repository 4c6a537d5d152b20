//! The voter population table.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surety_types::PartyId;

/// One known party in the admission protocol.
///
/// A party enters the table at nomination time with both flags down.
/// `registered` flips when the admission request reaches quorum (a seat at
/// the table); `funded` flips when the participation funding arrives (an
/// active participant). Both flips are monotonic: neither flag ever reverts
/// and voters are never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Voter {
    pub name: String,
    pub registered: bool,
    pub funded: bool,
    /// Amount recorded at the first effective funding. Zero until funded.
    pub funds: u128,
}

/// The known population of admission voters.
#[derive(Clone, Debug, Default)]
pub struct VoterRegistry {
    voters: HashMap<PartyId, Voter>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self {
            voters: HashMap::new(),
        }
    }

    /// Insert a newly nominated party with both flags down.
    ///
    /// Fails with [`RegistryError::AlreadyRegistered`] if the party is
    /// already known; nothing changes in that case. Increments the
    /// population size N.
    pub fn register(&mut self, id: PartyId, name: impl Into<String>) -> Result<(), RegistryError> {
        if self.voters.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id.to_string()));
        }
        self.voters.insert(
            id,
            Voter {
                name: name.into(),
                registered: false,
                funded: false,
                funds: 0,
            },
        );
        Ok(())
    }

    /// Grant a party its seat (admission quorum reached, or genesis).
    ///
    /// Updates the stored name to the one carried by the admitting vote.
    /// Idempotent on the flag. Fails with [`RegistryError::UnknownVoter`]
    /// for parties never nominated.
    pub fn admit(&mut self, id: &PartyId, name: impl Into<String>) -> Result<(), RegistryError> {
        let voter = self
            .voters
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownVoter(id.to_string()))?;
        voter.registered = true;
        voter.name = name.into();
        Ok(())
    }

    /// Record a voter's participation funding.
    ///
    /// Only admitted voters may fund. Idempotent: the first call sets the
    /// flag and records the amount, returning `true`; repeat calls change
    /// nothing and return `false` (no double-count).
    pub fn mark_funded(&mut self, id: &PartyId, amount: u128) -> Result<bool, RegistryError> {
        let voter = self
            .voters
            .get_mut(id)
            .filter(|v| v.registered)
            .ok_or_else(|| RegistryError::UnknownVoter(id.to_string()))?;

        if voter.funded {
            return Ok(false);
        }
        voter.funded = true;
        voter.funds = amount;
        Ok(true)
    }

    /// Whether the party has ever been nominated.
    pub fn is_known(&self, id: &PartyId) -> bool {
        self.voters.contains_key(id)
    }

    /// Whether the party holds a seat (admitted).
    pub fn is_registered(&self, id: &PartyId) -> bool {
        self.voters.get(id).map(|v| v.registered).unwrap_or(false)
    }

    pub fn is_funded(&self, id: &PartyId) -> bool {
        self.voters.get(id).map(|v| v.funded).unwrap_or(false)
    }

    /// Recorded funding amount. Zero for unfunded or unknown voters.
    pub fn funds_of(&self, id: &PartyId) -> u128 {
        self.voters.get(id).map(|v| v.funds).unwrap_or(0)
    }

    pub fn voter(&self, id: &PartyId) -> Option<&Voter> {
        self.voters.get(id)
    }

    /// Total number of known voters (N): admitted plus pending nominees.
    /// Monotonically non-decreasing.
    pub fn population_size(&self) -> usize {
        self.voters.len()
    }

    /// Number of admitted voters; the live population the threshold-phase
    /// quorum predicate is evaluated against.
    pub fn registered_count(&self) -> usize {
        self.voters.values().filter(|v| v.registered).count()
    }

    /// Number of funded voters.
    pub fn funded_count(&self) -> usize {
        self.voters.values().filter(|v| v.funded).count()
    }
}
