//! Admission state machine — nomination, voting, and quorum policy.

use crate::error::AdmissionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surety_ledger::{LateVotePolicy, LedgerError, RequestLedger, VoteOutcome};
use surety_registry::{RegistryError, VoterRegistry};
use surety_types::params::BOOTSTRAP_POPULATION_LIMIT;
use surety_types::{PartyId, SuretyEvent, Tick};

/// Quorum regime of an admission request, fixed when the request is first
/// opened so a request never changes rules mid-flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionPhase {
    /// Early-growth registry: one funded voter's vote admits outright.
    Bootstrap,
    /// Multi-party registry: half or more of the admitted airlines must
    /// vote the same nominee, with the admitted count re-read each vote.
    Threshold,
}

impl AdmissionPhase {
    /// Pick the regime from the population size N at request open.
    pub fn from_population(n: usize) -> Self {
        if n <= BOOTSTRAP_POPULATION_LIMIT {
            Self::Bootstrap
        } else {
            Self::Threshold
        }
    }

    /// The quorum predicate for this regime.
    fn quorum(&self, votes: usize, population: usize) -> bool {
        match self {
            Self::Bootstrap => votes >= 1,
            Self::Threshold => votes * 2 >= population,
        }
    }
}

/// The single candidate answer of an admission request. Admission votes are
/// approvals; there is no "against" ballot, a voter simply never votes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ballot {
    Approve,
}

/// Result of one admission vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// Quorum not yet reached; the nomination keeps accumulating votes.
    Pending { votes: usize },
    /// Quorum reached; the nominee now holds a seat (still unfunded).
    Registered { votes: usize },
}

/// The airline admission consensus engine.
///
/// Owns the admission request ledger and the per-request phase table; the
/// shared [`VoterRegistry`] aggregate is passed into each operation by the
/// orchestration layer.
#[derive(Debug, Default)]
pub struct AirlineAdmission {
    ledger: RequestLedger<PartyId, Ballot>,
    phases: HashMap<PartyId, AdmissionPhase>,
    events: Vec<SuretyEvent>,
}

impl AirlineAdmission {
    pub fn new() -> Self {
        Self {
            ledger: RequestLedger::new(),
            phases: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Propose a nominee for admission.
    ///
    /// The caller must be an admitted, funded voter. Opens the admission
    /// request (fixing its phase from the population at this instant) and
    /// enters the nominee into the registry with both flags down.
    /// Re-nominating a pending nominee is a no-op: nominations accumulate
    /// votes, they never reset.
    pub fn nominate(
        &mut self,
        registry: &mut VoterRegistry,
        caller: &PartyId,
        nominee: &PartyId,
        name: &str,
        now: Tick,
    ) -> Result<(), AdmissionError> {
        self.ensure_eligible_voter(registry, caller)?;
        self.ensure_nominated(registry, nominee, name, now)?;
        Ok(())
    }

    /// Cast the caller's admission vote for a nominee.
    ///
    /// A vote for a never-nominated party opens the request implicitly (a
    /// vote is a nomination). Voting twice on the same nominee fails with
    /// `DuplicateVote`; voting on an admitted nominee fails with
    /// `AlreadyRegistered`; a vote after resolution fails with
    /// `RequestAlreadyResolved`.
    pub fn register_airline(
        &mut self,
        registry: &mut VoterRegistry,
        caller: &PartyId,
        nominee: &PartyId,
        name: &str,
        now: Tick,
    ) -> Result<AdmissionOutcome, AdmissionError> {
        self.ensure_eligible_voter(registry, caller)?;
        let phase = self.ensure_nominated(registry, nominee, name, now)?;

        // The threshold regime reads the admitted-airline count live at
        // every vote: a seat granted mid-request raises the bar.
        let population = registry.registered_count();

        let outcome = self.ledger.cast_vote(
            nominee.clone(),
            now,
            caller,
            Ballot::Approve,
            population,
            |votes, population| phase.quorum(votes, population),
            LateVotePolicy::Reject,
        )?;

        match outcome {
            VoteOutcome::Resolved { votes, .. } => {
                registry.admit(nominee, name)?;
                tracing::info!(
                    nominee = %nominee,
                    votes,
                    population,
                    ?phase,
                    "admission quorum reached"
                );
                self.events.push(SuretyEvent::AirlineRegistered {
                    airline: nominee.clone(),
                    name: name.to_string(),
                });
                Ok(AdmissionOutcome::Registered { votes })
            }
            VoteOutcome::Pending { votes } => {
                tracing::debug!(nominee = %nominee, votes, population, "admission vote recorded");
                Ok(AdmissionOutcome::Pending { votes })
            }
            // Unreachable under LateVotePolicy::Reject; surface as the
            // closed-request rejection for safety.
            VoteOutcome::Ignored { .. } => Err(LedgerError::RequestAlreadyResolved.into()),
        }
    }

    /// Record an admitted airline's participation funding.
    ///
    /// The collaborator that accepts the payment has already validated the
    /// amount against the fixed minimum. Returns `true` on the first
    /// effective funding; repeat funding is a no-op returning `false` and
    /// emits nothing.
    pub fn fund(
        &mut self,
        registry: &mut VoterRegistry,
        caller: &PartyId,
        amount: u128,
    ) -> Result<bool, AdmissionError> {
        let first = registry.mark_funded(caller, amount)?;
        if first {
            tracing::info!(airline = %caller, amount, "airline funded");
            self.events.push(SuretyEvent::AirlineFunded {
                airline: caller.clone(),
                amount,
            });
        }
        Ok(first)
    }

    /// Number of votes accumulated for a nominee (`getNumberOfVotes`).
    pub fn vote_count(&self, nominee: &PartyId) -> usize {
        self.ledger.vote_count(nominee)
    }

    /// The phase fixed for a nominee's request, if one was ever opened.
    pub fn phase_of(&self, nominee: &PartyId) -> Option<AdmissionPhase> {
        self.phases.get(nominee).copied()
    }

    /// Whether an admission request exists and is still collecting votes.
    pub fn is_pending(&self, nominee: &PartyId) -> bool {
        self.ledger.contains(nominee) && !self.ledger.is_resolved(nominee)
    }

    /// Monitoring hook: nominees whose requests are open past `max_age_ticks`.
    pub fn stale_nominations(&self, now: Tick, max_age_ticks: u64) -> Vec<PartyId> {
        self.ledger.open_requests_older_than(now, max_age_ticks)
    }

    /// Drain the buffered outbound events.
    pub fn drain_events(&mut self) -> Vec<SuretyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Caller precondition shared by nomination and voting: a seat and
    /// funding, both.
    fn ensure_eligible_voter(
        &self,
        registry: &VoterRegistry,
        caller: &PartyId,
    ) -> Result<(), AdmissionError> {
        if registry.is_registered(caller) && registry.is_funded(caller) {
            Ok(())
        } else {
            Err(AdmissionError::NotEligibleToVote(caller.to_string()))
        }
    }

    /// Open the nominee's admission request if this is its first sighting,
    /// fixing the phase from the population size at this instant.
    fn ensure_nominated(
        &mut self,
        registry: &mut VoterRegistry,
        nominee: &PartyId,
        name: &str,
        now: Tick,
    ) -> Result<AdmissionPhase, AdmissionError> {
        if registry.is_registered(nominee) {
            return Err(RegistryError::AlreadyRegistered(nominee.to_string()).into());
        }

        if !registry.is_known(nominee) {
            registry.register(nominee.clone(), name)?;
        }

        if self.ledger.open(nominee.clone(), now) {
            let phase = AdmissionPhase::from_population(registry.population_size());
            self.phases.insert(nominee.clone(), phase);
            tracing::debug!(
                nominee = %nominee,
                population = registry.population_size(),
                ?phase,
                "nomination opened"
            );
            self.events.push(SuretyEvent::AirlineNominated {
                nominee: nominee.clone(),
            });
        }

        // The entry exists by now in every path.
        Ok(self
            .phases
            .get(nominee)
            .copied()
            .unwrap_or(AdmissionPhase::Bootstrap))
    }
}
