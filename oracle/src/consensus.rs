//! Oracle consensus — status request lifecycle and report quorum.

use crate::assignment::{draw_index, ShardAssignment};
use crate::error::OracleError;
use crate::flights::FlightRegistry;
use serde::{Deserialize, Serialize};
use surety_ledger::{LateVotePolicy, RequestLedger, VoteOutcome};
use surety_registry::VoterRegistry;
use surety_types::params::{INDEXES_PER_ORACLE, MIN_ORACLE_RESPONSES};
use surety_types::{FlightKey, FlightStatus, PartyId, SuretyEvent, Tick};

/// Composite key of a status request: the flight plus the shard index the
/// request was tagged with. Re-querying the same flight can draw a new
/// index and therefore opens a distinct request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusRequestKey {
    pub flight: FlightKey,
    pub index: u8,
}

/// Result of one submitted report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    /// This report completed the quorum; the status is now final.
    Resolved { status: FlightStatus },
    /// Report counted; `matching` oracles agree on this code so far.
    Pending { matching: usize },
    /// The request had already resolved. The report was recorded for audit
    /// but the stored answer stands — an oracle cannot know resolution
    /// happened before it acted, so this is not an error.
    Late { final_status: FlightStatus },
}

/// The flight-status oracle consensus engine.
///
/// Owns the shard assignments, the flight table, and the status request
/// ledger. The admission-side [`VoterRegistry`] is borrowed only to check
/// that a flight's airline is a funded participant.
#[derive(Debug, Default)]
pub struct OracleConsensus {
    shards: ShardAssignment,
    flights: FlightRegistry,
    ledger: RequestLedger<StatusRequestKey, FlightStatus>,
    /// Monotonic draw counter for request-index selection.
    draws: u64,
    events: Vec<SuretyEvent>,
}

impl OracleConsensus {
    pub fn new() -> Self {
        Self {
            shards: ShardAssignment::new(),
            flights: FlightRegistry::new(),
            ledger: RequestLedger::new(),
            draws: 0,
            events: Vec::new(),
        }
    }

    /// Register a report-submitting node and hand it its index triple.
    ///
    /// Self-registration: the registration fee was validated by the
    /// collaborator that accepted it. Fails with `AlreadyAssigned` on a
    /// repeat registration.
    pub fn register_oracle(
        &mut self,
        oracle: &PartyId,
    ) -> Result<[u8; INDEXES_PER_ORACLE], OracleError> {
        let indexes = self.shards.assign(oracle)?;
        tracing::debug!(oracle = %oracle, ?indexes, "oracle registered");
        Ok(indexes)
    }

    /// Register a flight. Only funded airlines may register flights, and a
    /// flight key can be registered once.
    pub fn register_flight(
        &mut self,
        registry: &VoterRegistry,
        flight: FlightKey,
        now: Tick,
    ) -> Result<(), OracleError> {
        if !registry.is_funded(&flight.airline) {
            return Err(OracleError::NotEligibleToVote(flight.airline.to_string()));
        }
        self.flights.register(flight.clone(), now)?;
        tracing::info!(flight = %flight, "flight registered");
        self.events.push(SuretyEvent::FlightRegistered { flight });
        Ok(())
    }

    /// Open a status request for a flight, sharded to one index label.
    ///
    /// The label is drawn with the same pure mechanism as oracle
    /// registration, seeded by the draw counter and the flight key. Only
    /// oracles holding the label may respond. Returns the chosen index.
    pub fn open_status_request(&mut self, flight: FlightKey, now: Tick) -> u8 {
        let index = draw_index(self.draws, &flight.seed_bytes());
        self.draws += 1;

        let key = StatusRequestKey {
            flight: flight.clone(),
            index,
        };
        // Idempotent: re-querying into a still-open request keeps its tally.
        self.ledger.open(key, now);

        tracing::info!(flight = %flight, index, "flight status requested");
        self.events
            .push(SuretyEvent::FlightStatusRequested { index, flight });
        index
    }

    /// Submit one oracle's status report for `(flight, index)`.
    ///
    /// The reporter must hold the request's index (`WrongIndex` otherwise —
    /// wrong-shard reports are never tallied), and the request must have
    /// been opened (`UnknownRequest`). The request resolves when
    /// [`MIN_ORACLE_RESPONSES`] distinct oracles report the same code.
    pub fn submit_report(
        &mut self,
        flight: &FlightKey,
        index: u8,
        reporter: &PartyId,
        status: FlightStatus,
    ) -> Result<ReportOutcome, OracleError> {
        if !self.shards.holds_index(reporter, index) {
            tracing::warn!(oracle = %reporter, index, "report from wrong shard rejected");
            return Err(OracleError::WrongIndex {
                oracle: reporter.to_string(),
                index,
            });
        }

        let key = StatusRequestKey {
            flight: flight.clone(),
            index,
        };
        let outcome = self.ledger.cast_vote_existing(
            &key,
            reporter,
            status,
            self.shards.oracle_count(),
            |matching, _| matching >= MIN_ORACLE_RESPONSES,
            LateVotePolicy::Audit,
        )?;

        match outcome {
            VoteOutcome::Resolved { answer, votes } => {
                self.flights.set_status(flight, answer);
                tracing::info!(flight = %flight, status = %answer, votes, "flight status resolved");
                self.events.push(SuretyEvent::FlightStatusResolved {
                    flight: flight.clone(),
                    status: answer,
                });
                Ok(ReportOutcome::Resolved { status: answer })
            }
            VoteOutcome::Pending { votes } => {
                tracing::debug!(flight = %flight, status = %status, matching = votes, "report recorded");
                Ok(ReportOutcome::Pending { matching: votes })
            }
            VoteOutcome::Ignored { final_answer } => Ok(ReportOutcome::Late {
                final_status: final_answer,
            }),
        }
    }

    /// The resolved status of a request, if it resolved.
    pub fn request_answer(&self, flight: &FlightKey, index: u8) -> Option<FlightStatus> {
        self.ledger.final_answer(&StatusRequestKey {
            flight: flight.clone(),
            index,
        })
    }

    /// Total reports recorded for a request (audit records included).
    pub fn report_count(&self, flight: &FlightKey, index: u8) -> usize {
        self.ledger.vote_count(&StatusRequestKey {
            flight: flight.clone(),
            index,
        })
    }

    pub fn is_flight_registered(&self, flight: &FlightKey) -> bool {
        self.flights.is_registered(flight)
    }

    /// The flight's stored status; `Unknown` until some request resolves.
    pub fn flight_status(&self, flight: &FlightKey) -> FlightStatus {
        self.flights.status_of(flight)
    }

    pub fn indexes_of(&self, oracle: &PartyId) -> Option<[u8; INDEXES_PER_ORACLE]> {
        self.shards.indexes_of(oracle)
    }

    pub fn oracle_count(&self) -> usize {
        self.shards.oracle_count()
    }

    /// Monitoring hook: requests still open past `max_age_ticks`.
    pub fn stale_requests(&self, now: Tick, max_age_ticks: u64) -> Vec<StatusRequestKey> {
        self.ledger.open_requests_older_than(now, max_age_ticks)
    }

    /// Drain the buffered outbound events.
    pub fn drain_events(&mut self) -> Vec<SuretyEvent> {
        std::mem::take(&mut self.events)
    }
}
