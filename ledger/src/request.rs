//! Per-request tally record.

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use surety_types::{PartyId, Tick};

/// Lifecycle state of a voting request.
///
/// `Resolved` is terminal: once a candidate answer crosses quorum, the
/// answer is fixed forever and the tallies become immutable (modulo
/// audit-only records, see [`LateVotePolicy::Audit`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus<A> {
    Open,
    Resolved(A),
}

/// What the ledger should do with a vote on an already-resolved request.
///
/// The admission protocol rejects late votes outright; the oracle protocol
/// tolerates them, because a report-submitting node cannot know resolution
/// happened before it acted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LateVotePolicy {
    /// Fail with [`LedgerError::RequestAlreadyResolved`].
    Reject,
    /// Record the vote for audit; the stored answer never changes.
    Audit,
}

/// The result of casting one vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteOutcome<A> {
    /// This vote crossed quorum; the request is now terminally resolved.
    Resolved { answer: A, votes: usize },
    /// Vote counted; quorum not yet reached. `votes` is the count for the
    /// answer that was just voted.
    Pending { votes: usize },
    /// The request was already resolved; the vote was recorded for audit
    /// only and did not change the final answer.
    Ignored { final_answer: A },
}

/// A point-in-time view of a request's tallies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tally<A> {
    pub status: RequestStatus<A>,
    /// Distinct-voter count per candidate answer.
    pub counts: Vec<(A, usize)>,
}

/// One voting request: who voted for which candidate answer.
///
/// Invariant: a voter identity appears in at most one candidate-answer set.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Eq + Hash"))]
pub struct VoteRequest<A> {
    pub opened_at: Tick,
    status: RequestStatus<A>,
    ballots: HashMap<A, HashSet<PartyId>>,
}

impl<A> VoteRequest<A>
where
    A: Eq + Hash + Clone,
{
    pub fn new(opened_at: Tick) -> Self {
        Self {
            opened_at,
            status: RequestStatus::Open,
            ballots: HashMap::new(),
        }
    }

    pub fn status(&self) -> &RequestStatus<A> {
        &self.status
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, RequestStatus::Resolved(_))
    }

    pub fn final_answer(&self) -> Option<&A> {
        match &self.status {
            RequestStatus::Resolved(answer) => Some(answer),
            RequestStatus::Open => None,
        }
    }

    /// Whether this voter already appears in any candidate-answer set.
    pub fn has_voted(&self, voter: &PartyId) -> bool {
        self.ballots.values().any(|set| set.contains(voter))
    }

    /// Distinct-voter count for one candidate answer.
    pub fn count_for(&self, answer: &A) -> usize {
        self.ballots.get(answer).map(|set| set.len()).unwrap_or(0)
    }

    /// Total distinct voters across all candidate answers.
    pub fn total_votes(&self) -> usize {
        self.ballots.values().map(|set| set.len()).sum()
    }

    /// Snapshot of the current tallies.
    pub fn tally(&self) -> Tally<A> {
        Tally {
            status: self.status.clone(),
            counts: self
                .ballots
                .iter()
                .map(|(answer, set)| (answer.clone(), set.len()))
                .collect(),
        }
    }

    /// Process one vote against this request.
    ///
    /// Check order and atomicity: every error path returns before any
    /// mutation, so a failed vote leaves the tallies untouched.
    pub fn cast(
        &mut self,
        voter: &PartyId,
        answer: A,
        population: usize,
        quorum: impl Fn(usize, usize) -> bool,
        late: LateVotePolicy,
    ) -> Result<VoteOutcome<A>, LedgerError> {
        if let RequestStatus::Resolved(final_answer) = &self.status {
            match late {
                LateVotePolicy::Reject => return Err(LedgerError::RequestAlreadyResolved),
                LateVotePolicy::Audit => {
                    if self.has_voted(voter) {
                        return Err(LedgerError::DuplicateVote(voter.to_string()));
                    }
                    let final_answer = final_answer.clone();
                    self.ballots.entry(answer).or_default().insert(voter.clone());
                    return Ok(VoteOutcome::Ignored { final_answer });
                }
            }
        }

        if self.has_voted(voter) {
            return Err(LedgerError::DuplicateVote(voter.to_string()));
        }

        let set = self.ballots.entry(answer.clone()).or_default();
        set.insert(voter.clone());
        let votes = set.len();

        if quorum(votes, population) {
            self.status = RequestStatus::Resolved(answer.clone());
            Ok(VoteOutcome::Resolved { answer, votes })
        } else {
            Ok(VoteOutcome::Pending { votes })
        }
    }
}
