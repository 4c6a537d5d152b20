//! Keyed request container — routes votes to the right tally record.

use crate::error::LedgerError;
use crate::request::{LateVotePolicy, Tally, VoteOutcome, VoteRequest};
use std::collections::HashMap;
use std::hash::Hash;
use surety_types::{PartyId, Tick};

/// All voting requests of one protocol, keyed by the subject being voted on.
///
/// `K` is the request key (nominee identity, or flight key + shard index),
/// `A` the candidate-answer type. The two protocols each own one typed
/// ledger; the quorum predicate is supplied per vote so the ledger itself
/// stays policy-free.
#[derive(Clone, Debug)]
pub struct RequestLedger<K, A> {
    requests: HashMap<K, VoteRequest<A>>,
}

impl<K, A> Default for RequestLedger<K, A>
where
    K: Eq + Hash + Clone,
    A: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, A> RequestLedger<K, A>
where
    K: Eq + Hash + Clone,
    A: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            requests: HashMap::new(),
        }
    }

    /// Open a request at `now` if it does not exist yet.
    ///
    /// Idempotent: an existing request (open or resolved) is left untouched.
    /// Returns `true` if a new request was created.
    pub fn open(&mut self, key: K, now: Tick) -> bool {
        if self.requests.contains_key(&key) {
            return false;
        }
        self.requests.insert(key, VoteRequest::new(now));
        true
    }

    /// Cast a vote, creating the request lazily on first sight of the key.
    ///
    /// `quorum(matching_votes, population)` decides resolution; `population`
    /// is whatever live count the calling policy reads at this instant.
    pub fn cast_vote(
        &mut self,
        key: K,
        now: Tick,
        voter: &PartyId,
        answer: A,
        population: usize,
        quorum: impl Fn(usize, usize) -> bool,
        late: LateVotePolicy,
    ) -> Result<VoteOutcome<A>, LedgerError> {
        let request = self
            .requests
            .entry(key)
            .or_insert_with(|| VoteRequest::new(now));
        request.cast(voter, answer, population, quorum, late)
    }

    /// Cast a vote against a request that must already exist.
    ///
    /// Fails with [`LedgerError::UnknownRequest`] if the key was never
    /// opened — a report against a request nobody asked for is meaningless.
    pub fn cast_vote_existing(
        &mut self,
        key: &K,
        voter: &PartyId,
        answer: A,
        population: usize,
        quorum: impl Fn(usize, usize) -> bool,
        late: LateVotePolicy,
    ) -> Result<VoteOutcome<A>, LedgerError> {
        let request = self
            .requests
            .get_mut(key)
            .ok_or(LedgerError::UnknownRequest)?;
        request.cast(voter, answer, population, quorum, late)
    }

    pub fn request(&self, key: &K) -> Option<&VoteRequest<A>> {
        self.requests.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.requests.contains_key(key)
    }

    /// Snapshot of a request's status and per-answer counts.
    pub fn tally(&self, key: &K) -> Option<Tally<A>> {
        self.requests.get(key).map(|r| r.tally())
    }

    /// Total distinct voters on a request. Zero for unknown keys.
    pub fn vote_count(&self, key: &K) -> usize {
        self.requests.get(key).map(|r| r.total_votes()).unwrap_or(0)
    }

    pub fn is_resolved(&self, key: &K) -> bool {
        self.requests.get(key).map(|r| r.is_resolved()).unwrap_or(false)
    }

    pub fn final_answer(&self, key: &K) -> Option<A> {
        self.requests.get(key).and_then(|r| r.final_answer().cloned())
    }

    /// Number of requests ever opened.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Monitoring hook: keys of requests still open after `max_age_ticks`.
    ///
    /// The core never expires a request on its own; the orchestration layer
    /// polls this to flag candidates for manual intervention.
    pub fn open_requests_older_than(&self, now: Tick, max_age_ticks: u64) -> Vec<K> {
        self.requests
            .iter()
            .filter(|(_, r)| !r.is_resolved() && r.opened_at.elapsed_since(now) > max_age_ticks)
            .map(|(k, _)| k.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(name: &str) -> PartyId {
        PartyId::new(name)
    }

    fn at_least_three(count: usize, _population: usize) -> bool {
        count >= 3
    }

    #[test]
    fn open_is_idempotent() {
        let mut ledger: RequestLedger<&str, u8> = RequestLedger::new();
        assert!(ledger.open("flight-1", Tick::new(1)));
        assert!(!ledger.open("flight-1", Tick::new(9)));
        assert_eq!(ledger.request(&"flight-1").unwrap().opened_at, Tick::new(1));
    }

    #[test]
    fn cast_vote_creates_request_lazily() {
        let mut ledger: RequestLedger<&str, u8> = RequestLedger::new();
        let out = ledger
            .cast_vote(
                "nominee-5",
                Tick::new(4),
                &voter("a"),
                1,
                10,
                at_least_three,
                LateVotePolicy::Reject,
            )
            .unwrap();

        assert_eq!(out, VoteOutcome::Pending { votes: 1 });
        assert!(ledger.contains(&"nominee-5"));
        assert_eq!(ledger.request(&"nominee-5").unwrap().opened_at, Tick::new(4));
    }

    #[test]
    fn cast_vote_existing_requires_open_request() {
        let mut ledger: RequestLedger<&str, u8> = RequestLedger::new();
        let err = ledger
            .cast_vote_existing(
                &"never-opened",
                &voter("a"),
                1,
                10,
                at_least_three,
                LateVotePolicy::Audit,
            )
            .unwrap_err();
        assert_eq!(err, LedgerError::UnknownRequest);
        assert!(ledger.is_empty());
    }

    #[test]
    fn quorum_resolution_is_terminal() {
        let mut ledger: RequestLedger<&str, u8> = RequestLedger::new();
        ledger.open("flight-1", Tick::ZERO);
        for name in ["a", "b"] {
            ledger
                .cast_vote_existing(
                    &"flight-1",
                    &voter(name),
                    20,
                    0,
                    at_least_three,
                    LateVotePolicy::Audit,
                )
                .unwrap();
        }
        assert!(!ledger.is_resolved(&"flight-1"));

        let out = ledger
            .cast_vote_existing(
                &"flight-1",
                &voter("c"),
                20,
                0,
                at_least_three,
                LateVotePolicy::Audit,
            )
            .unwrap();
        assert_eq!(out, VoteOutcome::Resolved { answer: 20, votes: 3 });
        assert_eq!(ledger.final_answer(&"flight-1"), Some(20));

        // A later conflicting report cannot move the answer.
        let out = ledger
            .cast_vote_existing(
                &"flight-1",
                &voter("d"),
                10,
                0,
                at_least_three,
                LateVotePolicy::Audit,
            )
            .unwrap();
        assert_eq!(out, VoteOutcome::Ignored { final_answer: 20 });
        assert_eq!(ledger.final_answer(&"flight-1"), Some(20));
    }

    #[test]
    fn tally_reports_counts_per_answer() {
        let mut ledger: RequestLedger<&str, u8> = RequestLedger::new();
        ledger.open("flight-1", Tick::ZERO);
        ledger
            .cast_vote_existing(&"flight-1", &voter("a"), 20, 0, at_least_three, LateVotePolicy::Audit)
            .unwrap();
        ledger
            .cast_vote_existing(&"flight-1", &voter("b"), 10, 0, at_least_three, LateVotePolicy::Audit)
            .unwrap();

        let tally = ledger.tally(&"flight-1").unwrap();
        assert_eq!(tally.status, crate::request::RequestStatus::Open);
        let mut counts = tally.counts;
        counts.sort();
        assert_eq!(counts, vec![(10, 1), (20, 1)]);
        assert_eq!(ledger.vote_count(&"flight-1"), 2);
    }

    #[test]
    fn stale_open_requests_reported() {
        let mut ledger: RequestLedger<&str, u8> = RequestLedger::new();
        ledger.open("old", Tick::new(0));
        ledger.open("young", Tick::new(90));
        ledger.open("resolved", Tick::new(0));
        ledger
            .cast_vote_existing(
                &"resolved",
                &voter("a"),
                1,
                0,
                |count, _| count >= 1,
                LateVotePolicy::Reject,
            )
            .unwrap();

        let stale = ledger.open_requests_older_than(Tick::new(100), 50);
        assert_eq!(stale, vec!["old"]);
    }
}
