use proptest::prelude::*;

use surety_ledger::{LateVotePolicy, LedgerError, RequestLedger, VoteOutcome};
use surety_types::{PartyId, Tick};

fn voter(n: usize) -> PartyId {
    PartyId::new(format!("voter-{n}"))
}

proptest! {
    /// A voter appears in at most one answer bucket no matter how often
    /// or with which answers it re-votes.
    #[test]
    fn no_double_voting(
        votes in proptest::collection::vec((0usize..8, 0u8..4), 1..64),
    ) {
        let mut ledger: RequestLedger<u8, u8> = RequestLedger::new();
        let mut seen: Vec<usize> = Vec::new();

        for (voter_idx, answer) in votes {
            let result = ledger.cast_vote(
                1,
                Tick::ZERO,
                &voter(voter_idx),
                answer,
                0,
                |_, _| false, // never resolve; exercise the dedupe path only
                LateVotePolicy::Reject,
            );
            if seen.contains(&voter_idx) {
                prop_assert_eq!(
                    result.unwrap_err(),
                    LedgerError::DuplicateVote(format!("voter-{voter_idx}"))
                );
            } else {
                prop_assert!(
                    matches!(result, Ok(VoteOutcome::Pending { .. })),
                    "expected Ok(Pending), got {:?}",
                    result
                );
                seen.push(voter_idx);
            }
        }

        // Total distinct voters equals the number of first-time voters.
        prop_assert_eq!(ledger.vote_count(&1), seen.len());
    }

    /// Once resolved, the final answer never changes regardless of any
    /// further votes under either late-vote policy.
    #[test]
    fn resolved_answer_is_immutable(
        threshold in 1usize..5,
        late_votes in proptest::collection::vec((100usize..120, 0u8..4), 0..32),
        audit in proptest::bool::ANY,
    ) {
        let mut ledger: RequestLedger<u8, u8> = RequestLedger::new();
        let quorum = move |count: usize, _: usize| count >= threshold;
        let policy = if audit { LateVotePolicy::Audit } else { LateVotePolicy::Reject };

        // Drive answer 1 to quorum with distinct voters.
        for n in 0..threshold {
            ledger
                .cast_vote(1, Tick::ZERO, &voter(n), 1, 0, quorum, policy)
                .unwrap();
        }
        prop_assert_eq!(ledger.final_answer(&1), Some(1));

        for (voter_idx, answer) in late_votes {
            let result = ledger.cast_vote(1, Tick::ZERO, &voter(voter_idx), answer, 0, quorum, policy);
            match policy {
                LateVotePolicy::Reject => {
                    prop_assert_eq!(result.unwrap_err(), LedgerError::RequestAlreadyResolved);
                }
                LateVotePolicy::Audit => {
                    if let Ok(outcome) = result {
                        prop_assert_eq!(outcome, VoteOutcome::Ignored { final_answer: 1 });
                    }
                    // Err means this voter already reported; either way the
                    // answer must hold below.
                }
            }
            prop_assert_eq!(ledger.final_answer(&1), Some(1));
        }
    }

    /// The quorum predicate sees the exact matching-answer count, never the
    /// cross-answer total.
    #[test]
    fn quorum_counts_matching_answers_only(
        disagreeing in 1usize..6,
    ) {
        let mut ledger: RequestLedger<u8, u8> = RequestLedger::new();
        let quorum = |count: usize, _: usize| count >= 3;

        // Two voters agree on answer 1, `disagreeing` voters scatter.
        ledger.cast_vote(1, Tick::ZERO, &voter(0), 1, 0, quorum, LateVotePolicy::Audit).unwrap();
        ledger.cast_vote(1, Tick::ZERO, &voter(1), 1, 0, quorum, LateVotePolicy::Audit).unwrap();
        for n in 0..disagreeing {
            ledger.cast_vote(1, Tick::ZERO, &voter(10 + n), 2, 0, quorum, LateVotePolicy::Audit).unwrap();
        }

        // 2 agreeing + up to 5 on another answer: never resolved on answer 1.
        prop_assert!(disagreeing >= 3 || !ledger.is_resolved(&1));

        if disagreeing < 3 {
            // A third agreeing vote resolves to the agreed answer.
            let out = ledger
                .cast_vote(1, Tick::ZERO, &voter(2), 1, 0, quorum, LateVotePolicy::Audit)
                .unwrap();
            prop_assert_eq!(out, VoteOutcome::Resolved { answer: 1, votes: 3 });
        }
    }
}
