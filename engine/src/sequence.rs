//! Sequence reconciliation against the node's view of an account.

use tracing::debug;

use crate::report::SubmissionOutcome;
use crate::{Error, Result};

const MISMATCH_PAT: &str = "account sequence mismatch";
const EXPECTED_PAT: &str = "expected ";

/// Classification of a submission-time response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The operation was accepted for mempool inclusion.
    Accepted,
    /// The operation was rejected for a reason other than a sequence
    /// mismatch.
    Rejected,
    /// The node disagreed about the sequence and revealed the value it
    /// expects.
    SequenceMismatch {
        /// The authoritative sequence value taken from the node's log.
        expected: u64,
    },
}

/// Classify a submission response.
///
/// This is the single place that scans the node's free-text log; it is an
/// ad-hoc structured-error channel disguised as text, so if the upstream
/// protocol ever grows a structured error code, only this function changes.
///
/// A mismatch takes precedence over the response code: a log carrying the
/// mismatch pattern classifies as [`Verdict::SequenceMismatch`] even when
/// the code claims acceptance. A mismatch whose expected value cannot be
/// parsed is fatal, since continuing would submit with an unknown-quality
/// sequence.
pub fn classify(code: u32, log: &str) -> Result<Verdict> {
    if log.contains(MISMATCH_PAT) {
        let expected = extract_expected(log)?;
        return Ok(Verdict::SequenceMismatch { expected });
    }

    if code == 0 {
        Ok(Verdict::Accepted)
    } else {
        Ok(Verdict::Rejected)
    }
}

fn extract_expected(log: &str) -> Result<u64> {
    let (_, rest) = log
        .split_once(EXPECTED_PAT)
        .ok_or_else(|| Error::SequenceParsingFailed(log.to_owned()))?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end]
        .parse()
        .map_err(|_| Error::SequenceParsingFailed(log.to_owned()))
}

/// Owns the mutable `{sequence, account_number}` pair for one account.
///
/// No other component mutates the account; the round loop reaches it only
/// through [`SequenceTracker::advise`] and [`SequenceTracker::resync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTracker {
    sequence: u64,
    account_number: u64,
}

impl SequenceTracker {
    /// Create a tracker from the chain's current view of the account.
    pub fn new(sequence: u64, account_number: u64) -> Self {
        SequenceTracker {
            sequence,
            account_number,
        }
    }

    /// The sequence value to embed in the next operation.
    pub fn current(&self) -> u64 {
        self.sequence
    }

    /// The chain-assigned account number.
    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    /// Unconditionally overwrite local state with the chain's view.
    pub fn resync(&mut self, sequence: u64, account_number: u64) {
        self.sequence = sequence;
        self.account_number = account_number;
    }

    /// Reconcile local state with a submission outcome.
    ///
    /// A detected mismatch overwrites the sequence with the value the node
    /// expects; any other outcome advances it by one. Transport errors never
    /// reach this method, so a failed submission leaves the sequence
    /// untouched.
    pub fn advise(&mut self, outcome: &SubmissionOutcome) -> Result<Verdict> {
        let verdict = classify(outcome.code, &outcome.log)?;
        match verdict {
            Verdict::SequenceMismatch { expected } => {
                debug!(
                    had = self.sequence,
                    expected, "sequence corrected from node log"
                );
                self.sequence = expected;
            }
            Verdict::Accepted | Verdict::Rejected => {
                self.sequence += 1;
            }
        }
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(code: u32, log: &str) -> SubmissionOutcome {
        SubmissionOutcome {
            round: 0,
            payload_id: 1,
            code,
            log: log.to_owned(),
            hash: None,
        }
    }

    #[test]
    fn accepted_outcome_increments_sequence() {
        let mut tracker = SequenceTracker::new(5, 7);
        let verdict = tracker.advise(&outcome(0, "")).unwrap();
        assert_eq!(verdict, Verdict::Accepted);
        assert_eq!(tracker.current(), 6);
        assert_eq!(tracker.account_number(), 7);
    }

    #[test]
    fn mismatch_overwrites_sequence_regardless_of_prior_value() {
        let log = "account sequence mismatch, expected 42, got 17: incorrect account sequence";
        for prior in [0, 17, 1000] {
            let mut tracker = SequenceTracker::new(prior, 7);
            let verdict = tracker.advise(&outcome(32, log)).unwrap();
            assert_eq!(verdict, Verdict::SequenceMismatch { expected: 42 });
            assert_eq!(tracker.current(), 42);
        }
    }

    #[test]
    fn mismatch_takes_precedence_over_accepted_code() {
        let log = "account sequence mismatch, expected 9";
        let mut tracker = SequenceTracker::new(5, 7);
        let verdict = tracker.advise(&outcome(0, log)).unwrap();
        assert_eq!(verdict, Verdict::SequenceMismatch { expected: 9 });
        assert_eq!(tracker.current(), 9);
    }

    #[test]
    fn mismatch_log_without_trailing_comma_parses() {
        let verdict = classify(32, "account sequence mismatch, expected 9").unwrap();
        assert_eq!(verdict, Verdict::SequenceMismatch { expected: 9 });
    }

    #[test]
    fn unparseable_expected_value_is_fatal() {
        let mut tracker = SequenceTracker::new(5, 7);

        let err = tracker
            .advise(&outcome(32, "account sequence mismatch, expected soon"))
            .unwrap_err();
        assert!(matches!(err, Error::SequenceParsingFailed(_)));

        let err = tracker
            .advise(&outcome(32, "account sequence mismatch"))
            .unwrap_err();
        assert!(matches!(err, Error::SequenceParsingFailed(_)));

        // A failed classification must not move the sequence.
        assert_eq!(tracker.current(), 5);
    }

    #[test]
    fn other_rejections_still_advance_the_sequence() {
        let mut tracker = SequenceTracker::new(5, 7);
        let verdict = tracker.advise(&outcome(13, "insufficient fee")).unwrap();
        assert_eq!(verdict, Verdict::Rejected);
        assert_eq!(tracker.current(), 6);
    }

    #[test]
    fn resync_overwrites_both_fields() {
        let mut tracker = SequenceTracker::new(5, 7);
        tracker.resync(99, 8);
        assert_eq!(tracker.current(), 99);
        assert_eq!(tracker.account_number(), 8);
    }
}
