//! Run accounting and the end-of-run summary.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use floodgate_types::Hash;

/// The node's answer to a single submission that reached it.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// Zero-based round index the submission belongs to.
    pub round: u32,
    /// Identifier of the payload variant that was submitted.
    pub payload_id: u64,
    /// Response code; zero means accepted.
    pub code: u32,
    /// Free-text log attached to the response.
    pub log: String,
    /// Operation hash, when the node returned one.
    pub hash: Option<Hash>,
}

/// Accumulates per-submission results across a whole run.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    successful: u64,
    failed: u64,
    response_codes: BTreeMap<u32, u64>,
    accepted_hashes: Vec<Hash>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        ResultAggregator::default()
    }

    /// Record a submission the node answered, whatever the code.
    pub fn record_outcome(&mut self, outcome: &SubmissionOutcome) {
        self.successful += 1;
        *self.response_codes.entry(outcome.code).or_insert(0) += 1;
        if outcome.code == 0 {
            if let Some(hash) = outcome.hash {
                self.accepted_hashes.push(hash);
            }
        }
    }

    /// Record a submission that never produced a node response.
    pub fn record_transport_failure(&mut self) {
        self.failed += 1;
    }

    /// Total submissions attempted so far.
    pub fn attempts(&self) -> u64 {
        self.successful + self.failed
    }

    /// Hashes of submissions accepted at submission time, in submission
    /// order.
    pub fn accepted_hashes(&self) -> &[Hash] {
        &self.accepted_hashes
    }

    /// Close the books, folding in the hashes that later failed execution.
    pub fn into_summary(self, verified_failed: Vec<Hash>) -> RunSummary {
        RunSummary {
            successful: self.successful,
            failed: self.failed,
            response_codes: self.response_codes,
            verified_failed,
        }
    }
}

/// Final report printed at the end of a run.
#[derive(Debug)]
pub struct RunSummary {
    successful: u64,
    failed: u64,
    response_codes: BTreeMap<u32, u64>,
    verified_failed: Vec<Hash>,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.successful + self.failed;
        writeln!(f, "Total operations submitted: {total}")?;
        writeln!(f, "Submissions answered by the node: {}", self.successful)?;
        writeln!(f, "Submissions lost in transport: {}", self.failed)?;
        writeln!(f, "Response code distribution:")?;
        for (code, count) in &self.response_codes {
            let pct = if self.successful == 0 {
                0.0
            } else {
                *count as f64 * 100.0 / self.successful as f64
            };
            writeln!(f, "  code {code}: {count} ({pct:.2}%)")?;
        }
        if self.verified_failed.is_empty() {
            write!(f, "All accepted operations executed successfully")?;
        } else {
            writeln!(
                f,
                "Accepted operations that ultimately failed: {}",
                self.verified_failed.len()
            )?;
            for hash in &self.verified_failed {
                writeln!(f, "  {hash}")?;
            }
        }
        Ok(())
    }
}
