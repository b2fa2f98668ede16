//! The floodgate submission engine.
//!
//! Repeatedly submits signed swap operations against a remote node while
//! keeping a single account's sequence number synchronized with the node's
//! view of it. The node is an external, eventually-consistent authority that
//! only reveals the authoritative counter value inside free-text rejection
//! logs, so the engine runs an optimistic-concurrency protocol: assume the
//! local counter is right, submit, and resynchronize from the rejection
//! message whenever the assumption is falsified.
//!
//! Submissions happen in block-height-aligned rounds with growing batch
//! sizes, and submission-time acceptance is reconciled against the eventual
//! on-chain outcome after the last round.

mod error;
mod node;
mod report;
mod round;
mod sequence;
mod signer;
mod swap;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::error::{Error, Result};
pub use crate::node::{Endpoint, EndpointRegistry, HttpNode, NodeClient};
pub use crate::report::{ResultAggregator, RunSummary, SubmissionOutcome};
pub use crate::round::{RoundScheduler, SchedulerConfig};
pub use crate::sequence::{classify, SequenceTracker, Verdict};
pub use crate::signer::Wallet;
pub use crate::swap::{OperationBuilder, SwapBuilder, SwapConfig};
pub use crate::verify::verify_accepted;
