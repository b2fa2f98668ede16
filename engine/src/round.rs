//! Block-gated round scheduling.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::node::Endpoint;
use crate::report::{ResultAggregator, SubmissionOutcome};
use crate::sequence::Verdict;
use crate::swap::OperationBuilder;
use crate::Result;

const BLOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Knobs for the round loop.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Re-read the account from the chain before each round, discarding any
    /// locally accumulated sequence state.
    pub resync_each_round: bool,
    /// How many times a single payload may be resubmitted after a sequence
    /// correction before the round moves on.
    pub mismatch_retry_limit: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            resync_each_round: true,
            mismatch_retry_limit: 1,
        }
    }
}

enum Phase {
    WaitingForBlock { round: u32 },
    SubmittingBatch { round: u32 },
    RoundComplete { round: u32, height: u64, accepted: u64 },
    Done,
}

/// Drives escalating rounds of submissions, one round per committed block.
///
/// Round `r` (zero-based) submits the first `r + 1` payloads in order, so a
/// run over `n` payloads attempts `n * (n + 1) / 2` submissions total.
pub struct RoundScheduler<B> {
    endpoint: Endpoint,
    builder: B,
    payloads: Vec<u64>,
    config: SchedulerConfig,
    stats: ResultAggregator,
}

impl<B> RoundScheduler<B>
where
    B: OperationBuilder,
{
    pub fn new(
        endpoint: Endpoint,
        builder: B,
        payloads: Vec<u64>,
        config: SchedulerConfig,
    ) -> Self {
        RoundScheduler {
            endpoint,
            builder,
            payloads,
            config,
            stats: ResultAggregator::new(),
        }
    }

    /// Run every round to completion, returning the endpoint and the
    /// accumulated statistics.
    ///
    /// Errors out only on conditions that make further submissions
    /// pointless: a dead node poll or an unparseable sequence correction.
    pub async fn run(mut self) -> Result<(Endpoint, ResultAggregator)> {
        let rounds = self.payloads.len() as u32;
        let mut phase = if rounds == 0 {
            Phase::Done
        } else {
            Phase::WaitingForBlock { round: 0 }
        };

        loop {
            phase = match phase {
                Phase::WaitingForBlock { round } => {
                    self.wait_for_next_block().await?;
                    if self.config.resync_each_round {
                        self.resync_sequence().await?;
                    }
                    Phase::SubmittingBatch { round }
                }
                Phase::SubmittingBatch { round } => {
                    let accepted = self.submit_batch(round).await?;
                    let height = self.endpoint.client.latest_height().await?;
                    Phase::RoundComplete {
                        round,
                        height,
                        accepted,
                    }
                }
                Phase::RoundComplete {
                    round,
                    height,
                    accepted,
                } => {
                    info!(round = round + 1, height, accepted, "round completed");
                    if round + 1 < rounds {
                        Phase::WaitingForBlock { round: round + 1 }
                    } else {
                        Phase::Done
                    }
                }
                Phase::Done => return Ok((self.endpoint, self.stats)),
            };
        }
    }

    /// Block until the node commits a block past the one it is on now.
    async fn wait_for_next_block(&self) -> Result<()> {
        let mut start = self.endpoint.client.latest_height().await?;
        while start == 0 {
            sleep(BLOCK_POLL_INTERVAL).await;
            start = self.endpoint.client.latest_height().await?;
        }
        loop {
            let current = self.endpoint.client.latest_height().await?;
            if current > start {
                debug!(height = current, "new block observed");
                return Ok(());
            }
            sleep(BLOCK_POLL_INTERVAL).await;
        }
    }

    async fn resync_sequence(&mut self) -> Result<()> {
        let account = self
            .endpoint
            .client
            .account_state(&self.endpoint.address)
            .await?;
        self.endpoint
            .tracker
            .resync(account.sequence, account.account_number);
        Ok(())
    }

    /// Submit payloads `0..=round`, returning how many were accepted.
    async fn submit_batch(&mut self, round: u32) -> Result<u64> {
        let mut accepted = 0;
        for i in 0..=round as usize {
            let payload_id = self.payloads[i];
            if self.submit_payload(round, payload_id).await? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Submit one payload, retrying after sequence corrections up to the
    /// configured limit. Returns whether the node accepted it.
    async fn submit_payload(&mut self, round: u32, payload_id: u64) -> Result<bool> {
        let mut attempts_left = self.config.mismatch_retry_limit + 1;

        while attempts_left > 0 {
            attempts_left -= 1;

            let tx_bytes = match self
                .builder
                .build(
                    self.endpoint.tracker.current(),
                    self.endpoint.tracker.account_number(),
                    payload_id,
                )
                .await
            {
                Ok(bytes) => bytes,
                Err(error) => {
                    warn!(payload_id, %error, "failed to build operation");
                    self.stats.record_transport_failure();
                    return Ok(false);
                }
            };

            let resp = match self.endpoint.client.broadcast(tx_bytes).await {
                Ok(resp) => resp,
                Err(error) => {
                    warn!(payload_id, %error, "submission failed before reaching the node");
                    self.stats.record_transport_failure();
                    return Ok(false);
                }
            };

            let outcome = SubmissionOutcome {
                round,
                payload_id,
                code: resp.code,
                log: resp.log.clone(),
                hash: Some(resp.hash),
            };
            self.stats.record_outcome(&outcome);

            match self.endpoint.tracker.advise(&outcome)? {
                Verdict::Accepted => return Ok(true),
                Verdict::Rejected => {
                    debug!(payload_id, code = resp.code, log = %resp.log, "operation rejected");
                    return Ok(false);
                }
                Verdict::SequenceMismatch { expected } => {
                    debug!(payload_id, expected, "resubmitting with corrected sequence");
                }
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::node::{EndpointRegistry, NodeClient};
    use crate::test_utils::{FakeBuilder, FakeNode};
    use crate::Error;
    use floodgate_types::Hash;

    fn endpoint(node: Arc<FakeNode>) -> Endpoint {
        let mut registry = EndpointRegistry::new();
        registry.insert("fake".into(), node as Arc<dyn NodeClient>);
        registry.into_primary().unwrap()
    }

    fn scheduler(
        node: Arc<FakeNode>,
        payloads: Vec<u64>,
        config: SchedulerConfig,
    ) -> (RoundScheduler<FakeBuilder>, FakeBuilder) {
        let builder = FakeBuilder::default();
        let sched = RoundScheduler::new(endpoint(node), builder.clone(), payloads, config);
        (sched, builder)
    }

    #[tokio::test]
    async fn rounds_submit_escalating_payload_prefixes() {
        let node = Arc::new(FakeNode::new());
        let (sched, builder) =
            scheduler(node.clone(), vec![101, 202, 303], SchedulerConfig::default());

        let (_, stats) = sched.run().await.unwrap();

        assert_eq!(stats.attempts(), 6);
        let calls = builder.calls.lock().await;
        let ids: Vec<u64> = calls.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![101, 101, 202, 101, 202, 303]);
        assert_eq!(node.broadcast_calls.lock().await.len(), 6);
    }

    #[tokio::test]
    async fn mismatch_correction_feeds_the_next_submission() {
        let node = Arc::new(FakeNode::new());
        // Round one: corrected to 6, then accepted. Round two: payload 7 is
        // corrected to 9 and accepted on retry, payload 8 sails through.
        node.script_broadcast(32, "account sequence mismatch, expected 6", Hash([1; 32]))
            .await;
        node.script_broadcast(0, "", Hash([2; 32])).await;
        node.script_broadcast(32, "account sequence mismatch, expected 9", Hash([3; 32]))
            .await;
        node.script_broadcast(0, "", Hash([4; 32])).await;
        node.script_broadcast(0, "", Hash([5; 32])).await;

        let config = SchedulerConfig {
            resync_each_round: false,
            ..SchedulerConfig::default()
        };
        let (mut sched, builder) = scheduler(node, vec![7, 8], config);
        sched.endpoint.tracker.resync(5, 1);

        let (endpoint, stats) = sched.run().await.unwrap();

        let calls = builder.calls.lock().await;
        let sequences: Vec<u64> = calls.iter().map(|(seq, _)| *seq).collect();
        assert_eq!(sequences, vec![5, 6, 7, 9, 10]);
        assert_eq!(endpoint.tracker.current(), 11);
        assert_eq!(stats.attempts(), 5);
        assert_eq!(
            stats.accepted_hashes(),
            &[Hash([2; 32]), Hash([4; 32]), Hash([5; 32])]
        );
    }

    #[tokio::test]
    async fn retry_budget_bounds_resubmissions() {
        let node = Arc::new(FakeNode::new());
        // Two corrections in a row; with a budget of one retry the payload
        // is abandoned after the second mismatch.
        node.script_broadcast(32, "account sequence mismatch, expected 3", Hash([1; 32]))
            .await;
        node.script_broadcast(32, "account sequence mismatch, expected 4", Hash([2; 32]))
            .await;

        let config = SchedulerConfig {
            resync_each_round: false,
            mismatch_retry_limit: 1,
        };
        let (sched, _) = scheduler(node.clone(), vec![7], config);

        let (endpoint, stats) = sched.run().await.unwrap();

        assert_eq!(node.broadcast_calls.lock().await.len(), 2);
        assert_eq!(stats.attempts(), 2);
        assert!(stats.accepted_hashes().is_empty());
        // The last correction still lands in the tracker.
        assert_eq!(endpoint.tracker.current(), 4);
    }

    #[tokio::test]
    async fn transport_failure_leaves_sequence_untouched() {
        let node = Arc::new(FakeNode::new());
        node.script_broadcast_error().await;

        let config = SchedulerConfig {
            resync_each_round: false,
            ..SchedulerConfig::default()
        };
        let (mut sched, _) = scheduler(node, vec![7], config);
        sched.endpoint.tracker.resync(5, 1);

        let (endpoint, stats) = sched.run().await.unwrap();

        assert_eq!(endpoint.tracker.current(), 5);
        assert_eq!(stats.attempts(), 1);
        let summary = stats.into_summary(vec![]).to_string();
        assert!(summary.contains("lost in transport: 1"));
    }

    #[tokio::test]
    async fn unparseable_correction_aborts_the_run() {
        let node = Arc::new(FakeNode::new());
        node.script_broadcast(32, "account sequence mismatch, expected soon", Hash([1; 32]))
            .await;

        let (sched, _) = scheduler(node, vec![7], SchedulerConfig::default());
        let err = sched.run().await.unwrap_err();
        assert!(matches!(err, Error::SequenceParsingFailed(_)));
    }

    #[tokio::test]
    async fn round_waits_for_a_strictly_newer_block() {
        let node = Arc::new(FakeNode::new());
        // Zero heights are skipped, then the gate opens only once the
        // height moves past the first nonzero reading.
        node.script_heights([0, 0, 4, 4, 4, 5]).await;

        let (sched, _) = scheduler(node.clone(), vec![7], SchedulerConfig::default());
        let (_, stats) = sched.run().await.unwrap();

        assert_eq!(stats.attempts(), 1);
        assert_eq!(node.broadcast_calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn per_round_resync_discards_local_state() {
        let node = Arc::new(FakeNode::new());
        node.script_account(40, 1).await;

        let (mut sched, builder) = scheduler(node, vec![7], SchedulerConfig::default());
        sched.endpoint.tracker.resync(5, 1);

        let (endpoint, _) = sched.run().await.unwrap();

        let calls = builder.calls.lock().await;
        assert_eq!(calls[0].0, 40);
        assert_eq!(endpoint.tracker.current(), 41);
    }
}
