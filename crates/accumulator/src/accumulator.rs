//! Contains the [Accumulator], the block ingestion / channel fill state machine.

use crate::{
    AccumulatorError, AddOutcome, BlockSource, CalibrationConfig, Channel, Report, RunningStats,
};
use chrono::Utc;
use tracing::{debug, info, trace};

/// The state of an [Accumulator].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Blocks are fetched and offered to the current channel.
    Filling,
    /// The current channel refused the block at the cursor and must be flushed and reset.
    Overflowed,
    /// The threshold was reached. Terminal.
    Done,
}

/// The [Accumulator] feeds blocks from a [BlockSource] into a [Channel] until the configured
/// number of chargeable transaction bytes was processed.
///
/// Blocks are processed strictly one at a time. The cursor only advances once a block was
/// accepted, so the block that overflowed a channel is the first one offered to the next.
#[derive(Debug)]
pub struct Accumulator<S, C> {
    /// The run configuration.
    cfg: CalibrationConfig,
    /// The block source.
    source: S,
    /// The live channel.
    channel: C,
    /// The height of the next block to offer.
    cursor: u64,
    /// The current state.
    state: LoopState,
    /// The running counters.
    stats: RunningStats,
}

impl<S, C> Accumulator<S, C>
where
    S: BlockSource,
    C: Channel,
{
    /// Creates a new [Accumulator] positioned at the configured starting block.
    pub fn new(cfg: CalibrationConfig, source: S, channel: C) -> Self {
        let cursor = cfg.starting_block;
        Self { cfg, source, channel, cursor, state: LoopState::Filling, stats: RunningStats::default() }
    }

    /// Returns the current [LoopState].
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Returns the height of the next block to offer.
    pub const fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Returns the [RunningStats].
    pub const fn stats(&self) -> &RunningStats {
        &self.stats
    }

    /// Returns the [CalibrationConfig].
    pub const fn config(&self) -> &CalibrationConfig {
        &self.cfg
    }

    /// Returns a reference to the live channel.
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// Returns a reference to the block source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Performs a single state transition and returns the resulting [LoopState].
    ///
    /// Stepping a [LoopState::Done] accumulator does nothing.
    pub async fn step(&mut self) -> Result<LoopState, AccumulatorError> {
        match self.state {
            LoopState::Filling => self.fill().await?,
            LoopState::Overflowed => self.flush_and_reset()?,
            LoopState::Done => {}
        }
        Ok(self.state)
    }

    /// Steps until [LoopState::Done], then flushes the final channel and returns the [Report].
    pub async fn run(mut self) -> Result<Report, AccumulatorError> {
        while self.step().await? != LoopState::Done {}
        self.finish()
    }

    /// Flushes whatever the final epoch holds and builds the [Report].
    ///
    /// The final channel is flushed so that the reported frame and transaction totals cover
    /// exactly the same blocks.
    pub fn finish(&mut self) -> Result<Report, AccumulatorError> {
        if !self.stats.epoch_is_empty() {
            debug!(target: "accumulator", "Flushing final channel with {} blocks", self.stats.epoch_blocks);
            self.flush_and_reset()?;
        }
        Ok(Report::new(&self.cfg, &self.stats, Utc::now()))
    }

    /// Evaluates the threshold and, if not yet reached, offers the block at the cursor.
    async fn fill(&mut self) -> Result<(), AccumulatorError> {
        if self.stats.processed_tx_bytes >= self.cfg.min_tx_bytes {
            info!(
                target: "accumulator",
                "Processed {} tx bytes, threshold of {} reached",
                self.stats.processed_tx_bytes,
                self.cfg.min_tx_bytes
            );
            self.state = LoopState::Done;
            return Ok(());
        }

        let number = self.cursor;
        let block = self
            .source
            .block_by_number(number)
            .await
            .map_err(|e| AccumulatorError::Source { number, reason: e.to_string() })?;

        match self.channel.add_block(&block) {
            AddOutcome::Accepted => {
                let tx_bytes = block.chargeable_tx_bytes() as u64;
                self.stats.record_block(tx_bytes);
                self.cursor += 1;
                trace!(target: "accumulator", "Added block {} with {} tx bytes", number, tx_bytes);
            }
            AddOutcome::CapacityExceeded => {
                if self.stats.epoch_is_empty() {
                    return Err(AccumulatorError::BlockTooLarge(number));
                }
                debug!(target: "accumulator", "Channel full at block {}", number);
                self.state = LoopState::Overflowed;
            }
            AddOutcome::Fault(e) => {
                return Err(AccumulatorError::ChannelFault { number, reason: e.to_string() });
            }
        }
        Ok(())
    }

    /// Flushes the channel into frames, snapshots the counters and resets the channel.
    fn flush_and_reset(&mut self) -> Result<(), AccumulatorError> {
        info!(target: "accumulator", "Outputting frames for {} blocks", self.stats.epoch_blocks);
        self.channel.output_frames().map_err(|e| AccumulatorError::Flush(e.to_string()))?;
        let frame_bytes = self.channel.output_bytes() as u64;
        self.stats.record_flush(frame_bytes);
        info!(
            target: "accumulator",
            "Processed tx size {}, frame bytes {}, blocks processed {}",
            self.stats.processed_tx_bytes,
            self.stats.flushed_frame_bytes,
            self.stats.blocks_processed
        );
        self.channel.reset();
        self.state = LoopState::Filling;
        Ok(())
    }
}
