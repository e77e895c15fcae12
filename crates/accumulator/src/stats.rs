//! Running byte counters of a calibration run.

/// Cumulative counters tracked by the [Accumulator](crate::Accumulator).
///
/// An epoch is the span between two channel resets. `epoch_*` counters cover the current epoch
/// only, every other counter spans the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningStats {
    /// Chargeable transaction bytes of every block accepted by a channel.
    pub processed_tx_bytes: u64,
    /// Chargeable transaction bytes accepted in the current epoch.
    pub epoch_tx_bytes: u64,
    /// The value of `processed_tx_bytes` at the most recent flush.
    pub flushed_tx_bytes: u64,
    /// Frame bytes emitted by every flush so far.
    pub flushed_frame_bytes: u64,
    /// Blocks accepted by a channel.
    pub blocks_processed: u64,
    /// Blocks accepted in the current epoch.
    pub epoch_blocks: u64,
    /// The number of times a channel was flushed into frames.
    pub flushes: u64,
}

impl RunningStats {
    /// Records a block accepted into the current epoch.
    pub fn record_block(&mut self, tx_bytes: u64) {
        self.processed_tx_bytes += tx_bytes;
        self.epoch_tx_bytes += tx_bytes;
        self.blocks_processed += 1;
        self.epoch_blocks += 1;
    }

    /// Records a flush that emitted `frame_bytes` and starts a new epoch.
    pub fn record_flush(&mut self, frame_bytes: u64) {
        self.flushed_frame_bytes += frame_bytes;
        self.flushed_tx_bytes = self.processed_tx_bytes;
        self.flushes += 1;
        self.epoch_tx_bytes = 0;
        self.epoch_blocks = 0;
    }

    /// Returns `true` if no block was accepted since the last flush.
    pub const fn epoch_is_empty(&self) -> bool {
        self.epoch_blocks == 0
    }

    /// Returns the ratio of emitted frame bytes to flushed transaction bytes.
    ///
    /// Returns [f64::NAN] when no transaction bytes were flushed.
    pub fn ratio(&self) -> f64 {
        if self.flushed_tx_bytes == 0 {
            return f64::NAN;
        }
        self.flushed_frame_bytes as f64 / self.flushed_tx_bytes as f64
    }
}
