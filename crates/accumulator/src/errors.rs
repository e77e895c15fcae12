//! Error types for the accumulator loop.

/// A fatal error that aborts a calibration run.
///
/// A channel refusing a block for lack of capacity is not an error; it is consumed by the loop
/// as [AddOutcome::CapacityExceeded](crate::AddOutcome::CapacityExceeded).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccumulatorError {
    /// The block source failed to serve a block.
    #[error("Block source failed at height {number}: {reason}")]
    Source {
        /// The height that was requested.
        number: u64,
        /// The source error.
        reason: String,
    },
    /// The channel failed while adding a block.
    #[error("Channel fault while adding block {number}: {reason}")]
    ChannelFault {
        /// The height of the block being added.
        number: u64,
        /// The channel error.
        reason: String,
    },
    /// The channel failed to output its frames.
    #[error("Failed to output frames: {0}")]
    Flush(String),
    /// The block does not fit into an empty channel, so retrying it can never succeed.
    #[error("Block {0} does not fit into an empty channel")]
    BlockTooLarge(u64),
}
