//! The collaborator interfaces consumed by the [Accumulator](crate::Accumulator).

use async_trait::async_trait;
use blobcal_primitives::{Block, BlockTransaction};
use core::fmt::Display;

/// Describes a data source that serves L2 blocks by height.
#[async_trait]
pub trait BlockSource {
    /// The transaction type of the blocks served.
    type Transaction: BlockTransaction + Send;
    /// The error type for the [BlockSource].
    type Error: Display;

    /// Returns the block at the given height, or an error if it cannot be fetched.
    async fn block_by_number(
        &mut self,
        number: u64,
    ) -> Result<Block<Self::Transaction>, Self::Error>;
}

/// The result of offering a block to a [Channel].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome<E> {
    /// The block was accepted into the channel.
    Accepted,
    /// The channel cannot take any more data. The block was not added.
    CapacityExceeded,
    /// The channel failed for a reason unrelated to capacity.
    Fault(E),
}

impl<E> AddOutcome<E> {
    /// Returns `true` if the block was accepted.
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// A capacity-bounded accumulator that packs blocks into output frames.
pub trait Channel {
    /// The error type for the [Channel].
    type Error: Display;

    /// Offers a block to the channel.
    fn add_block<T: BlockTransaction>(&mut self, block: &Block<T>) -> AddOutcome<Self::Error>;

    /// Closes the channel and cuts all pending data into frames.
    fn output_frames(&mut self) -> Result<(), Self::Error>;

    /// Discards all pending state so the channel can be filled again from scratch.
    fn reset(&mut self);

    /// Returns the encoded size of the frames output so far.
    fn output_bytes(&self) -> usize;
}
