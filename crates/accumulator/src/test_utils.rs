//! Test utilities for the accumulator loop.

use crate::{AddOutcome, BlockSource, Channel};
use async_trait::async_trait;
use blobcal_primitives::{
    test_utils::{sized_block, TestTransaction},
    Block, BlockTransaction,
};
use std::collections::HashMap;

/// An error returned by the [TestBlockSource].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestBlockSourceError {
    /// No block is stored at the height.
    #[error("Block {0} not found")]
    BlockNotFound(u64),
    /// A failure was injected at the height.
    #[error("Injected failure at block {0}")]
    Injected(u64),
}

/// A [BlockSource] serving blocks from memory.
#[derive(Debug)]
pub struct TestBlockSource<T = TestTransaction> {
    /// The blocks by height.
    pub blocks: HashMap<u64, Block<T>>,
    /// A height at which fetching fails.
    pub fail_at: Option<u64>,
    /// Every height requested, in order.
    pub fetched: Vec<u64>,
}

impl<T> Default for TestBlockSource<T> {
    fn default() -> Self {
        Self { blocks: HashMap::new(), fail_at: None, fetched: Vec::new() }
    }
}

impl<T> TestBlockSource<T> {
    /// Creates a new [TestBlockSource] from the given blocks.
    pub fn new(blocks: Vec<Block<T>>) -> Self {
        Self { blocks: blocks.into_iter().map(|b| (b.number, b)).collect(), ..Default::default() }
    }

    /// Makes fetching the block at `number` fail.
    pub fn fail_at(mut self, number: u64) -> Self {
        self.fail_at = Some(number);
        self
    }
}

impl TestBlockSource {
    /// Creates a [TestBlockSource] with consecutive blocks from `start`, each holding a single
    /// chargeable transaction of the given size.
    pub fn with_sizes(start: u64, sizes: &[usize]) -> Self {
        Self::new(
            sizes.iter().enumerate().map(|(i, &size)| sized_block(start + i as u64, size)).collect(),
        )
    }
}

#[async_trait]
impl<T> BlockSource for TestBlockSource<T>
where
    T: BlockTransaction + Clone + Send + Sync,
{
    type Transaction = T;
    type Error = TestBlockSourceError;

    async fn block_by_number(
        &mut self,
        number: u64,
    ) -> Result<Block<Self::Transaction>, Self::Error> {
        self.fetched.push(number);
        if self.fail_at == Some(number) {
            return Err(TestBlockSourceError::Injected(number));
        }
        self.blocks.get(&number).cloned().ok_or(TestBlockSourceError::BlockNotFound(number))
    }
}

/// An error returned by the [TestChannel].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestChannelError {
    /// A fault was injected at the height.
    #[error("Injected fault at block {0}")]
    Injected(u64),
}

/// A [Channel] that holds up to `capacity` chargeable bytes and "compresses" at a 1:1 ratio.
#[derive(Debug, Default)]
pub struct TestChannel {
    /// The capacity in chargeable bytes.
    pub capacity: usize,
    /// The chargeable bytes pending in the channel.
    pub pending: usize,
    /// The bytes output by the last flush.
    pub output: usize,
    /// Whether the channel was closed by a flush.
    pub closed: bool,
    /// A height at which adding faults.
    pub fault_at: Option<u64>,
    /// Every height offered, in order.
    pub added: Vec<u64>,
    /// Every height accepted, in order.
    pub accepted: Vec<u64>,
    /// The number of resets.
    pub resets: usize,
}

impl TestChannel {
    /// Creates a new [TestChannel] with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity, ..Default::default() }
    }

    /// Makes adding the block at `number` fault.
    pub fn fault_at(mut self, number: u64) -> Self {
        self.fault_at = Some(number);
        self
    }
}

impl Channel for TestChannel {
    type Error = TestChannelError;

    fn add_block<T: BlockTransaction>(&mut self, block: &Block<T>) -> AddOutcome<Self::Error> {
        self.added.push(block.number);
        if self.fault_at == Some(block.number) {
            return AddOutcome::Fault(TestChannelError::Injected(block.number));
        }
        let size = block.chargeable_tx_bytes();
        if self.closed || self.pending + size > self.capacity {
            return AddOutcome::CapacityExceeded;
        }
        self.pending += size;
        self.accepted.push(block.number);
        AddOutcome::Accepted
    }

    fn output_frames(&mut self) -> Result<(), Self::Error> {
        self.output += self.pending;
        self.pending = 0;
        self.closed = true;
        Ok(())
    }

    fn reset(&mut self) {
        self.pending = 0;
        self.output = 0;
        self.closed = false;
        self.resets += 1;
    }

    fn output_bytes(&self) -> usize {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_reset_clears_output() {
        let mut channel = TestChannel::new(100);
        assert!(channel.add_block(&sized_block(0, 60)).is_accepted());
        channel.output_frames().unwrap();
        assert_eq!(channel.output_bytes(), 60);
        channel.reset();
        assert_eq!(channel.output_bytes(), 0);
    }
}
