//! The [SpanBatch] a span channel accumulates blocks into.

use super::{SpanBatchPayload, SpanBatchPrefix, SpanBatchTransactions};
use crate::SpanBatchError;
use blobcal_primitives::{params::SPAN_BATCH_TYPE, Block, BlockTransaction};

/// A span of consecutive L2 blocks packed as one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanBatch {
    /// The L2 chain id replay protected transactions must be signed for.
    chain_id: u64,
    /// The L2 genesis timestamp the first block's timestamp is relative to.
    genesis_timestamp: u64,
    /// The prefix fields.
    prefix: SpanBatchPrefix,
    /// The payload fields.
    payload: SpanBatchPayload,
    /// The timestamp of the last block.
    last_timestamp: u64,
}

impl SpanBatch {
    /// Creates an empty [SpanBatch].
    pub fn new(chain_id: u64, genesis_timestamp: u64) -> Self {
        Self {
            chain_id,
            genesis_timestamp,
            prefix: SpanBatchPrefix::default(),
            payload: SpanBatchPayload::default(),
            last_timestamp: 0,
        }
    }

    /// Returns the number of blocks in the span.
    pub const fn block_count(&self) -> u64 {
        self.payload.block_count
    }

    /// Returns the L2 chain id of the span.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Appends a block to the end of the span.
    ///
    /// The block must carry its L1 origin and must not be older than the last block. A rejected
    /// block leaves the span unchanged.
    pub fn append_block<T: BlockTransaction>(
        &mut self,
        block: &Block<T>,
    ) -> Result<(), SpanBatchError> {
        let origin = block.l1_origin.ok_or(SpanBatchError::MissingL1Origin(block.number))?;
        let index = self.payload.block_count as usize;
        let rel_timestamp = if index == 0 {
            Some(
                block
                    .timestamp
                    .checked_sub(self.genesis_timestamp)
                    .ok_or(SpanBatchError::BeforeGenesis(block.timestamp))?,
            )
        } else if block.timestamp < self.last_timestamp {
            return Err(SpanBatchError::OutOfOrder {
                number: block.number,
                timestamp: block.timestamp,
                last: self.last_timestamp,
            });
        } else {
            None
        };

        let mut txs = SpanBatchTransactions::default();
        for tx in block.chargeable_transactions() {
            txs.add_tx(&tx.encoded_2718(), self.chain_id)?;
        }

        let origin_changed = match rel_timestamp {
            Some(rel_timestamp) => {
                self.prefix.rel_timestamp = rel_timestamp;
                self.prefix.parent_check.copy_from_slice(&block.parent_hash[..20]);
                origin.sequence_number == 0
            }
            None => self.prefix.l1_origin_num < origin.number,
        };
        self.payload.origin_bits.set_bit(index, origin_changed);
        self.prefix.l1_origin_num = origin.number;
        self.prefix.l1_origin_check.copy_from_slice(&origin.hash[..20]);

        self.payload.block_tx_counts.push(txs.total_block_tx_count);
        self.payload.txs.append(txs);
        self.payload.block_count += 1;
        self.last_timestamp = block.timestamp;
        Ok(())
    }

    /// Encodes the span as `SPAN_BATCH_TYPE ++ prefix ++ payload`.
    pub fn encode(&self) -> Result<Vec<u8>, SpanBatchError> {
        if self.payload.block_count == 0 {
            return Err(SpanBatchError::EmptySpanBatch);
        }
        let mut w = vec![SPAN_BATCH_TYPE];
        self.prefix.encode_prefix(&mut w);
        self.payload.encode_payload(&mut w)?;
        Ok(w)
    }

    /// Drops every block, keeping the chain id and genesis timestamp.
    pub fn reset(&mut self) {
        *self = Self::new(self.chain_id, self.genesis_timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{eip1559_tx, legacy_tx, span_block, TEST_CHAIN_ID};
    use blobcal_primitives::{test_utils::TestTransaction, L1Origin};

    #[test]
    fn test_encode_empty_span() {
        let span = SpanBatch::new(TEST_CHAIN_ID, 0);
        assert_eq!(span.encode(), Err(SpanBatchError::EmptySpanBatch));
    }

    #[test]
    fn test_encode_single_empty_block() {
        let mut span = SpanBatch::new(TEST_CHAIN_ID, 0);
        let block = span_block(1, 0, vec![]);
        span.append_block(&block).unwrap();
        let origin = block.l1_origin.unwrap();

        let encoded = span.encode().unwrap();
        let mut expected = vec![SPAN_BATCH_TYPE];
        // Relative timestamp and L1 origin number.
        expected.push(block.timestamp as u8);
        expected.push(origin.number as u8);
        expected.extend_from_slice(&block.parent_hash[..20]);
        expected.extend_from_slice(&origin.hash[..20]);
        // One block opening a new epoch, holding no transactions.
        expected.extend_from_slice(&[0x01, 0x01, 0x00]);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_origin_bits_and_checks() {
        let mut span = SpanBatch::new(TEST_CHAIN_ID, 0);
        // Mid-epoch first block, then one block in the same epoch, then a new epoch.
        let first = span_block(10, 1, vec![eip1559_tx(0, 8)]);
        let second = span_block(11, 2, vec![legacy_tx(1, 8), eip1559_tx(2, 8)]);
        let third = span_block(12, 0, vec![]).with_l1_origin(L1Origin {
            number: first.l1_origin.unwrap().number + 1,
            ..first.l1_origin.unwrap()
        });
        for block in [&first, &second, &third] {
            span.append_block(block).unwrap();
        }

        assert_eq!(span.block_count(), 3);
        assert_eq!(span.prefix.parent_check, first.parent_hash[..20]);
        assert_eq!(span.prefix.rel_timestamp, first.timestamp);
        assert_eq!(span.prefix.l1_origin_num, third.l1_origin.unwrap().number);
        assert!(!span.payload.origin_bits.get_bit(0));
        assert!(!span.payload.origin_bits.get_bit(1));
        assert!(span.payload.origin_bits.get_bit(2));
        assert_eq!(span.payload.block_tx_counts, vec![1, 2, 0]);
        assert_eq!(span.payload.txs.total_block_tx_count, 3);
        assert_eq!(span.payload.txs.tx_nonces, vec![0, 1, 2]);
    }

    #[test]
    fn test_deposits_are_skipped() {
        let mut span = SpanBatch::new(TEST_CHAIN_ID, 0);
        let mut block = span_block(1, 0, vec![eip1559_tx(0, 1)]);
        block.transactions.insert(0, crate::test_utils::l1_info_tx());
        span.append_block(&block).unwrap();
        assert_eq!(span.payload.block_tx_counts, vec![1]);
    }

    #[test]
    fn test_rejected_block_leaves_span_unchanged() {
        // Unprotected legacy transactions are valid on any chain.
        let mut span = SpanBatch::new(10, 0);
        span.append_block(&span_block(5, 0, vec![legacy_tx(0, 4)])).unwrap();
        let before = span.clone();

        let missing = Block::new(6, 12, vec![legacy_tx(1, 4)]);
        assert_eq!(span.append_block(&missing), Err(SpanBatchError::MissingL1Origin(6)));

        let older = span_block(4, 0, vec![]);
        assert!(matches!(span.append_block(&older), Err(SpanBatchError::OutOfOrder { .. })));

        let foreign = span_block(6, 1, vec![legacy_tx(1, 4), eip1559_tx(2, 4)]);
        assert_eq!(
            span.append_block(&foreign),
            Err(SpanBatchError::ChainIdMismatch { expected: 10, found: Some(TEST_CHAIN_ID) })
        );

        assert_eq!(span, before);
    }

    #[test]
    fn test_before_genesis() {
        let mut span = SpanBatch::new(TEST_CHAIN_ID, u64::MAX);
        let block = span_block(1, 0, vec![]);
        assert_eq!(span.append_block(&block), Err(SpanBatchError::BeforeGenesis(block.timestamp)));
    }

    #[test]
    fn test_opaque_transaction_is_invalid() {
        let mut span = SpanBatch::new(TEST_CHAIN_ID, 0);
        let block = Block::new(1, 2, vec![TestTransaction::user(10)])
            .with_l1_origin(L1Origin::default());
        assert!(matches!(span.append_block(&block), Err(SpanBatchError::InvalidTransaction(_))));
    }

    #[test]
    fn test_reset() {
        let mut span = SpanBatch::new(TEST_CHAIN_ID, 7);
        span.append_block(&span_block(5, 0, vec![])).unwrap();
        span.reset();
        assert_eq!(span, SpanBatch::new(TEST_CHAIN_ID, 7));
    }
}
