//! Raw Span Batch Payload

use super::{write_uvarint, SpanBatchBits, SpanBatchTransactions};
use crate::SpanBatchError;
use blobcal_primitives::params::MAX_SPAN_BATCH_ELEMENTS;

/// Span Batch Payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanBatchPayload {
    /// Number of L2 blocks in the span
    pub block_count: u64,
    /// Standard span-batch bitlist of blocks whose L1 origin advanced
    pub origin_bits: SpanBatchBits,
    /// Number of transactions in each L2 block
    pub block_tx_counts: Vec<u64>,
    /// Transactions encoded in SpanBatch specs
    pub txs: SpanBatchTransactions,
}

impl SpanBatchPayload {
    /// Encodes the [SpanBatchPayload] into a writer.
    pub fn encode_payload(&self, w: &mut Vec<u8>) -> Result<(), SpanBatchError> {
        if self.block_count > MAX_SPAN_BATCH_ELEMENTS {
            return Err(SpanBatchError::TooBigSpanBatchSize);
        }
        write_uvarint(w, self.block_count);
        self.origin_bits.encode(w, self.block_count as usize)?;
        for count in &self.block_tx_counts {
            write_uvarint(w, *count);
        }
        self.txs.encode(w)
    }
}
