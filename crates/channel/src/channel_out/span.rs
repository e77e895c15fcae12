//! A channel output holding one span batch.

use super::{BlockAdded, FullReason};
use crate::{
    encode_batch_data, ChannelBuilderError, ChannelConfig, CompressorWriter, SpanBatch,
    VariantCompressor,
};
use blobcal_primitives::{Block, BlockTransaction};
use tracing::trace;

/// Accumulates every block of the channel into one [SpanBatch].
///
/// A span batch is only compressible as a whole, so every added block re-encodes the batch into
/// the inactive of two buffers. The buffers are swapped so the previous encoding stays around,
/// and a block that pushes the compressed batch past the target is rolled back by swapping them
/// again. Compression is skipped while the uncompressed growth since the last compression cannot
/// reach the target.
#[derive(Debug)]
pub struct SpanChannelOut {
    target: u64,
    max_rlp_bytes: u64,
    batch: SpanBatch,
    rlp: [Vec<u8>; 2],
    active: usize,
    compressor: VariantCompressor,
    /// Whether the compressor holds the active buffer.
    compressed: bool,
    last_compressed_rlp_size: usize,
}

impl SpanChannelOut {
    /// Creates an empty [SpanChannelOut].
    pub fn new(cfg: &ChannelConfig) -> Self {
        Self {
            target: cfg.target_output_size(),
            max_rlp_bytes: cfg.max_rlp_bytes_per_channel,
            batch: SpanBatch::new(cfg.l2_chain_id, cfg.genesis_timestamp),
            rlp: [Vec::new(), Vec::new()],
            active: 0,
            compressor: VariantCompressor::from(cfg.compression_algo),
            compressed: false,
            last_compressed_rlp_size: 0,
        }
    }

    /// Returns the blocks in the span batch.
    pub const fn blocks(&self) -> u64 {
        self.batch.block_count()
    }

    /// Appends a block to the span batch.
    pub fn add_block<T: BlockTransaction>(
        &mut self,
        block: &Block<T>,
    ) -> Result<BlockAdded, ChannelBuilderError> {
        let mut batch = self.batch.clone();
        batch.append_block(block)?;
        let data = encode_batch_data(&batch.encode()?);
        if data.len() as u64 > self.max_rlp_bytes {
            return Ok(BlockAdded::Refused(FullReason::MaxRlpBytes));
        }

        let previous = core::mem::replace(&mut self.batch, batch);
        self.active ^= 1;
        self.rlp[self.active] = data;
        self.compressed = false;

        let rlp_growth = self.rlp[self.active].len().saturating_sub(self.last_compressed_rlp_size);
        if ((self.compressor.len() + rlp_growth) as u64) < self.target {
            return Ok(BlockAdded::Added);
        }

        self.compress()?;
        if (self.compressor.len() as u64) < self.target {
            return Ok(BlockAdded::Added);
        }
        if self.batch.block_count() == 1 {
            return Ok(BlockAdded::AddedFull(FullReason::CompressorFull));
        }

        trace!(target: "channel", number = block.number, "Rolling back span batch");
        self.batch = previous;
        self.active ^= 1;
        self.compress()?;
        Ok(BlockAdded::Refused(FullReason::CompressorFull))
    }

    /// Returns the length of the encoded span batch.
    pub fn input_bytes(&self) -> u64 {
        self.rlp[self.active].len() as u64
    }

    /// Compresses the current span batch if the compressor does not hold it yet.
    pub fn close(&mut self) -> Result<(), ChannelBuilderError> {
        if !self.compressed {
            self.compress()?;
        }
        Ok(())
    }

    /// Drops the span batch and its compressed data.
    pub fn reset(&mut self) {
        self.batch.reset();
        self.rlp.iter_mut().for_each(Vec::clear);
        self.active = 0;
        self.compressor.reset();
        self.compressed = false;
        self.last_compressed_rlp_size = 0;
    }

    /// Returns the compressed bytes ready to be read.
    pub fn ready_bytes(&self) -> usize {
        self.compressor.len()
    }

    /// Reads compressed data into the given buffer.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelBuilderError> {
        Ok(self.compressor.read(buf)?)
    }

    fn compress(&mut self) -> Result<(), ChannelBuilderError> {
        self.compressor.reset();
        self.compressor.write(&self.rlp[self.active])?;
        self.compressor.close()?;
        self.compressed = true;
        self.last_compressed_rlp_size = self.rlp[self.active].len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decompress_zlib,
        test_utils::{eip1559_tx, random_eip1559_tx, span_block, TEST_CHAIN_ID},
        SpanBatchError,
    };
    use blobcal_primitives::test_utils::TestTransaction;
    use op_alloy_consensus::OpTxEnvelope;

    fn span_config(max_frame_size: usize) -> ChannelConfig {
        ChannelConfig { max_frame_size, ..Default::default() }.with_l2_chain_id(TEST_CHAIN_ID)
    }

    fn read_all(out: &mut SpanChannelOut) -> Vec<u8> {
        let mut buf = vec![0u8; out.ready_bytes()];
        let read = out.read(&mut buf).unwrap();
        buf.truncate(read);
        buf
    }

    /// A block with one EIP-1559 transaction carrying `len` bytes of incompressible calldata.
    fn random_block(number: u64, len: usize) -> Block<OpTxEnvelope> {
        span_block(number, 0, vec![random_eip1559_tx(number, len)])
    }

    #[test]
    fn test_close_holds_whole_span() {
        let mut out = SpanChannelOut::new(&span_config(100_000));
        let blocks =
            (1..4).map(|n| span_block(n, n - 1, vec![eip1559_tx(n, 10)])).collect::<Vec<_>>();
        let mut expected = SpanBatch::new(TEST_CHAIN_ID, 0);
        for block in &blocks {
            assert_eq!(out.add_block(block).unwrap(), BlockAdded::Added);
            expected.append_block(block).unwrap();
        }
        // Nothing is compressed until the target comes into reach.
        assert_eq!(out.ready_bytes(), 0);

        out.close().unwrap();
        let expected = encode_batch_data(&expected.encode().unwrap());
        assert_eq!(out.input_bytes(), expected.len() as u64);
        assert_eq!(decompress_zlib(&read_all(&mut out)).unwrap(), expected);
    }

    #[test]
    fn test_overflow_rolls_back_last_block() {
        let mut out = SpanChannelOut::new(&span_config(600));
        let mut accepted = SpanBatch::new(TEST_CHAIN_ID, 0);
        let mut refused = None;
        for number in 1..20 {
            let block = random_block(number, 150);
            match out.add_block(&block).unwrap() {
                BlockAdded::Added => accepted.append_block(&block).unwrap(),
                other => {
                    refused = Some(other);
                    break;
                }
            }
        }
        assert_eq!(refused, Some(BlockAdded::Refused(FullReason::CompressorFull)));
        assert!(accepted.block_count() >= 2);
        assert_eq!(out.blocks(), accepted.block_count());

        out.close().unwrap();
        assert_eq!(
            decompress_zlib(&read_all(&mut out)).unwrap(),
            encode_batch_data(&accepted.encode().unwrap())
        );
    }

    #[test]
    fn test_oversized_first_block_is_kept() {
        let mut out = SpanChannelOut::new(&span_config(200));
        assert_eq!(
            out.add_block(&random_block(1, 1_000)).unwrap(),
            BlockAdded::AddedFull(FullReason::CompressorFull)
        );
        assert_eq!(out.blocks(), 1);
        assert!(out.ready_bytes() > 200);
    }

    #[test]
    fn test_max_rlp_bytes_refuses() {
        let cfg = span_config(100_000).with_max_rlp_bytes_per_channel(400);
        let mut out = SpanChannelOut::new(&cfg);
        assert_eq!(out.add_block(&random_block(1, 50)).unwrap(), BlockAdded::Added);
        let input = out.input_bytes();
        assert_eq!(
            out.add_block(&random_block(2, 200)).unwrap(),
            BlockAdded::Refused(FullReason::MaxRlpBytes)
        );
        assert_eq!(out.input_bytes(), input);
        assert_eq!(out.blocks(), 1);
    }

    #[test]
    fn test_faults() {
        let mut out = SpanChannelOut::new(&span_config(100_000));
        let opaque = Block::new(1, 2, vec![TestTransaction::user(10)])
            .with_l1_origin(Default::default());
        assert!(matches!(
            out.add_block(&opaque),
            Err(ChannelBuilderError::SpanBatch(SpanBatchError::InvalidTransaction(_)))
        ));

        let no_origin = Block::new(1, 2, vec![eip1559_tx(0, 1)]);
        assert_eq!(
            out.add_block(&no_origin).unwrap_err(),
            ChannelBuilderError::SpanBatch(SpanBatchError::MissingL1Origin(1))
        );
        assert_eq!(out.blocks(), 0);
    }

    #[test]
    fn test_reset() {
        let mut out = SpanChannelOut::new(&span_config(100_000));
        out.add_block(&random_block(1, 100)).unwrap();
        out.close().unwrap();
        out.reset();
        assert_eq!(out.blocks(), 0);
        assert_eq!(out.input_bytes(), 0);
        assert_eq!(out.ready_bytes(), 0);

        let block = random_block(7, 10);
        out.add_block(&block).unwrap();
        out.close().unwrap();
        let mut expected = SpanBatch::new(TEST_CHAIN_ID, 0);
        expected.append_block(&block).unwrap();
        assert_eq!(
            decompress_zlib(&read_all(&mut out)).unwrap(),
            encode_batch_data(&expected.encode().unwrap())
        );
    }
}
