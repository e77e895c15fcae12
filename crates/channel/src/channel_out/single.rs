//! A channel output of singular batches.

use super::{BlockAdded, FullReason};
use crate::{
    encode_batch_data, encode_single_batch, ChannelBuilderError, ChannelCompressor, ChannelConfig,
    CompressorError, CompressorWriter,
};
use blobcal_primitives::{Block, BlockTransaction};

/// Streams one singular batch per block into the configured [ChannelCompressor].
#[derive(Debug)]
pub struct SingleChannelOut {
    compressor: ChannelCompressor,
    max_rlp_bytes: u64,
    rlp_length: u64,
}

impl SingleChannelOut {
    /// Creates an empty [SingleChannelOut].
    pub fn new(cfg: &ChannelConfig) -> Self {
        Self {
            compressor: ChannelCompressor::from(cfg),
            max_rlp_bytes: cfg.max_rlp_bytes_per_channel,
            rlp_length: 0,
        }
    }

    /// Adds a block as a singular batch.
    pub fn add_block<T: BlockTransaction>(
        &mut self,
        block: &Block<T>,
    ) -> Result<BlockAdded, ChannelBuilderError> {
        let data = encode_batch_data(&encode_single_batch(block));
        if self.rlp_length + data.len() as u64 > self.max_rlp_bytes {
            return Ok(BlockAdded::Refused(FullReason::MaxRlpBytes));
        }

        match self.compressor.write(&data) {
            Ok(_) => {
                self.rlp_length += data.len() as u64;
                Ok(BlockAdded::Added)
            }
            Err(CompressorError::Full) => Ok(BlockAdded::Refused(FullReason::CompressorFull)),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the uncompressed batch bytes written.
    pub const fn input_bytes(&self) -> u64 {
        self.rlp_length
    }

    /// Closes the compressor.
    pub fn close(&mut self) -> Result<(), ChannelBuilderError> {
        Ok(self.compressor.close()?)
    }

    /// Resets the compressor.
    pub fn reset(&mut self) {
        self.compressor.reset();
        self.rlp_length = 0;
    }

    /// Returns the compressed bytes ready to be read.
    pub fn ready_bytes(&self) -> usize {
        self.compressor.len()
    }

    /// Reads compressed data into the given buffer.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelBuilderError> {
        Ok(self.compressor.read(buf)?)
    }
}
