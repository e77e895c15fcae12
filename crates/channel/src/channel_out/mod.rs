//! Channel outputs, which batch blocks and hold the compressed channel data.

use crate::{BatchType, ChannelBuilderError, ChannelConfig};
use blobcal_primitives::{Block, BlockTransaction};
use core::fmt;

mod single;
pub use single::SingleChannelOut;

mod span;
pub use span::SpanChannelOut;

/// Why a channel stopped accepting blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullReason {
    /// The compressor reached the target output size.
    CompressorFull,
    /// The uncompressed batch bytes would exceed the per channel limit.
    MaxRlpBytes,
    /// The channel was closed by [Channel::output_frames](blobcal_accumulator::Channel::output_frames).
    Closed,
}

impl fmt::Display for FullReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompressorFull => f.write_str("compressor full"),
            Self::MaxRlpBytes => f.write_str("max rlp bytes per channel reached"),
            Self::Closed => f.write_str("channel closed"),
        }
    }
}

/// The result of adding a block to a channel output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAdded {
    /// The block was added and the channel has room for more.
    Added,
    /// The block was added and filled the channel.
    AddedFull(FullReason),
    /// The block was not added because it does not fit.
    Refused(FullReason),
}

/// Selects between the singular and span batch channel outputs.
#[derive(Debug)]
pub enum ChannelOut {
    /// Every block is its own singular batch.
    Single(SingleChannelOut),
    /// Every block joins one span batch.
    Span(SpanChannelOut),
}

impl ChannelOut {
    /// Creates the channel output for the configured [BatchType].
    pub fn new(cfg: &ChannelConfig) -> Self {
        match cfg.batch_type {
            BatchType::Single => Self::Single(SingleChannelOut::new(cfg)),
            BatchType::Span => Self::Span(SpanChannelOut::new(cfg)),
        }
    }

    /// Adds a block to the channel.
    pub fn add_block<T: BlockTransaction>(
        &mut self,
        block: &Block<T>,
    ) -> Result<BlockAdded, ChannelBuilderError> {
        match self {
            Self::Single(out) => out.add_block(block),
            Self::Span(out) => out.add_block(block),
        }
    }

    /// Returns the uncompressed batch bytes held.
    pub fn input_bytes(&self) -> u64 {
        match self {
            Self::Single(out) => out.input_bytes(),
            Self::Span(out) => out.input_bytes(),
        }
    }

    /// Terminates the compressed stream.
    pub fn close(&mut self) -> Result<(), ChannelBuilderError> {
        match self {
            Self::Single(out) => out.close(),
            Self::Span(out) => out.close(),
        }
    }

    /// Discards every block and starts an empty channel.
    pub fn reset(&mut self) {
        match self {
            Self::Single(out) => out.reset(),
            Self::Span(out) => out.reset(),
        }
    }

    /// Returns the compressed bytes ready to be read.
    pub fn ready_bytes(&self) -> usize {
        match self {
            Self::Single(out) => out.ready_bytes(),
            Self::Span(out) => out.ready_bytes(),
        }
    }

    /// Reads compressed data into the given buffer, returning the number of bytes read.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelBuilderError> {
        match self {
            Self::Single(out) => out.read(buf),
            Self::Span(out) => out.read(buf),
        }
    }
}
