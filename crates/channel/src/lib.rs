#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod batch;
pub use batch::{encode_batch_data, encode_single_batch, BatchType, SpanBatch};

pub mod builder;
pub use builder::ChannelBuilder;

pub mod channel_out;
pub use channel_out::{BlockAdded, ChannelOut, FullReason, SingleChannelOut, SpanChannelOut};

pub mod compression;
pub use compression::{
    decompress_brotli, decompress_zlib, BrotliCompressor, BrotliLevel, ChannelCompressor,
    CompressionAlgo, CompressorKind, CompressorWriter, RatioCompressor, ShadowCompressor,
    VariantCompressor, ZlibCompressor,
};

pub mod config;
pub use config::{ChannelConfig, DEFAULT_APPROX_COMPR_RATIO, DEFAULT_L2_CHAIN_ID};

pub mod errors;
pub use errors::{
    ChannelBuilderError, CompressorError, CompressorResult, ParseBatchTypeError,
    ParseCompressionError, SpanBatchError,
};

#[cfg(test)]
mod test_utils;

/// Re-export commonly used types and traits.
pub mod prelude {
    pub use crate::{
        BatchType, ChannelBuilder, ChannelBuilderError, ChannelConfig, CompressionAlgo,
        CompressorKind, CompressorWriter,
    };
}
