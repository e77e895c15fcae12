//! Configuration of a [ChannelBuilder](crate::ChannelBuilder).

use crate::{BatchType, ChannelBuilderError, CompressionAlgo, CompressorKind};
use blobcal_primitives::params::{FRAME_V0_OVERHEAD, MAX_BLOB_DATA_SIZE, MAX_RLP_BYTES_PER_CHANNEL};

/// The default assumed compression ratio of the ratio compressor.
pub const DEFAULT_APPROX_COMPR_RATIO: f64 = 0.4;

/// The default L2 chain id span batches are built for, Base mainnet.
pub const DEFAULT_L2_CHAIN_ID: u64 = 8453;

/// The sizing and compression settings of a channel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelConfig {
    /// The maximum encoded size of a single frame.
    pub max_frame_size: usize,
    /// The number of frames a channel targets.
    pub target_num_frames: usize,
    /// The capacity strategy.
    pub compressor_kind: CompressorKind,
    /// The compression ratio assumed by [CompressorKind::Ratio].
    pub approx_compr_ratio: f64,
    /// The compression algorithm.
    pub compression_algo: CompressionAlgo,
    /// The maximum uncompressed batch bytes a channel accepts.
    pub max_rlp_bytes_per_channel: u64,
    /// The batch encoding blocks are packed with.
    pub batch_type: BatchType,
    /// The L2 chain id replay protected transactions of a span batch must be signed for.
    pub l2_chain_id: u64,
    /// The L2 genesis timestamp span batch timestamps are relative to.
    pub genesis_timestamp: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::for_blobs(1)
    }
}

impl ChannelConfig {
    /// Returns a [ChannelConfig] whose frames fill `blobs` blobs.
    pub const fn for_blobs(blobs: usize) -> Self {
        Self {
            max_frame_size: MAX_BLOB_DATA_SIZE * blobs,
            target_num_frames: 1,
            compressor_kind: CompressorKind::Shadow,
            approx_compr_ratio: DEFAULT_APPROX_COMPR_RATIO,
            compression_algo: CompressionAlgo::Zlib,
            max_rlp_bytes_per_channel: MAX_RLP_BYTES_PER_CHANNEL,
            batch_type: BatchType::Span,
            l2_chain_id: DEFAULT_L2_CHAIN_ID,
            genesis_timestamp: 0,
        }
    }

    /// Sets the batch encoding.
    pub const fn with_batch_type(mut self, batch_type: BatchType) -> Self {
        self.batch_type = batch_type;
        self
    }

    /// Sets the L2 chain id of span batches.
    pub const fn with_l2_chain_id(mut self, l2_chain_id: u64) -> Self {
        self.l2_chain_id = l2_chain_id;
        self
    }

    /// Sets the maximum uncompressed batch bytes a channel accepts.
    pub const fn with_max_rlp_bytes_per_channel(mut self, max_rlp_bytes: u64) -> Self {
        self.max_rlp_bytes_per_channel = max_rlp_bytes;
        self
    }

    /// Sets the compression algorithm.
    pub const fn with_compression_algo(mut self, algo: CompressionAlgo) -> Self {
        self.compression_algo = algo;
        self
    }

    /// Sets the capacity strategy.
    pub const fn with_compressor_kind(mut self, kind: CompressorKind) -> Self {
        self.compressor_kind = kind;
        self
    }

    /// Sets the compression ratio assumed by [CompressorKind::Ratio].
    pub const fn with_approx_compr_ratio(mut self, ratio: f64) -> Self {
        self.approx_compr_ratio = ratio;
        self
    }

    /// Returns the compressed size a channel targets: the frame data capacity of
    /// `target_num_frames` frames.
    pub const fn target_output_size(&self) -> u64 {
        (self.target_num_frames * self.max_frame_size.saturating_sub(FRAME_V0_OVERHEAD)) as u64
    }

    /// Checks that the configuration can produce frames.
    pub fn check(&self) -> Result<(), ChannelBuilderError> {
        if self.max_frame_size <= FRAME_V0_OVERHEAD {
            return Err(ChannelBuilderError::MaxFrameSizeTooSmall(self.max_frame_size));
        }
        if self.target_num_frames == 0 {
            return Err(ChannelBuilderError::NoTargetFrames);
        }
        if self.approx_compr_ratio.is_nan() || self.approx_compr_ratio <= 0.0 {
            return Err(ChannelBuilderError::InvalidComprRatio(self.approx_compr_ratio.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ChannelConfig::default();
        assert_eq!(cfg.max_frame_size, 130_044);
        assert_eq!(cfg.target_output_size(), 130_021);
        assert_eq!(cfg.compressor_kind, CompressorKind::Shadow);
        assert_eq!(cfg.compression_algo, CompressionAlgo::Zlib);
        assert_eq!(cfg.batch_type, BatchType::Span);
        assert_eq!(cfg.l2_chain_id, 8453);
        assert_eq!(cfg.genesis_timestamp, 0);
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn test_default_rlp_limit_is_pre_fjord() {
        let cfg = ChannelConfig::default();
        assert_eq!(cfg.max_rlp_bytes_per_channel, 10_000_000);

        let cfg = cfg.with_max_rlp_bytes_per_channel(
            blobcal_primitives::params::FJORD_MAX_RLP_BYTES_PER_CHANNEL,
        );
        assert_eq!(cfg.max_rlp_bytes_per_channel, 100_000_000);
    }

    #[test]
    fn test_builders() {
        let cfg = ChannelConfig::default().with_batch_type(BatchType::Single).with_l2_chain_id(10);
        assert_eq!(cfg.batch_type, BatchType::Single);
        assert_eq!(cfg.l2_chain_id, 10);
    }

    #[test]
    fn test_for_blobs() {
        let cfg = ChannelConfig::for_blobs(6);
        assert_eq!(cfg.max_frame_size, 780_264);
        assert_eq!(cfg.target_output_size(), 780_241);
    }

    #[test]
    fn test_check() {
        let cfg = ChannelConfig { max_frame_size: FRAME_V0_OVERHEAD, ..Default::default() };
        assert_eq!(cfg.check(), Err(ChannelBuilderError::MaxFrameSizeTooSmall(FRAME_V0_OVERHEAD)));

        let cfg = ChannelConfig { target_num_frames: 0, ..Default::default() };
        assert_eq!(cfg.check(), Err(ChannelBuilderError::NoTargetFrames));

        let cfg = ChannelConfig::default().with_approx_compr_ratio(0.0);
        assert!(matches!(cfg.check(), Err(ChannelBuilderError::InvalidComprRatio(_))));
        let cfg = ChannelConfig::default().with_approx_compr_ratio(f64::NAN);
        assert!(cfg.check().is_err());
    }
}
