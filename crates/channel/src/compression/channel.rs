//! The capacity strategy a channel compresses through.

use crate::{
    ChannelConfig, CompressorKind, CompressorResult, CompressorWriter, RatioCompressor,
    ShadowCompressor,
};

/// Selects between the [ShadowCompressor] and the [RatioCompressor].
#[derive(Debug)]
pub enum ChannelCompressor {
    /// Exact size tracking.
    Shadow(ShadowCompressor),
    /// Ratio based estimation.
    Ratio(RatioCompressor),
}

impl From<&ChannelConfig> for ChannelCompressor {
    fn from(cfg: &ChannelConfig) -> Self {
        let target = cfg.target_output_size();
        match cfg.compressor_kind {
            CompressorKind::Shadow => {
                Self::Shadow(ShadowCompressor::new(target, cfg.compression_algo))
            }
            CompressorKind::Ratio => Self::Ratio(RatioCompressor::new(
                target,
                cfg.approx_compr_ratio,
                cfg.compression_algo,
            )),
        }
    }
}

impl CompressorWriter for ChannelCompressor {
    fn write(&mut self, data: &[u8]) -> CompressorResult<usize> {
        match self {
            Self::Shadow(compressor) => compressor.write(data),
            Self::Ratio(compressor) => compressor.write(data),
        }
    }

    fn flush(&mut self) -> CompressorResult<()> {
        match self {
            Self::Shadow(compressor) => compressor.flush(),
            Self::Ratio(compressor) => compressor.flush(),
        }
    }

    fn close(&mut self) -> CompressorResult<()> {
        match self {
            Self::Shadow(compressor) => compressor.close(),
            Self::Ratio(compressor) => compressor.close(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Shadow(compressor) => compressor.reset(),
            Self::Ratio(compressor) => compressor.reset(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Shadow(compressor) => compressor.len(),
            Self::Ratio(compressor) => compressor.len(),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> CompressorResult<usize> {
        match self {
            Self::Shadow(compressor) => compressor.read(buf),
            Self::Ratio(compressor) => compressor.read(buf),
        }
    }
}
