//! A variant over the streaming compressor implementations.

use crate::{
    BrotliCompressor, CompressionAlgo, CompressorResult, CompressorWriter, ZlibCompressor,
};

/// Wraps the brotli and zlib compressors, implementing [CompressorWriter] itself.
#[derive(Debug)]
pub enum VariantCompressor {
    /// The brotli compressor.
    Brotli(BrotliCompressor),
    /// The zlib compressor.
    Zlib(ZlibCompressor),
}

impl From<CompressionAlgo> for VariantCompressor {
    fn from(algo: CompressionAlgo) -> Self {
        match algo {
            CompressionAlgo::Zlib => Self::Zlib(ZlibCompressor::new()),
            lvl => Self::Brotli(BrotliCompressor::new(lvl)),
        }
    }
}

impl VariantCompressor {
    /// Returns the compressed bytes not yet read.
    pub fn get_compressed(&self) -> &[u8] {
        match self {
            Self::Brotli(compressor) => compressor.get_compressed(),
            Self::Zlib(compressor) => compressor.get_compressed(),
        }
    }
}

impl CompressorWriter for VariantCompressor {
    fn write(&mut self, data: &[u8]) -> CompressorResult<usize> {
        match self {
            Self::Brotli(compressor) => compressor.write(data),
            Self::Zlib(compressor) => compressor.write(data),
        }
    }

    fn flush(&mut self) -> CompressorResult<()> {
        match self {
            Self::Brotli(compressor) => compressor.flush(),
            Self::Zlib(compressor) => compressor.flush(),
        }
    }

    fn close(&mut self) -> CompressorResult<()> {
        match self {
            Self::Brotli(compressor) => compressor.close(),
            Self::Zlib(compressor) => compressor.close(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Brotli(compressor) => compressor.reset(),
            Self::Zlib(compressor) => compressor.reset(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Brotli(compressor) => compressor.len(),
            Self::Zlib(compressor) => compressor.len(),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> CompressorResult<usize> {
        match self {
            Self::Brotli(compressor) => compressor.read(buf),
            Self::Zlib(compressor) => compressor.read(buf),
        }
    }
}
