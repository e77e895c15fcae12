//! Contains the ratio compressor.
//!
//! This is a port of the [RatioCompressor][rc] from the op-batcher.
//!
//! [rc]: https://github.com/ethereum-optimism/optimism/blob/develop/op-batcher/compressor/ratio_compressor.go

use crate::{CompressionAlgo, CompressorError, CompressorResult, CompressorWriter, VariantCompressor};

/// Ratio Compressor
///
/// Considers itself full once the input reaches the target output size divided by an assumed
/// compression ratio. The write that crosses the threshold is still accepted.
#[derive(Debug)]
pub struct RatioCompressor {
    compressor: VariantCompressor,
    input_threshold: u64,
    input_bytes: u64,
}

impl RatioCompressor {
    /// Creates a new [RatioCompressor].
    pub fn new(target_output_size: u64, approx_compr_ratio: f64, algo: CompressionAlgo) -> Self {
        Self {
            compressor: VariantCompressor::from(algo),
            input_threshold: (target_output_size as f64 / approx_compr_ratio) as u64,
            input_bytes: 0,
        }
    }

    /// Returns the input size at which the compressor is full.
    pub const fn input_threshold(&self) -> u64 {
        self.input_threshold
    }

    /// Returns `true` once the input threshold is reached.
    pub const fn is_full(&self) -> bool {
        self.input_bytes >= self.input_threshold
    }
}

impl CompressorWriter for RatioCompressor {
    fn write(&mut self, data: &[u8]) -> CompressorResult<usize> {
        if self.is_full() {
            return Err(CompressorError::Full);
        }
        self.input_bytes += data.len() as u64;
        self.compressor.write(data)
    }

    fn flush(&mut self) -> CompressorResult<()> {
        self.compressor.flush()
    }

    fn close(&mut self) -> CompressorResult<()> {
        self.compressor.close()
    }

    fn reset(&mut self) {
        self.compressor.reset();
        self.input_bytes = 0;
    }

    fn len(&self) -> usize {
        self.compressor.len()
    }

    fn read(&mut self, buf: &mut [u8]) -> CompressorResult<usize> {
        self.compressor.read(buf)
    }
}
