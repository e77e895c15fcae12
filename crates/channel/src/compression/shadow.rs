//! Contains the shadow compressor.
//!
//! This is a port of the [ShadowCompressor][sc] from the op-batcher.
//!
//! [sc]: https://github.com/ethereum-optimism/optimism/blob/develop/op-batcher/compressor/shadow_compressor.go

use crate::{CompressionAlgo, CompressorError, CompressorResult, CompressorWriter, VariantCompressor};

/// The largest potential blow-up in bytes we expect to see when compressing arbitrary data.
/// This covers a 2 byte header, a 4 byte digest, a 5 byte eof indicator and a 5 byte block
/// header for each 16k of data in a 128k frame.
const SAFE_COMPRESSION_OVERHEAD: u64 = 51;

/// The number of final bytes closing a zlib stream writes.
const CLOSE_OVERHEAD_ZLIB: u64 = 9;

/// Shadow Compressor
///
/// Holds two compressors. The shadow is flushed whenever the bound on the compressed size may
/// exceed the target, which gives an exact view of the compressed size. The main compressor is
/// never flushed, so its final output is at most the size the shadow reports.
///
/// The first write is never checked against the target, so a single block larger than the
/// target is still accepted and spread over multiple frames.
#[derive(Debug)]
pub struct ShadowCompressor {
    /// The target compressed size.
    target_output_size: u64,
    /// The compressor producing the channel data.
    compressor: VariantCompressor,
    /// The compressor used for size estimation.
    shadow: VariantCompressor,
    /// Set once the shadow exceeds the target.
    is_full: bool,
    /// An upper bound on the size of the compressed data.
    bound: u64,
    /// The number of input bytes accepted.
    input_bytes: u64,
}

impl ShadowCompressor {
    /// Creates a new [ShadowCompressor] targeting the given compressed size.
    pub fn new(target_output_size: u64, algo: CompressionAlgo) -> Self {
        Self {
            target_output_size,
            compressor: VariantCompressor::from(algo),
            shadow: VariantCompressor::from(algo),
            is_full: false,
            bound: SAFE_COMPRESSION_OVERHEAD,
            input_bytes: 0,
        }
    }

    /// Returns `true` once the target has been exceeded.
    pub const fn is_full(&self) -> bool {
        self.is_full
    }
}

impl CompressorWriter for ShadowCompressor {
    fn write(&mut self, data: &[u8]) -> CompressorResult<usize> {
        if self.is_full {
            return Err(CompressorError::Full);
        }

        self.shadow.write(data)?;

        let mut new_bound = self.bound + data.len() as u64;
        if new_bound > self.target_output_size {
            // Only pay for a flush once the target may have been crossed.
            self.shadow.flush()?;
            new_bound = self.shadow.len() as u64 + CLOSE_OVERHEAD_ZLIB;
            if new_bound > self.target_output_size {
                self.is_full = true;
                if self.input_bytes > 0 {
                    return Err(CompressorError::Full);
                }
            }
        }

        self.bound = new_bound;
        self.input_bytes += data.len() as u64;
        self.compressor.write(data)
    }

    fn len(&self) -> usize {
        self.compressor.len()
    }

    fn flush(&mut self) -> CompressorResult<()> {
        self.compressor.flush()
    }

    fn close(&mut self) -> CompressorResult<()> {
        self.compressor.close()
    }

    fn reset(&mut self) {
        self.compressor.reset();
        self.shadow.reset();
        self.is_full = false;
        self.bound = SAFE_COMPRESSION_OVERHEAD;
        self.input_bytes = 0;
    }

    fn read(&mut self, buf: &mut [u8]) -> CompressorResult<usize> {
        self.compressor.read(buf)
    }
}
