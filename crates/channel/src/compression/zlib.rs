//! Contains a streaming ZLIB compressor.

use crate::{CompressorError, CompressorResult, CompressorWriter};
use miniz_oxide::{
    deflate::{
        core::{create_comp_flags_from_zip_params, CompressorOxide},
        stream::deflate,
    },
    inflate::DecompressError,
    MZError, MZFlush, MZStatus,
};

/// The best compression.
const BEST_ZLIB_COMPRESSION: i32 = 9;

/// A positive window size selects the zlib wrapper around the deflate stream.
const ZLIB_WINDOW_BITS: i32 = 15;

/// The default deflate strategy.
const DEFAULT_STRATEGY: i32 = 0;

/// The size of the scratch buffer compressed output is staged in.
const OUTPUT_CHUNK_SIZE: usize = 16 * 1024;

/// A streaming ZLIB compressor at the best compression level.
///
/// [CompressorWriter::flush] performs a sync flush, so the output reflects every byte written
/// without terminating the stream.
pub struct ZlibCompressor {
    state: Box<CompressorOxide>,
    compressed: Vec<u8>,
    read_offset: usize,
    closed: bool,
}

impl core::fmt::Debug for ZlibCompressor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ZlibCompressor")
            .field("compressed", &self.compressed.len())
            .field("read_offset", &self.read_offset)
            .field("closed", &self.closed)
            .finish()
    }
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl ZlibCompressor {
    /// Creates a new [ZlibCompressor].
    pub fn new() -> Self {
        let flags =
            create_comp_flags_from_zip_params(BEST_ZLIB_COMPRESSION, ZLIB_WINDOW_BITS, DEFAULT_STRATEGY);
        Self {
            state: Box::new(CompressorOxide::new(flags)),
            compressed: Vec::new(),
            read_offset: 0,
            closed: false,
        }
    }

    /// Returns the compressed bytes not yet read.
    pub fn get_compressed(&self) -> &[u8] {
        &self.compressed[self.read_offset..]
    }

    fn deflate_into(&mut self, mut input: &[u8], flush: MZFlush) -> CompressorResult<()> {
        let mut chunk = [0u8; OUTPUT_CHUNK_SIZE];
        loop {
            let res = deflate(&mut self.state, input, &mut chunk, flush);
            self.compressed.extend_from_slice(&chunk[..res.bytes_written]);
            input = &input[res.bytes_consumed..];

            match res.status {
                Ok(MZStatus::StreamEnd) => return Ok(()),
                Ok(_) => {
                    if res.bytes_written < chunk.len() && input.is_empty() {
                        return Ok(());
                    }
                }
                // Nothing left to do for this flush mode.
                Err(MZError::Buf) => return Ok(()),
                Err(e) => return Err(CompressorError::Zlib(format!("{e:?}"))),
            }
        }
    }
}

impl CompressorWriter for ZlibCompressor {
    fn write(&mut self, data: &[u8]) -> CompressorResult<usize> {
        if self.closed {
            return Err(CompressorError::Closed);
        }
        self.deflate_into(data, MZFlush::None)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> CompressorResult<()> {
        if self.closed {
            return Ok(());
        }
        self.deflate_into(&[], MZFlush::Sync)
    }

    fn close(&mut self) -> CompressorResult<()> {
        if self.closed {
            return Ok(());
        }
        self.deflate_into(&[], MZFlush::Finish)?;
        self.closed = true;
        Ok(())
    }

    fn reset(&mut self) {
        self.state.reset();
        self.compressed.clear();
        self.read_offset = 0;
        self.closed = false;
    }

    fn len(&self) -> usize {
        self.compressed.len() - self.read_offset
    }

    fn read(&mut self, buf: &mut [u8]) -> CompressorResult<usize> {
        let pending = self.get_compressed();
        let n = pending.len().min(buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.read_offset += n;
        Ok(n)
    }
}

/// Method to decompress a ZLIB stream.
pub fn decompress_zlib(data: &[u8]) -> Result<Vec<u8>, DecompressError> {
    miniz_oxide::inflate::decompress_to_vec_zlib(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_roundtrip() {
        let mut compressor = ZlibCompressor::new();
        let data = b"the quick brown fox jumps over the lazy dog ".repeat(100);
        assert_eq!(compressor.write(&data).unwrap(), data.len());
        compressor.close().unwrap();

        let mut out = vec![0u8; compressor.len()];
        assert_eq!(compressor.read(&mut out).unwrap(), out.len());
        assert_eq!(compressor.len(), 0);
        assert!(out.len() < data.len());
        assert_eq!(decompress_zlib(&out).unwrap(), data);
    }

    #[test]
    fn test_zlib_flush_makes_output_available() {
        let mut compressor = ZlibCompressor::new();
        compressor.write(b"hello world").unwrap();
        let before = compressor.len();
        compressor.flush().unwrap();
        assert!(compressor.len() > before);

        // A second flush without input adds at most an empty stored block.
        let flushed = compressor.len();
        compressor.flush().unwrap();
        assert!(compressor.len() - flushed <= 8);
    }

    #[test]
    fn test_zlib_write_after_close() {
        let mut compressor = ZlibCompressor::new();
        compressor.close().unwrap();
        assert_eq!(compressor.write(b"data"), Err(CompressorError::Closed));
    }

    #[test]
    fn test_zlib_reset_starts_new_stream() {
        let mut compressor = ZlibCompressor::new();
        compressor.write(b"first stream").unwrap();
        compressor.close().unwrap();
        compressor.reset();
        assert_eq!(compressor.len(), 0);

        compressor.write(b"second stream").unwrap();
        compressor.close().unwrap();
        assert_eq!(decompress_zlib(compressor.get_compressed()).unwrap(), b"second stream");
    }

    #[test]
    fn test_zlib_partial_reads() {
        let mut compressor = ZlibCompressor::new();
        let data = vec![0xABu8; 10_000];
        compressor.write(&data).unwrap();
        compressor.close().unwrap();

        let mut out = Vec::new();
        let mut buf = [0u8; 7];
        loop {
            let n = compressor.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(decompress_zlib(&out).unwrap(), data);
    }
}
