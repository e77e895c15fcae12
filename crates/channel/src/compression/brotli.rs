//! Contains a streaming brotli compressor.

use crate::{BrotliLevel, CompressorError, CompressorResult, CompressorWriter};
use blobcal_primitives::params::CHANNEL_VERSION_BROTLI;
use brotli::{CompressorWriter as BrotliWriter, Decompressor};
use std::io::{self, Read, Write};

/// The base-2 logarithm of the brotli sliding window.
const BROTLI_LGWIN: u32 = 24;

/// The internal buffer size of the brotli writer.
const BROTLI_BUFFER_SIZE: usize = 4096;

/// A streaming brotli compressor.
///
/// The compressed stream is prefixed with the brotli channel version byte, which counts towards
/// [CompressorWriter::len].
pub struct BrotliCompressor {
    level: BrotliLevel,
    writer: Option<BrotliWriter<Vec<u8>>>,
    finished: Vec<u8>,
    read_offset: usize,
}

impl core::fmt::Debug for BrotliCompressor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BrotliCompressor")
            .field("level", &self.level)
            .field("compressed", &self.buffer().len())
            .field("read_offset", &self.read_offset)
            .field("closed", &self.writer.is_none())
            .finish()
    }
}

impl BrotliCompressor {
    /// Creates a new [BrotliCompressor] at the given level.
    pub fn new(level: impl Into<BrotliLevel>) -> Self {
        let level = level.into();
        Self { level, writer: Some(Self::writer(level)), finished: Vec::new(), read_offset: 0 }
    }

    /// Returns the brotli level.
    pub const fn level(&self) -> BrotliLevel {
        self.level
    }

    /// Returns the compressed bytes not yet read.
    pub fn get_compressed(&self) -> &[u8] {
        &self.buffer()[self.read_offset..]
    }

    fn writer(level: BrotliLevel) -> BrotliWriter<Vec<u8>> {
        BrotliWriter::new(vec![CHANNEL_VERSION_BROTLI], BROTLI_BUFFER_SIZE, level.quality(), BROTLI_LGWIN)
    }

    fn buffer(&self) -> &[u8] {
        self.writer.as_ref().map_or(&self.finished, |w| w.get_ref())
    }
}

fn brotli_err(e: io::Error) -> CompressorError {
    CompressorError::Brotli(e.to_string())
}

impl CompressorWriter for BrotliCompressor {
    fn write(&mut self, data: &[u8]) -> CompressorResult<usize> {
        let writer = self.writer.as_mut().ok_or(CompressorError::Closed)?;
        writer.write_all(data).map_err(brotli_err)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> CompressorResult<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush().map_err(brotli_err),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> CompressorResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(brotli_err)?;
            self.finished = writer.into_inner();
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.writer = Some(Self::writer(self.level));
        self.finished.clear();
        self.read_offset = 0;
    }

    fn len(&self) -> usize {
        self.buffer().len() - self.read_offset
    }

    fn read(&mut self, buf: &mut [u8]) -> CompressorResult<usize> {
        let pending = self.get_compressed();
        let n = pending.len().min(buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.read_offset += n;
        Ok(n)
    }
}

/// Decompresses a brotli channel, stripping the version byte.
pub fn decompress_brotli(data: &[u8]) -> CompressorResult<Vec<u8>> {
    match data.split_first() {
        Some((&CHANNEL_VERSION_BROTLI, stream)) => {
            let mut decompressed = Vec::new();
            Decompressor::new(stream, BROTLI_BUFFER_SIZE)
                .read_to_end(&mut decompressed)
                .map_err(brotli_err)?;
            Ok(decompressed)
        }
        _ => Err(CompressorError::Brotli("missing channel version byte".to_string())),
    }
}
