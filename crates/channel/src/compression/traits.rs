//! Contains the core [CompressorWriter] trait.

use crate::CompressorResult;

/// A streaming compressor.
///
/// Input is written in, compressed output accumulates internally and is drained with
/// [CompressorWriter::read].
#[allow(clippy::len_without_is_empty)]
pub trait CompressorWriter {
    /// Writes the given data to the compressor, returning the number of bytes consumed.
    fn write(&mut self, data: &[u8]) -> CompressorResult<usize>;

    /// Flushes pending input so that everything written so far is reflected in the output.
    fn flush(&mut self) -> CompressorResult<()>;

    /// Terminates the compressed stream. No more input is accepted until [CompressorWriter::reset].
    fn close(&mut self) -> CompressorResult<()>;

    /// Discards all state and starts a fresh stream.
    fn reset(&mut self);

    /// Returns the number of compressed bytes ready to be read.
    fn len(&self) -> usize;

    /// Reads compressed data into the given buffer, returning the number of bytes read.
    fn read(&mut self, buf: &mut [u8]) -> CompressorResult<usize>;
}
