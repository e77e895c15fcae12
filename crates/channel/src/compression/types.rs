//! Compression types.

use crate::ParseCompressionError;
use core::{fmt, str::FromStr};

/// The capacity strategy of a channel.
///
/// See: <https://github.com/ethereum-optimism/optimism/blob/develop/op-batcher/compressor/compressors.go>
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompressorKind {
    /// Tracks the exact compressed size with a second, regularly flushed compressor.
    #[default]
    Shadow,
    /// Estimates the compressed size from the input size and an assumed ratio.
    Ratio,
}

impl FromStr for CompressorKind {
    type Err = ParseCompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shadow" => Ok(Self::Shadow),
            "ratio" => Ok(Self::Ratio),
            _ => Err(ParseCompressionError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for CompressorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shadow => f.write_str("shadow"),
            Self::Ratio => f.write_str("ratio"),
        }
    }
}

/// The compression algorithm of a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompressionAlgo {
    /// Zlib at the best compression level.
    #[default]
    Zlib,
    /// Brotli at quality 9.
    Brotli9,
    /// Brotli at quality 10.
    Brotli10,
    /// Brotli at quality 11.
    Brotli11,
}

impl CompressionAlgo {
    /// Returns `true` if the algorithm is one of the brotli levels.
    pub const fn is_brotli(&self) -> bool {
        !matches!(self, Self::Zlib)
    }
}

impl FromStr for CompressionAlgo {
    type Err = ParseCompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zlib" => Ok(Self::Zlib),
            "brotli" | "brotli-10" => Ok(Self::Brotli10),
            "brotli-9" => Ok(Self::Brotli9),
            "brotli-11" => Ok(Self::Brotli11),
            _ => Err(ParseCompressionError::UnknownAlgo(s.to_string())),
        }
    }
}

impl fmt::Display for CompressionAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zlib => f.write_str("zlib"),
            Self::Brotli9 => f.write_str("brotli-9"),
            Self::Brotli10 => f.write_str("brotli-10"),
            Self::Brotli11 => f.write_str("brotli-11"),
        }
    }
}

/// A brotli quality level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrotliLevel {
    /// Quality 9.
    Brotli9,
    /// Quality 10.
    #[default]
    Brotli10,
    /// Quality 11.
    Brotli11,
}

impl BrotliLevel {
    /// Returns the brotli quality parameter.
    pub const fn quality(&self) -> u32 {
        match self {
            Self::Brotli9 => 9,
            Self::Brotli10 => 10,
            Self::Brotli11 => 11,
        }
    }
}

impl From<CompressionAlgo> for BrotliLevel {
    fn from(algo: CompressionAlgo) -> Self {
        match algo {
            CompressionAlgo::Brotli9 => Self::Brotli9,
            CompressionAlgo::Brotli11 => Self::Brotli11,
            _ => Self::Brotli10,
        }
    }
}
