//! The batch type of a channel.

use crate::ParseBatchTypeError;
use blobcal_primitives::params::{SINGLE_BATCH_TYPE, SPAN_BATCH_TYPE};
use core::{fmt, str::FromStr};

/// The batch encoding blocks are packed with.
///
/// The type is the first byte of every encoded batch:
/// - `0x00` for a singular batch, one block per batch.
/// - `0x01` for a span batch, every block of the channel in one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum BatchType {
    /// Singular batches.
    Single = SINGLE_BATCH_TYPE,
    /// A span batch.
    #[default]
    Span = SPAN_BATCH_TYPE,
}

impl FromStr for BatchType {
    type Err = ParseBatchTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" | "singular" => Ok(Self::Single),
            "span" => Ok(Self::Span),
            _ => Err(ParseBatchTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for BatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Span => f.write_str("span"),
        }
    }
}
