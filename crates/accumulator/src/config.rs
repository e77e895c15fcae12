//! Run configuration for the [Accumulator](crate::Accumulator).

/// The starting block used when none is given.
pub const DEFAULT_STARTING_BLOCK: u64 = 11_443_817;

/// The minimum number of transaction bytes processed when no threshold is given.
pub const DEFAULT_MIN_TX_BYTES: u64 = 4_500_000;

/// Immutable configuration of a calibration run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationConfig {
    /// The first block height fetched.
    pub starting_block: u64,
    /// The run stops once this many chargeable transaction bytes were processed.
    pub min_tx_bytes: u64,
    /// The number of blobs the channel is sized for. Reported only.
    pub blobs: u64,
    /// The name of the compression algorithm used by the channel. Reported only.
    pub compression_algo: String,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            starting_block: DEFAULT_STARTING_BLOCK,
            min_tx_bytes: DEFAULT_MIN_TX_BYTES,
            blobs: 1,
            compression_algo: "zlib".to_string(),
        }
    }
}
