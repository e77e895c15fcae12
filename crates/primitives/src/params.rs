//! Protocol constants used when packing blocks into blobs.

/// The maximum number of data bytes that fit into a single EIP-4844 blob.
///
/// `(4 * 31 + 3) * 1024 - 4`: 4096 field elements of 31.75 usable bytes each, minus the
/// 4 byte version and length prefix.
pub const MAX_BLOB_DATA_SIZE: usize = 130_044;

/// The fixed number of bytes a version 0 frame adds around its data.
///
/// `channel_id (16) ++ frame_number (2) ++ frame_data_length (4) ++ is_last (1)`
pub const FRAME_V0_OVERHEAD: usize = 23;

/// [CHANNEL_ID_LENGTH] is the length of the channel ID.
pub const CHANNEL_ID_LENGTH: usize = 16;

/// [ChannelId] is an opaque identifier for a channel.
pub type ChannelId = [u8; CHANNEL_ID_LENGTH];

/// The maximum amount of rlp-encoded batch bytes a single channel may carry.
pub const MAX_RLP_BYTES_PER_CHANNEL: u64 = 10_000_000;

/// The maximum amount of rlp-encoded batch bytes a single channel may carry after the Fjord
/// hardfork.
pub const FJORD_MAX_RLP_BYTES_PER_CHANNEL: u64 = 100_000_000;

/// The batch type prefix of a singular batch.
pub const SINGLE_BATCH_TYPE: u8 = 0x00;

/// The batch type prefix of a span batch.
pub const SPAN_BATCH_TYPE: u8 = 0x01;

/// The maximum number of blocks, or of transactions, a span batch may hold.
pub const MAX_SPAN_BATCH_ELEMENTS: u64 = 10_000_000;

/// The channel version byte that prefixes brotli compressed channel data.
pub const CHANNEL_VERSION_BROTLI: u8 = 0x01;

/// The EIP-2718 type byte of a deposit transaction.
pub const DEPOSIT_TX_TYPE: u8 = 0x7E;
