//! Error types for the channel crate.

/// A [Result] alias for compressor operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

/// An error returned by a [CompressorWriter](crate::CompressorWriter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompressorError {
    /// The compressor reached its target output size.
    #[error("Compressor is full")]
    Full,
    /// The compressor was closed and accepts no more input.
    #[error("Compressor is closed")]
    Closed,
    /// The zlib stream reported an error.
    #[error("Zlib stream error: {0}")]
    Zlib(String),
    /// The brotli stream reported an error.
    #[error("Brotli stream error: {0}")]
    Brotli(String),
}

/// An error returned by the [ChannelBuilder](crate::ChannelBuilder).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelBuilderError {
    /// The compressor failed.
    #[error(transparent)]
    Compressor(#[from] CompressorError),
    /// The configured frame size leaves no room for frame data.
    #[error("Max frame size {0} does not exceed the frame overhead")]
    MaxFrameSizeTooSmall(usize),
    /// The configured target frame count is zero.
    #[error("Target number of frames must be positive")]
    NoTargetFrames,
    /// The configured approximate compression ratio is not a positive number.
    #[error("Approximate compression ratio must be positive, got {0}")]
    InvalidComprRatio(String),
    /// The channel produced more frames than a frame number can address.
    #[error("Channel exceeds the maximum number of frames")]
    TooManyFrames,
    /// The span batch rejected a block.
    #[error(transparent)]
    SpanBatch(#[from] SpanBatchError),
}

/// An error building or encoding a [SpanBatch](crate::SpanBatch).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanBatchError {
    /// The span batch holds more elements than it may encode.
    #[error("The span batch is too big")]
    TooBigSpanBatchSize,
    /// The span batch holds no blocks.
    #[error("Empty span batch")]
    EmptySpanBatch,
    /// The block does not open with an L1 info deposit.
    #[error("Block {0} is missing its L1 origin")]
    MissingL1Origin(u64),
    /// The block is older than the last block of the span.
    #[error("Block {number} at timestamp {timestamp} precedes the span's last timestamp {last}")]
    OutOfOrder {
        /// The height of the block.
        number: u64,
        /// The timestamp of the block.
        timestamp: u64,
        /// The timestamp of the last block in the span.
        last: u64,
    },
    /// The block is older than the L2 genesis.
    #[error("Block timestamp {0} precedes the genesis timestamp")]
    BeforeGenesis(u64),
    /// A transaction could not be decoded from its EIP-2718 encoding.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    /// The transaction type has no span batch encoding.
    #[error("Unsupported transaction type: {0}")]
    UnsupportedTxType(u8),
    /// A replay protected transaction was signed for another chain.
    #[error("Transaction chain id {found:?} does not match the span chain id {expected}")]
    ChainIdMismatch {
        /// The chain id of the span batch.
        expected: u64,
        /// The chain id of the transaction.
        found: Option<u64>,
    },
}

/// An error parsing a [BatchType](crate::BatchType) from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown batch type: {0}")]
pub struct ParseBatchTypeError(pub String);

/// An error parsing a [CompressionAlgo](crate::CompressionAlgo) or
/// [CompressorKind](crate::CompressorKind) from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCompressionError {
    /// The compression algorithm name is unknown.
    #[error("Unknown compression algorithm: {0}")]
    UnknownAlgo(String),
    /// The compressor kind name is unknown.
    #[error("Unknown compressor kind: {0}")]
    UnknownKind(String),
}
