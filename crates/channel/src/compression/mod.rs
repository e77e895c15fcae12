//! Streaming compressors and the capacity strategies built on top of them.

mod traits;
pub use traits::CompressorWriter;

mod types;
pub use types::{BrotliLevel, CompressionAlgo, CompressorKind};

mod zlib;
pub use zlib::{decompress_zlib, ZlibCompressor};

mod brotli;
pub use self::brotli::{decompress_brotli, BrotliCompressor};

mod variant;
pub use variant::VariantCompressor;

mod shadow;
pub use shadow::ShadowCompressor;

mod ratio;
pub use ratio::RatioCompressor;

mod channel;
pub use channel::ChannelCompressor;
