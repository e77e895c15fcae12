//! Batch encodings a channel compresses.
//!
//! A batch enters the channel as an RLP string holding `batch_type ++ batch_body`.

use alloy_rlp::Encodable;

mod types;
pub use types::BatchType;

mod single;
pub use single::encode_single_batch;

pub mod span;
pub use span::SpanBatch;

/// Wraps a typed batch as the RLP string a channel carries.
pub fn encode_batch_data(batch: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(batch.length());
    batch.encode(&mut out);
    out
}
