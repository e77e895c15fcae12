//! Raw Span Batch Prefix

use super::write_uvarint;

/// Span Batch Prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanBatchPrefix {
    /// Relative timestamp of the first block
    pub rel_timestamp: u64,
    /// L1 origin number
    pub l1_origin_num: u64,
    /// First 20 bytes of the first block's parent hash
    pub parent_check: [u8; 20],
    /// First 20 bytes of the last block's L1 origin hash
    pub l1_origin_check: [u8; 20],
}

impl SpanBatchPrefix {
    /// Encodes the [SpanBatchPrefix] into a writer.
    pub fn encode_prefix(&self, w: &mut Vec<u8>) {
        write_uvarint(w, self.rel_timestamp);
        write_uvarint(w, self.l1_origin_num);
        w.extend_from_slice(&self.parent_check);
        w.extend_from_slice(&self.l1_origin_check);
    }
}
