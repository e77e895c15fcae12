//! Module for working with span batch bits.

use crate::SpanBatchError;
use blobcal_primitives::params::MAX_SPAN_BATCH_ELEMENTS;

/// Type for span batch bits.
///
/// A standard span batch bitlist is a big-endian integer whose bit `i` belongs to element `i`,
/// left-padded with zeroes to a whole number of bytes. The bits are held little-endian, one
/// byte per eight elements.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpanBatchBits(Vec<u8>);

impl SpanBatchBits {
    /// Get a bit from the [SpanBatchBits] bitlist.
    pub fn get_bit(&self, index: usize) -> bool {
        self.0.get(index / 8).is_some_and(|byte| byte & (1 << (index % 8)) != 0)
    }

    /// Sets a bit in the [SpanBatchBits] bitlist.
    pub fn set_bit(&mut self, index: usize, value: bool) {
        let byte_index = index / 8;
        if byte_index >= self.0.len() {
            if !value {
                return;
            }
            self.0.resize(byte_index + 1, 0);
        }

        let mask = 1 << (index % 8);
        if value {
            self.0[byte_index] |= mask;
        } else {
            self.0[byte_index] &= !mask;
        }
    }

    /// Encodes the first `bit_length` bits as a standard span batch bitlist.
    pub fn encode(&self, w: &mut Vec<u8>, bit_length: usize) -> Result<(), SpanBatchError> {
        if bit_length as u64 > MAX_SPAN_BATCH_ELEMENTS {
            return Err(SpanBatchError::TooBigSpanBatchSize);
        }

        let buf_len = bit_length.div_ceil(8);
        let start = w.len();
        w.resize(start + buf_len, 0);
        for (i, byte) in self.0.iter().take(buf_len).enumerate() {
            w[start + buf_len - 1 - i] = *byte;
        }
        Ok(())
    }

    /// Clears every bit.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_bits() {
        let mut bits = SpanBatchBits::default();
        bits.set_bit(0, true);
        bits.set_bit(9, true);
        assert!(bits.get_bit(0));
        assert!(!bits.get_bit(1));
        assert!(bits.get_bit(9));
        assert!(!bits.get_bit(100));

        bits.set_bit(9, false);
        assert!(!bits.get_bit(9));
    }

    #[test]
    fn test_encode_is_big_endian() {
        let mut bits = SpanBatchBits::default();
        bits.set_bit(0, true);
        bits.set_bit(8, true);
        bits.set_bit(10, true);

        let mut w = vec![0xFF];
        bits.encode(&mut w, 11).unwrap();
        // 0b101_0000_0001, padded to two bytes.
        assert_eq!(w, vec![0xFF, 0x05, 0x01]);
    }

    #[test]
    fn test_encode_pads_unset_tail() {
        let mut bits = SpanBatchBits::default();
        bits.set_bit(1, true);

        let mut w = Vec::new();
        bits.encode(&mut w, 17).unwrap();
        assert_eq!(w, vec![0x00, 0x00, 0x02]);

        let mut w = Vec::new();
        SpanBatchBits::default().encode(&mut w, 0).unwrap();
        assert!(w.is_empty());
    }

    #[test]
    fn test_encode_too_long() {
        let mut w = Vec::new();
        let err = SpanBatchBits::default()
            .encode(&mut w, MAX_SPAN_BATCH_ELEMENTS as usize + 1)
            .unwrap_err();
        assert_eq!(err, SpanBatchError::TooBigSpanBatchSize);
    }
}
