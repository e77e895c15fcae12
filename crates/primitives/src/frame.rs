//! This module contains the [Frame] type that channel output is cut into.

use crate::params::{ChannelId, CHANNEL_ID_LENGTH, FRAME_V0_OVERHEAD};

/// An error decoding a [Frame].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameDecodeError {
    /// The input is shorter than the fixed frame overhead.
    #[error("Frame too short to decode: {0} bytes")]
    TooShort(usize),
    /// The input ends before the declared data length.
    #[error("Frame truncated: expected {expected} data bytes, found {found}")]
    Truncated {
        /// The declared data length.
        expected: usize,
        /// The data bytes available.
        found: usize,
    },
}

/// A channel frame is a segment of a channel's compressed data.
///
/// *Encoding*
/// frame = `channel_id ++ frame_number ++ frame_data_length ++ frame_data ++ is_last`
/// * channel_id        = bytes16
/// * frame_number      = uint16
/// * frame_data_length = uint32
/// * frame_data        = bytes
/// * is_last           = bool
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// The identifier of the channel the frame belongs to.
    pub id: ChannelId,
    /// The number of the frame within its channel.
    pub number: u16,
    /// The data within the frame.
    pub data: Vec<u8>,
    /// Whether or not the frame is the last in the sequence.
    pub is_last: bool,
}

impl Frame {
    /// Encode the frame into a byte vector.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(self.size());
        encoded.extend_from_slice(&self.id);
        encoded.extend_from_slice(&self.number.to_be_bytes());
        encoded.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        encoded.extend_from_slice(&self.data);
        encoded.push(self.is_last as u8);
        encoded
    }

    /// Decode a frame from a byte slice, returning the number of bytes consumed.
    pub fn decode(encoded: &[u8]) -> Result<(usize, Self), FrameDecodeError> {
        if encoded.len() < FRAME_V0_OVERHEAD {
            return Err(FrameDecodeError::TooShort(encoded.len()));
        }

        let mut id = ChannelId::default();
        id.copy_from_slice(&encoded[..CHANNEL_ID_LENGTH]);
        let number = u16::from_be_bytes([encoded[16], encoded[17]]);
        let data_len =
            u32::from_be_bytes([encoded[18], encoded[19], encoded[20], encoded[21]]) as usize;

        let available = encoded.len() - FRAME_V0_OVERHEAD;
        if available < data_len {
            return Err(FrameDecodeError::Truncated { expected: data_len, found: available });
        }

        let data = encoded[22..22 + data_len].to_vec();
        let is_last = encoded[22 + data_len] == 1;
        Ok((FRAME_V0_OVERHEAD + data_len, Self { id, number, data, is_last }))
    }

    /// Returns the encoded size of the frame. This is what a frame costs inside a blob.
    pub fn size(&self) -> usize {
        self.data.len() + FRAME_V0_OVERHEAD
    }
}
