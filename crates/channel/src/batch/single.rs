//! Singular batch encoding of a block.

use alloy_rlp::{Encodable, Header};
use blobcal_primitives::{params::SINGLE_BATCH_TYPE, Block, BlockTransaction};

/// Encodes a block as a singular batch.
///
/// batch = `0x00 ++ rlp([number, timestamp, [tx, ...]])`, where each `tx` is the EIP-2718
/// encoding of a non-deposit transaction wrapped once as an RLP string.
pub fn encode_single_batch<T: BlockTransaction>(block: &Block<T>) -> Vec<u8> {
    let txs = block.chargeable_transactions().map(T::encoded_2718).collect::<Vec<_>>();

    let txs_header = Header {
        list: true,
        payload_length: txs.iter().map(|tx| tx.as_slice().length()).sum(),
    };
    let header = Header {
        list: true,
        payload_length: block.number.length()
            + block.timestamp.length()
            + txs_header.length()
            + txs_header.payload_length,
    };

    let mut out = Vec::with_capacity(1 + header.length() + header.payload_length);
    out.push(SINGLE_BATCH_TYPE);
    header.encode(&mut out);
    block.number.encode(&mut out);
    block.timestamp.encode(&mut out);
    txs_header.encode(&mut out);
    for tx in &txs {
        tx.as_slice().encode(&mut out);
    }
    out
}
