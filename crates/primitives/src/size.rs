//! Transaction size accounting.

use crate::{Block, BlockTransaction};
use alloy_rlp::Encodable;

/// Returns the total canonical encoded size of the block's chargeable transactions.
///
/// Deposit transactions are synthesized by the protocol and never occupy batch capacity, so they
/// are excluded. For every other transaction the length of its canonical encoding is counted.
pub fn chargeable_tx_bytes<T: BlockTransaction>(block: &Block<T>) -> usize {
    block.transactions.iter().filter(|tx| !tx.is_deposit()).map(Encodable::length).sum()
}
