//! Test utilities for the primitives crate.

use crate::{params::DEPOSIT_TX_TYPE, Block, BlockTransaction};
use alloy_rlp::{BufMut, Encodable};

/// A transaction whose canonical and EIP-2718 encodings are both its raw payload.
///
/// The payload length is exactly the transaction's chargeable size, which keeps size arithmetic
/// in tests obvious.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTransaction {
    /// Whether the transaction is a deposit.
    pub deposit: bool,
    /// The canonical encoding.
    pub payload: Vec<u8>,
}

impl TestTransaction {
    /// Creates a chargeable transaction with an encoding of `len` bytes.
    pub fn user(len: usize) -> Self {
        Self { deposit: false, payload: vec![0xAB; len] }
    }

    /// Creates a chargeable transaction from the given encoding.
    pub const fn with_payload(payload: Vec<u8>) -> Self {
        Self { deposit: false, payload }
    }

    /// Creates a deposit transaction with an encoding of `len` bytes.
    pub fn deposit(len: usize) -> Self {
        let mut payload = vec![0xCD; len];
        if let Some(first) = payload.first_mut() {
            *first = DEPOSIT_TX_TYPE;
        }
        Self { deposit: true, payload }
    }
}

impl Encodable for TestTransaction {
    fn encode(&self, out: &mut dyn BufMut) {
        out.put_slice(&self.payload);
    }

    fn length(&self) -> usize {
        self.payload.len()
    }
}

impl BlockTransaction for TestTransaction {
    fn is_deposit(&self) -> bool {
        self.deposit
    }

    fn encode_2718(&self, out: &mut dyn BufMut) {
        out.put_slice(&self.payload);
    }
}

/// Builds a test [Block] at the given height with a timestamp two seconds per block.
pub fn test_block(number: u64, transactions: Vec<TestTransaction>) -> Block<TestTransaction> {
    Block::new(number, number * 2, transactions)
}

/// Builds a test [Block] holding one chargeable transaction of `size` bytes.
pub fn sized_block(number: u64, size: usize) -> Block<TestTransaction> {
    test_block(number, vec![TestTransaction::user(size)])
}
