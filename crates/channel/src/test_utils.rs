//! Signed transactions and L2 blocks for the channel tests.

use alloy_consensus::{Signed, TxEip1559, TxLegacy};
use alloy_primitives::{Address, Bytes, Signature, TxKind, B256, U256};
use blobcal_primitives::{Block, L1Origin};
use op_alloy_consensus::{OpTxEnvelope, TxDeposit};
use rand::{rngs::StdRng, RngCore, SeedableRng};

/// The chain id the test transactions are signed for.
pub(crate) const TEST_CHAIN_ID: u64 = 8453;

/// An EIP-1559 call carrying `data_len` bytes of calldata.
pub(crate) fn eip1559_tx(nonce: u64, data_len: usize) -> OpTxEnvelope {
    eip1559_tx_with_input(nonce, Bytes::from(vec![0xC0; data_len]))
}

/// An EIP-1559 call carrying `data_len` bytes of incompressible calldata seeded by the nonce.
pub(crate) fn random_eip1559_tx(nonce: u64, data_len: usize) -> OpTxEnvelope {
    let mut input = vec![0u8; data_len];
    StdRng::seed_from_u64(nonce).fill_bytes(&mut input);
    eip1559_tx_with_input(nonce, input.into())
}

fn eip1559_tx_with_input(nonce: u64, input: Bytes) -> OpTxEnvelope {
    let tx = TxEip1559 {
        chain_id: TEST_CHAIN_ID,
        nonce,
        gas_limit: 21_000,
        max_fee_per_gas: 2_000_000_000,
        max_priority_fee_per_gas: 1_000_000,
        to: TxKind::Call(Address::repeat_byte(0x42)),
        value: U256::from(nonce),
        input,
        ..Default::default()
    };
    OpTxEnvelope::Eip1559(Signed::new_unchecked(tx, Signature::test_signature(), B256::ZERO))
}

/// An EIP-1559 contract creation.
pub(crate) fn contract_creation_tx(nonce: u64) -> OpTxEnvelope {
    let tx = TxEip1559 {
        chain_id: TEST_CHAIN_ID,
        nonce,
        gas_limit: 100_000,
        to: TxKind::Create,
        input: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
        ..Default::default()
    };
    OpTxEnvelope::Eip1559(Signed::new_unchecked(tx, Signature::test_signature(), B256::ZERO))
}

/// A legacy call without replay protection carrying `data_len` bytes of calldata.
pub(crate) fn legacy_tx(nonce: u64, data_len: usize) -> OpTxEnvelope {
    let tx = TxLegacy {
        chain_id: None,
        nonce,
        gas_price: 1_000_000_000,
        gas_limit: 21_000,
        to: TxKind::Call(Address::repeat_byte(0x24)),
        input: Bytes::from(vec![0x0C; data_len]),
        ..Default::default()
    };
    OpTxEnvelope::Legacy(Signed::new_unchecked(tx, Signature::test_signature(), B256::ZERO))
}

/// A system deposit standing in for the L1 info transaction.
pub(crate) fn l1_info_tx() -> OpTxEnvelope {
    OpTxEnvelope::Deposit(TxDeposit {
        is_system_transaction: true,
        input: Bytes::from_static(&[0x44, 0x0A, 0x5E, 0x20]),
        ..Default::default()
    })
}

/// A block at `number`, two seconds per block, in the epoch `number - sequence_number`.
pub(crate) fn span_block(
    number: u64,
    sequence_number: u64,
    transactions: Vec<OpTxEnvelope>,
) -> Block<OpTxEnvelope> {
    let epoch = number.saturating_sub(sequence_number);
    Block::new(number, number * 2, transactions)
        .with_parent_hash(B256::repeat_byte(number as u8))
        .with_l1_origin(L1Origin {
            number: epoch,
            hash: B256::repeat_byte(0x80 | epoch as u8),
            sequence_number,
        })
}
