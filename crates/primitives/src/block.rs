//! This module contains the [Block] type and the [BlockTransaction] trait.

use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::B256;
use alloy_rlp::{BufMut, Encodable};
use op_alloy_consensus::{OpBlock, OpTxEnvelope};
use op_alloy_protocol::L1BlockInfoTx;

/// A transaction as seen by the calibration loop.
///
/// The length of the canonical network encoding, provided through [Encodable], is the unit of
/// measurement. Batches carry the EIP-2718 encoding instead, which drops the outer RLP string
/// header of typed transactions.
pub trait BlockTransaction: Encodable {
    /// Returns `true` if the transaction is a protocol-synthesized deposit.
    fn is_deposit(&self) -> bool;

    /// Writes the EIP-2718 encoding of the transaction.
    fn encode_2718(&self, out: &mut dyn BufMut);

    /// Returns the EIP-2718 encoding of the transaction.
    fn encoded_2718(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        self.encode_2718(&mut out);
        out
    }
}

impl BlockTransaction for OpTxEnvelope {
    fn is_deposit(&self) -> bool {
        matches!(self, Self::Deposit(_))
    }

    fn encode_2718(&self, out: &mut dyn BufMut) {
        Encodable2718::encode_2718(self, out)
    }
}

/// The L1 origin of an L2 block, read from the L1 info deposit that opens the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1Origin {
    /// The L1 block number.
    pub number: u64,
    /// The L1 block hash.
    pub hash: B256,
    /// The position of the L2 block within the epoch.
    pub sequence_number: u64,
}

impl L1Origin {
    /// Reads the [L1Origin] from an L1 info deposit transaction.
    ///
    /// Returns `None` if the transaction is not a deposit or its calldata is not an L1 info
    /// payload.
    pub fn from_l1_info_tx(tx: &OpTxEnvelope) -> Option<Self> {
        let OpTxEnvelope::Deposit(tx) = tx else {
            return None;
        };
        if tx.input.len() < 4 {
            return None;
        }
        let info = L1BlockInfoTx::decode_calldata(tx.input.as_ref()).ok()?;
        let id = info.id();
        Some(Self { number: id.number, hash: id.hash, sequence_number: info.sequence_number() })
    }
}

/// A fetched L2 block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block<T> {
    /// The block height.
    pub number: u64,
    /// The block timestamp.
    pub timestamp: u64,
    /// The hash of the parent block.
    pub parent_hash: B256,
    /// The L1 origin, if the block opens with an L1 info deposit.
    pub l1_origin: Option<L1Origin>,
    /// The ordered transactions of the block.
    pub transactions: Vec<T>,
}

impl<T: BlockTransaction> Block<T> {
    /// Creates a new [Block] without a parent hash or L1 origin.
    pub const fn new(number: u64, timestamp: u64, transactions: Vec<T>) -> Self {
        Self { number, timestamp, parent_hash: B256::ZERO, l1_origin: None, transactions }
    }

    /// Sets the parent hash.
    pub const fn with_parent_hash(mut self, parent_hash: B256) -> Self {
        self.parent_hash = parent_hash;
        self
    }

    /// Sets the L1 origin.
    pub const fn with_l1_origin(mut self, l1_origin: L1Origin) -> Self {
        self.l1_origin = Some(l1_origin);
        self
    }

    /// Returns an iterator over the transactions that occupy batch capacity.
    pub fn chargeable_transactions(&self) -> impl Iterator<Item = &T> {
        self.transactions.iter().filter(|tx| !tx.is_deposit())
    }

    /// Returns the total canonical size of the block's non-deposit transactions.
    pub fn chargeable_tx_bytes(&self) -> usize {
        crate::chargeable_tx_bytes(self)
    }
}

impl From<OpBlock> for Block<OpTxEnvelope> {
    fn from(block: OpBlock) -> Self {
        let l1_origin = block.body.transactions.first().and_then(L1Origin::from_l1_info_tx);
        Self {
            number: block.header.number,
            timestamp: block.header.timestamp,
            parent_hash: block.header.parent_hash,
            l1_origin,
            transactions: block.body.transactions,
        }
    }
}
