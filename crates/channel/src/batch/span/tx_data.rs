//! Transaction data carried by a span batch.
//!
//! A span batch strips the nonce, gas limit, recipient and signature from every transaction and
//! keeps the remaining fields here, RLP encoded behind the transaction type byte.

use crate::SpanBatchError;
use alloy_consensus::TxEnvelope;
use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Bytes, U256};
use alloy_rlp::{BufMut, Encodable, RlpEncodable};

/// The transaction data for a legacy transaction within a span batch.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable)]
pub struct SpanBatchLegacyTransactionData {
    /// The ETH value of the transaction.
    pub value: U256,
    /// The gas price of the transaction.
    pub gas_price: U256,
    /// Transaction calldata.
    pub data: Bytes,
}

/// The transaction data for an EIP-2930 transaction within a span batch.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable)]
pub struct SpanBatchEip2930TransactionData {
    /// The ETH value of the transaction.
    pub value: U256,
    /// The gas price of the transaction.
    pub gas_price: U256,
    /// Transaction calldata.
    pub data: Bytes,
    /// Access list, used to pre-warm storage slots through static declaration.
    pub access_list: AccessList,
}

/// The transaction data for an EIP-1559 transaction within a span batch.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable)]
pub struct SpanBatchEip1559TransactionData {
    /// The ETH value of the transaction.
    pub value: U256,
    /// Maximum priority fee per gas.
    pub max_priority_fee_per_gas: U256,
    /// Maximum fee per gas.
    pub max_fee_per_gas: U256,
    /// Transaction calldata.
    pub data: Bytes,
    /// Access list, used to pre-warm storage slots through static declaration.
    pub access_list: AccessList,
}

/// The typed transaction data for a transaction within a span batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanBatchTransactionData {
    /// Legacy transaction data.
    Legacy(SpanBatchLegacyTransactionData),
    /// EIP-2930 transaction data.
    Eip2930(SpanBatchEip2930TransactionData),
    /// EIP-1559 transaction data.
    Eip1559(SpanBatchEip1559TransactionData),
}

impl SpanBatchTransactionData {
    /// Returns the EIP-2718 type byte of the transaction.
    pub const fn tx_type(&self) -> u8 {
        match self {
            Self::Legacy(_) => 0,
            Self::Eip2930(_) => 1,
            Self::Eip1559(_) => 2,
        }
    }
}

impl Encodable for SpanBatchTransactionData {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Legacy(data) => data.encode(out),
            Self::Eip2930(data) => {
                out.put_u8(self.tx_type());
                data.encode(out);
            }
            Self::Eip1559(data) => {
                out.put_u8(self.tx_type());
                data.encode(out);
            }
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Legacy(data) => data.length(),
            Self::Eip2930(data) => 1 + data.length(),
            Self::Eip1559(data) => 1 + data.length(),
        }
    }
}

impl TryFrom<&TxEnvelope> for SpanBatchTransactionData {
    type Error = SpanBatchError;

    fn try_from(tx_envelope: &TxEnvelope) -> Result<Self, Self::Error> {
        match tx_envelope {
            TxEnvelope::Legacy(s) => {
                let tx = s.tx();
                Ok(Self::Legacy(SpanBatchLegacyTransactionData {
                    value: tx.value,
                    gas_price: U256::from(tx.gas_price),
                    data: tx.input.clone(),
                }))
            }
            TxEnvelope::Eip2930(s) => {
                let tx = s.tx();
                Ok(Self::Eip2930(SpanBatchEip2930TransactionData {
                    value: tx.value,
                    gas_price: U256::from(tx.gas_price),
                    data: tx.input.clone(),
                    access_list: tx.access_list.clone(),
                }))
            }
            TxEnvelope::Eip1559(s) => {
                let tx = s.tx();
                Ok(Self::Eip1559(SpanBatchEip1559TransactionData {
                    value: tx.value,
                    max_priority_fee_per_gas: U256::from(tx.max_priority_fee_per_gas),
                    max_fee_per_gas: U256::from(tx.max_fee_per_gas),
                    data: tx.input.clone(),
                    access_list: tx.access_list.clone(),
                }))
            }
            other => Err(SpanBatchError::UnsupportedTxType(other.tx_type() as u8)),
        }
    }
}
