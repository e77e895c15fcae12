//! This module contains the [SpanBatchTransactions] type and logic for encoding transactions in a
//! span batch.

use super::{write_uvarint, SpanBatchBits, SpanBatchTransactionData};
use crate::SpanBatchError;
use alloy_consensus::{TxEnvelope, TxType};
use alloy_eips::eip2718::Decodable2718;
use alloy_primitives::{Address, Signature, TxKind, U256};
use alloy_rlp::Encodable;

/// The `r` and `s` values of a transaction signature. The parity lives in the y parity bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanBatchSignature {
    /// The r value of the signature.
    pub r: U256,
    /// The s value of the signature.
    pub s: U256,
}

impl From<&Signature> for SpanBatchSignature {
    fn from(sig: &Signature) -> Self {
        Self { r: sig.r(), s: sig.s() }
    }
}

/// The transactions of every block in a span batch, split into columns.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpanBatchTransactions {
    /// The total number of transactions in the span batch.
    pub total_block_tx_count: u64,
    /// The contract creation bits, standard span-batch bitlist.
    pub contract_creation_bits: SpanBatchBits,
    /// The y parity bits, standard span-batch bitlist.
    pub y_parity_bits: SpanBatchBits,
    /// The transaction signatures.
    pub tx_sigs: Vec<SpanBatchSignature>,
    /// The transaction nonces.
    pub tx_nonces: Vec<u64>,
    /// The transaction gas limits.
    pub tx_gases: Vec<u64>,
    /// The `to` addresses of the transactions that are not contract creations.
    pub tx_tos: Vec<Address>,
    /// The encoded [SpanBatchTransactionData] of every transaction.
    pub tx_datas: Vec<Vec<u8>>,
    /// The protected bits of the legacy transactions, standard span-batch bitlist.
    pub protected_bits: SpanBatchBits,
    /// Total legacy transaction count in the span batch.
    pub legacy_tx_count: u64,
}

impl SpanBatchTransactions {
    /// Adds the EIP-2718 encoded transaction `raw` to the columns.
    ///
    /// A replay protected transaction must be signed for `chain_id`.
    pub fn add_tx(&mut self, raw: &[u8], chain_id: u64) -> Result<(), SpanBatchError> {
        let envelope = TxEnvelope::decode_2718(&mut &raw[..])
            .map_err(|e| SpanBatchError::InvalidTransaction(e.to_string()))?;
        let tx_data = SpanBatchTransactionData::try_from(&envelope)?;

        let (signature, to, nonce, gas, tx_chain_id, protected) = match &envelope {
            TxEnvelope::Legacy(s) => {
                let tx = s.tx();
                (s.signature(), tx.to, tx.nonce, tx.gas_limit, tx.chain_id, tx.chain_id.is_some())
            }
            TxEnvelope::Eip2930(s) => {
                let tx = s.tx();
                (s.signature(), tx.to, tx.nonce, tx.gas_limit, Some(tx.chain_id), true)
            }
            TxEnvelope::Eip1559(s) => {
                let tx = s.tx();
                (s.signature(), tx.to, tx.nonce, tx.gas_limit, Some(tx.chain_id), true)
            }
            other => return Err(SpanBatchError::UnsupportedTxType(other.tx_type() as u8)),
        };

        if protected && tx_chain_id != Some(chain_id) {
            return Err(SpanBatchError::ChainIdMismatch { expected: chain_id, found: tx_chain_id });
        }

        let index = self.total_block_tx_count as usize;
        if envelope.tx_type() == TxType::Legacy {
            self.protected_bits.set_bit(self.legacy_tx_count as usize, protected);
            self.legacy_tx_count += 1;
        }
        match to {
            TxKind::Call(address) => self.tx_tos.push(address),
            TxKind::Create => self.contract_creation_bits.set_bit(index, true),
        }
        self.y_parity_bits.set_bit(index, signature.v().y_parity());
        self.tx_sigs.push(signature.into());
        self.tx_nonces.push(nonce);
        self.tx_gases.push(gas);

        let mut buf = Vec::with_capacity(tx_data.length());
        tx_data.encode(&mut buf);
        self.tx_datas.push(buf);

        self.total_block_tx_count += 1;
        Ok(())
    }

    /// Encodes the [SpanBatchTransactions] into a writer.
    pub fn encode(&self, w: &mut Vec<u8>) -> Result<(), SpanBatchError> {
        let total = self.total_block_tx_count as usize;
        self.contract_creation_bits.encode(w, total)?;
        self.y_parity_bits.encode(w, total)?;
        for sig in &self.tx_sigs {
            w.extend_from_slice(&sig.r.to_be_bytes::<32>());
            w.extend_from_slice(&sig.s.to_be_bytes::<32>());
        }
        for to in &self.tx_tos {
            w.extend_from_slice(to.as_slice());
        }
        for data in &self.tx_datas {
            w.extend_from_slice(data);
        }
        for nonce in &self.tx_nonces {
            write_uvarint(w, *nonce);
        }
        for gas in &self.tx_gases {
            write_uvarint(w, *gas);
        }
        self.protected_bits.encode(w, self.legacy_tx_count as usize)?;
        Ok(())
    }

    /// Moves the transactions of `other` behind the transactions already held.
    pub fn append(&mut self, other: Self) {
        let offset = self.total_block_tx_count as usize;
        for i in 0..other.total_block_tx_count as usize {
            if other.contract_creation_bits.get_bit(i) {
                self.contract_creation_bits.set_bit(offset + i, true);
            }
            if other.y_parity_bits.get_bit(i) {
                self.y_parity_bits.set_bit(offset + i, true);
            }
        }
        let legacy_offset = self.legacy_tx_count as usize;
        for i in 0..other.legacy_tx_count as usize {
            if other.protected_bits.get_bit(i) {
                self.protected_bits.set_bit(legacy_offset + i, true);
            }
        }

        self.tx_sigs.extend(other.tx_sigs);
        self.tx_nonces.extend(other.tx_nonces);
        self.tx_gases.extend(other.tx_gases);
        self.tx_tos.extend(other.tx_tos);
        self.tx_datas.extend(other.tx_datas);
        self.total_block_tx_count += other.total_block_tx_count;
        self.legacy_tx_count += other.legacy_tx_count;
    }

    /// Clears every column.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
