//! A [BlockSource] that uses an alloy provider on the backend.

use alloy_primitives::{Bytes, U64};
use alloy_provider::{Provider, ReqwestProvider};
use alloy_rlp::Decodable;
use alloy_transport::{RpcError, TransportErrorKind, TransportResult};
use async_trait::async_trait;
use blobcal_accumulator::BlockSource;
use blobcal_primitives::Block;
use lru::LruCache;
use op_alloy_consensus::{OpBlock, OpTxEnvelope};
use std::num::NonZeroUsize;
use tracing::{debug, trace};

const CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(size) => size,
    None => panic!("cache size must be non-zero"),
};

/// The [AlloyBlockSource] is a concrete implementation of the [BlockSource] trait, providing
/// L2 blocks over Ethereum JSON-RPC using an alloy provider as the backend.
///
/// **Note**:
/// This source fetches data using the `debug_getRawBlock` method. The RPC must support this
/// namespace.
#[derive(Debug)]
pub struct AlloyBlockSource {
    /// The inner Ethereum JSON-RPC provider.
    inner: ReqwestProvider,
    /// `block_by_number` LRU cache.
    block_by_number_cache: LruCache<u64, Block<OpTxEnvelope>>,
}

impl AlloyBlockSource {
    /// Creates a new [AlloyBlockSource] with the given alloy provider.
    pub fn new(inner: ReqwestProvider) -> Self {
        Self { inner, block_by_number_cache: LruCache::new(CACHE_SIZE) }
    }

    /// Creates a new [AlloyBlockSource] from the provided [reqwest::Url].
    pub fn new_http(url: reqwest::Url) -> Self {
        let inner = ReqwestProvider::new_http(url);
        Self::new(inner)
    }

    /// Returns the chain ID.
    pub async fn chain_id(&mut self) -> Result<u64, RpcError<TransportErrorKind>> {
        self.inner.get_chain_id().await
    }

    /// Returns the latest L2 block number.
    pub async fn latest_block_number(&mut self) -> Result<u64, RpcError<TransportErrorKind>> {
        self.inner.get_block_number().await
    }
}

/// An error for the [AlloyBlockSource].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlloyBlockSourceError {
    /// Failed to fetch a block.
    #[error("Failed to fetch block {number}: {reason}")]
    BlockNotFound {
        /// The requested block height.
        number: u64,
        /// The transport error.
        reason: String,
    },
    /// Failed to decode an [OpBlock] from the raw block.
    #[error("Failed to decode OpBlock from raw block {number}: {reason}")]
    BlockDecode {
        /// The requested block height.
        number: u64,
        /// The RLP error.
        reason: String,
    },
}

/// Decodes the raw RLP of the block at `number`.
fn decode_raw_block(
    number: u64,
    mut raw: &[u8],
) -> Result<Block<OpTxEnvelope>, AlloyBlockSourceError> {
    OpBlock::decode(&mut raw).map(Block::from).map_err(|e| {
        debug!(target: "provider", number, err = %e, "Undecodable raw block");
        AlloyBlockSourceError::BlockDecode { number, reason: e.to_string() }
    })
}

#[async_trait]
impl BlockSource for AlloyBlockSource {
    type Transaction = OpTxEnvelope;
    type Error = AlloyBlockSourceError;

    async fn block_by_number(
        &mut self,
        number: u64,
    ) -> Result<Block<Self::Transaction>, Self::Error> {
        if let Some(block) = self.block_by_number_cache.get(&number) {
            trace!(target: "provider", number, "Block cache hit");
            return Ok(block.clone());
        }

        let raw_block: TransportResult<Bytes> =
            self.inner.raw_request("debug_getRawBlock".into(), [U64::from(number)]).await;
        let raw_block = raw_block.map_err(|e| {
            debug!(target: "provider", number, err = %e, "Failed to fetch raw block");
            AlloyBlockSourceError::BlockNotFound { number, reason: e.to_string() }
        })?;

        let block = decode_raw_block(number, raw_block.as_ref())?;
        self.block_by_number_cache.put(number, block.clone());
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_consensus::{BlockBody, Header, Signed, TxLegacy};
    use alloy_primitives::{Signature, B256};

    /// An endpoint nothing listens on.
    const DEAD_ENDPOINT: &str = "http://127.0.0.1:1";

    fn raw_op_block(number: u64) -> Vec<u8> {
        let tx = TxLegacy { nonce: 7, gas_limit: 21_000, ..Default::default() };
        let op_block = OpBlock {
            header: Header { number, timestamp: number * 2, ..Default::default() },
            body: BlockBody {
                transactions: vec![OpTxEnvelope::Legacy(Signed::new_unchecked(
                    tx,
                    Signature::test_signature(),
                    B256::ZERO,
                ))],
                ommers: vec![],
                withdrawals: None,
            },
        };
        alloy_rlp::encode(&op_block)
    }

    #[test]
    fn test_decode_raw_block() {
        let block = decode_raw_block(11_443_817, &raw_op_block(11_443_817)).unwrap();
        assert_eq!(block.number, 11_443_817);
        assert_eq!(block.timestamp, 22_887_634);
        assert_eq!(block.transactions.len(), 1);
        assert!(block.chargeable_tx_bytes() > 0);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_raw_block(5, &[0xDE, 0xAD, 0xBE, 0xEF]).unwrap_err();
        assert!(matches!(err, AlloyBlockSourceError::BlockDecode { number: 5, .. }));
        assert!(err.to_string().starts_with("Failed to decode OpBlock from raw block 5: "));
    }

    #[tokio::test]
    async fn test_cached_block_skips_rpc() {
        let mut source = AlloyBlockSource::new_http(DEAD_ENDPOINT.try_into().unwrap());
        let block = decode_raw_block(9, &raw_op_block(9)).unwrap();
        source.block_by_number_cache.put(9, block.clone());
        assert_eq!(source.block_by_number(9).await.unwrap(), block);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let mut source = AlloyBlockSource::new_http(DEAD_ENDPOINT.try_into().unwrap());
        let err = source.block_by_number(3).await.unwrap_err();
        let AlloyBlockSourceError::BlockNotFound { number, reason } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(*number, 3);
        // The transport failure is part of the message an operator sees.
        assert!(!reason.is_empty());
        assert_eq!(err.to_string(), format!("Failed to fetch block 3: {reason}"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_aborts_run_with_cause() {
        use blobcal_accumulator::{test_utils::TestChannel, Accumulator, CalibrationConfig};

        let source = AlloyBlockSource::new_http(DEAD_ENDPOINT.try_into().unwrap());
        let cfg = CalibrationConfig { starting_block: 3, ..Default::default() };
        let err = Accumulator::new(cfg, source, TestChannel::new(1_000)).run().await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Block source failed at height 3: Failed to fetch block 3: "));
        assert!(msg.len() > "Block source failed at height 3: Failed to fetch block 3: ".len());
    }

    #[tokio::test]
    #[ignore]
    async fn test_alloy_block_source_chain_id() {
        let mut source =
            AlloyBlockSource::new_http("https://mainnet.optimism.io".try_into().unwrap());
        let chain_id = source.chain_id().await.unwrap();
        assert_eq!(chain_id, 10);
    }

    #[tokio::test]
    #[ignore]
    async fn test_alloy_block_source_latest_block_number() {
        let mut source =
            AlloyBlockSource::new_http("https://mainnet.optimism.io".try_into().unwrap());
        let number = source.latest_block_number().await.unwrap();
        assert!(number > 0);
    }
}
