//! This module contains all CLI-specific code for the blobcal binary.

use blobcal_accumulator::{
    config::{DEFAULT_MIN_TX_BYTES, DEFAULT_STARTING_BLOCK},
    CalibrationConfig,
};
use blobcal_channel::{
    BatchType, ChannelConfig, CompressionAlgo, CompressorKind, DEFAULT_APPROX_COMPR_RATIO,
    DEFAULT_L2_CHAIN_ID,
};
use blobcal_primitives::params::MAX_RLP_BYTES_PER_CHANNEL;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod parser;
pub(crate) use parser::{parse_ratio, parse_url};

mod tracing_util;
pub use tracing_util::init_tracing_subscriber;

/// The blobcal binary CLI application arguments.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level on top of `INFO` (0-2)
    #[arg(long, short, help = "Verbosity level on top of INFO (0-2)", action = ArgAction::Count)]
    pub v: u8,
    /// Number of blobs a channel's frames are sized for.
    #[clap(long, env = "BLOBCAL_BLOBS", default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub blobs: u64,
    /// First L2 block height to fetch.
    #[clap(long, env = "BLOBCAL_STARTING_BLOCK", default_value_t = DEFAULT_STARTING_BLOCK)]
    pub starting_block: u64,
    /// Chargeable transaction bytes to process before stopping.
    #[clap(long, env = "BLOBCAL_MINIMUM_TX_BYTES", default_value_t = DEFAULT_MIN_TX_BYTES)]
    pub minimum_tx_bytes: u64,
    /// Compression algorithm: zlib, brotli, brotli-9, brotli-10 or brotli-11.
    #[clap(long, env = "BLOBCAL_COMPRESSION_ALGO", default_value = "zlib")]
    pub compression_algo: CompressionAlgo,
    /// Channel capacity strategy: shadow or ratio.
    #[clap(long, env = "BLOBCAL_COMPRESSOR_KIND", default_value = "shadow")]
    pub compressor_kind: CompressorKind,
    /// Compression ratio assumed by the ratio strategy.
    #[clap(long, env = "BLOBCAL_APPROX_COMPR_RATIO", default_value_t = DEFAULT_APPROX_COMPR_RATIO, value_parser = parse_ratio)]
    pub approx_compr_ratio: f64,
    /// Batch encoding: span or single.
    #[clap(long, env = "BLOBCAL_BATCH_TYPE", default_value = "span")]
    pub batch_type: BatchType,
    /// L2 chain id span batch transactions are signed for. Queried from the node when unset.
    #[clap(long, env = "BLOBCAL_L2_CHAIN_ID")]
    pub l2_chain_id: Option<u64>,
    /// Uncompressed batch bytes a channel accepts. Fjord raised the limit to 100000000.
    #[clap(long, env = "BLOBCAL_MAX_RLP_BYTES_PER_CHANNEL", default_value_t = MAX_RLP_BYTES_PER_CHANNEL)]
    pub max_rlp_bytes_per_channel: u64,
    /// Address of the L2 JSON-RPC endpoint to use (eth and debug namespace required).
    #[clap(long, env = "L2_RPC_URL", default_value = "http://localhost:8545", value_parser = parse_url)]
    pub l2_rpc_url: reqwest::Url,
    /// Path of the append-only results file.
    #[clap(long, env = "BLOBCAL_RESULTS_FILE", default_value = "results.txt")]
    pub results_file: PathBuf,
}

impl Cli {
    /// Returns the [CalibrationConfig] of the run.
    pub fn calibration_config(&self) -> CalibrationConfig {
        CalibrationConfig {
            starting_block: self.starting_block,
            min_tx_bytes: self.minimum_tx_bytes,
            blobs: self.blobs,
            compression_algo: self.compression_algo.to_string(),
        }
    }

    /// Returns the [ChannelConfig] of the run.
    ///
    /// The L2 chain id flag takes precedence over `node_chain_id`, the chain id reported by the
    /// node, which takes precedence over Base mainnet.
    pub fn channel_config(&self, node_chain_id: Option<u64>) -> ChannelConfig {
        ChannelConfig::for_blobs(self.blobs as usize)
            .with_compression_algo(self.compression_algo)
            .with_compressor_kind(self.compressor_kind)
            .with_approx_compr_ratio(self.approx_compr_ratio)
            .with_batch_type(self.batch_type)
            .with_l2_chain_id(self.l2_chain_id.or(node_chain_id).unwrap_or(DEFAULT_L2_CHAIN_ID))
            .with_max_rlp_bytes_per_channel(self.max_rlp_bytes_per_channel)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["blobcal"]).unwrap();
        assert_eq!(cli.v, 0);
        assert_eq!(cli.blobs, 1);
        assert_eq!(cli.starting_block, 11_443_817);
        assert_eq!(cli.minimum_tx_bytes, 4_500_000);
        assert_eq!(cli.compression_algo, CompressionAlgo::Zlib);
        assert_eq!(cli.compressor_kind, CompressorKind::Shadow);
        assert_eq!(cli.approx_compr_ratio, 0.4);
        assert_eq!(cli.results_file, PathBuf::from("results.txt"));
        assert_eq!(cli.batch_type, BatchType::Span);
        assert_eq!(cli.l2_chain_id, None);
        assert_eq!(cli.max_rlp_bytes_per_channel, 10_000_000);
        assert_eq!(cli.calibration_config(), CalibrationConfig::default());
        assert_eq!(cli.channel_config(None), ChannelConfig::default());
    }

    #[test]
    fn test_chain_id_precedence() {
        let cli = Cli::try_parse_from(["blobcal"]).unwrap();
        assert_eq!(cli.channel_config(Some(10)).l2_chain_id, 10);

        let cli = Cli::try_parse_from(["blobcal", "--l2-chain-id", "84532"]).unwrap();
        assert_eq!(cli.channel_config(Some(10)).l2_chain_id, 84_532);
        assert_eq!(cli.channel_config(None).l2_chain_id, 84_532);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "blobcal",
            "--blobs",
            "6",
            "--starting-block",
            "100",
            "--minimum-tx-bytes",
            "1000",
            "--compression-algo",
            "brotli",
            "--compressor-kind",
            "ratio",
            "--approx-compr-ratio",
            "0.5",
            "--batch-type",
            "single",
            "--max-rlp-bytes-per-channel",
            "100000000",
            "--l2-rpc-url",
            "http://node:9545",
            "--results-file",
            "/tmp/out.txt",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.v, 2);
        let calibration = cli.calibration_config();
        assert_eq!(calibration.starting_block, 100);
        assert_eq!(calibration.min_tx_bytes, 1_000);
        assert_eq!(calibration.blobs, 6);
        assert_eq!(calibration.compression_algo, "brotli-10");

        let channel = cli.channel_config(None);
        assert_eq!(channel.max_frame_size, 6 * 130_044);
        assert_eq!(channel.batch_type, BatchType::Single);
        assert_eq!(channel.max_rlp_bytes_per_channel, 100_000_000);
        assert_eq!(channel.compression_algo, CompressionAlgo::Brotli10);
        assert_eq!(channel.compressor_kind, CompressorKind::Ratio);
        assert_eq!(channel.approx_compr_ratio, 0.5);
        assert_eq!(cli.l2_rpc_url.host_str(), Some("node"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Cli::try_parse_from(["blobcal", "--blobs", "0"]).is_err());
        assert!(Cli::try_parse_from(["blobcal", "--compression-algo", "lz4"]).is_err());
        assert!(Cli::try_parse_from(["blobcal", "--compressor-kind", "exact"]).is_err());
        assert!(Cli::try_parse_from(["blobcal", "--approx-compr-ratio", "0"]).is_err());
        assert!(Cli::try_parse_from(["blobcal", "--batch-type", "raw"]).is_err());
        assert!(Cli::try_parse_from(["blobcal", "--l2-chain-id", "base"]).is_err());
        assert!(Cli::try_parse_from(["blobcal", "--l2-rpc-url", "nope"]).is_err());
    }
}
