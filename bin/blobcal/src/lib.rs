#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod cli;
pub use cli::{init_tracing_subscriber, Cli};

use anyhow::{anyhow, Result};
use blobcal_accumulator::{Accumulator, Report, ResultsLog};
use blobcal_channel::ChannelBuilder;
use blobcal_providers_alloy::AlloyBlockSource;
use tracing::{info, warn};

/// Runs a calibration as configured by the [Cli] and appends its record to the results file.
///
/// The results file is opened before any block is fetched. Nothing is appended when the run
/// fails.
pub async fn run(cli: &Cli) -> Result<Report> {
    let calibration = cli.calibration_config();

    println!("Starting block: {}", calibration.starting_block);
    println!("Number of blobs: {}", calibration.blobs);
    println!("Minimum tx bytes: {}", calibration.min_tx_bytes);
    println!("Compression algo: {}", calibration.compression_algo);
    println!("Compressor kind: {}", cli.compressor_kind);
    println!("Batch type: {}", cli.batch_type);

    let mut log = ResultsLog::open(&cli.results_file)
        .map_err(|e| anyhow!("Failed to open results file {}: {e}", cli.results_file.display()))?;

    let mut source = AlloyBlockSource::new_http(cli.l2_rpc_url.clone());
    let node_chain_id = match (source.chain_id().await, source.latest_block_number().await) {
        (Ok(chain_id), Ok(latest)) => {
            info!(target: "blobcal", chain_id, latest, url = %cli.l2_rpc_url, "Connected to L2 node");
            if latest < calibration.starting_block {
                warn!(target: "blobcal", latest, starting_block = calibration.starting_block, "Starting block is ahead of the L2 head");
            }
            Some(chain_id)
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(target: "blobcal", err = %e, url = %cli.l2_rpc_url, "Failed to query L2 node");
            None
        }
    };

    let channel_cfg = cli.channel_config(node_chain_id);
    if cli.l2_chain_id.is_some_and(|id| node_chain_id.is_some_and(|node| node != id)) {
        warn!(target: "blobcal", l2_chain_id = channel_cfg.l2_chain_id, ?node_chain_id, "L2 chain id differs from the node's");
    }
    let channel = ChannelBuilder::new(channel_cfg).map_err(|e| anyhow!(e))?;

    let report = Accumulator::new(calibration, source, channel).run().await.map_err(|e| anyhow!(e))?;

    println!("{report}");
    log.append(&report)
        .map_err(|e| anyhow!("Failed to append to {}: {e}", cli.results_file.display()))?;
    info!(target: "blobcal", path = %cli.results_file.display(), "Appended results");
    Ok(report)
}
