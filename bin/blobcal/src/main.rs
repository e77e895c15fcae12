#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use anyhow::Result;
use blobcal::{init_tracing_subscriber, run, Cli};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber(cli.v)?;

    if let Err(e) = run(&cli).await {
        error!(target: "blobcal", "Calibration failed: {e:#}");
        return Err(e);
    }
    Ok(())
}
