#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod accumulator;
pub use accumulator::{Accumulator, LoopState};

pub mod config;
pub use config::CalibrationConfig;

pub mod errors;
pub use errors::AccumulatorError;

pub mod report;
pub use report::{Report, ResultsLog};

pub mod stats;
pub use stats::RunningStats;

pub mod traits;
pub use traits::{AddOutcome, BlockSource, Channel};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Re-export commonly used types and traits.
pub mod prelude {
    pub use crate::{
        Accumulator, AccumulatorError, AddOutcome, BlockSource, CalibrationConfig, Channel,
        LoopState, Report, ResultsLog, RunningStats,
    };
    pub use blobcal_primitives::prelude::*;
}
