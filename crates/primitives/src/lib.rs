#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod block;
pub use block::{Block, BlockTransaction, L1Origin};

pub mod frame;
pub use frame::{Frame, FrameDecodeError};

pub mod params;

mod size;
pub use size::chargeable_tx_bytes;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// The prelude exports common types and traits.
pub mod prelude {
    pub use crate::{
        block::{Block, BlockTransaction, L1Origin},
        chargeable_tx_bytes,
        frame::Frame,
        params::*,
    };
}
