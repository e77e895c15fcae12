//! Contains the [ChannelBuilder], which packs blocks into a compressed channel and cuts the
//! result into frames.

use crate::{BlockAdded, ChannelBuilderError, ChannelConfig, ChannelOut, FullReason};
use blobcal_accumulator::{AddOutcome, Channel};
use blobcal_primitives::{
    params::{ChannelId, FRAME_V0_OVERHEAD},
    Block, BlockTransaction, Frame,
};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Builds a single channel at a time.
///
/// Blocks are batched by the [ChannelOut] of the configured batch type and compressed until the
/// channel reports it is full. [Channel::output_frames] closes the channel and cuts the compressed
/// data into frames of at most `max_frame_size` encoded bytes. [Channel::reset] starts a fresh
/// channel with a new random id.
#[derive(Debug)]
pub struct ChannelBuilder {
    cfg: ChannelConfig,
    id: ChannelId,
    out: ChannelOut,
    blocks: usize,
    full: Option<FullReason>,
    frame_number: u16,
    frames: VecDeque<Frame>,
    output_bytes: usize,
}

impl ChannelBuilder {
    /// Creates a new [ChannelBuilder] after checking the [ChannelConfig].
    pub fn new(cfg: ChannelConfig) -> Result<Self, ChannelBuilderError> {
        cfg.check()?;
        let out = ChannelOut::new(&cfg);
        Ok(Self {
            cfg,
            id: rand::random(),
            out,
            blocks: 0,
            full: None,
            frame_number: 0,
            frames: VecDeque::new(),
            output_bytes: 0,
        })
    }

    /// Returns the [ChannelConfig].
    pub const fn config(&self) -> &ChannelConfig {
        &self.cfg
    }

    /// Returns the id of the current channel.
    pub const fn id(&self) -> ChannelId {
        self.id
    }

    /// Returns the uncompressed batch bytes in the current channel.
    pub fn input_bytes(&self) -> u64 {
        self.out.input_bytes()
    }

    /// Returns the number of blocks in the current channel.
    pub const fn blocks(&self) -> usize {
        self.blocks
    }

    /// Returns why the channel stopped accepting blocks, if it has.
    pub const fn full_reason(&self) -> Option<FullReason> {
        self.full
    }

    /// Returns the compressed bytes not yet cut into frames.
    pub fn ready_bytes(&self) -> usize {
        self.out.ready_bytes()
    }

    /// Returns the number of frames not yet taken with [ChannelBuilder::next_frame].
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Takes the next output frame.
    pub fn next_frame(&mut self) -> Option<Frame> {
        self.frames.pop_front()
    }

    /// Returns the output frames not yet taken.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    fn mark_full(&mut self, reason: FullReason) {
        debug!(target: "channel", blocks = self.blocks, input_bytes = self.input_bytes(), %reason, "Channel full");
        self.full = Some(reason);
    }
}

impl Channel for ChannelBuilder {
    type Error = ChannelBuilderError;

    fn add_block<T: BlockTransaction>(&mut self, block: &Block<T>) -> AddOutcome<Self::Error> {
        if let Some(reason) = self.full {
            trace!(target: "channel", number = block.number, %reason, "Refusing block");
            return AddOutcome::CapacityExceeded;
        }

        match self.out.add_block(block) {
            Ok(BlockAdded::Added) => {
                self.blocks += 1;
                trace!(
                    target: "channel",
                    number = block.number,
                    input_bytes = self.input_bytes(),
                    "Added block"
                );
                AddOutcome::Accepted
            }
            Ok(BlockAdded::AddedFull(reason)) => {
                self.blocks += 1;
                self.mark_full(reason);
                AddOutcome::Accepted
            }
            Ok(BlockAdded::Refused(reason)) => {
                self.mark_full(reason);
                AddOutcome::CapacityExceeded
            }
            Err(e) => AddOutcome::Fault(e),
        }
    }

    fn output_frames(&mut self) -> Result<(), Self::Error> {
        if self.full == Some(FullReason::Closed) {
            return Ok(());
        }
        self.out.close()?;
        self.full = Some(FullReason::Closed);

        let max_data_len = self.cfg.max_frame_size - FRAME_V0_OVERHEAD;
        loop {
            let mut data = vec![0u8; self.out.ready_bytes().min(max_data_len)];
            let read = self.out.read(&mut data)?;
            data.truncate(read);

            let frame = Frame {
                id: self.id,
                number: self.frame_number,
                data,
                is_last: self.out.ready_bytes() == 0,
            };
            self.frame_number =
                self.frame_number.checked_add(1).ok_or(ChannelBuilderError::TooManyFrames)?;
            self.output_bytes += frame.size();
            let is_last = frame.is_last;
            self.frames.push_back(frame);
            if is_last {
                break;
            }
        }

        debug!(
            target: "channel",
            blocks = self.blocks,
            input_bytes = self.input_bytes(),
            frames = self.frame_number,
            output_bytes = self.output_bytes,
            "Closed channel"
        );
        Ok(())
    }

    fn reset(&mut self) {
        self.id = rand::random();
        self.out.reset();
        self.blocks = 0;
        self.full = None;
        self.frame_number = 0;
        self.frames.clear();
        self.output_bytes = 0;
    }

    fn output_bytes(&self) -> usize {
        self.output_bytes
    }
}
