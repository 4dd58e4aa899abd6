// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Video slot adapter: first decoded frame only.
//!
//! Slots come exclusively from the first frame, which is treated exactly as
//! the image adapter treats a still image. All later frames pass through the
//! carrier untouched as opaque byte buffers; the collaborator remuxes them
//! unchanged around the modified first frame. This bounds embed/extract cost
//! to one frame regardless of video length.

use crate::carrier::image::ImageCarrier;
use crate::carrier::SlotAdapter;

/// Decoded video carrier: one materialized frame plus opaque trailing frames.
#[derive(Debug, Clone)]
pub struct VideoCarrier {
    first_frame: ImageCarrier,
    trailing: Vec<Vec<u8>>,
}

impl VideoCarrier {
    /// Build a carrier from the decoded first frame and the remaining
    /// frames' raw (still-encoded) bytes.
    pub fn new(first_frame: ImageCarrier, trailing: Vec<Vec<u8>>) -> Self {
        Self { first_frame, trailing }
    }

    /// Total frame count including the first frame.
    pub fn frame_count(&self) -> usize {
        1 + self.trailing.len()
    }

    pub fn first_frame(&self) -> &ImageCarrier {
        &self.first_frame
    }

    /// The untouched frames after frame 0.
    pub fn trailing_frames(&self) -> &[Vec<u8>] {
        &self.trailing
    }

    /// Consume the carrier for remultiplexing: the (possibly modified)
    /// first frame and the unchanged trailing frames.
    pub fn into_parts(self) -> (ImageCarrier, Vec<Vec<u8>>) {
        (self.first_frame, self.trailing)
    }
}

impl SlotAdapter for VideoCarrier {
    fn slot_count(&self) -> usize {
        self.first_frame.slot_count()
    }

    fn read_bit(&self, slot: usize) -> u8 {
        self.first_frame.read_bit(slot)
    }

    fn write_bit(&mut self, slot: usize, bit: u8) {
        self.first_frame.write_bit(slot, bit);
    }
}
