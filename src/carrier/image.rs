// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Image slot adapter over decoded RGB/RGBA pixel buffers.
//!
//! Slots are (pixel, channel) pairs over R/G/B in raster order. The alpha
//! channel is never written, and fully transparent pixels (alpha == 0) are
//! skipped in the enumeration entirely — they contribute no slots, so the
//! same carrier always reproduces an identical enumeration and transparent
//! pixels stay bit-identical through an embed.

use crate::carrier::SlotAdapter;
use crate::error::EngineError;

/// Channels that carry payload bits per pixel (R, G, B).
const PAYLOAD_CHANNELS: usize = 3;

/// Decoded image carrier: interleaved 8-bit RGB or RGBA samples.
#[derive(Debug, Clone)]
pub struct ImageCarrier {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
    /// Flat byte offsets of eligible R/G/B samples, in raster order,
    /// three per eligible pixel.
    slots: Vec<u32>,
}

impl ImageCarrier {
    /// Build a carrier from decoded pixel data.
    ///
    /// `data` is row-major, channel-interleaved, `width * height * channels`
    /// bytes, with `channels` either 3 (RGB) or 4 (RGBA).
    ///
    /// # Errors
    /// - [`EngineError::InvalidCarrier`] if the channel count or buffer
    ///   length is wrong.
    /// - [`EngineError::CarrierTooLarge`] if the buffer exceeds the 32-bit
    ///   offset space.
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, EngineError> {
        if channels != 3 && channels != 4 {
            return Err(EngineError::InvalidCarrier(
                "image must have 3 (RGB) or 4 (RGBA) channels",
            ));
        }
        let expected = width as u64 * height as u64 * channels as u64;
        if expected != data.len() as u64 {
            return Err(EngineError::InvalidCarrier(
                "pixel buffer length does not match dimensions",
            ));
        }
        if expected > u32::MAX as u64 {
            return Err(EngineError::CarrierTooLarge);
        }

        let slots = enumerate_slots(&data, channels as usize);
        Ok(Self { width, height, channels, data, slots })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// The raw interleaved pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the carrier, returning the pixel buffer for re-encoding.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The channel bytes of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let ch = self.channels as usize;
        let base = (y as usize * self.width as usize + x as usize) * ch;
        &self.data[base..base + ch]
    }

    /// Number of eligible (non-transparent) pixels.
    pub fn eligible_pixels(&self) -> usize {
        self.slots.len() / PAYLOAD_CHANNELS
    }

    /// Iterate one channel's values over eligible pixels only.
    /// `channel` is 0 (R), 1 (G) or 2 (B).
    pub fn eligible_channel(&self, channel: usize) -> impl Iterator<Item = u8> + '_ {
        debug_assert!(channel < PAYLOAD_CHANNELS);
        self.slots
            .chunks_exact(PAYLOAD_CHANNELS)
            .map(move |pixel| self.data[pixel[channel] as usize])
    }
}

/// Enumerate eligible R/G/B byte offsets in raster order.
/// Fully transparent RGBA pixels contribute no slots.
fn enumerate_slots(data: &[u8], channels: usize) -> Vec<u32> {
    let pixels = data.len() / channels;
    let mut slots = Vec::with_capacity(pixels * PAYLOAD_CHANNELS);
    for p in 0..pixels {
        let base = p * channels;
        if channels == 4 && data[base + 3] == 0 {
            continue;
        }
        for c in 0..PAYLOAD_CHANNELS {
            slots.push((base + c) as u32);
        }
    }
    slots
}

impl SlotAdapter for ImageCarrier {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn read_bit(&self, slot: usize) -> u8 {
        self.data[self.slots[slot] as usize] & 1
    }

    fn write_bit(&mut self, slot: usize, bit: u8) {
        let offset = self.slots[slot] as usize;
        self.data[offset] = (self.data[offset] & 0xFE) | (bit & 1);
    }
}
