// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Audio slot adapter over decoded 16-bit PCM samples.
//!
//! One slot per sample, enumerated in the channel-interleaved order the
//! collaborator codec produced. The enumeration must match decode order
//! exactly, otherwise extraction on a re-decoded file would read different
//! slots.

use crate::carrier::SlotAdapter;
use crate::error::EngineError;

/// Decoded PCM audio carrier.
#[derive(Debug, Clone)]
pub struct AudioCarrier {
    sample_rate: u32,
    channels: u16,
    samples: Vec<i16>,
}

impl AudioCarrier {
    /// Build a carrier from decoded interleaved PCM samples.
    ///
    /// # Errors
    /// - [`EngineError::InvalidCarrier`] if `channels` is 0 or the sample
    ///   count is not a multiple of the channel count.
    /// - [`EngineError::CarrierTooLarge`] if the sample count exceeds the
    ///   32-bit slot index space.
    pub fn new(
        sample_rate: u32,
        channels: u16,
        samples: Vec<i16>,
    ) -> Result<Self, EngineError> {
        if channels == 0 {
            return Err(EngineError::InvalidCarrier(
                "audio must have at least one channel",
            ));
        }
        if samples.len() % channels as usize != 0 {
            return Err(EngineError::InvalidCarrier(
                "sample count is not a multiple of the channel count",
            ));
        }
        if samples.len() > u32::MAX as usize {
            return Err(EngineError::CarrierTooLarge);
        }
        Ok(Self { sample_rate, channels, samples })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// The raw interleaved samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consume the carrier, returning the samples for re-encoding.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

impl SlotAdapter for AudioCarrier {
    fn slot_count(&self) -> usize {
        self.samples.len()
    }

    fn read_bit(&self, slot: usize) -> u8 {
        (self.samples[slot] & 1) as u8
    }

    fn write_bit(&mut self, slot: usize, bit: u8) {
        self.samples[slot] = (self.samples[slot] & !1) | (bit & 1) as i16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_slot_per_sample() {
        let audio = AudioCarrier::new(44_100, 2, vec![0i16; 1000]).unwrap();
        assert_eq!(audio.slot_count(), 1000);
    }

    #[test]
    fn write_preserves_upper_bits() {
        let mut audio = AudioCarrier::new(8000, 1, vec![-12_345i16, 12_345]).unwrap();
        audio.write_bit(0, 0);
        audio.write_bit(1, 1);
        assert_eq!(audio.samples()[0] & !1, -12_345i16 & !1);
        assert_eq!(audio.samples()[1] & !1, 12_345i16 & !1);
        assert_eq!(audio.read_bit(0), 0);
        assert_eq!(audio.read_bit(1), 1);
    }

    #[test]
    fn negative_samples_roundtrip() {
        let mut audio = AudioCarrier::new(8000, 1, vec![i16::MIN, -1, 0, 1, i16::MAX]).unwrap();
        for slot in 0..audio.slot_count() {
            audio.write_bit(slot, 1);
            assert_eq!(audio.read_bit(slot), 1);
            audio.write_bit(slot, 0);
            assert_eq!(audio.read_bit(slot), 0);
        }
    }

    #[test]
    fn zero_channels_rejected() {
        assert!(matches!(
            AudioCarrier::new(8000, 0, vec![]),
            Err(EngineError::InvalidCarrier(_))
        ));
    }

    #[test]
    fn ragged_interleave_rejected() {
        assert!(matches!(
            AudioCarrier::new(8000, 2, vec![0i16; 7]),
            Err(EngineError::InvalidCarrier(_))
        ));
    }
}
