// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Audio steganalysis: LSB statistics plus short-time spectral features.
//!
//! Analysis windows the first five seconds of the signal (or all of it when
//! shorter) to keep the cost bounded. The suspiciousness score compares the
//! measured features against natural-audio reference values:
//!
//! ```text
//! dev(v, nat) = min(|v - nat| / nat, 1)
//! score = clamp(0.30*dev(H_lsb, 0.60) + 0.30*dev(flatness, 0.30)
//!             + 0.30*dev(hf_ratio, 0.15) + 0.10*dev(frame_var, 0.10))
//! ```

use crate::analysis::spectral::{spectral_features, SpectralFeatures};
use crate::analysis::stats::{binary_entropy, chi_square_bits, ChiSquare};
use crate::carrier::AudioCarrier;

/// Seconds of audio analyzed from the start of the signal.
const ANALYSIS_WINDOW_SECS: u32 = 5;

/// Natural-audio reference values the score deviates from.
const NATURAL_LSB_ENTROPY: f64 = 0.60;
const NATURAL_FLATNESS: f64 = 0.30;
const NATURAL_HF_RATIO: f64 = 0.15;
const NATURAL_FRAME_VARIANCE: f64 = 0.10;

/// Full audio analysis report.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioReport {
    pub sample_rate: u32,
    pub channels: u16,
    /// Samples actually analyzed (the leading window).
    pub analyzed_samples: usize,
    pub lsb_ones: u64,
    pub lsb_entropy: f64,
    pub chi_square: ChiSquare,
    pub spectral: SpectralFeatures,
    /// Composite suspiciousness in `[0, 1]`.
    pub suspiciousness: f64,
}

/// Normalized deviation from a natural reference value.
fn deviation(value: f64, natural: f64) -> f64 {
    ((value - natural).abs() / natural).min(1.0)
}

/// Run the full audio analysis. Deterministic: the same carrier always
/// produces an identical report.
pub fn analyze_audio(audio: &AudioCarrier) -> AudioReport {
    let window =
        (audio.sample_rate() as usize * ANALYSIS_WINDOW_SECS as usize)
            .saturating_mul(audio.channels() as usize);
    let samples = &audio.samples()[..window.min(audio.samples().len())];

    let lsb_ones = samples.iter().filter(|&&s| s & 1 == 1).count() as u64;
    let total = samples.len() as u64;
    let lsb_entropy = binary_entropy(lsb_ones, total);
    let chi_square = chi_square_bits(lsb_ones, total);

    // Mono mix for the spectral pass, scaled to [-1, 1].
    let channels = audio.channels() as usize;
    let mono: Vec<f64> = samples
        .chunks_exact(channels)
        .map(|frame| {
            frame.iter().map(|&s| s as f64).sum::<f64>()
                / (channels as f64 * i16::MAX as f64)
        })
        .collect();
    let spectral = spectral_features(&mono, audio.sample_rate());

    let score = 0.30 * deviation(lsb_entropy, NATURAL_LSB_ENTROPY)
        + 0.30 * deviation(spectral.flatness, NATURAL_FLATNESS)
        + 0.30 * deviation(spectral.hf_energy_ratio, NATURAL_HF_RATIO)
        + 0.10 * deviation(spectral.frame_variance, NATURAL_FRAME_VARIANCE);

    AudioReport {
        sample_rate: audio.sample_rate(),
        channels: audio.channels(),
        analyzed_samples: samples.len(),
        lsb_ones,
        lsb_entropy,
        chi_square,
        spectral,
        suspiciousness: score.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(seconds: u32) -> AudioCarrier {
        let rate = 8000u32;
        let samples: Vec<i16> = (0..rate * seconds)
            .map(|i| {
                let s = (2.0 * PI * 220.0 * i as f64 / rate as f64).sin();
                (s * 12_000.0) as i16 & !1 // even samples: LSBs all zero
            })
            .collect();
        AudioCarrier::new(rate, 1, samples).unwrap()
    }

    #[test]
    fn analysis_window_caps_at_five_seconds() {
        let report = analyze_audio(&tone(12));
        assert_eq!(report.analyzed_samples, 8000 * 5);
    }

    #[test]
    fn short_signal_analyzed_in_full() {
        let report = analyze_audio(&tone(2));
        assert_eq!(report.analyzed_samples, 8000 * 2);
    }

    #[test]
    fn clean_tone_has_zero_lsb_entropy() {
        let report = analyze_audio(&tone(2));
        assert_eq!(report.lsb_ones, 0);
        assert_eq!(report.lsb_entropy, 0.0);
        assert!(report.spectral.flatness < 0.05);
    }

    #[test]
    fn randomized_lsbs_raise_entropy() {
        let mut carrier = tone(2);
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        let samples: Vec<i16> = carrier
            .samples()
            .iter()
            .map(|&s| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (s & !1) | (state & 1) as i16
            })
            .collect();
        carrier = AudioCarrier::new(8000, 1, samples).unwrap();
        let report = analyze_audio(&carrier);
        assert!(report.lsb_entropy > 0.99, "entropy {}", report.lsb_entropy);
        assert!(report.chi_square.p_value > 1e-6);
    }

    #[test]
    fn analysis_is_deterministic() {
        let carrier = tone(3);
        assert_eq!(analyze_audio(&carrier), analyze_audio(&carrier));
    }
}
