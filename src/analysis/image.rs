// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Image steganalysis: bitplane statistics and LSB randomness scoring.
//!
//! All statistics run over eligible pixels only (fully transparent pixels
//! carry no slots, so they carry no evidence either). The suspiciousness
//! formula is fixed and documented:
//!
//! ```text
//! chi_term(c) = 1 - min(log10(chi(c) + 1) / 5.5, 1)
//! score       = clamp(mean over R,G,B of 0.5*H_lsb(c) + 0.5*chi_term(c))
//! ```
//!
//! `H_lsb` is the binary entropy of the channel's LSB plane and `chi` the
//! chi-square statistic against a 50/50 split. Natural images have a large
//! chi statistic (biased LSBs) and sub-maximal entropy; scatter embedding
//! drives both terms up. The 5.5 log-scale constant is an empirical
//! natural-image reference.

use crate::analysis::stats::{binary_entropy, chi_square_bits, ChiSquare};
use crate::carrier::ImageCarrier;

/// Empirical log10 chi-square magnitude of unmodified natural images.
pub const NATURAL_CHI_LOG: f64 = 5.5;

/// Payload channels analyzed per pixel.
const CHANNELS: usize = 3;

/// Ones count per bit position, per R/G/B channel, over eligible pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitplaneHistogram {
    /// `ones[channel][bit]` = number of eligible pixels with that bit set.
    pub ones: [[u64; 8]; CHANNELS],
    /// Number of eligible pixels (the per-plane total).
    pub eligible_pixels: u64,
}

/// Full image analysis report.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReport {
    pub width: u32,
    pub height: u32,
    pub eligible_pixels: u64,
    pub bitplanes: BitplaneHistogram,
    /// LSB ones count per channel (bit 0 of the histogram, for convenience).
    pub lsb_counts: [u64; CHANNELS],
    pub chi_square: [ChiSquare; CHANNELS],
    pub lsb_entropy: [f64; CHANNELS],
    /// Composite suspiciousness in `[0, 1]`.
    pub suspiciousness: f64,
}

/// Per-channel raw counts.
#[derive(Debug, Clone, Copy)]
struct ChannelCounts {
    ones: [u64; 8],
    total: u64,
}

fn count_channel(img: &ImageCarrier, channel: usize) -> ChannelCounts {
    let mut ones = [0u64; 8];
    let mut total = 0u64;
    for value in img.eligible_channel(channel) {
        for (bit, count) in ones.iter_mut().enumerate() {
            *count += ((value >> bit) & 1) as u64;
        }
        total += 1;
    }
    ChannelCounts { ones, total }
}

#[cfg(feature = "parallel")]
fn count_channels(img: &ImageCarrier) -> [ChannelCounts; CHANNELS] {
    use rayon::prelude::*;
    let counts: Vec<ChannelCounts> = (0..CHANNELS)
        .into_par_iter()
        .map(|c| count_channel(img, c))
        .collect();
    [counts[0], counts[1], counts[2]]
}

#[cfg(not(feature = "parallel"))]
fn count_channels(img: &ImageCarrier) -> [ChannelCounts; CHANNELS] {
    [
        count_channel(img, 0),
        count_channel(img, 1),
        count_channel(img, 2),
    ]
}

/// The fixed per-channel score combination.
fn channel_score(entropy: f64, chi_statistic: f64) -> f64 {
    let chi_term = 1.0 - ((chi_statistic + 1.0).log10() / NATURAL_CHI_LOG).min(1.0);
    0.5 * entropy + 0.5 * chi_term
}

/// Bitplane histogram over eligible pixels.
pub fn bitplane_histogram(img: &ImageCarrier) -> BitplaneHistogram {
    let counts = count_channels(img);
    BitplaneHistogram {
        ones: [counts[0].ones, counts[1].ones, counts[2].ones],
        eligible_pixels: counts[0].total,
    }
}

/// Run the full image analysis. Deterministic: the same carrier always
/// produces an identical report.
pub fn analyze_image(img: &ImageCarrier) -> ImageReport {
    let counts = count_channels(img);
    let total = counts[0].total;

    let mut lsb_counts = [0u64; CHANNELS];
    let mut chi_square = [ChiSquare { statistic: 0.0, p_value: 1.0 }; CHANNELS];
    let mut lsb_entropy = [0.0f64; CHANNELS];
    let mut score_sum = 0.0;

    for c in 0..CHANNELS {
        let ones = counts[c].ones[0];
        lsb_counts[c] = ones;
        chi_square[c] = chi_square_bits(ones, total);
        lsb_entropy[c] = binary_entropy(ones, total);
        score_sum += channel_score(lsb_entropy[c], chi_square[c].statistic);
    }

    ImageReport {
        width: img.width(),
        height: img.height(),
        eligible_pixels: total,
        bitplanes: BitplaneHistogram {
            ones: [counts[0].ones, counts[1].ones, counts[2].ones],
            eligible_pixels: total,
        },
        lsb_counts,
        chi_square,
        lsb_entropy,
        suspiciousness: (score_sum / CHANNELS as f64).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat image: every channel byte 0x80, LSBs all zero.
    fn flat_image(width: u32, height: u32) -> ImageCarrier {
        ImageCarrier::new(width, height, 3, vec![0x80; (width * height * 3) as usize])
            .unwrap()
    }

    /// Image with pseudo-random LSBs (as after dense embedding).
    fn noisy_image(width: u32, height: u32) -> ImageCarrier {
        let mut state = 0x2545_F491_4F6C_DD1Du64;
        let data: Vec<u8> = (0..(width * height * 3) as usize)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                0x80 | (state & 1) as u8
            })
            .collect();
        ImageCarrier::new(width, height, 3, data).unwrap()
    }

    #[test]
    fn flat_image_scores_low() {
        let report = analyze_image(&flat_image(64, 64));
        assert_eq!(report.lsb_counts, [0, 0, 0]);
        assert_eq!(report.lsb_entropy, [0.0, 0.0, 0.0]);
        assert!(
            report.suspiciousness < 0.3,
            "flat image score {}",
            report.suspiciousness
        );
    }

    #[test]
    fn noisy_lsb_scores_high() {
        let report = analyze_image(&noisy_image(64, 64));
        for c in 0..3 {
            assert!(report.lsb_entropy[c] > 0.99);
        }
        assert!(
            report.suspiciousness > 0.6,
            "noisy image score {}",
            report.suspiciousness
        );
    }

    #[test]
    fn histogram_counts_match_pixel_data() {
        // 1x2 RGB: (0xFF,0x00,0x01), (0x03,0x80,0x00)
        let img = ImageCarrier::new(2, 1, 3, vec![0xFF, 0x00, 0x01, 0x03, 0x80, 0x00])
            .unwrap();
        let hist = bitplane_histogram(&img);
        assert_eq!(hist.eligible_pixels, 2);
        // R channel: 0xFF and 0x03 → bit0 set in both, bit7 set once.
        assert_eq!(hist.ones[0][0], 2);
        assert_eq!(hist.ones[0][7], 1);
        // G channel: 0x00 and 0x80 → only bit7 set once.
        assert_eq!(hist.ones[1][0], 0);
        assert_eq!(hist.ones[1][7], 1);
        // B channel: 0x01 and 0x00.
        assert_eq!(hist.ones[2][0], 1);
    }

    #[test]
    fn transparent_pixels_carry_no_evidence() {
        // Two pixels: one opaque noisy, one transparent with noisy bytes.
        let data = vec![0xFF, 0xFF, 0xFF, 0xFF, 0xAB, 0xCD, 0xEF, 0x00];
        let img = ImageCarrier::new(2, 1, 4, data).unwrap();
        let report = analyze_image(&img);
        assert_eq!(report.eligible_pixels, 1);
        assert_eq!(report.lsb_counts, [1, 1, 1]);
    }

    #[test]
    fn analysis_is_deterministic() {
        let img = noisy_image(32, 32);
        let a = analyze_image(&img);
        let b = analyze_image(&img);
        assert_eq!(a, b);
    }
}
