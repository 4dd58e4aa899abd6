// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Short-time spectral features for audio steganalysis.
//!
//! LSB embedding injects broadband noise into otherwise structured audio;
//! it shows up as raised spectral flatness and high-frequency energy. The
//! STFT uses Hann-windowed segments of 1024 samples with 50% overlap over
//! an in-house radix-2 Cooley-Tukey FFT — no external FFT dependency, and
//! fully deterministic.

use num_complex::Complex;
use std::f64::consts::PI;

/// Preferred STFT segment length (shrinks for short signals).
pub const SEGMENT_LEN: usize = 1024;

/// Minimum segment length worth analyzing.
const MIN_SEGMENT_LEN: usize = 16;

/// Spectral features of one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralFeatures {
    /// Mean per-frame spectral flatness (geometric / arithmetic mean of the
    /// power spectrum). 1.0 = white noise.
    pub flatness: f64,
    /// Share of total energy above 60% of the Nyquist frequency.
    pub hf_energy_ratio: f64,
    /// Variance of normalized per-frame energy.
    pub frame_variance: f64,
}

impl SpectralFeatures {
    fn zero() -> Self {
        Self { flatness: 0.0, hf_energy_ratio: 0.0, frame_variance: 0.0 }
    }
}

/// Compute spectral features over a mono signal.
///
/// Signals shorter than one minimal segment yield all-zero features rather
/// than an error — there is simply nothing to measure.
pub fn spectral_features(samples: &[f64], _sample_rate: u32) -> SpectralFeatures {
    let segment = SEGMENT_LEN.min(prev_pow2(samples.len()));
    if segment < MIN_SEGMENT_LEN {
        return SpectralFeatures::zero();
    }
    let hop = segment / 2;
    let bins = segment / 2 + 1;
    // Bins above 60% of Nyquist: bin k covers frequency k/segment * rate,
    // Nyquist is bin segment/2, so the cutoff is at 0.6 * segment/2.
    let hf_cutoff = (0.6 * (segment as f64 / 2.0)) as usize;

    let window: Vec<f64> = (0..segment)
        .map(|k| 0.5 - 0.5 * (2.0 * PI * k as f64 / segment as f64).cos())
        .collect();

    let mut flatness_sum = 0.0;
    let mut hf_energy = 0.0;
    let mut total_energy = 0.0;
    let mut frame_energies = Vec::new();
    let mut buffer = vec![Complex::new(0.0, 0.0); segment];

    let mut start = 0;
    while start + segment <= samples.len() {
        for k in 0..segment {
            buffer[k] = Complex::new(samples[start + k] * window[k], 0.0);
        }
        fft_radix2(&mut buffer, -1.0);

        let mut log_sum = 0.0;
        let mut lin_sum = 0.0;
        let mut frame_energy = 0.0;
        for (k, value) in buffer[..bins].iter().enumerate() {
            let power = value.norm_sqr() + 1e-12;
            log_sum += power.ln();
            lin_sum += power;
            frame_energy += power;
            if k > hf_cutoff {
                hf_energy += power;
            }
        }
        let geo_mean = (log_sum / bins as f64).exp();
        let arith_mean = lin_sum / bins as f64;
        flatness_sum += geo_mean / arith_mean;
        total_energy += frame_energy;
        frame_energies.push(frame_energy);

        start += hop;
    }

    if frame_energies.is_empty() {
        return SpectralFeatures::zero();
    }

    let frames = frame_energies.len() as f64;
    let mean_energy = total_energy / frames;
    let frame_variance = frame_energies
        .iter()
        .map(|&e| {
            let normalized = e / mean_energy;
            (normalized - 1.0).powi(2)
        })
        .sum::<f64>()
        / frames;

    SpectralFeatures {
        flatness: flatness_sum / frames,
        hf_energy_ratio: hf_energy / total_energy,
        frame_variance,
    }
}

/// Largest power of 2 <= n (0 for n == 0).
fn prev_pow2(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1;
    while p * 2 <= n {
        p *= 2;
    }
    p
}

/// In-place radix-2 Cooley-Tukey FFT. `data.len()` must be a power of 2.
/// `sign`: -1.0 for forward, +1.0 for inverse (unnormalized).
fn fft_radix2(data: &mut [Complex<f64>], sign: f64) {
    let n = data.len();
    debug_assert!(n.is_power_of_two());

    // Bit-reversal permutation.
    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            data.swap(i, j);
        }
    }

    // Butterfly stages.
    let mut len = 2;
    while len <= n {
        let angle = sign * 2.0 * PI / len as f64;
        let w_len = Complex::new(angle.cos(), angle.sin());
        for chunk in data.chunks_mut(len) {
            let mut w = Complex::new(1.0, 0.0);
            for k in 0..len / 2 {
                let a = chunk[k];
                let b = chunk[k + len / 2] * w;
                chunk[k] = a + b;
                chunk[k + len / 2] = a - b;
                w *= w_len;
            }
        }
        len <<= 1;
    }
}
