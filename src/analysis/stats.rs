// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Deterministic statistical primitives for steganalysis.
//!
//! Everything here is a pure function of its inputs using only basic IEEE
//! 754 arithmetic, so identical carriers always score identically. The
//! complementary error function uses the Abramowitz & Stegun 7.1.26
//! rational approximation (max error 1.5e-7), which is plenty for a
//! suspiciousness heuristic.

/// Chi-square test result for one LSB plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquare {
    /// The chi-square statistic against the expected 50/50 distribution.
    pub statistic: f64,
    /// Upper-tail p-value for 1 degree of freedom.
    pub p_value: f64,
}

/// Chi-square test of an observed ones count against a 50/50 split.
///
/// Small statistics (large p-values) mean the LSB plane is close to random,
/// which in natural media is the anomaly.
pub fn chi_square_bits(ones: u64, total: u64) -> ChiSquare {
    if total == 0 {
        return ChiSquare { statistic: 0.0, p_value: 1.0 };
    }
    let expected = total as f64 / 2.0;
    let ones = ones as f64;
    let zeros = total as f64 - ones;
    let statistic =
        (ones - expected).powi(2) / expected + (zeros - expected).powi(2) / expected;
    ChiSquare { statistic, p_value: chi_square_p(statistic) }
}

/// Upper-tail p-value of a chi-square statistic with 1 degree of freedom:
/// `P(X >= x) = erfc(sqrt(x / 2))`.
pub fn chi_square_p(statistic: f64) -> f64 {
    erfc((statistic / 2.0).sqrt())
}

/// Binary Shannon entropy of a bit plane, in `[0, 1]`.
pub fn binary_entropy(ones: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p1 = ones as f64 / total as f64;
    let p0 = 1.0 - p1;
    let eps = 1e-12;
    -(p0 * (p0 + eps).log2() + p1 * (p1 + eps).log2())
}

/// Shannon entropy of a byte distribution, in bits per byte `[0, 8]`.
pub fn byte_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    let total = data.len() as f64;
    let mut entropy = 0.0;
    for &count in counts.iter().filter(|&&c| c > 0) {
        let p = count as f64 / total;
        entropy -= p * p.log2();
    }
    entropy
}

/// Complementary error function, Abramowitz & Stegun 7.1.26.
pub fn erfc(x: f64) -> f64 {
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    const P: f64 = 0.327_591_1;
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;

    let t = 1.0 / (1.0 + P * x);
    let poly = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    poly * (-x * x).exp()
}
