// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Text steganalysis: a census of hiding techniques.
//!
//! Plain text offers many unrelated hiding channels, so the report is a
//! weighted census rather than a single statistic: zero-width code points,
//! suspicious whitespace runs, Cyrillic homoglyphs, long binary and base64
//! runs, character entropy, format-control density, and line-length spread.
//! Each signal is normalized against what ordinary prose exhibits, then
//! combined:
//!
//! ```text
//! score = clamp(0.30*zw + 0.15*ws + 0.10*homoglyph + 0.15*binary
//!             + 0.10*base64 + 0.10*entropy + 0.05*control + 0.05*lines)
//! ```

use std::collections::BTreeMap;

/// Zero-width code points commonly used as hidden-bit alphabets.
const ZERO_WIDTH_SET: [char; 5] =
    ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

/// Cyrillic letters visually identical to Latin ones.
const HOMOGLYPHS: [char; 8] = ['а', 'е', 'о', 'р', 'с', 'х', 'і', 'ј'];

/// Full text analysis report.
#[derive(Debug, Clone, PartialEq)]
pub struct TextReport {
    /// Total code points analyzed.
    pub chars: usize,
    pub zero_width_count: usize,
    /// Space/tab runs of length >= 3.
    pub whitespace_runs: usize,
    pub homoglyph_count: usize,
    /// Runs of '0'/'1' code points of length >= 16.
    pub binary_runs: usize,
    /// Runs of base64-alphabet code points of length >= 20.
    pub base64_runs: usize,
    /// Shannon entropy over code points, bits per char.
    pub char_entropy: f64,
    /// Share of format-control (Cf) code points.
    pub format_control_ratio: f64,
    /// Coefficient of variation of line lengths.
    pub line_length_spread: f64,
    /// Composite suspiciousness in `[0, 1]`.
    pub suspiciousness: f64,
}

fn is_format_control(c: char) -> bool {
    matches!(c,
        '\u{00AD}'
        | '\u{200B}'..='\u{200F}'
        | '\u{202A}'..='\u{202E}'
        | '\u{2060}'..='\u{2064}'
        | '\u{FEFF}')
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
}

/// Count maximal runs of `pred`-matching code points of at least `min_len`.
fn count_runs(text: &str, min_len: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut runs = 0;
    let mut current = 0;
    for c in text.chars() {
        if pred(c) {
            current += 1;
        } else {
            if current >= min_len {
                runs += 1;
            }
            current = 0;
        }
    }
    if current >= min_len {
        runs += 1;
    }
    runs
}

/// Shannon entropy over code points. Counts go through an ordered map so the
/// floating-point summation order is reproducible.
fn char_entropy(text: &str) -> f64 {
    let mut counts: BTreeMap<char, u64> = BTreeMap::new();
    let mut total = 0u64;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Coefficient of variation of line lengths (0 for fewer than two lines).
fn line_length_spread(text: &str) -> f64 {
    let lengths: Vec<f64> = text.lines().map(|l| l.chars().count() as f64).collect();
    if lengths.len() < 2 {
        return 0.0;
    }
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = lengths.iter().map(|&l| (l - mean).powi(2)).sum::<f64>()
        / lengths.len() as f64;
    variance.sqrt() / mean
}

/// Run the full text analysis. Deterministic: the same text always produces
/// an identical report.
pub fn analyze_text(text: &str) -> TextReport {
    let chars = text.chars().count();

    let zero_width_count = text
        .chars()
        .filter(|c| ZERO_WIDTH_SET.contains(c))
        .count();
    let whitespace_runs = count_runs(text, 3, |c| c == ' ' || c == '\t');
    let homoglyph_count = text.chars().filter(|c| HOMOGLYPHS.contains(c)).count();
    let binary_runs = count_runs(text, 16, |c| c == '0' || c == '1');
    let base64_runs = count_runs(text, 20, is_base64_char);
    let entropy = char_entropy(text);
    let control_count = text.chars().filter(|&c| is_format_control(c)).count();
    let format_control_ratio = if chars == 0 {
        0.0
    } else {
        control_count as f64 / chars as f64
    };
    let line_spread = line_length_spread(text);

    let len = chars.max(1) as f64;
    let norm = |value: f64, scale: f64| (value / scale).min(1.0);
    let entropy_norm = if entropy > 3.5 {
        ((entropy - 3.5) / 2.5).min(1.0)
    } else {
        0.0
    };

    let score = 0.30 * norm(zero_width_count as f64, len * 0.002)
        + 0.15 * norm(whitespace_runs as f64, len * 0.001)
        + 0.10 * norm(homoglyph_count as f64, len * 0.001)
        + 0.15 * norm(binary_runs as f64, 2.0)
        + 0.10 * norm(base64_runs as f64, 2.0)
        + 0.10 * entropy_norm
        + 0.05 * norm(format_control_ratio, 0.001)
        + 0.05 * norm(line_spread, 0.6);

    TextReport {
        chars,
        zero_width_count,
        whitespace_runs,
        homoglyph_count,
        binary_runs,
        base64_runs,
        char_entropy: entropy,
        format_control_ratio,
        line_length_spread: line_spread,
        suspiciousness: score.clamp(0.0, 1.0),
    }
}
