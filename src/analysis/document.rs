// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Document steganalysis over the decoded object table.
//!
//! Two signals: a direct scan for the capsule magic inside any object, and
//! the share of objects whose byte entropy is anomalously high (appended
//! random-looking data in a place the format does not compress).

use crate::analysis::stats::byte_entropy;
use crate::capsule;
use crate::carrier::DocumentCarrier;

/// Byte entropy above which an object counts as anomalous. Compressed
/// streams sit around 7.9; uncompressed document structure well below.
pub const HIGH_ENTROPY_THRESHOLD: f64 = 7.2;

/// Full document analysis report.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub object_count: usize,
    pub eligible_count: usize,
    /// Mean byte entropy over non-empty objects.
    pub mean_entropy: f64,
    /// Objects above [`HIGH_ENTROPY_THRESHOLD`].
    pub high_entropy_objects: usize,
    /// Whether any object contains the capsule magic sequence.
    pub capsule_signature_found: bool,
    /// Composite suspiciousness in `[0, 1]`.
    pub suspiciousness: f64,
}

fn contains_magic(data: &[u8]) -> bool {
    let magic = capsule::MAGIC.to_be_bytes();
    data.windows(4).any(|w| w == magic)
}

/// Run the full document analysis. Deterministic: the same carrier always
/// produces an identical report.
pub fn analyze_document(doc: &DocumentCarrier) -> DocumentReport {
    let objects = doc.objects();
    let object_count = objects.len();
    let eligible_count = objects.iter().filter(|o| o.eligible).count();

    let mut entropy_sum = 0.0;
    let mut non_empty = 0usize;
    let mut high_entropy_objects = 0usize;
    let mut capsule_signature_found = false;

    for object in objects {
        if contains_magic(&object.data) {
            capsule_signature_found = true;
        }
        if object.data.is_empty() {
            continue;
        }
        let entropy = byte_entropy(&object.data);
        entropy_sum += entropy;
        non_empty += 1;
        if entropy > HIGH_ENTROPY_THRESHOLD {
            high_entropy_objects += 1;
        }
    }

    let mean_entropy = if non_empty > 0 {
        entropy_sum / non_empty as f64
    } else {
        0.0
    };
    let high_ratio = if object_count > 0 {
        high_entropy_objects as f64 / object_count as f64
    } else {
        0.0
    };

    let score = 0.8 * f64::from(u8::from(capsule_signature_found)) + 0.4 * high_ratio;

    DocumentReport {
        object_count,
        eligible_count,
        mean_entropy,
        high_entropy_objects,
        capsule_signature_found,
        suspiciousness: score.min(1.0),
    }
}
