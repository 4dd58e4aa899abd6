// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Carrier steganalysis.
//!
//! [`analyze`] inspects a carrier without a password and reports per-medium
//! statistics plus a composite suspiciousness score in `[0, 1]`. Analysis is
//! read-only and deterministic: the same carrier always yields an identical
//! report, and analyzing a carrier never changes it. The score is a
//! heuristic for triage, not proof — a high value means "worth a closer
//! look", nothing more.

pub mod audio;
pub mod document;
pub mod image;
pub mod spectral;
pub mod stats;
pub mod text;

pub use audio::{analyze_audio, AudioReport};
pub use document::{analyze_document, DocumentReport};
pub use image::{analyze_image, BitplaneHistogram, ImageReport};
pub use spectral::SpectralFeatures;
pub use stats::ChiSquare;
pub use text::{analyze_text, TextReport};

use crate::carrier::Carrier;

/// Video analysis: the first frame carries all the slots, so it carries all
/// the evidence.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoReport {
    pub frame_count: usize,
    pub first_frame: ImageReport,
    /// Composite suspiciousness in `[0, 1]` (the first frame's score).
    pub suspiciousness: f64,
}

/// Per-medium analysis report.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReport {
    Image(ImageReport),
    Audio(AudioReport),
    Video(VideoReport),
    Text(TextReport),
    Document(DocumentReport),
}

impl AnalysisReport {
    /// The composite suspiciousness score, regardless of medium.
    pub fn suspiciousness(&self) -> f64 {
        match self {
            Self::Image(r) => r.suspiciousness,
            Self::Audio(r) => r.suspiciousness,
            Self::Video(r) => r.suspiciousness,
            Self::Text(r) => r.suspiciousness,
            Self::Document(r) => r.suspiciousness,
        }
    }
}

/// Analyze a carrier for signs of embedded data.
pub fn analyze(carrier: &Carrier) -> AnalysisReport {
    match carrier {
        Carrier::Image(img) => AnalysisReport::Image(analyze_image(img)),
        Carrier::Audio(a) => AnalysisReport::Audio(analyze_audio(a)),
        Carrier::Video(video) => {
            let first_frame = analyze_image(video.first_frame());
            let suspiciousness = first_frame.suspiciousness;
            AnalysisReport::Video(VideoReport {
                frame_count: video.frame_count(),
                first_frame,
                suspiciousness,
            })
        }
        Carrier::Text(t) => AnalysisReport::Text(analyze_text(t.text())),
        Carrier::Document(doc) => AnalysisReport::Document(analyze_document(doc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::{ImageCarrier, TextCarrier, VideoCarrier};

    #[test]
    fn dispatch_matches_medium() {
        let img = ImageCarrier::new(4, 4, 3, vec![0x80; 48]).unwrap();
        assert!(matches!(
            analyze(&Carrier::Image(img.clone())),
            AnalysisReport::Image(_)
        ));
        assert!(matches!(
            analyze(&Carrier::Video(VideoCarrier::new(img, vec![vec![0u8; 8]]))),
            AnalysisReport::Video(VideoReport { frame_count: 2, .. })
        ));
        assert!(matches!(
            analyze(&Carrier::Text(TextCarrier::new("hi".into()))),
            AnalysisReport::Text(_)
        ));
    }

    #[test]
    fn video_score_is_first_frame_score() {
        let img = ImageCarrier::new(8, 8, 3, vec![0x80; 192]).unwrap();
        let frame_report = analyze_image(&img);
        let report = analyze(&Carrier::Video(VideoCarrier::new(img, vec![])));
        assert_eq!(report.suspiciousness(), frame_report.suspiciousness);
    }
}
