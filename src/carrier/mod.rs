// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Carrier representations and per-medium slot adapters.
//!
//! A carrier is the in-memory decoded form of a medium — pixel grid, PCM
//! samples, code points, or an object table. Container parsing is the
//! collaborator codec's job; the engine only sees raw samples and hands raw
//! samples back.
//!
//! Bit-scatter media (image, audio, video) implement [`SlotAdapter`]: a flat
//! enumeration of independently writable LSB slots that is stable and
//! deterministic for a given carrier. Text and document carriers use
//! structural techniques instead and are handled by dedicated paths in the
//! pipeline.

pub mod audio;
pub mod document;
pub mod image;
pub mod text;
pub mod video;

pub use audio::AudioCarrier;
pub use document::{DocumentCarrier, DocumentObject};
pub use image::ImageCarrier;
pub use text::TextCarrier;
pub use video::VideoCarrier;

use crate::error::EngineError;

/// Bit-level slot contract for scatter embedding.
///
/// Slot indices run `0..slot_count()`. The index-to-location mapping must be
/// stable: re-deriving the same carrier yields the same enumeration, which
/// is what makes extraction reproduce the embedder's positions. Ineligible
/// locations (e.g. fully transparent pixels) are excluded from the
/// enumeration entirely and never counted.
pub trait SlotAdapter {
    /// Number of eligible slots in the carrier.
    fn slot_count(&self) -> usize;

    /// Read the bit currently stored in a slot.
    fn read_bit(&self, slot: usize) -> u8;

    /// Overwrite the bit stored in a slot.
    fn write_bit(&mut self, slot: usize, bit: u8);

    /// Whether a slot may be written. Enumerated slots are eligible by
    /// construction, so the default is `true`.
    fn is_eligible(&self, slot: usize) -> bool {
        slot < self.slot_count()
    }
}

/// The closed set of supported media, keyed by MIME category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medium {
    Image,
    Audio,
    Video,
    Text,
    Document,
}

impl Medium {
    /// Resolve a detected MIME type to a medium, once per request.
    ///
    /// # Errors
    /// [`EngineError::UnsupportedMedium`] if no adapter covers the type.
    pub fn from_mime(mime: &str) -> Result<Self, EngineError> {
        if mime.starts_with("image/") {
            Ok(Self::Image)
        } else if mime.starts_with("audio/") {
            Ok(Self::Audio)
        } else if mime.starts_with("video/") {
            Ok(Self::Video)
        } else if mime.starts_with("text/") {
            Ok(Self::Text)
        } else if mime == "application/pdf" {
            Ok(Self::Document)
        } else {
            Err(EngineError::UnsupportedMedium(mime.to_string()))
        }
    }
}

/// A decoded carrier, owned exclusively for the duration of one operation.
#[derive(Debug, Clone)]
pub enum Carrier {
    Image(ImageCarrier),
    Audio(AudioCarrier),
    Video(VideoCarrier),
    Text(TextCarrier),
    Document(DocumentCarrier),
}

impl Carrier {
    /// The medium this carrier belongs to.
    pub fn medium(&self) -> Medium {
        match self {
            Self::Image(_) => Medium::Image,
            Self::Audio(_) => Medium::Audio,
            Self::Video(_) => Medium::Video,
            Self::Text(_) => Medium::Text,
            Self::Document(_) => Medium::Document,
        }
    }
}
