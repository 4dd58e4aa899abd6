// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! # unisteno-core
//!
//! Pure-Rust steganography engine for hiding named payloads in decoded
//! media. One capsule format and one password-seeded scatter protocol work
//! across every medium; per-medium adapters only decide where the bits live:
//!
//! - **Image / Audio / Video**: bit-scatter into LSB slots (RGB channels,
//!   PCM samples, first video frame).
//! - **Text**: structural zero-width code points woven into visible text.
//! - **Document**: a capsule appended to one password-selected object.
//!
//! The engine never touches containers — callers decode media to raw
//! samples, hand them over as a [`Carrier`], and re-encode the result. The
//! `analysis` module inspects carriers without a password and scores how
//! likely they are to hold embedded data.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use unisteno_core::{embed, extract, Carrier, ImageCarrier};
//!
//! let img = ImageCarrier::new(width, height, 3, rgb_bytes)?;
//! let stego = embed(&Carrier::Image(img), "passphrase", "note.txt", b"hello")?;
//! let recovered = extract(&stego, "passphrase")?;
//! assert_eq!(recovered.payload, b"hello");
//! ```

pub mod analysis;
pub mod capsule;
pub mod carrier;
pub mod error;
pub mod pipeline;
pub mod scatter;

pub use analysis::{analyze, AnalysisReport};
pub use carrier::{
    AudioCarrier, Carrier, DocumentCarrier, DocumentObject, ImageCarrier, Medium,
    SlotAdapter, TextCarrier, VideoCarrier,
};
pub use error::EngineError;
pub use pipeline::{capacity, embed, estimate_payload_capacity, extract, Extracted};
