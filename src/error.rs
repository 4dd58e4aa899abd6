// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Error types for the scatter-embedding engine.
//!
//! [`EngineError`] covers all failure modes from carrier validation through
//! capsule extraction. The error taxonomy deliberately keeps "wrong file"
//! and "wrong password" apart:
//!
//! - [`EngineError::Format`] — the carrier carries no recognizable capsule
//!   (magic/version mismatch in the fixed header).
//! - [`EngineError::Integrity`] — a capsule header decoded but the checksum
//!   failed. This means wrong password or a tampered carrier; the engine
//!   cannot distinguish the two causes and does not claim to.

use core::fmt;

/// Errors that can occur during embedding, extraction, or analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The capsule does not fit the carrier's eligible slots.
    /// Reports the exact deficit so callers can render a useful message.
    Capacity {
        /// Bits the capsule needs, including header and checksum.
        required_bits: usize,
        /// Eligible slot bits the carrier offers.
        available_bits: usize,
    },
    /// Magic or version mismatch — the carrier likely has no embedded capsule.
    Format,
    /// Checksum mismatch — wrong password or corrupted/tampered carrier.
    Integrity,
    /// No adapter is registered for the detected MIME type.
    UnsupportedMedium(String),
    /// The payload filename exceeds the 16-bit length field (65,535 bytes).
    FilenameTooLong(usize),
    /// The payload exceeds the 32-bit length field.
    PayloadTooLarge(usize),
    /// An extracted filename is not valid UTF-8.
    InvalidUtf8,
    /// The carrier has more slots than the 32-bit slot index space.
    CarrierTooLarge,
    /// The decoded carrier representation is malformed (collaborator bug).
    InvalidCarrier(&'static str),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity { required_bits, available_bits } => write!(
                f,
                "payload needs {required_bits} bits but carrier offers {available_bits}"
            ),
            Self::Format => write!(f, "no capsule found (magic/version mismatch)"),
            Self::Integrity => write!(f, "capsule checksum mismatch (wrong password or corrupted carrier)"),
            Self::UnsupportedMedium(mime) => write!(f, "no adapter for medium {mime:?}"),
            Self::FilenameTooLong(len) => write!(f, "filename is {len} bytes (max 65535)"),
            Self::PayloadTooLarge(len) => write!(f, "payload is {len} bytes (max 4 GiB - 1)"),
            Self::InvalidUtf8 => write!(f, "extracted filename is not valid UTF-8"),
            Self::CarrierTooLarge => write!(f, "carrier exceeds the 32-bit slot index space"),
            Self::InvalidCarrier(what) => write!(f, "malformed carrier: {what}"),
        }
    }
}

impl std::error::Error for EngineError {}
