// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Text carrier: structural zero-width steganography.
//!
//! Unlike the bit-scatter adapters, the text technique does not flip
//! existing bits. A slot is an insertion point between consecutive visible
//! code points; writing a bit inserts one of two designated zero-width code
//! points, and reading recognizes and strips them:
//!
//! - U+200B ZERO WIDTH SPACE      → bit 0
//! - U+200C ZERO WIDTH NON-JOINER → bit 1
//! - U+200D ZERO WIDTH JOINER     → stream terminator
//!
//! The slot count grows with the payload rather than being fixed by the
//! carrier, so capacity errors do not apply to this medium. The pipeline
//! still scatters the capsule bits across the inserted stream with the
//! password-seeded ordering, so a wrong password scrambles the body and
//! fails the checksum like any other medium.

/// Zero-width code point encoding a 0 bit.
pub const ZERO_WIDTH_ZERO: char = '\u{200B}';
/// Zero-width code point encoding a 1 bit.
pub const ZERO_WIDTH_ONE: char = '\u{200C}';
/// Zero-width code point terminating the hidden stream.
pub const ZERO_WIDTH_END: char = '\u{200D}';

/// Decoded text carrier: the visible document as a UTF-8 string.
#[derive(Debug, Clone)]
pub struct TextCarrier {
    text: String,
}

impl TextCarrier {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Whether a code point belongs to the hidden-stream alphabet.
fn is_stream_char(c: char) -> bool {
    c == ZERO_WIDTH_ZERO || c == ZERO_WIDTH_ONE || c == ZERO_WIDTH_END
}

/// Weave a bit stream into visible text.
///
/// Any pre-existing stream code points are stripped first so the document
/// holds exactly one payload. One stream character is inserted after each
/// visible code point until the stream runs out; any remainder plus the
/// terminator is appended at the end.
pub(crate) fn weave(text: &str, stream: &[u8]) -> String {
    let mut out = String::with_capacity(text.len() + stream.len() * 3 + 3);
    let mut bits = stream.iter();
    for c in text.chars().filter(|&c| !is_stream_char(c)) {
        out.push(c);
        if let Some(&bit) = bits.next() {
            out.push(if bit == 1 { ZERO_WIDTH_ONE } else { ZERO_WIDTH_ZERO });
        }
    }
    for &bit in bits {
        out.push(if bit == 1 { ZERO_WIDTH_ONE } else { ZERO_WIDTH_ZERO });
    }
    out.push(ZERO_WIDTH_END);
    out
}

/// Collect the hidden bit stream in document order, stopping at the
/// terminator (or the end of the text).
pub(crate) fn collect_stream(text: &str) -> Vec<u8> {
    let mut stream = Vec::new();
    for c in text.chars() {
        match c {
            ZERO_WIDTH_ZERO => stream.push(0),
            ZERO_WIDTH_ONE => stream.push(1),
            ZERO_WIDTH_END => break,
            _ => {}
        }
    }
    stream
}
