// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Embed/extract orchestration.
//!
//! Binds the capsule codec, the scatter generator, and a slot adapter into
//! the two end-to-end operations. Dispatch is a closed match over the
//! carrier enum — each medium resolves to exactly one code path, selected
//! once per request.
//!
//! Both operations are transactional: the input carrier is borrowed
//! immutably and all mutation happens on the returned copy, so any failure
//! leaves the input untouched. The capacity check runs before a single bit
//! is written.

use crate::capsule::{self, CHECKSUM_BITS, FIXED_HEADER_BITS};
use crate::carrier::{
    document, text, Carrier, DocumentCarrier, SlotAdapter, TextCarrier,
};
use crate::error::EngineError;
use crate::scatter;

/// A recovered payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// The original payload filename.
    pub filename: String,
    /// The raw payload bytes.
    pub payload: Vec<u8>,
}

/// Embed a payload into a carrier.
///
/// Serializes the payload into a capsule, derives the scatter ordering from
/// the password, and writes each capsule bit into its slot. The input
/// carrier is never modified; the modified copy is returned.
///
/// # Errors
/// - [`EngineError::Capacity`] if the capsule does not fit the carrier's
///   eligible slots (reports required vs. available bits).
/// - [`EngineError::FilenameTooLong`] / [`EngineError::PayloadTooLarge`] if
///   a capsule field overflows.
pub fn embed(
    carrier: &Carrier,
    password: &str,
    filename: &str,
    payload: &[u8],
) -> Result<Carrier, EngineError> {
    let capsule = capsule::encode(filename, payload)?;
    match carrier {
        Carrier::Image(img) => {
            let mut out = img.clone();
            embed_scattered(&mut out, password, &capsule)?;
            Ok(Carrier::Image(out))
        }
        Carrier::Audio(audio) => {
            let mut out = audio.clone();
            embed_scattered(&mut out, password, &capsule)?;
            Ok(Carrier::Audio(out))
        }
        Carrier::Video(video) => {
            let mut out = video.clone();
            embed_scattered(&mut out, password, &capsule)?;
            Ok(Carrier::Video(out))
        }
        Carrier::Text(text) => Ok(Carrier::Text(embed_text(text, password, &capsule)?)),
        Carrier::Document(doc) => {
            Ok(Carrier::Document(embed_document(doc, password, &capsule)?))
        }
    }
}

/// Extract a payload from a carrier.
///
/// # Errors
/// - [`EngineError::Format`] if no capsule header is found — the carrier
///   likely has nothing embedded.
/// - [`EngineError::Integrity`] on checksum mismatch — wrong password or a
///   tampered carrier (indistinguishable by design).
/// - [`EngineError::Capacity`] if a decoded header declares more bits than
///   the carrier holds (corrupted or mismatched carrier).
pub fn extract(carrier: &Carrier, password: &str) -> Result<Extracted, EngineError> {
    match carrier {
        Carrier::Image(img) => extract_scattered(img, password),
        Carrier::Audio(audio) => extract_scattered(audio, password),
        Carrier::Video(video) => extract_scattered(video, password),
        Carrier::Text(text) => extract_text(text, password),
        Carrier::Document(doc) => extract_document(doc, password),
    }
}

/// Total eligible slot bits of a carrier, or `None` for the structural
/// media whose capacity grows with the payload.
pub fn capacity(carrier: &Carrier) -> Option<usize> {
    match carrier {
        Carrier::Image(img) => Some(img.slot_count()),
        Carrier::Audio(audio) => Some(audio.slot_count()),
        Carrier::Video(video) => Some(video.slot_count()),
        Carrier::Text(_) | Carrier::Document(_) => None,
    }
}

/// Maximum payload size in bytes for a carrier and filename length, after
/// capsule overhead. `None` for unbounded media.
pub fn estimate_payload_capacity(
    carrier: &Carrier,
    filename_len: usize,
) -> Option<usize> {
    let slots = capacity(carrier)?;
    let overhead = FIXED_HEADER_BITS + CHECKSUM_BITS + filename_len * 8;
    Some(slots.saturating_sub(overhead) / 8)
}

// --- bit-scatter media ---

fn embed_scattered<A: SlotAdapter>(
    adapter: &mut A,
    password: &str,
    capsule: &[u8],
) -> Result<(), EngineError> {
    let bits = capsule::bytes_to_bits(capsule);
    let available = adapter.slot_count();
    if bits.len() > available {
        return Err(EngineError::Capacity {
            required_bits: bits.len(),
            available_bits: available,
        });
    }

    let order = scatter::slots_for(password, available)?;
    for (i, &bit) in bits.iter().enumerate() {
        adapter.write_bit(order[i] as usize, bit);
    }
    Ok(())
}

fn extract_scattered<A: SlotAdapter>(
    adapter: &A,
    password: &str,
) -> Result<Extracted, EngineError> {
    let available = adapter.slot_count();
    if available < FIXED_HEADER_BITS {
        return Err(EngineError::Format);
    }

    let order = scatter::slots_for(password, available)?;

    // Header first: its slots are password-independent, so a garbled magic
    // means "no capsule" rather than "wrong password".
    let header_bits: Vec<u8> = order[..FIXED_HEADER_BITS]
        .iter()
        .map(|&slot| adapter.read_bit(slot as usize))
        .collect();
    let header = capsule::decode_header(&header_bits)?;

    let total = header.total_bits();
    if total > available {
        return Err(EngineError::Capacity {
            required_bits: total,
            available_bits: available,
        });
    }

    let body_bits: Vec<u8> = order[FIXED_HEADER_BITS..total]
        .iter()
        .map(|&slot| adapter.read_bit(slot as usize))
        .collect();
    let (filename, payload) = capsule::decode_body(&header, &body_bits)?;
    Ok(Extracted { filename, payload })
}

// --- structural media ---

/// Text: the capsule bits are permuted over their own length (slots are
/// created on demand), then woven into the visible text as zero-width code
/// points.
fn embed_text(
    carrier: &TextCarrier,
    password: &str,
    capsule: &[u8],
) -> Result<TextCarrier, EngineError> {
    let bits = capsule::bytes_to_bits(capsule);
    let order = scatter::slots_for(password, bits.len())?;

    let mut stream = vec![0u8; bits.len()];
    for (i, &bit) in bits.iter().enumerate() {
        stream[order[i] as usize] = bit;
    }

    Ok(TextCarrier::new(text::weave(carrier.text(), &stream)))
}

fn extract_text(carrier: &TextCarrier, password: &str) -> Result<Extracted, EngineError> {
    let stream = text::collect_stream(carrier.text());
    if stream.len() < FIXED_HEADER_BITS {
        return Err(EngineError::Format);
    }

    let order = scatter::slots_for(password, stream.len())?;
    let bits: Vec<u8> = order.iter().map(|&pos| stream[pos as usize]).collect();

    let header = capsule::decode_header(&bits[..FIXED_HEADER_BITS])?;
    let total = header.total_bits();
    if total > stream.len() {
        return Err(EngineError::Capacity {
            required_bits: total,
            available_bits: stream.len(),
        });
    }

    let (filename, payload) = capsule::decode_body(&header, &bits[FIXED_HEADER_BITS..total])?;
    Ok(Extracted { filename, payload })
}

/// Document: byte-granular. The password only chooses which eligible
/// object receives the capsule; the capsule bytes are appended to that
/// object as one contiguous run.
fn embed_document(
    carrier: &DocumentCarrier,
    password: &str,
    capsule: &[u8],
) -> Result<DocumentCarrier, EngineError> {
    let eligible = carrier.eligible_indices();
    if eligible.is_empty() {
        return Err(EngineError::Capacity {
            required_bits: capsule.len() * 8,
            available_bits: 0,
        });
    }

    let target = eligible[scatter::pick(password, eligible.len())? as usize];

    let mut out = carrier.clone();
    out.append_capsule(target, capsule);
    Ok(out)
}

fn extract_document(
    carrier: &DocumentCarrier,
    password: &str,
) -> Result<Extracted, EngineError> {
    let eligible = carrier.eligible_indices();
    if eligible.is_empty() {
        return Err(EngineError::Format);
    }

    let target = eligible[scatter::pick(password, eligible.len())? as usize];

    let (filename, payload) = document::extract_from_object(&carrier.objects()[target].data)?;
    Ok(Extracted { filename, payload })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::ImageCarrier;

    fn opaque_image(width: u32, height: u32) -> Carrier {
        let data = vec![0x80u8; (width * height * 3) as usize];
        Carrier::Image(ImageCarrier::new(width, height, 3, data).unwrap())
    }

    #[test]
    fn capacity_reports_slot_bits() {
        assert_eq!(capacity(&opaque_image(8, 8)), Some(192));
    }

    #[test]
    fn estimated_payload_capacity_subtracts_overhead() {
        // 192 slots - 88 header - 32 checksum = 72 bits = 9 bytes.
        assert_eq!(estimate_payload_capacity(&opaque_image(8, 8), 0), Some(9));
        assert_eq!(estimate_payload_capacity(&opaque_image(8, 8), 1), Some(8));
    }

    #[test]
    fn estimated_capacity_never_underflows() {
        assert_eq!(estimate_payload_capacity(&opaque_image(2, 2), 100), Some(0));
    }

    #[test]
    fn embed_leaves_input_untouched() {
        let carrier = opaque_image(16, 16);
        let before = match &carrier {
            Carrier::Image(img) => img.data().to_vec(),
            _ => unreachable!(),
        };
        let _ = embed(&carrier, "pw", "f.bin", b"payload").unwrap();
        match &carrier {
            Carrier::Image(img) => assert_eq!(img.data(), &before[..]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn extract_from_clean_carrier_is_format_error() {
        let carrier = opaque_image(16, 16);
        assert_eq!(extract(&carrier, "pw"), Err(EngineError::Format));
    }

    #[test]
    fn tiny_carrier_cannot_hold_header() {
        // 4 pixels = 12 slots < 88 header bits.
        let carrier = opaque_image(2, 2);
        assert_eq!(extract(&carrier, "pw"), Err(EngineError::Format));
    }
}
