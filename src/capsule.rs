// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Capsule serialization and parsing.
//!
//! The capsule is the self-describing envelope that wraps a payload before
//! its bits are scattered into a carrier:
//!
//! ```text
//! [4 bytes ] magic 0x554E4953 ("UNIS", big-endian)
//! [1 byte  ] format version (currently 1)
//! [2 bytes ] filename length (big-endian u16)
//! [4 bytes ] payload length (big-endian u32)
//! [N bytes ] filename (UTF-8)
//! [M bytes ] payload
//! [4 bytes ] CRC-32 of filename ‖ payload (big-endian)
//! ```
//!
//! The first 11 bytes form the fixed header (88 bits). Extraction reads the
//! header first to learn the remaining capsule length before touching any
//! further slots. Bits are MSB-first within each byte; all integers are
//! big-endian. This layout is a versioned protocol detail — any change must
//! bump [`VERSION`].

use crate::error::EngineError;

/// Magic constant identifying a valid capsule ("UNIS").
pub const MAGIC: u32 = 0x554E_4953;
/// Current capsule format version.
pub const VERSION: u8 = 1;
/// Fixed header size: magic + version + filename_len + payload_len.
pub const FIXED_HEADER_BITS: usize = 88;
/// Trailing CRC-32 size in bits.
pub const CHECKSUM_BITS: usize = 32;

const FIXED_HEADER_BYTES: usize = FIXED_HEADER_BITS / 8;

/// Decoded fixed header of a capsule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapsuleHeader {
    /// Byte length of the original payload filename.
    pub filename_len: u16,
    /// Byte length of the payload.
    pub payload_len: u32,
}

impl CapsuleHeader {
    /// Bits remaining after the fixed header: filename + payload + checksum.
    pub fn body_bits(&self) -> usize {
        self.filename_len as usize * 8 + self.payload_len as usize * 8 + CHECKSUM_BITS
    }

    /// Total capsule size in bits.
    pub fn total_bits(&self) -> usize {
        FIXED_HEADER_BITS + self.body_bits()
    }
}

/// Serialize a capsule from a filename and payload.
///
/// # Errors
/// - [`EngineError::FilenameTooLong`] if the filename exceeds 65,535 bytes.
/// - [`EngineError::PayloadTooLarge`] if the payload exceeds the u32 range.
pub fn encode(filename: &str, payload: &[u8]) -> Result<Vec<u8>, EngineError> {
    let name = filename.as_bytes();
    if name.len() > u16::MAX as usize {
        return Err(EngineError::FilenameTooLong(name.len()));
    }
    if payload.len() > u32::MAX as usize {
        return Err(EngineError::PayloadTooLarge(payload.len()));
    }

    let mut capsule = Vec::with_capacity(FIXED_HEADER_BYTES + name.len() + payload.len() + 4);
    capsule.extend_from_slice(&MAGIC.to_be_bytes());
    capsule.push(VERSION);
    capsule.extend_from_slice(&(name.len() as u16).to_be_bytes());
    capsule.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    capsule.extend_from_slice(name);
    capsule.extend_from_slice(payload);
    capsule.extend_from_slice(&checksum(name, payload).to_be_bytes());
    Ok(capsule)
}

/// Parse the fixed 88-bit header from extracted bits.
///
/// `bits` must hold at least [`FIXED_HEADER_BITS`] entries; extra bits are
/// ignored.
///
/// # Errors
/// [`EngineError::Format`] if the magic or version does not match — the
/// primary signal that the carrier holds no capsule at all.
pub fn decode_header(bits: &[u8]) -> Result<CapsuleHeader, EngineError> {
    if bits.len() < FIXED_HEADER_BITS {
        return Err(EngineError::Format);
    }
    let bytes = bits_to_bytes(&bits[..FIXED_HEADER_BITS]);

    let magic = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    if magic != MAGIC || bytes[4] != VERSION {
        return Err(EngineError::Format);
    }

    Ok(CapsuleHeader {
        filename_len: u16::from_be_bytes([bytes[5], bytes[6]]),
        payload_len: u32::from_be_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]),
    })
}

/// Parse the capsule body (filename + payload + checksum) from extracted bits.
///
/// `bits` must hold exactly `header.body_bits()` entries.
///
/// # Errors
/// - [`EngineError::Integrity`] on checksum mismatch — wrong password or a
///   tampered carrier.
/// - [`EngineError::InvalidUtf8`] if the filename bytes are not UTF-8.
pub fn decode_body(
    header: &CapsuleHeader,
    bits: &[u8],
) -> Result<(String, Vec<u8>), EngineError> {
    if bits.len() != header.body_bits() {
        return Err(EngineError::Integrity);
    }
    let bytes = bits_to_bytes(bits);

    let name_len = header.filename_len as usize;
    let payload_len = header.payload_len as usize;
    let name_bytes = &bytes[..name_len];
    let payload = &bytes[name_len..name_len + payload_len];
    let crc_bytes = &bytes[name_len + payload_len..name_len + payload_len + 4];
    let stored = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

    if stored != checksum(name_bytes, payload) {
        return Err(EngineError::Integrity);
    }

    let filename = String::from_utf8(name_bytes.to_vec())
        .map_err(|_| EngineError::InvalidUtf8)?;
    Ok((filename, payload.to_vec()))
}

/// Parse a byte-aligned capsule starting at offset 0 of `data`.
///
/// Used by the document adapter, which stores the capsule as a contiguous
/// byte run rather than scattered bits. Trailing bytes after the capsule are
/// ignored.
///
/// # Errors
/// - [`EngineError::Format`] if `data` is too short or the magic/version
///   does not match.
/// - [`EngineError::Integrity`] on checksum mismatch.
pub fn decode_bytes(data: &[u8]) -> Result<(String, Vec<u8>), EngineError> {
    if data.len() < FIXED_HEADER_BYTES {
        return Err(EngineError::Format);
    }
    let magic = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    if magic != MAGIC || data[4] != VERSION {
        return Err(EngineError::Format);
    }
    let name_len = u16::from_be_bytes([data[5], data[6]]) as usize;
    let payload_len =
        u32::from_be_bytes([data[7], data[8], data[9], data[10]]) as usize;

    let total = FIXED_HEADER_BYTES + name_len + payload_len + 4;
    if data.len() < total {
        return Err(EngineError::Format);
    }

    let name_bytes = &data[FIXED_HEADER_BYTES..FIXED_HEADER_BYTES + name_len];
    let payload = &data[FIXED_HEADER_BYTES + name_len..total - 4];
    let stored = u32::from_be_bytes([
        data[total - 4],
        data[total - 3],
        data[total - 2],
        data[total - 1],
    ]);

    if stored != checksum(name_bytes, payload) {
        return Err(EngineError::Integrity);
    }

    let filename = String::from_utf8(name_bytes.to_vec())
        .map_err(|_| EngineError::InvalidUtf8)?;
    Ok((filename, payload.to_vec()))
}

/// CRC-32 over filename ‖ payload.
fn checksum(name: &[u8], payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(name);
    hasher.update(payload);
    hasher.finalize()
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((bits.len() + 7) / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}
