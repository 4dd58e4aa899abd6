// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Document carrier: structural byte-granular embedding.
//!
//! The collaborator decoder hands the engine an object table — one entry per
//! low-level document object (PDF stream, metadata field, …) with an
//! eligibility flag marking appendable/low-risk locations. A slot here is an
//! eligible object capable of holding a run of payload bytes; the password
//! only chooses which eligible object receives the capsule, not the
//! intra-object placement.

use crate::capsule;
use crate::error::EngineError;

/// One decoded document object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentObject {
    /// Collaborator-assigned object identifier.
    pub id: u32,
    /// Whether the object may safely receive appended bytes.
    pub eligible: bool,
    /// The object's raw contents.
    pub data: Vec<u8>,
}

/// Decoded document carrier: the full object table.
#[derive(Debug, Clone)]
pub struct DocumentCarrier {
    objects: Vec<DocumentObject>,
}

impl DocumentCarrier {
    pub fn new(objects: Vec<DocumentObject>) -> Self {
        Self { objects }
    }

    pub fn objects(&self) -> &[DocumentObject] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<DocumentObject> {
        self.objects
    }

    /// Indices of eligible objects in table order. Stable for a given
    /// carrier, so embed and extract agree on the candidate set.
    pub(crate) fn eligible_indices(&self) -> Vec<usize> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, obj)| obj.eligible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Append a capsule to the object at `index`.
    pub(crate) fn append_capsule(&mut self, index: usize, capsule: &[u8]) {
        self.objects[index].data.extend_from_slice(capsule);
    }
}

/// Scan an object's bytes for an appended capsule and decode it.
///
/// The capsule was appended after the object's original contents, so its
/// exact offset is unknown; every byte-aligned magic/version match is tried
/// and the first checksum-verified capsule wins. A coincidental magic match
/// in the original data is rejected by the checksum.
///
/// # Errors
/// - [`EngineError::Format`] if no candidate decodes — the object holds no
///   capsule.
/// - [`EngineError::Integrity`] if a candidate matched the magic but failed
///   the checksum.
pub(crate) fn extract_from_object(data: &[u8]) -> Result<(String, Vec<u8>), EngineError> {
    let magic = capsule::MAGIC.to_be_bytes();
    let mut saw_integrity_failure = false;

    for offset in 0..data.len().saturating_sub(4) {
        if data[offset..offset + 4] != magic {
            continue;
        }
        match capsule::decode_bytes(&data[offset..]) {
            Ok(decoded) => return Ok(decoded),
            Err(EngineError::Integrity) => saw_integrity_failure = true,
            Err(_) => {}
        }
    }

    if saw_integrity_failure {
        Err(EngineError::Integrity)
    } else {
        Err(EngineError::Format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DocumentCarrier {
        DocumentCarrier::new(vec![
            DocumentObject { id: 1, eligible: false, data: vec![0x25, 0x50, 0x44, 0x46] },
            DocumentObject { id: 2, eligible: true, data: vec![0xAA; 32] },
            DocumentObject { id: 5, eligible: true, data: vec![] },
        ])
    }

    #[test]
    fn eligible_indices_in_table_order() {
        assert_eq!(table().eligible_indices(), vec![1, 2]);
    }

    #[test]
    fn appended_capsule_found_after_original_data() {
        let capsule = capsule::encode("report.txt", b"contents").unwrap();
        let mut doc = table();
        doc.append_capsule(1, &capsule);
        let (name, payload) = extract_from_object(&doc.objects()[1].data).unwrap();
        assert_eq!(name, "report.txt");
        assert_eq!(payload, b"contents");
    }

    #[test]
    fn clean_object_is_format_error() {
        assert_eq!(
            extract_from_object(&[0u8; 64]),
            Err(EngineError::Format)
        );
    }

    #[test]
    fn coincidental_magic_skipped() {
        // Object data starts with the magic bytes but no valid capsule.
        let mut data = capsule::MAGIC.to_be_bytes().to_vec();
        data.extend_from_slice(&[0u8; 8]);
        let capsule_bytes = capsule::encode("x", b"real").unwrap();
        data.extend_from_slice(&capsule_bytes);
        let (name, payload) = extract_from_object(&data).unwrap();
        assert_eq!(name, "x");
        assert_eq!(payload, b"real");
    }

    #[test]
    fn corrupted_capsule_is_integrity_error() {
        let mut capsule_bytes = capsule::encode("f", b"data").unwrap();
        let last = capsule_bytes.len() - 1;
        capsule_bytes[last] ^= 0xFF; // break the CRC
        assert_eq!(
            extract_from_object(&capsule_bytes),
            Err(EngineError::Integrity)
        );
    }
}
