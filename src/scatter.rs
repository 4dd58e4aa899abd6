// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Password-seeded scatter ordering.
//!
//! Produces the permutation of slot indices that determines where each
//! capsule bit lands in the carrier. The scheme is a versioned protocol
//! detail (bump the capsule version if any of it changes):
//!
//! 1. A 32-byte seed is derived from the password via Argon2id with the
//!    fixed salt `"unisteno-scat-v1"`, so both embedder and extractor derive
//!    identical seeds from the password alone.
//! 2. The seed drives a ChaCha20 PRNG through a Fisher-Yates shuffle.
//! 3. The first 88 positions — the slots that will hold the fixed capsule
//!    header — are drawn by a partial Fisher-Yates seeded from a fixed,
//!    password-independent constant. The header therefore always occupies
//!    the same slots for a given slot count, which is what lets extraction
//!    tell "no capsule" (magic mismatch) apart from "wrong password"
//!    (checksum mismatch on the password-scattered body).
//!
//! # Cross-platform portability
//!
//! All `gen_range` calls use `u32` bounds (not `usize`) so the shuffle
//! consumes identical PRNG entropy on 32-bit and 64-bit targets. `usize`
//! bounds would make wasm32 and native builds disagree on every swap.

use argon2::Argon2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroizing;

use crate::capsule::FIXED_HEADER_BITS;
use crate::error::EngineError;

/// Fixed salt for password-to-seed derivation.
/// Intentionally constant so the extractor can reproduce the ordering from
/// the password alone, before reading any carrier data.
const SCATTER_SALT: &[u8; 16] = b"unisteno-scat-v1";

/// Fixed ChaCha20 seed for the password-independent header prefix.
const HEADER_SEED: [u8; 32] = *b"unisteno-header-ordering-v1\0\0\0\0\0";

/// Derive the 32-byte scatter seed from a password.
///
/// Deterministic given the password, so embedder and extractor agree.
pub fn derive_seed(password: &str) -> Zeroizing<[u8; 32]> {
    let mut seed = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(password.as_bytes(), SCATTER_SALT, &mut *seed)
        .expect("Argon2 seed derivation should not fail");
    seed
}

/// Produce the scatter ordering: a permutation of `0..slot_count`.
///
/// The first `min(88, slot_count)` entries are password-independent (they
/// carry the fixed capsule header); the remainder is a password-seeded
/// Fisher-Yates shuffle of the remaining indices. Identical inputs always
/// yield an identical ordering.
///
/// # Errors
/// - [`EngineError::Capacity`] if `slot_count` is 0.
/// - [`EngineError::CarrierTooLarge`] if `slot_count` exceeds the u32 range.
pub fn slots_for(password: &str, slot_count: usize) -> Result<Vec<u32>, EngineError> {
    if slot_count == 0 {
        return Err(EngineError::Capacity {
            required_bits: FIXED_HEADER_BITS,
            available_bits: 0,
        });
    }
    if slot_count > u32::MAX as usize {
        return Err(EngineError::CarrierTooLarge);
    }

    let mut order: Vec<u32> = (0..slot_count as u32).collect();

    // Header prefix: partial Fisher-Yates from the fixed protocol seed.
    let header_len = FIXED_HEADER_BITS.min(slot_count);
    let mut rng = ChaCha20Rng::from_seed(HEADER_SEED);
    for i in 0..header_len {
        let j = i + rng.gen_range(0..=(slot_count - 1 - i) as u32) as usize;
        order.swap(i, j);
    }

    // Body: full Fisher-Yates over the remaining tail, keyed by the password.
    let seed = derive_seed(password);
    let mut rng = ChaCha20Rng::from_seed(*seed);
    let tail = &mut order[header_len..];
    let n = tail.len();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        tail.swap(i, j);
    }

    Ok(order)
}

/// Pick a single password-keyed index in `0..count`.
///
/// Used by the document path, which selects one target object rather than
/// a bit ordering. Unlike the prefix of [`slots_for`], this draw is always
/// password-dependent.
///
/// # Errors
/// [`EngineError::Capacity`] if `count` is 0.
pub fn pick(password: &str, count: usize) -> Result<u32, EngineError> {
    if count == 0 {
        return Err(EngineError::Capacity {
            required_bits: FIXED_HEADER_BITS,
            available_bits: 0,
        });
    }
    if count > u32::MAX as usize {
        return Err(EngineError::CarrierTooLarge);
    }
    let seed = derive_seed(password);
    let mut rng = ChaCha20Rng::from_seed(*seed);
    Ok(rng.gen_range(0..=(count - 1) as u32))
}
