// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deterministic tie-breaking.
//!
//! Tied candidates are resolved with a stable hash of the slot so that
//! identical inputs always pick the same member, independent of process,
//! platform or hash seed.

use rota_domain::TaskId;
use rota_domain::calendar::iso_date;
use time::Date;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Computes the 32-bit FNV-1a hash of `bytes`.
#[must_use]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Returns the tie-break key for a slot: `YYYY-MM-DD|<task>`.
#[must_use]
pub fn tie_break_key(date: Date, task: &TaskId) -> String {
    format!("{}|{}", iso_date(date), task.canonical())
}

/// Picks an index in `0..candidates` for the slot.
///
/// Callers must sort tied candidates by member id before indexing.
/// Returns 0 when `candidates` is 0 or 1.
#[must_use]
pub fn tie_break_index(date: Date, task: &TaskId, candidates: usize) -> usize {
    if candidates <= 1 {
        return 0;
    }
    let hash: u32 = fnv1a_32(tie_break_key(date, task).as_bytes());
    usize::try_from(hash).map_or(0, |hash| hash % candidates)
}
