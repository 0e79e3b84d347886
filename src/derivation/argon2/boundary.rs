//! Initialization and finalization for Argon2.
//!
//! This module handles the boundary operations of the Argon2 algorithm:
//! computing the initial hash H0 from all inputs, seeding the first two
//! blocks of every lane, and deriving the final tag from the filled memory.

use zeroize::Zeroizing;

use super::block::{BLOCK_SIZE, Block};
use super::memory::Memory;
use super::params::Params;
use crate::hash::Blake2b;
use crate::hash::blake2b::BLAKE2B_OUT_MAX;
use crate::hash::blake2b::long::blake2b_long_into;

/// Byte length of the initial hash H0.
pub(crate) const SEED_LEN: usize = BLAKE2B_OUT_MAX;

/// Computes the initial hash H0 from all Argon2 inputs.
///
/// H0 is a 64-byte BLAKE2b hash of the concatenation of all parameters
/// and inputs, each prefixed with its length. This ensures that all
/// inputs influence the entire computation and provides domain separation.
///
/// The input format is defined in RFC 9106 §3.2:
/// ```text
/// H0 = BLAKE2b(p || T || m || t || v || y || |P| || P || |S| || S || |K| || K || |X| || X)
/// ```
///
/// `m` is the memory cost as requested, not the rounded block count. An
/// absent secret or associated data is hashed as a zero-length field.
///
/// The fields are streamed into the hash state, so the password is never
/// copied. Callers must have checked that every length fits in 32 bits.
pub(crate) fn initial_hash(
    params: &Params,
    password: &[u8],
    salt: &[u8],
    secret: &[u8],
    associated_data: &[u8],
) -> Zeroizing<[u8; SEED_LEN]> {
    let mut state = Blake2b::new(SEED_LEN);

    state
        .update(&params.parallelism().to_le_bytes())
        .update(&params.hash_len().to_le_bytes())
        .update(&params.memory_cost().to_le_bytes())
        .update(&params.time_cost().to_le_bytes())
        .update(&params.version().as_u32().to_le_bytes())
        .update(&params.variant().as_u32().to_le_bytes());

    for field in [password, salt, secret, associated_data] {
        state
            .update(&(field.len() as u32).to_le_bytes())
            .update(field);
    }

    let mut h0 = Zeroizing::new([0u8; SEED_LEN]);
    state.finalize_into(&mut h0[..]);
    h0
}

/// Seeds the first two blocks of every lane:
/// `B[i][j] = H'^(1024)(H0 || LE32(j) || LE32(i))` for `j` in `{0, 1}`.
pub(crate) fn seed_lanes(memory: &mut Memory, h0: &[u8; SEED_LEN]) {
    let mut bytes = Zeroizing::new([0u8; BLOCK_SIZE]);

    for lane in 0..memory.layout().lanes {
        for j in 0..2u32 {
            blake2b_long_into(
                &mut bytes[..],
                &[&h0[..], &j.to_le_bytes(), &lane.to_le_bytes()],
            );
            *memory.block_mut(lane, j) = Block::from_bytes(&bytes);
        }
    }
}

/// Finalizes the Argon2 computation into `out`.
///
/// The finalization XORs together the last block of each lane (forming
/// a single 1024-byte block), then applies the variable-length hash
/// function H' to produce a tag of `out.len()` bytes.
///
/// This construction ensures that all lanes contribute to the final
/// output, preventing attackers from skipping lane computations.
pub(crate) fn finalize(memory: &Memory, out: &mut [u8]) {
    let layout = memory.layout();
    let last = layout.lane_len - 1;

    let mut final_block = memory.block(0, last).clone();
    for lane in 1..layout.lanes {
        final_block.in_place_xor(memory.block(lane, last));
    }

    let mut bytes = Zeroizing::new([0u8; BLOCK_SIZE]);
    final_block.write_bytes(&mut bytes);
    blake2b_long_into(out, &[&bytes[..]]);
}
