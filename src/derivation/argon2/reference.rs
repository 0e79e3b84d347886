//! Reference block position computation for Argon2.
//!
//! When filling a block at position (lane, index), Argon2 needs to select
//! a reference block to mix with the previous block. The selection algorithm
//! uses pseudo-random values J1 and J2 to determine which block to reference,
//! with constraints to ensure the referenced block has already been computed.
//!
//! J1 and J2 come either from the previous block (data-dependent addressing)
//! or from an [`AddressStream`] that depends only on public position values
//! (data-independent addressing).

use super::block::{BLOCK_WORDS, Block};
use super::memory::MemoryLayout;
use super::params::{SYNC_POINTS, Variant};

/// Returns whether the segment at (`pass`, `slice`) uses data-independent
/// addressing.
///
/// Argon2i always does, Argon2d never does, and Argon2id does for the
/// first two slices of the first pass only.
#[inline(always)]
pub(crate) fn data_independent(variant: Variant, pass: u32, slice: u32) -> bool {
    match variant {
        Variant::Argon2d => false,
        Variant::Argon2i => true,
        Variant::Argon2id => pass == 0 && slice < SYNC_POINTS / 2,
    }
}

/// Pseudo-random J1 || J2 values for data-independent addressing.
///
/// The stream is seeded once per segment with the input block
/// `Z = (pass, lane, slice, m', t, y, counter, 0, ...)` and yields the 128
/// words of `G(0, G(0, Z))`, incrementing the counter and regenerating each
/// time a new 128-word window starts.
pub(crate) struct AddressStream {
    input: Block,
    addresses: Block,
}

impl AddressStream {
    pub(crate) fn new(
        pass: u32,
        lane: u32,
        slice: u32,
        total_blocks: u32,
        time: u32,
        variant: Variant,
    ) -> Self {
        let mut input = Block::ZERO;
        input.0[0] = pass as u64;
        input.0[1] = lane as u64;
        input.0[2] = slice as u64;
        input.0[3] = total_blocks as u64;
        input.0[4] = time as u64;
        input.0[5] = variant.as_u32() as u64;

        let mut stream = Self {
            input,
            addresses: Block::ZERO,
        };
        stream.refill();
        stream
    }

    fn refill(&mut self) {
        self.input.0[6] += 1;
        let tmp = Block::compress(&Block::ZERO, &self.input);
        self.addresses = Block::compress(&Block::ZERO, &tmp);
    }

    /// Returns the pseudo-random word for position `index_in_segment`.
    ///
    /// Must be called with strictly increasing indices within a segment.
    #[inline]
    pub(crate) fn word(&mut self, index_in_segment: u32) -> u64 {
        let offset = index_in_segment as usize % BLOCK_WORDS;
        if index_in_segment != 0 && offset == 0 {
            self.refill();
        }
        self.addresses.0[offset]
    }
}

/// Computes the reference block position for the Argon2 filling algorithm.
///
/// Given the current position and pseudo-random values J1, J2, this function
/// determines which previously-computed block should be used as the second
/// input to the compression function G.
///
/// The algorithm (RFC 9106 §3.4.1.3) ensures that:
/// - On the first pass, first slice: only earlier blocks in the same lane
/// - Otherwise: blocks from any lane, but respecting slice boundaries
///
/// The mapping uses a non-uniform distribution (phi function) that biases
/// toward more recently computed blocks, improving cache locality. The
/// mapping is the same for versions 0x10 and 0x13.
///
/// # Returns
///
/// A tuple `(reference_lane, reference_index)` identifying the block to use,
/// with `reference_index` relative to the start of the lane.
pub(crate) fn compute_reference_position(
    pass: u32,
    slice: u32,
    lane: u32,
    index_in_segment: u32,
    layout: &MemoryLayout,
    j1: u32,
    j2: u32,
) -> (u32, u32) {
    let segment_len = layout.segment_len;
    let lane_len = layout.lane_len;
    let lanes = layout.lanes;

    let ref_lane = if pass == 0 && slice == 0 {
        lane
    } else {
        j2 % lanes
    };

    let same_lane = ref_lane == lane;

    // Pass 0: finished segments of this pass (plus the blocks already
    // built in the current segment when staying in the same lane).
    // Later passes: the last three segments, same extension rule.
    let reference_area_size = if pass == 0 {
        if slice == 0 {
            index_in_segment - 1
        } else if same_lane {
            slice * segment_len + index_in_segment - 1
        } else if index_in_segment == 0 {
            slice * segment_len - 1
        } else {
            slice * segment_len
        }
    } else if same_lane {
        lane_len - segment_len + index_in_segment - 1
    } else if index_in_segment == 0 {
        lane_len - segment_len - 1
    } else {
        lane_len - segment_len
    };

    // Phi function: x = J1² / 2³², relative_position = W - 1 - (W × x / 2³²)
    let j1_64 = j1 as u64;
    let x = (j1_64 * j1_64) >> 32;
    let area = reference_area_size as u64;
    let relative_position = area - 1 - ((area * x) >> 32);

    let start_position = if pass == 0 || slice == SYNC_POINTS - 1 {
        0
    } else {
        (slice + 1) * segment_len
    };

    let ref_index = ((start_position as u64 + relative_position) % lane_len as u64) as u32;

    (ref_lane, ref_index)
}
