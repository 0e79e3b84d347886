//! Memory organization and filling algorithm for Argon2.
//!
//! This module implements the core memory-filling loop of Argon2. Memory
//! is organized as a matrix of lanes (rows) and columns, with each cell
//! containing a 1024-byte block. Lanes can be processed independently
//! within each slice, enabling parallelism.
//!
//! Physically the blocks live in one contiguous arena ordered slice-major:
//!
//! ```text
//! [ slice 0: lane 0 segment | lane 1 segment | ... ][ slice 1: ... ] ...
//! ```
//!
//! While slice `s` is being filled, the arena splits into the slices before
//! `s` and after `s` (read-only, shared by all lanes) and the current slice,
//! which further splits into one exclusive segment per lane. Lanes only
//! read other lanes' blocks from completed slices, so this split matches
//! the algorithm's data dependencies and needs no locking per block.

use std::sync::{Mutex, PoisonError};

use crossbeam_utils::thread;
use tracing::warn;

use super::block::Block;
use super::error::Argon2Error;
use super::params::{Params, SYNC_POINTS, Variant, Version};
use super::reference::{AddressStream, compute_reference_position, data_independent};

/// Memory layout parameters for Argon2.
///
/// The memory is organized as follows:
/// - Total memory is divided into `lanes` independent rows.
/// - Each lane contains `lane_len` blocks.
/// - Each lane is divided into 4 slices (sync points).
/// - Each slice contains `segment_len` blocks.
#[derive(Debug, Clone)]
pub(crate) struct MemoryLayout {
    pub lanes: u32,
    pub lane_len: u32,
    pub segment_len: u32,
    pub total_blocks: u32,
}

impl MemoryLayout {
    pub(crate) fn new(params: &Params) -> Self {
        Self {
            lanes: params.parallelism(),
            lane_len: params.lane_len(),
            segment_len: params.segment_len(),
            total_blocks: params.block_count(),
        }
    }

    /// Arena position of block `index_in_lane` of `lane`.
    #[inline]
    pub(crate) fn index(&self, lane: u32, index_in_lane: u32) -> usize {
        let slice = (index_in_lane / self.segment_len) as usize;
        let offset = (index_in_lane % self.segment_len) as usize;
        (slice * self.lanes as usize + lane as usize) * self.segment_len as usize + offset
    }

    #[inline]
    fn slice_len(&self) -> usize {
        self.lanes as usize * self.segment_len as usize
    }
}

/// The working memory of one derivation.
///
/// Allocated up front in full; every block is zeroed when the memory is
/// dropped, whatever the exit path.
pub(crate) struct Memory {
    layout: MemoryLayout,
    blocks: Vec<Block>,
}

impl Memory {
    /// Allocates `layout.total_blocks` zeroed blocks.
    ///
    /// Allocation failure is reported rather than aborting the process.
    pub(crate) fn allocate(layout: MemoryLayout) -> Result<Self, Argon2Error> {
        let count = layout.total_blocks as usize;

        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(count)
            .map_err(|_| Argon2Error::Allocation {
                blocks: layout.total_blocks as u64,
            })?;
        blocks.resize(count, Block::ZERO);

        Ok(Self { layout, blocks })
    }

    pub(crate) fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub(crate) fn block(&self, lane: u32, index_in_lane: u32) -> &Block {
        &self.blocks[self.layout.index(lane, index_in_lane)]
    }

    pub(crate) fn block_mut(&mut self, lane: u32, index_in_lane: u32) -> &mut Block {
        let index = self.layout.index(lane, index_in_lane);
        &mut self.blocks[index]
    }

    /// Fills all memory blocks over the specified number of passes.
    ///
    /// Each pass iterates through all 4 slices in order. Within each slice,
    /// all lanes are processed, on up to `threads` threads. The slice
    /// boundaries act as synchronization points: a lane can only reference
    /// blocks from other lanes that were completed in previous slices of the
    /// current pass.
    pub(crate) fn fill(&mut self, params: &Params, threads: u32) -> Result<(), Argon2Error> {
        for pass in 0..params.time_cost() {
            for slice in 0..SYNC_POINTS {
                self.fill_slice(params, pass, slice, threads)?;
            }
        }
        Ok(())
    }

    fn fill_slice(
        &mut self,
        params: &Params,
        pass: u32,
        slice: u32,
        threads: u32,
    ) -> Result<(), Argon2Error> {
        let layout = &self.layout;
        let slice_len = layout.slice_len();
        let start = slice as usize * slice_len;

        let (before, rest) = self.blocks.split_at_mut(start);
        let (current, after) = rest.split_at_mut(slice_len);

        let filler = SliceFiller {
            layout,
            variant: params.variant(),
            accumulate: pass > 0 && params.version() == Version::V0x13,
            time: params.time_cost(),
            pass,
            slice,
            before,
            after,
        };

        let segments = current
            .chunks_mut(layout.segment_len as usize)
            .enumerate()
            .map(|(lane, segment)| (lane as u32, segment));

        let workers = threads.min(layout.lanes).max(1);
        if workers == 1 {
            segments.for_each(|(lane, segment)| filler.fill_segment(lane, segment));
            return Ok(());
        }

        let queue = Mutex::new(segments.collect::<Vec<_>>());
        let filler = &filler;
        let queue = &queue;

        thread::scope(|scope| {
            for worker in 1..workers {
                let spawned = scope
                    .builder()
                    .name(format!("argon2-lane-{worker}"))
                    .spawn(move |_| filler.drain(queue));

                if let Err(err) = spawned {
                    // The remaining segments are picked up by the threads
                    // that did start, at worst by this one.
                    warn!(error = %err, worker, "could not spawn lane worker");
                    break;
                }
            }
            filler.drain(queue);
        })
        .map_err(|_| Argon2Error::LaneWorker)
    }
}

/// Everything a lane needs to fill its segment of one slice.
struct SliceFiller<'a> {
    layout: &'a MemoryLayout,
    variant: Variant,
    accumulate: bool,
    time: u32,
    pass: u32,
    slice: u32,
    before: &'a [Block],
    after: &'a [Block],
}

impl<'a> SliceFiller<'a> {
    /// Fills segments taken from `queue` until it is empty.
    fn drain(&self, queue: &Mutex<Vec<(u32, &mut [Block])>>) {
        loop {
            let next = queue.lock().unwrap_or_else(PoisonError::into_inner).pop();
            match next {
                Some((lane, segment)) => self.fill_segment(lane, segment),
                None => return,
            }
        }
    }

    /// A block outside the slice being filled.
    #[inline]
    fn shared(&self, lane: u32, index_in_lane: u32) -> &'a Block {
        let index = self.layout.index(lane, index_in_lane);
        let current_start = self.before.len();
        if index < current_start {
            &self.before[index]
        } else {
            debug_assert!(index >= current_start + self.layout.slice_len());
            &self.after[index - current_start - self.layout.slice_len()]
        }
    }

    /// Fills one segment (portion of a lane within a slice).
    ///
    /// For each block position, this function:
    /// 1. Determines J1, J2 values (from address block or previous block)
    /// 2. Computes the reference block position using J1, J2
    /// 3. Computes the new block as G(previous, reference) [⊕ existing on pass > 0]
    fn fill_segment(&self, lane: u32, segment: &mut [Block]) {
        let layout = self.layout;
        let segment_len = layout.segment_len;

        let mut addresses = data_independent(self.variant, self.pass, self.slice).then(|| {
            AddressStream::new(
                self.pass,
                lane,
                self.slice,
                layout.total_blocks,
                self.time,
                self.variant,
            )
        });

        // The first two blocks of each lane are seeded from H0.
        let start_idx = if self.pass == 0 && self.slice == 0 { 2 } else { 0 };
        let mut scratch = Block::ZERO;

        for i in start_idx..segment_len {
            let index_in_lane = self.slice * segment_len + i;
            let (done, rest) = segment.split_at_mut(i as usize);

            let prev = if i == 0 {
                let prev_idx = if index_in_lane == 0 {
                    layout.lane_len - 1
                } else {
                    index_in_lane - 1
                };
                self.shared(lane, prev_idx)
            } else {
                &done[i as usize - 1]
            };

            let word = match addresses.as_mut() {
                Some(stream) => stream.word(i),
                None => prev.0[0],
            };
            let (j1, j2) = (word as u32, (word >> 32) as u32);

            let (ref_lane, ref_idx) =
                compute_reference_position(self.pass, self.slice, lane, i, layout, j1, j2);

            let reference = if ref_lane == lane && ref_idx / segment_len == self.slice {
                &done[(ref_idx % segment_len) as usize]
            } else {
                self.shared(ref_lane, ref_idx)
            };

            rest[0].mix(prev, reference, self.accumulate, &mut scratch);
        }
    }
}
