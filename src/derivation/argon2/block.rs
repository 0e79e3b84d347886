//! Block operations for Argon2.
//!
//! This module defines the fundamental 1024-byte block structure and the
//! compression function G that forms the core of the Argon2 algorithm.
//! The compression function is based on the BLAKE2b round function but
//! uses additional multiplication operations for enhanced diffusion.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a memory block in bytes.
pub const BLOCK_SIZE: usize = 1024;

/// Number of 64-bit words in a memory block.
pub const BLOCK_WORDS: usize = BLOCK_SIZE / 8;

/// A 1024-byte memory block (128 × 64-bit words).
///
/// Blocks are the fundamental unit of memory in Argon2. The algorithm
/// operates by filling and mixing these blocks using the compression
/// function G. Each block is zeroed on drop, which scrubs the whole
/// working memory when it is released.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct Block(pub [u64; BLOCK_WORDS]);

impl Block {
    pub(crate) const ZERO: Self = Self([0u64; BLOCK_WORDS]);

    pub(crate) fn in_place_xor(&mut self, other: &Block) {
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a ^= b);
    }

    pub(crate) fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        let mut block = Block::ZERO;
        for (word, chunk) in block.0.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *word = u64::from_le_bytes(le);
        }
        block
    }

    pub(crate) fn write_bytes(&self, out: &mut [u8; BLOCK_SIZE]) {
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
    }

    /// Mixes `prev` and `reference` into `self` (RFC 9106 §3.5).
    ///
    /// Computes Z = G(X, Y) = P(R) ⊕ R with R = X ⊕ Y, where P applies the
    /// permutation to the 8 rows of 16 words and then to the 8 columns of
    /// word pairs. With `accumulate` the result is XOR-ed into the current
    /// contents (passes after the first in version 1.3); otherwise it
    /// overwrites them.
    ///
    /// `scratch` is working space owned by the caller so the hot loop does
    /// not create temporaries; its contents on return are unspecified.
    #[inline]
    pub(crate) fn mix(
        &mut self,
        prev: &Block,
        reference: &Block,
        accumulate: bool,
        scratch: &mut Block,
    ) {
        for ((s, p), r) in scratch.0.iter_mut().zip(prev.0.iter()).zip(reference.0.iter()) {
            *s = p ^ r;
        }

        if accumulate {
            self.in_place_xor(scratch);
        } else {
            self.0.copy_from_slice(&scratch.0);
        }

        permute_block(&mut scratch.0);
        self.in_place_xor(scratch);
    }

    /// Compression function G as a pure function: returns G(x, y).
    pub(crate) fn compress(x: &Self, y: &Self) -> Self {
        let mut out = Block::ZERO;
        let mut scratch = Block::ZERO;
        out.mix(x, y, false, &mut scratch);
        out
    }
}

/// Applies P row-wise, then column-wise, to a block viewed as an 8×8
/// matrix of 16-byte registers.
#[inline(always)]
fn permute_block(z: &mut [u64; BLOCK_WORDS]) {
    // First pass: P on 8 groups of 16 consecutive words
    for i in 0..8 {
        let base = 16 * i;
        let mut v = [0u64; 16];
        v.copy_from_slice(&z[base..base + 16]);
        permute_p(&mut v);
        z[base..base + 16].copy_from_slice(&v);
    }

    // Second pass: P on 8 groups with interleaved indices
    for i in 0..8 {
        let mut v = [0u64; 16];
        for row in 0..8 {
            v[2 * row] = z[2 * i + 16 * row];
            v[2 * row + 1] = z[2 * i + 16 * row + 1];
        }

        permute_p(&mut v);

        for row in 0..8 {
            z[2 * i + 16 * row] = v[2 * row];
            z[2 * i + 16 * row + 1] = v[2 * row + 1];
        }
    }
}

/// GB mixing function (Argon2 variant of BLAKE2b's G).
///
/// Unlike the original BLAKE2b G function which adds message words,
/// Argon2's GB function uses multiplication of the lower 32 bits to
/// achieve better diffusion. The formula for each step is:
///
/// ```text
/// a = a + b + 2 × trunc(a) × trunc(b)
/// d = (d ⊕ a) >>> rotation
/// ```
///
/// where trunc() extracts the lower 32 bits. The rotation amounts are
/// 32, 24, 16, and 63 bits respectively.
#[inline(always)]
fn gb(a: u64, b: u64, c: u64, d: u64) -> (u64, u64, u64, u64) {
    let a = bla_mka(a, b);
    let d = (d ^ a).rotate_right(32);

    let c = bla_mka(c, d);
    let b = (b ^ c).rotate_right(24);

    let a = bla_mka(a, b);
    let d = (d ^ a).rotate_right(16);

    let c = bla_mka(c, d);
    let b = (b ^ c).rotate_right(63);

    (a, b, c, d)
}

/// `x + y + 2 * lo32(x) * lo32(y)` modulo 2^64.
#[inline(always)]
fn bla_mka(x: u64, y: u64) -> u64 {
    let xy = (x & 0xFFFF_FFFF).wrapping_mul(y & 0xFFFF_FFFF);
    x.wrapping_add(y).wrapping_add(xy.wrapping_mul(2))
}

/// P permutation: one round of the BLAKE2-like mixing.
///
/// Applies GB to a 4×4 matrix of 64-bit words, first along columns,
/// then along diagonals. This is equivalent to one round of the BLAKE2b
/// compression function, but using the modified GB function.
#[inline(always)]
fn permute_p(v: &mut [u64; 16]) {
    (v[0], v[4], v[8], v[12]) = gb(v[0], v[4], v[8], v[12]);
    (v[1], v[5], v[9], v[13]) = gb(v[1], v[5], v[9], v[13]);
    (v[2], v[6], v[10], v[14]) = gb(v[2], v[6], v[10], v[14]);
    (v[3], v[7], v[11], v[15]) = gb(v[3], v[7], v[11], v[15]);

    (v[0], v[5], v[10], v[15]) = gb(v[0], v[5], v[10], v[15]);
    (v[1], v[6], v[11], v[12]) = gb(v[1], v[6], v[11], v[12]);
    (v[2], v[7], v[8], v[13]) = gb(v[2], v[7], v[8], v[13]);
    (v[3], v[4], v[9], v[14]) = gb(v[3], v[4], v[9], v[14]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_of_zero_blocks_is_zero() {
        // P(0) = 0 since GB(0, 0, 0, 0) = (0, 0, 0, 0).
        let z = Block::compress(&Block::ZERO, &Block::ZERO);
        assert!(z.0.iter().all(|w| *w == 0));
    }

    #[test]
    fn accumulate_xors_into_existing_contents() {
        let mut x = Block::ZERO;
        let mut y = Block::ZERO;
        for i in 0..BLOCK_WORDS {
            x.0[i] = i as u64;
            y.0[i] = (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        }
        let g = Block::compress(&x, &y);

        let mut existing = Block::ZERO;
        existing.0[7] = 0xDEAD_BEEF;
        let mut scratch = Block::ZERO;
        existing.mix(&x, &y, true, &mut scratch);

        let mut expected = g.clone();
        expected.0[7] ^= 0xDEAD_BEEF;
        assert_eq!(existing.0, expected.0);
    }

    #[test]
    fn byte_conversion_is_little_endian() {
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes[0] = 0x01;
        bytes[8] = 0x02;
        bytes[15] = 0x80;
        let block = Block::from_bytes(&bytes);
        assert_eq!(block.0[0], 1);
        assert_eq!(block.0[1], 0x8000_0000_0000_0002);

        let mut back = [0u8; BLOCK_SIZE];
        block.write_bytes(&mut back);
        assert_eq!(back, bytes);
    }
}
