//! BLAKE2b hashing state and one-shot helper.
//!
//! The state buffers up to one full block before compressing it, because
//! the final block must be compressed with the finalization flag set and
//! BLAKE2b does not pad a message whose length is a multiple of 128.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::computations::compress;
use super::{B2B_IV, BLAKE2B_BLOCK_LEN, BLAKE2B_OUT_MAX};

/// Incremental BLAKE2b state.
///
/// The state may absorb secret material (Argon2 feeds the password through
/// it), so it is wiped when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake2b {
    h: [u64; 8],
    counter: u128,
    buf: [u8; BLAKE2B_BLOCK_LEN],
    buf_len: usize,
    out_len: usize,
}

impl Blake2b {
    /// Creates an unkeyed BLAKE2b state producing `out_len` bytes.
    ///
    /// # Panics
    /// Panics if `out_len` is not in `1..=64`. Callers inside this crate
    /// always pass a valid length.
    pub fn new(out_len: usize) -> Self {
        assert!(
            (1..=BLAKE2B_OUT_MAX).contains(&out_len),
            "BLAKE2b output length must be between 1 and 64 bytes"
        );

        let mut h = B2B_IV;
        // Parameter block: digest length, key length 0, fanout 1, depth 1.
        h[0] ^= 0x0101_0000 ^ out_len as u64;

        Self {
            h,
            counter: 0,
            buf: [0u8; BLAKE2B_BLOCK_LEN],
            buf_len: 0,
            out_len,
        }
    }

    /// Digest length this state was created with.
    pub fn output_len(&self) -> usize {
        self.out_len
    }

    /// Absorbs `data` into the state.
    pub fn update(&mut self, mut data: &[u8]) -> &mut Self {
        while !data.is_empty() {
            // Only compress a buffered block once more input is known to
            // follow it.
            if self.buf_len == BLAKE2B_BLOCK_LEN {
                self.counter = self.counter.wrapping_add(BLAKE2B_BLOCK_LEN as u128);
                compress(&mut self.h, &self.buf, self.counter, false);
                self.buf_len = 0;
            }

            let take = (BLAKE2B_BLOCK_LEN - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];
        }

        self
    }

    /// Finishes the computation and writes the digest into `out`.
    ///
    /// # Panics
    /// Panics if `out.len()` differs from the length given to [`Blake2b::new`].
    pub fn finalize_into(mut self, out: &mut [u8]) {
        assert_eq!(out.len(), self.out_len, "output buffer length mismatch");

        self.counter = self.counter.wrapping_add(self.buf_len as u128);
        self.buf[self.buf_len..].fill(0);
        compress(&mut self.h, &self.buf, self.counter, true);

        let mut full = [0u8; BLAKE2B_OUT_MAX];
        for (chunk, word) in full.chunks_exact_mut(8).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out.copy_from_slice(&full[..self.out_len]);
        full.zeroize();
    }

    /// Finishes the computation and returns the digest.
    pub fn finalize(self) -> Vec<u8> {
        let mut out = vec![0u8; self.out_len];
        self.finalize_into(&mut out);
        out
    }
}

/// Computes the BLAKE2b digest of `input` with the given output length.
///
/// # Parameters
/// - `out_len`: digest length in bytes, `1..=64`
/// - `input`: arbitrary-length message
///
/// # Panics
/// Panics if `out_len` is outside `1..=64`.
pub fn blake2b(out_len: usize, input: &[u8]) -> Vec<u8> {
    let mut state = Blake2b::new(out_len);
    state.update(input);
    state.finalize()
}
