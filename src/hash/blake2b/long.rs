//! Variable-length hash function H' (RFC 9106 §3.3).
//!
//! BLAKE2b caps its digest at 64 bytes, while Argon2 needs 1024-byte blocks
//! for lane seeding and tags of arbitrary length. H' chains BLAKE2b
//! invocations:
//!
//! ```text
//! if T <= 64:  H'(X) = BLAKE2b_T(LE32(T) || X)
//! else:        r = ceil(T / 32) - 2
//!              V1 = BLAKE2b_64(LE32(T) || X)
//!              Vi = BLAKE2b_64(V{i-1})           for 2 <= i <= r
//!              V{r+1} = BLAKE2b_{T - 32r}(Vr)
//!              H'(X) = W1 || ... || Wr || V{r+1}    (Wi = first 32 bytes of Vi)
//! ```

use zeroize::Zeroizing;

use super::BLAKE2B_OUT_MAX;
use super::core::Blake2b;

const HALF_OUT: usize = BLAKE2B_OUT_MAX / 2;

/// Computes `H'(input)` with an output of `out_len` bytes.
///
/// # Panics
/// Panics if `out_len` is zero or does not fit in 32 bits.
pub fn blake2b_long(out_len: usize, input: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; out_len];
    blake2b_long_into(&mut out, &[input]);
    out
}

/// Computes `H'(parts[0] || parts[1] || ...)` into `out`, using `out.len()`
/// as the requested length.
///
/// Taking the input as a list of parts lets callers hash `H0 || j || i`
/// without first concatenating secret-derived bytes into a new buffer.
pub(crate) fn blake2b_long_into(out: &mut [u8], parts: &[&[u8]]) {
    let out_len = out.len();
    let len_prefix = u32::try_from(out_len)
        .expect("H' output length must fit in 32 bits")
        .to_le_bytes();

    if out_len <= BLAKE2B_OUT_MAX {
        let mut state = Blake2b::new(out_len);
        state.update(&len_prefix);
        for part in parts {
            state.update(part);
        }
        state.finalize_into(out);
        return;
    }

    let mut v = Zeroizing::new([0u8; BLAKE2B_OUT_MAX]);

    let mut state = Blake2b::new(BLAKE2B_OUT_MAX);
    state.update(&len_prefix);
    for part in parts {
        state.update(part);
    }
    state.finalize_into(&mut v[..]);

    out[..HALF_OUT].copy_from_slice(&v[..HALF_OUT]);
    let mut pos = HALF_OUT;

    while out_len - pos > BLAKE2B_OUT_MAX {
        let mut state = Blake2b::new(BLAKE2B_OUT_MAX);
        state.update(&v[..]);
        state.finalize_into(&mut v[..]);

        out[pos..pos + HALF_OUT].copy_from_slice(&v[..HALF_OUT]);
        pos += HALF_OUT;
    }

    let mut state = Blake2b::new(out_len - pos);
    state.update(&v[..]);
    state.finalize_into(&mut out[pos..]);
}
