/// Constant-time comparison utilities.
///
/// This trait provides constant-time primitives used in cryptographic code
/// to avoid timing side-channels. Implementations must ensure that execution
/// time does not depend on secret data.
pub(crate) trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    ///
    /// This method must not introduce data-dependent branches or early exits.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for [u8] {
    /// Constant-time equality test for byte slices.
    ///
    /// All bytes are XORed and accumulated before comparison, ensuring that
    /// the execution time does not depend on where the first difference occurs.
    /// Slices of different lengths compare unequal; the lengths themselves
    /// are public.
    #[inline(never)]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let diff = self
            .iter()
            .zip(other)
            .map(|(a, b)| a ^ b)
            .fold(0u8, |acc, v| acc | v);

        core::hint::black_box(diff) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_and_unequal_slices() {
        assert!(b"abcd"[..].ct_eq(&b"abcd"[..]));
        assert!(!b"abcd"[..].ct_eq(&b"abce"[..]));
        assert!(!b"abcd"[..].ct_eq(&b"xbcd"[..]));
        assert!(!b"abcd"[..].ct_eq(&b"abc"[..]));
        assert!(<[u8]>::ct_eq(&[], &[]));
    }
}
