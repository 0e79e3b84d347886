//! Password verification against stored Argon2 hashes.
//!
//! Every function here distinguishes a stored value that cannot be parsed
//! ([`Argon2Error::InvalidHash`]) from a well-formed one that the password
//! does not match ([`Argon2Error::Mismatch`]). Tags are compared in
//! constant time.

use tracing::debug;

use super::core::Argon2;
use super::encoding::decode;
use super::error::{Argon2Error, DecodeError};
use super::params::{Params, Variant};
use crate::utils::ct::ConstantTimeEq;

/// Compares a freshly computed tag with the stored one.
pub(crate) fn verify_tag(computed: &[u8], expected: &[u8]) -> Result<bool, Argon2Error> {
    if computed.ct_eq(expected) {
        Ok(true)
    } else {
        debug!("argon2 verification failed: tag mismatch");
        Err(Argon2Error::Mismatch)
    }
}

/// Verifies `password` against a PHC-encoded hash.
///
/// The variant, version, costs, salt and tag length are all taken from
/// `encoded`. Returns `Ok(true)` on a match.
///
/// # Errors
///
/// - [`Argon2Error::InvalidHash`] if `encoded` is not a valid Argon2 PHC
///   string
/// - [`Argon2Error::Mismatch`] if it is valid but was not produced from
///   `password`
///
/// # Example
///
/// ```rust
/// use argon2_phc::{Argon2Error, verify};
///
/// let stored = "$argon2i$m=8,t=1,p=1$c29tZXNhbHQAAAAAAAAAAA$owd7NH5aC7mrx3sIc0zMF+R8RkPHS23ZuFM0IO3uck8";
/// assert!(verify(stored, b"password").unwrap());
/// assert!(matches!(verify(stored, b"hunter2"), Err(Argon2Error::Mismatch)));
/// ```
pub fn verify(encoded: &str, password: &[u8]) -> Result<bool, Argon2Error> {
    let phc = decode(encoded)?;
    Argon2::new(phc.params.clone()).verify_phc(&phc, password)
}

/// Like [`verify`], but also requires the stored hash to use `variant`.
///
/// A hash of another variant is rejected as
/// [`DecodeError::VariantMismatch`] without running the derivation.
pub fn verify_variant(
    encoded: &str,
    password: &[u8],
    variant: Variant,
) -> Result<bool, Argon2Error> {
    let phc = decode(encoded)?;

    let found = phc.params.variant();
    if found != variant {
        return Err(DecodeError::VariantMismatch {
            expected: variant,
            found,
        }
        .into());
    }

    Argon2::new(phc.params.clone()).verify_phc(&phc, password)
}

/// Verifies `password` against a raw tag and salt, without parsing.
///
/// The tag length is `hash.len()`; `params.hash_len()` is ignored.
pub fn verify_raw(
    params: &Params,
    salt: &[u8],
    hash: &[u8],
    password: &[u8],
) -> Result<bool, Argon2Error> {
    Argon2::new(params.clone()).verify_raw(salt, hash, password)
}

impl Argon2<'_> {
    /// Verifies `password` against a PHC-encoded hash using this hasher's
    /// secret key, associated data and thread count.
    ///
    /// The parameters come from `encoded`, not from this hasher.
    pub fn verify_encoded(&self, encoded: &str, password: &[u8]) -> Result<bool, Argon2Error> {
        let phc = decode(encoded)?;
        self.verify_phc(&phc, password)
    }
}
