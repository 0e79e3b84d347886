//! Argon2 context and derivation entry points.
//!
//! [`Argon2`] bundles validated [`Params`] with the optional secret key and
//! associated data, and drives a derivation end to end: input checks,
//! H0, lane seeding, the memory fill and finalization.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use super::boundary::{finalize, initial_hash, seed_lanes};
use super::encoding::{PhcHash, encode};
use super::error::{Argon2Error, ParamError};
use super::memory::{Memory, MemoryLayout};
use super::params::{MIN_SALT_LEN, Params};
use super::verify::verify_tag;

/// An Argon2 hasher: parameters plus the optional keyed inputs.
///
/// The secret key `K` and associated data `X` are borrowed, never copied.
/// Both default to empty, which RFC 9106 treats as zero-length fields.
///
/// The number of worker threads only affects speed: any thread count
/// produces the same output for the same inputs.
///
/// # Example
///
/// ```rust
/// use argon2_phc::{Argon2, Params, Variant};
///
/// let params = Params::new(Variant::Argon2id, 2, 64, 2).unwrap();
/// let argon2 = Argon2::new(params).with_secret(b"pepper");
///
/// let tag = argon2.derive(b"password", b"somesalt").unwrap();
/// assert_eq!(tag.len(), 32);
/// ```
#[derive(Clone)]
pub struct Argon2<'k> {
    params: Params,
    secret: &'k [u8],
    associated_data: &'k [u8],
    threads: u32,
}

impl fmt::Debug for Argon2<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2")
            .field("params", &self.params)
            .field("has_secret", &!self.secret.is_empty())
            .field("associated_data_len", &self.associated_data.len())
            .field("threads", &self.threads)
            .finish()
    }
}

impl<'k> Argon2<'k> {
    /// Creates a hasher using one worker thread per lane.
    pub fn new(params: Params) -> Self {
        let threads = params.parallelism();
        Self {
            params,
            secret: &[],
            associated_data: &[],
            threads,
        }
    }

    /// Sets the secret key `K`.
    pub fn with_secret(mut self, secret: &'k [u8]) -> Self {
        self.secret = secret;
        self
    }

    /// Sets the associated data `X`.
    pub fn with_associated_data(mut self, associated_data: &'k [u8]) -> Self {
        self.associated_data = associated_data;
        self
    }

    /// Caps the number of threads filling lanes concurrently.
    ///
    /// `0` and `1` both mean single-threaded. Values above the lane count
    /// are clamped to it.
    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn threads(&self) -> u32 {
        self.threads
    }

    /// Derives a `params.hash_len()`-byte tag from `password` and `salt`.
    ///
    /// # Errors
    ///
    /// - [`Argon2Error::InvalidParams`] if the salt is shorter than 8 bytes
    /// - [`Argon2Error::PasswordTooLong`], [`Argon2Error::SecretTooLong`] or
    ///   [`Argon2Error::AssociatedDataTooLong`] if an input length does not
    ///   fit in 32 bits
    /// - [`Argon2Error::Allocation`] if the working memory cannot be
    ///   allocated
    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>, Argon2Error> {
        let mut out = vec![0u8; self.params.hash_len() as usize];
        self.derive_into(&self.params, password, salt, &mut out)?;
        Ok(out)
    }

    /// Derives a tag and returns it as a PHC string together with the salt
    /// and parameters.
    pub fn hash_encoded(&self, password: &[u8], salt: &[u8]) -> Result<String, Argon2Error> {
        let params = self.params_for_salt(salt)?;
        let mut tag = Zeroizing::new(vec![0u8; params.hash_len() as usize]);
        self.derive_into(&params, password, salt, &mut tag)?;
        Ok(encode(&params, salt, &tag))
    }

    /// Checks `password` against a raw `hash` produced with this hasher's
    /// parameters, secret and associated data.
    ///
    /// The tag length is taken from `hash.len()`. Returns `Ok(true)` on a
    /// match and [`Argon2Error::Mismatch`] otherwise.
    pub fn verify_raw(
        &self,
        salt: &[u8],
        hash: &[u8],
        password: &[u8],
    ) -> Result<bool, Argon2Error> {
        let hash_len = u32::try_from(hash.len()).map_err(|_| ParamError::HashTooLong)?;
        let params = self.params.clone().with_hash_len(hash_len)?;

        let mut computed = Zeroizing::new(vec![0u8; hash.len()]);
        self.derive_into(&params, password, salt, &mut computed)?;
        verify_tag(&computed, hash)
    }

    /// Verifies `password` against a decoded PHC hash, using this hasher's
    /// secret, associated data and thread count.
    pub(crate) fn verify_phc(&self, phc: &PhcHash, password: &[u8]) -> Result<bool, Argon2Error> {
        let mut computed = Zeroizing::new(vec![0u8; phc.hash.len()]);
        self.derive_into(&phc.params, password, &phc.salt, &mut computed)?;
        verify_tag(&computed, &phc.hash)
    }

    /// Parameters whose declared salt length matches `salt`.
    fn params_for_salt(&self, salt: &[u8]) -> Result<Params, Argon2Error> {
        let salt_len = u32::try_from(salt.len()).map_err(|_| ParamError::SaltTooLong)?;
        Ok(self.params.clone().with_salt_len(salt_len)?)
    }

    /// Runs the full computation with `params`, writing `out.len()` bytes.
    fn derive_into(
        &self,
        params: &Params,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<(), Argon2Error> {
        check_inputs(password, salt, self.secret, self.associated_data)?;

        let layout = MemoryLayout::new(params);
        debug!(
            variant = %params.variant(),
            version = params.version().as_u32(),
            blocks = layout.total_blocks,
            passes = params.time_cost(),
            lanes = params.parallelism(),
            threads = self.threads.clamp(1, params.parallelism()),
            "argon2 derivation"
        );

        let mut memory = Memory::allocate(layout)?;

        let h0 = initial_hash(params, password, salt, self.secret, self.associated_data);
        seed_lanes(&mut memory, &h0);

        memory.fill(params, self.threads)?;
        finalize(&memory, out);

        Ok(())
    }
}

/// Checks input lengths against RFC 9106 bounds.
fn check_inputs(
    password: &[u8],
    salt: &[u8],
    secret: &[u8],
    associated_data: &[u8],
) -> Result<(), Argon2Error> {
    if u32::try_from(password.len()).is_err() {
        return Err(Argon2Error::PasswordTooLong);
    }

    if salt.len() < MIN_SALT_LEN as usize {
        return Err(ParamError::SaltTooShort {
            min: MIN_SALT_LEN,
            got: salt.len() as u32,
        }
        .into());
    }

    if u32::try_from(salt.len()).is_err() {
        return Err(ParamError::SaltTooLong.into());
    }

    if u32::try_from(secret.len()).is_err() {
        return Err(Argon2Error::SecretTooLong);
    }

    if u32::try_from(associated_data.len()).is_err() {
        return Err(Argon2Error::AssociatedDataTooLong);
    }

    Ok(())
}

/// Computes an Argon2 tag of `params.hash_len()` bytes.
///
/// # Arguments
///
/// * `params` - Variant, version and cost parameters
/// * `password` - The password (or other secret message) to hash
/// * `salt` - A random salt (minimum 8 bytes, recommended 16)
/// * `secret` - Optional secret key `K`
/// * `associated_data` - Optional associated data `X`
///
/// # Example
///
/// ```rust
/// use argon2_phc::{Params, Variant, derive};
///
/// let params = Params::new(Variant::Argon2i, 1, 32, 1).unwrap();
/// let tag = derive(&params, b"password", b"somesalt", None, None).unwrap();
/// assert_eq!(tag.len(), 32);
/// ```
pub fn derive(
    params: &Params,
    password: &[u8],
    salt: &[u8],
    secret: Option<&[u8]>,
    associated_data: Option<&[u8]>,
) -> Result<Vec<u8>, Argon2Error> {
    Argon2::new(params.clone())
        .with_secret(secret.unwrap_or_default())
        .with_associated_data(associated_data.unwrap_or_default())
        .derive(password, salt)
}

/// Hashes `password` with `salt` and returns the PHC string.
///
/// The salt length recorded in the returned parameters is `salt.len()`.
pub fn hash_encoded(params: &Params, password: &[u8], salt: &[u8]) -> Result<String, Argon2Error> {
    Argon2::new(params.clone()).hash_encoded(password, salt)
}
