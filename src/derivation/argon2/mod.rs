//! Argon2 password hashing function (RFC 9106).
//!
//! Argon2 is a memory-hard password hashing function designed to resist
//! GPU-based brute-force attacks and time-memory trade-offs. It comes in
//! three variants that differ only in how reference blocks are chosen:
//!
//! - **Argon2d** picks them from block contents (data-dependent). Fastest
//!   to make expensive for attackers, but leaks access patterns.
//! - **Argon2i** picks them from a counter-driven stream (data-independent),
//!   resisting side-channel attacks.
//! - **Argon2id** is data-independent for the first half of the first pass
//!   and data-dependent afterwards. It is the recommended default.
//!
//! # Algorithm Overview
//!
//! 1. **Initialization**: Compute H0 = BLAKE2b(params || password || salt || ...)
//! 2. **Lane initialization**: Generate the first two blocks of each lane
//!    using H' (variable-length BLAKE2b).
//! 3. **Memory filling**: Fill the remaining blocks using the compression
//!    function G, which is based on the BLAKE2b round function with
//!    additional multiplication for diffusion.
//! 4. **Finalization**: XOR the last block of each lane together and apply
//!    H' to produce the final tag.
//!
//! # Memory Organization
//!
//! Memory is organized as a matrix of 1024-byte blocks:
//! - **Lanes**: independent rows that can be processed in parallel.
//! - **Slices**: each lane is divided into 4 slices (sync points).
//! - **Segments**: blocks of one lane within one slice.
//!
//! Lanes are filled concurrently within a slice, on up to
//! [`Argon2::with_threads`] threads, and joined before the next slice
//! starts. The output does not depend on the thread count.
//!
//! # Versions
//!
//! Version 0x13 (the default) XORs new blocks into the old ones on every
//! pass after the first; version 0x10 overwrites them. Version 0x10 is
//! supported to verify hashes created before RFC 9106.
//!
//! # Encoded hashes
//!
//! [`hash_encoded`] and [`verify`] work with PHC strings such as
//! `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`, which carry everything
//! needed to recompute the tag except the password and any secret key.

pub(crate) mod block;
pub(crate) mod boundary;
pub mod core;
pub mod encoding;
pub mod error;
pub(crate) mod memory;
pub mod params;
pub(crate) mod reference;
pub mod verify;

pub use self::core::{Argon2, derive, hash_encoded};
pub use encoding::{PhcHash, decode, encode, encoded_len, extract_parameters};
pub use error::{Argon2Error, DecodeError, ParamError};
pub use params::{Params, Variant, Version};
pub use verify::{verify, verify_raw, verify_variant};
