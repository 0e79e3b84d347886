//! Argon2 password hashing with PHC string encoding.
//!
//! This crate implements Argon2d, Argon2i and Argon2id as specified in
//! RFC 9106, in both versions 0x10 and 0x13, on top of a pure Rust
//! BLAKE2b. Hashes can be produced as raw tags or as PHC strings, and
//! verified against either.
//!
//! # Module overview
//!
//! - `hash`  
//!   BLAKE2b (RFC 7693) and Argon2's variable-length construction H'
//!   built on top of it. Exposed for protocol-level use and testing.
//!
//! - `derivation`  
//!   The Argon2 family: parameters and presets, the memory-hard core,
//!   PHC encoding and decoding, and verification.
//!
//!   Lanes are filled on scoped worker threads, one slice at a time.
//!   Results are identical for any thread count.
//!
//! - `utils`  
//!   Crate-internal helpers such as constant-time comparison.
//!
//! # Quick start
//!
//! ```rust
//! use argon2_phc::{Params, Variant, hash_encoded, verify};
//!
//! let params = Params::new(Variant::Argon2id, 2, 256, 2).unwrap();
//! let stored = hash_encoded(&params, b"correct horse", b"0123456789abcdef").unwrap();
//!
//! assert!(verify(&stored, b"correct horse").unwrap());
//! assert!(verify(&stored, b"battery staple").is_err());
//! ```
//!
//! # Design goals
//!
//! - Exact RFC 9106 output for every variant and version
//! - Typed errors that keep bad parameters, allocation failure, malformed
//!   hashes and wrong passwords apart
//! - Working memory and intermediate secrets zeroed on every exit path
//! - No `unsafe`
//!
//! Salts must be generated by the caller from a cryptographically secure
//! source; this crate does not generate randomness.

mod utils;

pub mod derivation;
pub mod hash;

pub use derivation::{
    Argon2, Argon2Error, DecodeError, ParamError, Params, PhcHash, Variant, Version, decode,
    derive, encode, encoded_len, extract_parameters, hash_encoded, verify, verify_raw,
    verify_variant,
};
