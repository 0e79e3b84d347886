//! Key derivation and password hashing functions.
//!
//! Currently includes the three Argon2 variants (RFC 9106) together with
//! their PHC string encoding.

pub mod argon2;

pub use argon2::{
    Argon2, Argon2Error, DecodeError, ParamError, Params, PhcHash, Variant, Version, decode,
    derive, encode, encoded_len, extract_parameters, hash_encoded, verify, verify_raw,
    verify_variant,
};
