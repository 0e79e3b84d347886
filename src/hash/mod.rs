//! Hash algorithms exposed by the crate.
//!
//! Currently includes BLAKE2b and the Argon2 variable-length construction
//! built on top of it, both pure Rust.

pub mod blake2b;

/// Re-export of the BLAKE2b convenience functions and state.
pub use blake2b::{Blake2b, blake2b, blake2b_long};
