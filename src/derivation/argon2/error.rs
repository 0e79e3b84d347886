//! Error types for Argon2 derivation, encoding and verification.
//!
//! The taxonomy keeps four situations apart so callers can react to each:
//! bad cost/length parameters, resource exhaustion, a malformed encoded
//! hash, and a well-formed hash that simply does not match the password.

use thiserror::Error;

use super::params::Variant;

/// A cost or length parameter is outside the bounds of RFC 9106.
///
/// Detected before any memory is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Time cost (number of passes) must be at least 1.
    #[error("time cost must be at least 1")]
    TimeCostTooSmall,

    /// Parallelism must be at least 1.
    #[error("parallelism must be at least 1")]
    TooFewLanes,

    /// Parallelism must not exceed 2^24 - 1.
    #[error("parallelism must be at most {max} (got {got})")]
    TooManyLanes { max: u32, got: u32 },

    /// Memory cost must be at least 8 KiB per lane.
    #[error("memory cost must be at least {min} KiB (got {got})")]
    MemoryTooSmall { min: u32, got: u32 },

    /// Tag must be at least 4 bytes.
    #[error("hash length must be at least {min} bytes (got {got})")]
    HashTooShort { min: u32, got: u32 },

    /// Tag length does not fit the 32-bit length field.
    #[error("hash is too long")]
    HashTooLong,

    /// Salt must be at least 8 bytes.
    #[error("salt length must be at least {min} bytes (got {got})")]
    SaltTooShort { min: u32, got: u32 },

    /// Salt length does not fit the 32-bit length field.
    #[error("salt is too long")]
    SaltTooLong,
}

/// An encoded (PHC) hash string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The string does not start with `$argon2`.
    #[error("missing `$argon2` prefix")]
    MissingPrefix,

    /// The variant tag after `$argon2` is not `d`, `i` or `id`.
    #[error("unknown Argon2 variant `{0}`")]
    UnknownVariant(String),

    /// The `v=` field names a version other than 16 or 19.
    #[error("unsupported Argon2 version {0}")]
    UnsupportedVersion(u32),

    /// A required `$`- or `,`-delimited field is absent.
    #[error("missing `{0}` field")]
    MissingField(&'static str),

    /// A numeric field is not a non-negative 32-bit integer.
    #[error("invalid value for `{0}`")]
    InvalidNumber(&'static str),

    /// A base64 payload is malformed.
    #[error("invalid base64 in `{0}`")]
    InvalidBase64(&'static str),

    /// Unexpected data follows the hash field.
    #[error("unexpected trailing data")]
    TrailingData,

    /// The decoded values violate RFC 9106 bounds.
    #[error("encoded parameters are invalid: {0}")]
    InvalidParams(#[from] ParamError),

    /// The decoded variant differs from the one the caller expected.
    #[error("expected {expected} hash, found {found}")]
    VariantMismatch { expected: Variant, found: Variant },
}

/// Top-level error returned by derivation and verification.
#[derive(Debug, Error)]
pub enum Argon2Error {
    /// Parameters violate RFC 9106 bounds.
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ParamError),

    /// Password length does not fit in 32 bits.
    #[error("password is too long")]
    PasswordTooLong,

    /// Secret key length does not fit in 32 bits.
    #[error("secret is too long")]
    SecretTooLong,

    /// Associated data length does not fit in 32 bits.
    #[error("associated data is too long")]
    AssociatedDataTooLong,

    /// The working memory could not be allocated. Nothing was computed;
    /// retrying with a smaller memory cost may succeed.
    #[error("failed to allocate {blocks} memory blocks")]
    Allocation { blocks: u64 },

    /// A lane worker thread panicked during the fill.
    #[error("lane worker thread panicked")]
    LaneWorker,

    /// The encoded hash is structurally invalid.
    #[error("invalid encoded hash: {0}")]
    InvalidHash(#[from] DecodeError),

    /// The hash is well-formed but was not produced from this password.
    #[error("password does not match")]
    Mismatch,
}
