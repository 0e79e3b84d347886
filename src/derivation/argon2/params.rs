//! Parameter definitions and validation for Argon2.
//!
//! This module defines the variant and version identifiers together with
//! the cost parameters of Argon2, and validates them against the bounds of
//! RFC 9106 §3.1. A [`Params`] value can only be obtained through a
//! validating constructor, so every `Params` in circulation is usable.

use std::fmt;
use std::str::FromStr;

use super::encoding::parse_u32;
use super::error::{DecodeError, ParamError};

/// Number of slices (synchronization points) per lane and pass.
pub const SYNC_POINTS: u32 = 4;

/// Minimum number of passes.
pub const MIN_TIME_COST: u32 = 1;

/// Minimum degree of parallelism.
pub const MIN_LANES: u32 = 1;

/// Maximum degree of parallelism (2^24 - 1).
pub const MAX_LANES: u32 = 0x00FF_FFFF;

/// Minimum memory per lane, in KiB (two blocks per slice).
pub const MIN_MEMORY_PER_LANE: u32 = 2 * SYNC_POINTS;

/// Minimum tag length in bytes.
pub const MIN_HASH_LEN: u32 = 4;

/// Minimum salt length in bytes.
pub const MIN_SALT_LEN: u32 = 8;

/// Default tag length in bytes.
pub const DEFAULT_HASH_LEN: u32 = 32;

/// Default salt length in bytes.
pub const DEFAULT_SALT_LEN: u32 = 16;

/// Argon2 variant.
///
/// The discriminants are the type identifiers hashed into H0 and into the
/// address generator input, and must not change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Variant {
    /// Data-dependent addressing throughout.
    Argon2d = 0,
    /// Data-independent addressing throughout.
    Argon2i = 1,
    /// Data-independent for the first half of the first pass, then
    /// data-dependent.
    #[default]
    Argon2id = 2,
}

impl Variant {
    /// Numeric type identifier `y` of RFC 9106.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Algorithm identifier used in PHC strings (`argon2d`, `argon2i`,
    /// `argon2id`).
    pub const fn ident(self) -> &'static str {
        match self {
            Variant::Argon2d => "argon2d",
            Variant::Argon2i => "argon2i",
            Variant::Argon2id => "argon2id",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

impl FromStr for Variant {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2d" => Ok(Variant::Argon2d),
            "argon2i" => Ok(Variant::Argon2i),
            "argon2id" => Ok(Variant::Argon2id),
            other => Err(DecodeError::UnknownVariant(other.to_owned())),
        }
    }
}

impl TryFrom<u32> for Variant {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Variant::Argon2d),
            1 => Ok(Variant::Argon2i),
            2 => Ok(Variant::Argon2id),
            other => Err(other),
        }
    }
}

/// Argon2 algorithm version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum Version {
    /// Version 1.0. Later passes overwrite blocks instead of XOR-ing into
    /// them. Encoded hashes of this version omit the `v=` field.
    V0x10 = 0x10,
    /// Version 1.3, the RFC 9106 version.
    #[default]
    V0x13 = 0x13,
}

impl Version {
    /// Numeric version identifier `v` of RFC 9106.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Parses the decimal form written by `Display` and the PHC `v=` field.
impl FromStr for Version {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::try_from(parse_u32(s, "v")?)
    }
}

impl TryFrom<u32> for Version {
    type Error = DecodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x10 => Ok(Version::V0x10),
            0x13 => Ok(Version::V0x13),
            other => Err(DecodeError::UnsupportedVersion(other)),
        }
    }
}

/// Validated Argon2 parameters.
///
/// These parameters control the memory and time cost of the hash function,
/// allowing the security level to be tuned for the target hardware and
/// threat model. They are immutable once built; the `with_*` methods return
/// a new, revalidated value.
///
/// `memory_cost` is kept as given (it is hashed into H0). The working
/// memory actually allocated is `memory_cost` rounded down to a multiple of
/// `4 * parallelism` blocks, see [`Params::block_count`].
///
/// # Recommended Values
///
/// RFC 9106 §4 recommends, in order of preference:
/// - Argon2id, t=1, p=4, m=2 GiB ([`Params::rfc9106_high_memory`])
/// - Argon2id, t=3, p=4, m=64 MiB ([`Params::rfc9106_low_memory`])
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    variant: Variant,
    version: Version,
    time_cost: u32,
    memory_cost: u32,
    parallelism: u32,
    hash_len: u32,
    salt_len: u32,
}

impl Params {
    /// Builds parameters for `variant` with the given costs, version 0x13,
    /// a 32-byte tag and a 16-byte salt.
    ///
    /// # Arguments
    ///
    /// * `time_cost` - number of passes (at least 1)
    /// * `memory_cost` - memory size in KiB (at least `8 * parallelism`)
    /// * `parallelism` - number of lanes (`1..=2^24-1`)
    pub fn new(
        variant: Variant,
        time_cost: u32,
        memory_cost: u32,
        parallelism: u32,
    ) -> Result<Self, ParamError> {
        let params = Self {
            variant,
            version: Version::default(),
            time_cost,
            memory_cost,
            parallelism,
            hash_len: DEFAULT_HASH_LEN,
            salt_len: DEFAULT_SALT_LEN,
        };
        params.validate()?;
        Ok(params)
    }

    /// Returns a copy using `version`.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Returns a copy producing `hash_len`-byte tags.
    pub fn with_hash_len(mut self, hash_len: u32) -> Result<Self, ParamError> {
        self.hash_len = hash_len;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy declaring `salt_len`-byte salts.
    pub fn with_salt_len(mut self, salt_len: u32) -> Result<Self, ParamError> {
        self.salt_len = salt_len;
        self.validate()?;
        Ok(self)
    }

    /// First recommended option of RFC 9106 §4: Argon2id, t=1, m=2 GiB, p=4.
    pub fn rfc9106_high_memory() -> Self {
        Self {
            variant: Variant::Argon2id,
            version: Version::V0x13,
            time_cost: 1,
            memory_cost: 2 * 1024 * 1024,
            parallelism: 4,
            hash_len: DEFAULT_HASH_LEN,
            salt_len: DEFAULT_SALT_LEN,
        }
    }

    /// Second recommended option of RFC 9106 §4: Argon2id, t=3, m=64 MiB,
    /// p=4.
    pub fn rfc9106_low_memory() -> Self {
        Self {
            variant: Variant::Argon2id,
            version: Version::V0x13,
            time_cost: 3,
            memory_cost: 64 * 1024,
            parallelism: 4,
            hash_len: DEFAULT_HASH_LEN,
            salt_len: DEFAULT_SALT_LEN,
        }
    }

    /// Costs used by password hashers before RFC 9106 was published:
    /// Argon2id, t=2, m=100 MiB, p=8, 16-byte tag.
    pub fn legacy() -> Self {
        Self {
            variant: Variant::Argon2id,
            version: Version::V0x13,
            time_cost: 2,
            memory_cost: 100 * 1024,
            parallelism: 8,
            hash_len: 16,
            salt_len: DEFAULT_SALT_LEN,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn hash_len(&self) -> u32 {
        self.hash_len
    }

    pub fn salt_len(&self) -> u32 {
        self.salt_len
    }

    /// Number of 1024-byte blocks in the working memory: `memory_cost`
    /// rounded down to a multiple of `4 * parallelism`.
    pub fn block_count(&self) -> u32 {
        let unit = SYNC_POINTS * self.parallelism;
        (self.memory_cost / unit) * unit
    }

    /// Number of blocks per lane.
    pub fn lane_len(&self) -> u32 {
        self.block_count() / self.parallelism
    }

    /// Number of blocks per segment (one lane, one slice).
    pub fn segment_len(&self) -> u32 {
        self.lane_len() / SYNC_POINTS
    }

    pub(crate) fn validate(&self) -> Result<(), ParamError> {
        if self.time_cost < MIN_TIME_COST {
            return Err(ParamError::TimeCostTooSmall);
        }

        if self.parallelism < MIN_LANES {
            return Err(ParamError::TooFewLanes);
        }

        if self.parallelism > MAX_LANES {
            return Err(ParamError::TooManyLanes {
                max: MAX_LANES,
                got: self.parallelism,
            });
        }

        // Cannot overflow: parallelism <= 2^24 - 1.
        let min_memory = MIN_MEMORY_PER_LANE * self.parallelism;
        if self.memory_cost < min_memory {
            return Err(ParamError::MemoryTooSmall {
                min: min_memory,
                got: self.memory_cost,
            });
        }

        if self.hash_len < MIN_HASH_LEN {
            return Err(ParamError::HashTooShort {
                min: MIN_HASH_LEN,
                got: self.hash_len,
            });
        }

        if self.salt_len < MIN_SALT_LEN {
            return Err(ParamError::SaltTooShort {
                min: MIN_SALT_LEN,
                got: self.salt_len,
            });
        }

        Ok(())
    }
}

impl Default for Params {
    /// RFC 9106 low-memory recommendation.
    fn default() -> Self {
        Self::rfc9106_low_memory()
    }
}
