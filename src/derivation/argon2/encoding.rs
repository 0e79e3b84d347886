//! PHC string encoding for Argon2 hashes.
//!
//! The format is
//!
//! ```text
//! $argon2<d|i|id>[$v=<version>]$m=<m>,t=<t>,p=<p>$<salt>$<hash>
//! ```
//!
//! with salt and hash in standard base64 without padding. The `v=` field is
//! written for version 0x13 and omitted for version 0x10; when decoding, a
//! missing `v=` means version 0x10.
//!
//! Salt and tag lengths are not stored: they are the decoded byte counts of
//! the two base64 payloads.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;

use super::error::{DecodeError, ParamError};
use super::params::{Params, Variant, Version};

const PREFIX: &str = "$argon2";

/// A decoded PHC hash: parameters, salt and tag.
///
/// `params.salt_len()` and `params.hash_len()` always equal `salt.len()` and
/// `hash.len()` for values produced by [`decode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhcHash {
    pub params: Params,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl fmt::Display for PhcHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_phc(f, &self.params, &self.salt, &self.hash)
    }
}

impl FromStr for PhcHash {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

fn write_phc(f: &mut impl fmt::Write, params: &Params, salt: &[u8], hash: &[u8]) -> fmt::Result {
    f.write_str("$")?;
    f.write_str(params.variant().ident())?;

    if params.version() != Version::V0x10 {
        write!(f, "$v={}", params.version())?;
    }

    write!(
        f,
        "$m={},t={},p={}${}${}",
        params.memory_cost(),
        params.time_cost(),
        params.parallelism(),
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash),
    )
}

/// Encodes parameters, salt and tag as a PHC string.
///
/// The salt and hash lengths written are those of `salt` and `hash`; for
/// a lossless round trip they should match `params.salt_len()` and
/// `params.hash_len()`.
pub fn encode(params: &Params, salt: &[u8], hash: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len_for(params, salt.len(), hash.len()));
    // Writing into a String cannot fail.
    let _ = write_phc(&mut out, params, salt, hash);
    out
}

/// Exact length of the PHC string for `params`, using `params.salt_len()`
/// and `params.hash_len()` as the payload sizes.
pub fn encoded_len(params: &Params) -> usize {
    encoded_len_for(
        params,
        params.salt_len() as usize,
        params.hash_len() as usize,
    )
}

fn encoded_len_for(params: &Params, salt_len: usize, hash_len: usize) -> usize {
    let version = match params.version() {
        Version::V0x10 => 0,
        v => "$v=".len() + decimal_len(v.as_u32()),
    };

    "$".len()
        + params.variant().ident().len()
        + version
        + "$m=".len()
        + decimal_len(params.memory_cost())
        + ",t=".len()
        + decimal_len(params.time_cost())
        + ",p=".len()
        + decimal_len(params.parallelism())
        + "$".len()
        + base64_len(salt_len)
        + "$".len()
        + base64_len(hash_len)
}

fn decimal_len(mut n: u32) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

/// Unpadded base64 length of `n` bytes.
fn base64_len(n: usize) -> usize {
    n / 3 * 4
        + match n % 3 {
            0 => 0,
            1 => 2,
            _ => 3,
        }
}

/// Parses a PHC string.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the prefix or variant is wrong, a field is
/// missing or malformed, the version is unsupported, data follows the hash,
/// or the decoded values are outside RFC 9106 bounds.
pub fn decode(text: &str) -> Result<PhcHash, DecodeError> {
    let rest = text.strip_prefix(PREFIX).ok_or(DecodeError::MissingPrefix)?;
    let mut fields = rest.split('$');

    let variant = match fields.next().unwrap_or_default() {
        "d" => Variant::Argon2d,
        "i" => Variant::Argon2i,
        "id" => Variant::Argon2id,
        other => return Err(DecodeError::UnknownVariant(other.to_owned())),
    };

    let mut costs = fields.next().ok_or(DecodeError::MissingField("m"))?;
    let version = match costs.strip_prefix("v=") {
        Some(v) => {
            let version = v.parse::<Version>()?;
            costs = fields.next().ok_or(DecodeError::MissingField("m"))?;
            version
        }
        None => Version::V0x10,
    };

    let mut costs = costs.split(',');
    let memory_cost = parse_field(costs.next(), "m")?;
    let time_cost = parse_field(costs.next(), "t")?;
    let parallelism = parse_field(costs.next(), "p")?;
    if costs.next().is_some() {
        return Err(DecodeError::TrailingData);
    }

    let salt = decode_b64(fields.next(), "salt")?;
    let hash = decode_b64(fields.next(), "hash")?;
    if fields.next().is_some() {
        return Err(DecodeError::TrailingData);
    }

    let salt_len = u32::try_from(salt.len()).map_err(|_| ParamError::SaltTooLong)?;
    let hash_len = u32::try_from(hash.len()).map_err(|_| ParamError::HashTooLong)?;

    let params = Params::new(variant, time_cost, memory_cost, parallelism)?
        .with_version(version)
        .with_hash_len(hash_len)?
        .with_salt_len(salt_len)?;

    Ok(PhcHash { params, salt, hash })
}

/// Parses only the parameters of a PHC string.
///
/// The salt and hash must still be well-formed, since their lengths are
/// part of the parameters.
pub fn extract_parameters(text: &str) -> Result<Params, DecodeError> {
    decode(text).map(|phc| phc.params)
}

/// Parses `key=value` where value is a decimal `u32`.
fn parse_field(field: Option<&str>, key: &'static str) -> Result<u32, DecodeError> {
    let value = field
        .and_then(|f| f.strip_prefix(key))
        .and_then(|f| f.strip_prefix('='))
        .ok_or(DecodeError::MissingField(key))?;
    parse_u32(value, key)
}

/// Digits only: no sign, no whitespace, no empty value.
pub(super) fn parse_u32(value: &str, key: &'static str) -> Result<u32, DecodeError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidNumber(key));
    }
    value.parse().map_err(|_| DecodeError::InvalidNumber(key))
}

fn decode_b64(field: Option<&str>, name: &'static str) -> Result<Vec<u8>, DecodeError> {
    let field = field.ok_or(DecodeError::MissingField(name))?;
    STANDARD_NO_PAD
        .decode(field)
        .map_err(|_| DecodeError::InvalidBase64(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_and_base64_lengths() {
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(u32::MAX), 10);

        assert_eq!(base64_len(0), 0);
        assert_eq!(base64_len(1), 2);
        assert_eq!(base64_len(2), 3);
        assert_eq!(base64_len(3), 4);
        assert_eq!(base64_len(16), 22);
        assert_eq!(base64_len(32), 43);
    }

    #[test]
    fn numbers_reject_signs_and_spaces() {
        assert!(parse_u32("+1", "m").is_err());
        assert!(parse_u32(" 1", "m").is_err());
        assert!(parse_u32("", "m").is_err());
        assert!(parse_u32("4294967296", "m").is_err());
        assert_eq!(parse_u32("007", "m"), Ok(7));
    }
}
