use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ULID_LEN, ULID_TIME_LEN, ZERO_ID};
use crate::error::IdError;

const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const RANDOM_BITS: u32 = 80;
const TIMESTAMP_MAX: u64 = (1 << 48) - 1;

/// A lexicographically sortable identifier (ULID).
///
/// The first 10 characters encode the creation time in milliseconds since the
/// Unix epoch, so comparing two ids as strings compares their creation times.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ulid(String);

impl Ulid {
    /// Generate a fresh id stamped with the current time.
    pub fn new() -> Self {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        Self(encode(now & TIMESTAMP_MAX, rand::random::<u128>()))
    }

    /// Build an id from an explicit timestamp and randomness.
    /// Only the low 80 bits of `randomness` are used.
    pub fn from_parts(timestamp_ms: u64, randomness: u128) -> Result<Self, IdError> {
        if timestamp_ms > TIMESTAMP_MAX {
            return Err(IdError::Overflow);
        }
        Ok(Self(encode(timestamp_ms, randomness)))
    }

    /// Parse a textual id. Lowercase input is accepted and stored in
    /// canonical uppercase, so ordering and equality ignore case.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.len() != ULID_LEN {
            return Err(IdError::InvalidLength {
                expected: ULID_LEN,
                actual: s.len(),
            });
        }
        for c in s.chars() {
            decode_char(c)?;
        }
        // 26 * 5 = 130 bits; the leading character may only carry 3.
        if decode_char(s.chars().next().unwrap_or('0'))? > 7 {
            return Err(IdError::Overflow);
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// The all-zero id.
    pub fn zero() -> Self {
        Self(ZERO_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Milliseconds since the Unix epoch at which this id was minted.
    pub fn timestamp_ms(&self) -> u64 {
        self.0
            .chars()
            .take(ULID_TIME_LEN)
            .filter_map(|c| decode_char(c).ok())
            .fold(0u64, |acc, v| (acc << 5) | u64::from(v))
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp_ms() as i64).unwrap_or_default()
    }
}

impl Default for Ulid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ulid {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ulid {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ulid> for String {
    fn from(id: Ulid) -> Self {
        id.0
    }
}

impl AsRef<str> for Ulid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn encode(timestamp_ms: u64, randomness: u128) -> String {
    let random = randomness & ((1u128 << RANDOM_BITS) - 1);
    let value = (u128::from(timestamp_ms) << RANDOM_BITS) | random;
    (0..ULID_LEN)
        .map(|i| {
            let shift = 5 * (ULID_LEN - 1 - i);
            CROCKFORD[((value >> shift) & 0x1f) as usize] as char
        })
        .collect()
}

fn decode_char(c: char) -> Result<u8, IdError> {
    if !c.is_ascii() {
        return Err(IdError::InvalidCharacter(c));
    }
    let upper = c.to_ascii_uppercase() as u8;
    CROCKFORD
        .iter()
        .position(|&b| b == upper)
        .map(|p| p as u8)
        .ok_or(IdError::InvalidCharacter(c))
}

/// Anything that can stand in for an entity id in an edit payload.
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for Ulid {
    fn id(&self) -> &str {
        self.as_str()
    }
}

impl HasId for str {
    fn id(&self) -> &str {
        self
    }
}

impl HasId for String {
    fn id(&self) -> &str {
        self
    }
}

impl<T: HasId + ?Sized> HasId for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_timestamp() {
        // 01ARZ3NDEK == 1469922850259 ms
        let id = Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        assert_eq!(id.timestamp_ms(), 1_469_922_850_259);
        assert_eq!(id.created_at().timestamp_millis(), 1_469_922_850_259);
    }

    #[test]
    fn test_from_parts_roundtrip() {
        let id = Ulid::from_parts(1_700_000_000_000, 42).unwrap();
        assert_eq!(id.as_str().len(), ULID_LEN);
        assert_eq!(id.timestamp_ms(), 1_700_000_000_000);
        assert_eq!(Ulid::parse(id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_ordering_follows_creation_time() {
        let a = Ulid::from_parts(1_000, u128::MAX).unwrap();
        let b = Ulid::from_parts(1_001, 0).unwrap();
        assert!(a < b);
        assert!(a.as_str() < b.as_str());
        assert!(a.created_at() < b.created_at());
    }

    #[test]
    fn test_lowercase_is_canonicalised() {
        let early = Ulid::parse("01arz3ndektsv4rrffq69g5fav").unwrap();
        let late = Ulid::parse("01BX5ZZKBKACTAV9WEVGEMMVRZ").unwrap();
        assert!(early.timestamp_ms() < late.timestamp_ms());
        assert!(early < late);
        assert_eq!(early.as_str(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
        assert_eq!(early, Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap());

        let id: Ulid = serde_json::from_str("\"01arz3ndektsv4rrffq69g5fav\"").unwrap();
        assert_eq!(id, early);
    }

    #[test]
    fn test_zero_id() {
        let zero = Ulid::zero();
        assert_eq!(zero.timestamp_ms(), 0);
        assert_eq!(zero.created_at().timestamp(), 0);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            Ulid::parse("01ARZ3"),
            Err(IdError::InvalidLength { .. })
        ));
        assert_eq!(
            Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAU"),
            Err(IdError::InvalidCharacter('U'))
        );
        assert_eq!(
            Ulid::parse("81ARZ3NDEKTSV4RRFFQ69G5FAV"),
            Err(IdError::Overflow)
        );
        assert_eq!(Ulid::from_parts(1 << 48, 0), Err(IdError::Overflow));
    }

    #[test]
    fn test_serde_validates() {
        let id: Ulid = serde_json::from_str("\"01ARZ3NDEKTSV4RRFFQ69G5FAV\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"01ARZ3NDEKTSV4RRFFQ69G5FAV\"");
        assert!(serde_json::from_str::<Ulid>("\"nope\"").is_err());
    }

    #[test]
    fn test_has_id() {
        fn resolve(id: impl HasId) -> String {
            id.id().to_string()
        }
        let id = Ulid::zero();
        assert_eq!(resolve(&id), ZERO_ID);
        assert_eq!(resolve("abc"), "abc");
        assert_eq!(resolve(String::from("xyz")), "xyz");
    }
}
