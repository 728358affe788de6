use core::fmt;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use shopkit_core::{DomainError, ValueObject};

/// Product price in the smallest currency unit (e.g. cents).
///
/// Serialized as a decimal string in major units (`"19.99"`); deserializes
/// from that or from a JSON number in major units (`2`, `19.99`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl ValueObject for Price {}

impl Price {
    pub const fn from_minor(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub const fn minor_units(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Parses decimal prices such as `"1"`, `"1.5"` or `"19.99"`.
///
/// More than two fractional digits is rejected rather than rounded.
impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || DomainError::validation(format!("invalid price: {s:?}"));

        let (major, fraction) = match s.split_once('.') {
            Some((major, fraction)) => (major, fraction),
            None => (s, ""),
        };
        if major.is_empty() || fraction.len() > 2 {
            return Err(invalid());
        }
        if !major.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: u64 = major.parse().map_err(|_| invalid())?;
        let minor: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        major
            .checked_mul(100)
            .and_then(|m| m.checked_add(minor))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative price in major units, as a number or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        v.checked_mul(100)
            .map(Price)
            .ok_or_else(|| E::custom(format!("price out of range: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        let v = u64::try_from(v).map_err(|_| E::custom(format!("negative price: {v}")))?;
        self.visit_u64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        // Shortest round-trip formatting keeps `19.99` as written.
        self.visit_str(&v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}
