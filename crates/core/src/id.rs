//! Strongly-typed identifiers used across the catalog.
//!
//! The admin catalog keys every row by a positive integer post id. Products
//! and variations share one id space, orders use their own.

use core::num::NonZeroU64;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a product or product variation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(NonZeroU64);

/// Identifier of an order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(NonZeroU64);

macro_rules! impl_post_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw post id. Zero is never a persisted identity.
            pub fn new(raw: u64) -> Result<Self, DomainError> {
                NonZeroU64::new(raw)
                    .map(Self)
                    .ok_or_else(|| DomainError::invalid_id(format!("{}: must be non-zero", $name)))
            }

            pub fn get(&self) -> u64 {
                self.0.get()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<NonZeroU64> for $t {
            fn from(value: NonZeroU64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0.get()
            }
        }

        impl TryFrom<u64> for $t {
            type Error = DomainError;

            fn try_from(value: u64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(raw)
            }
        }
    };
}

impl_post_id!(ProductId, "ProductId");
impl_post_id!(OrderId, "OrderId");
