//! Fixture specs (what the caller asks for) and configs (specs resolved
//! against defaults).
//!
//! Every spec field is optional. Resolution is a pure `merge(defaults,
//! overrides)` done once per build call; nothing is merged globally.
//!
//! | field          | default                          |
//! |----------------|----------------------------------|
//! | `title`        | `"Product"`                      |
//! | `price`        | `1.00` (major units, number or string in JSON) |
//! | `description`  | `"This is a test product"`       |
//! | `type`         | `simple` (`variable` for variable products) |
//! | `sync_enabled` | `true`                           |
//! | `visible`      | `true`                           |
//! | `attributes`   | `{ size: [s] }`                  |
//! | `variations`   | `{ product_variation: { size: s } }` |

use serde::{Deserialize, Serialize};

use shopkit_catalog::{Price, ProductType};

use crate::ordered::OrderedMap;

/// Attribute name -> ordered option values.
pub type AttributeSpecs = OrderedMap<Vec<String>>;

/// Variation label -> (attribute name -> selected option).
pub type VariationSpecs = OrderedMap<OrderedMap<String>>;

/// Caller overrides for a product fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSpec {
    pub title: Option<String>,
    pub price: Option<Price>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    /// Ignored for variable products.
    pub sync_enabled: Option<bool>,
    /// Ignored for variable products.
    pub visible: Option<bool>,
}

/// A fully resolved product fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductConfig {
    pub title: String,
    pub price: Price,
    pub description: String,
    pub product_type: ProductType,
    pub sync_enabled: bool,
    pub visible: bool,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            title: "Product".to_string(),
            price: Price::from_minor(100),
            description: "This is a test product".to_string(),
            product_type: ProductType::Simple,
            sync_enabled: true,
            visible: true,
        }
    }
}

impl ProductConfig {
    /// Overrides win; unspecified fields fall back to `defaults`.
    pub fn merge(defaults: &ProductConfig, overrides: &ProductSpec) -> ProductConfig {
        ProductConfig {
            title: overrides.title.clone().unwrap_or_else(|| defaults.title.clone()),
            price: overrides.price.unwrap_or(defaults.price),
            description: overrides
                .description
                .clone()
                .unwrap_or_else(|| defaults.description.clone()),
            product_type: overrides.product_type.unwrap_or(defaults.product_type),
            sync_enabled: overrides.sync_enabled.unwrap_or(defaults.sync_enabled),
            visible: overrides.visible.unwrap_or(defaults.visible),
        }
    }
}

/// Caller overrides for a variable product fixture.
///
/// `attributes` and `variations` replace their defaults as a whole; they are
/// not merged key by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableProductSpec {
    #[serde(flatten)]
    pub product: ProductSpec,
    pub attributes: Option<AttributeSpecs>,
    pub variations: Option<VariationSpecs>,
}

/// A fully resolved variable product fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableProductConfig {
    pub product: ProductConfig,
    pub attributes: AttributeSpecs,
    pub variations: VariationSpecs,
}

impl Default for VariableProductConfig {
    fn default() -> Self {
        Self {
            product: ProductConfig {
                product_type: ProductType::Variable,
                ..ProductConfig::default()
            },
            attributes: OrderedMap::from([("size", vec!["s".to_string()])]),
            variations: OrderedMap::from([(
                "product_variation",
                OrderedMap::from([("size", "s".to_string())]),
            )]),
        }
    }
}

impl VariableProductConfig {
    pub fn merge(defaults: &VariableProductConfig, overrides: &VariableProductSpec) -> Self {
        Self {
            product: ProductConfig::merge(&defaults.product, &overrides.product),
            attributes: overrides
                .attributes
                .clone()
                .unwrap_or_else(|| defaults.attributes.clone()),
            variations: overrides
                .variations
                .clone()
                .unwrap_or_else(|| defaults.variations.clone()),
        }
    }
}
