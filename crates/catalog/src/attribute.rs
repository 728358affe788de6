use serde::{Deserialize, Serialize};

use shopkit_core::ValueObject;

/// A product attribute: a name plus the ordered options it offers.
///
/// Attributes are owned by their variable product and only exist as part of
/// its attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    options: Vec<String>,
    visible: bool,
    variation: bool,
}

impl ValueObject for Attribute {}

impl Attribute {
    /// New attribute, hidden and not used for variations.
    pub fn new<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
            visible: false,
            variation: false,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Mark whether variations may select values of this attribute.
    pub fn with_variation(mut self, variation: bool) -> Self {
        self.variation = variation;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_variation(&self) -> bool {
        self.variation
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}
