use core::str::FromStr;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use shopkit_core::{DomainError, DomainResult, Entity, ProductId};

use crate::attribute::Attribute;
use crate::price::Price;

/// Product type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
    Variable,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Simple => "simple",
            ProductType::Variable => "variable",
        }
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(ProductType::Simple),
            "variable" => Ok(ProductType::Variable),
            other => Err(DomainError::validation(format!("unknown product type: {other}"))),
        }
    }
}

/// A catalog product.
///
/// Attributes and children are only meaningful for variable products; the
/// setters refuse them on simple products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: Option<ProductId>,
    product_type: ProductType,
    name: String,
    price: Price,
    description: String,
    attributes: Vec<Attribute>,
    children: Vec<ProductId>,
}

impl Product {
    /// New, not-yet-persisted product of the given type.
    pub fn new(product_type: ProductType) -> Self {
        Self {
            id: None,
            product_type,
            name: String::new(),
            price: Price::default(),
            description: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn is_variable(&self) -> bool {
        self.product_type == ProductType::Variable
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[ProductId] {
        &self.children
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_price(&mut self, price: Price) {
        self.price = price;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replace the whole attribute list.
    pub fn set_attributes(&mut self, attributes: Vec<Attribute>) -> DomainResult<()> {
        self.ensure_variable("attributes")?;

        let mut seen = HashSet::new();
        for attr in &attributes {
            if !seen.insert(attr.name()) {
                return Err(DomainError::validation(format!(
                    "duplicate attribute name: {}",
                    attr.name()
                )));
            }
        }

        self.attributes = attributes;
        Ok(())
    }

    /// Replace the child variation id list.
    pub fn set_children(&mut self, children: Vec<ProductId>) -> DomainResult<()> {
        self.ensure_variable("children")?;

        let mut seen = HashSet::new();
        if let Some(dup) = children.iter().find(|id| !seen.insert(**id)) {
            return Err(DomainError::invariant(format!("duplicate child id: {dup}")));
        }
        if let Some(own) = self.id.filter(|own| children.contains(own)) {
            return Err(DomainError::invariant(format!("product {own} cannot be its own child")));
        }

        self.children = children;
        Ok(())
    }

    /// Record the identity handed out by a store on first persist.
    ///
    /// Re-assigning the same id is a no-op; a different id is a conflict.
    pub fn assign_id(&mut self, id: ProductId) -> DomainResult<()> {
        match self.id {
            Some(existing) if existing != id => Err(DomainError::conflict(format!(
                "product already persisted as {existing}, cannot become {id}"
            ))),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    fn ensure_variable(&self, what: &str) -> DomainResult<()> {
        if self.is_variable() {
            Ok(())
        } else {
            Err(DomainError::invariant(format!(
                "{} products cannot have {what}",
                self.product_type
            )))
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.id
    }
}

/// A product known to be of type `variable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Product", into = "Product")]
pub struct VariableProduct(Product);

impl VariableProduct {
    pub fn product(&self) -> &Product {
        &self.0
    }

    pub fn product_mut(&mut self) -> &mut Product {
        &mut self.0
    }

    pub fn into_product(self) -> Product {
        self.0
    }

    pub fn attributes(&self) -> &[Attribute] {
        self.0.attributes()
    }

    pub fn children(&self) -> &[ProductId] {
        self.0.children()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.0.attributes().iter().find(|a| a.name() == name)
    }
}

impl Entity for VariableProduct {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.0.id
    }
}

impl TryFrom<Product> for VariableProduct {
    type Error = DomainError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        product.ensure_variable("a variable product view")?;
        Ok(Self(product))
    }
}

impl From<VariableProduct> for Product {
    fn from(value: VariableProduct) -> Self {
        value.0
    }
}
