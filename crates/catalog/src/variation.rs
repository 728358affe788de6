use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopkit_core::{DomainError, DomainResult, Entity, ProductId};

/// One purchasable combination of attribute selections under a variable
/// product.
///
/// The parent is referenced by id only; a variation never owns its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    id: Option<ProductId>,
    parent_id: ProductId,
    attributes: BTreeMap<String, String>,
}

impl Variation {
    /// New, not-yet-persisted variation selecting one option per attribute.
    pub fn new<I, K, V>(parent_id: ProductId, selections: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: None,
            parent_id,
            attributes: selections
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn parent_id(&self) -> ProductId {
        self.parent_id
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Selected option for the given attribute name.
    pub fn selection(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    /// Record the identity handed out by a store on first persist.
    pub fn assign_id(&mut self, id: ProductId) -> DomainResult<()> {
        if id == self.parent_id {
            return Err(DomainError::invariant(format!(
                "variation cannot share its parent's id {id}"
            )));
        }
        match self.id {
            Some(existing) if existing != id => Err(DomainError::conflict(format!(
                "variation already persisted as {existing}, cannot become {id}"
            ))),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }
}

impl Entity for Variation {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    #[test]
    fn holds_selections_and_parent_reference() {
        let variation = Variation::new(pid(10), [("color", "red"), ("size", "s")]);

        assert_eq!(variation.parent_id(), pid(10));
        assert_eq!(variation.selection("color"), Some("red"));
        assert_eq!(variation.selection("size"), Some("s"));
        assert_eq!(variation.selection("material"), None);
        assert!(!variation.is_persisted());
    }

    #[test]
    fn assign_id_rejects_parent_id_and_reassignment() {
        let mut variation = Variation::new(pid(10), [("size", "s")]);

        assert!(variation.assign_id(pid(10)).is_err());
        variation.assign_id(pid(11)).unwrap();
        variation.assign_id(pid(11)).unwrap();
        assert!(matches!(
            variation.assign_id(pid(12)),
            Err(DomainError::Conflict(_))
        ));
        assert_eq!(variation.id(), Some(pid(11)));
    }
}
