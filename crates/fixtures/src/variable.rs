//! Variable product fixtures: a parent product, its attribute set, and one
//! persisted variation per labelled entry of the spec.
//!
//! Save order matters. The parent's child list is written only once every
//! variation has been saved and has an id, and it lists exactly those ids.
//! A child list written early (or from a subset) leaves the admin screen
//! rendering a partial variation matrix.

use tracing::{debug, info, instrument, warn};

use shopkit_catalog::{
    Attribute, CatalogStore, ProductType, SyncControl, VariableProduct, Variation,
};
use shopkit_core::{DomainError, Entity, ProductId};

use crate::error::FixtureResult;
use crate::ordered::OrderedMap;
use crate::product::Fixtures;
use crate::spec::{AttributeSpecs, VariableProductConfig, VariableProductSpec, VariationSpecs};

/// Persisted variations keyed by the caller's labels, in spec order.
pub type LabeledVariations = OrderedMap<Variation>;

/// A built variable product and its variations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableProductFixture {
    pub product: VariableProduct,
    pub variations: LabeledVariations,
}

impl VariableProductFixture {
    pub fn product_id(&self) -> Option<ProductId> {
        self.product.id()
    }

    /// Persisted variation for `label`.
    pub fn variation(&self, label: &str) -> Option<&Variation> {
        self.variations.get(label)
    }
}

impl<S> Fixtures<S>
where
    S: CatalogStore + SyncControl,
{
    /// Create a variable product with its attributes and variations.
    ///
    /// Any failed write aborts the build; the error is returned and no
    /// fixture is handed back.
    #[instrument(skip(self, spec))]
    pub fn variable_product(&self, spec: &VariableProductSpec) -> FixtureResult<VariableProductFixture> {
        let mut config = VariableProductConfig::merge(&VariableProductConfig::default(), spec);
        if config.product.product_type != ProductType::Variable {
            warn!(requested = %config.product.product_type, "variable product fixture forces type=variable");
            config.product.product_type = ProductType::Variable;
        }
        validate_matrix(&config.attributes, &config.variations)?;

        let mut product = self.product_from_config(&config.product)?;
        let parent_id = product
            .id()
            .ok_or_else(|| DomainError::invariant("store returned a product without an id"))?;

        let attributes: Vec<Attribute> = config
            .attributes
            .iter()
            .map(|(name, options)| {
                Attribute::new(name, options.iter().map(String::as_str))
                    .with_visible(true)
                    .with_variation(true)
            })
            .collect();
        product.set_attributes(attributes)?;
        self.store.save_product(&mut product)?;
        debug!(product_id = %parent_id, attributes = config.attributes.len(), "attributes persisted");

        let mut variations = LabeledVariations::new();
        let mut child_ids = Vec::with_capacity(config.variations.len());
        for (label, selections) in config.variations.iter() {
            let mut variation = Variation::new(parent_id, selections.iter());
            let id = self.store.save_variation(&mut variation)?;
            debug!(variation_id = %id, label, "variation persisted");

            child_ids.push(id);
            variations.insert(label, variation);
        }

        // Only now does every variation have an id.
        product.set_children(child_ids)?;
        self.store.save_product(&mut product)?;

        info!(
            product_id = %parent_id,
            variations = variations.len(),
            "variable product fixture ready"
        );

        Ok(VariableProductFixture {
            product: VariableProduct::try_from(product)?,
            variations,
        })
    }
}

/// Every selection must name a declared attribute and one of its options.
/// An empty option means "any value" and is always accepted.
fn validate_matrix(attributes: &AttributeSpecs, variations: &VariationSpecs) -> FixtureResult<()> {
    for (label, selections) in variations.iter() {
        for (attribute, option) in selections.iter() {
            let options = attributes.get(attribute).ok_or_else(|| {
                DomainError::validation(format!(
                    "variation {label:?} selects undeclared attribute {attribute:?}"
                ))
            })?;
            if !option.is_empty() && !options.iter().any(|o| o == option) {
                return Err(DomainError::validation(format!(
                    "variation {label:?} selects unknown option {option:?} for {attribute:?}"
                ))
                .into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::FixtureError;
    use crate::spec::ProductSpec;
    use shopkit_catalog::StoreError;
    use shopkit_infra::{CatalogOp, InMemoryCatalog};

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn select(pairs: &[(&str, &str)]) -> OrderedMap<String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn color_spec() -> VariableProductSpec {
        VariableProductSpec {
            attributes: Some(OrderedMap::from([("color", options(&["red", "blue"]))])),
            variations: Some(OrderedMap::from([
                ("r", select(&[("color", "red")])),
                ("b", select(&[("color", "blue")])),
            ])),
            ..VariableProductSpec::default()
        }
    }

    #[test]
    fn builds_two_color_variations() {
        let catalog = InMemoryCatalog::new();
        let built = Fixtures::new(&catalog).variable_product(&color_spec()).unwrap();
        let parent = built.product_id().unwrap();

        assert_eq!(catalog.variation_count().unwrap(), 2);
        assert_eq!(built.product.children().len(), 2);
        assert_eq!(built.variations.keys().collect::<Vec<_>>(), ["r", "b"]);
        assert_eq!(built.variation("r").unwrap().selection("color"), Some("red"));
        assert_eq!(built.variation("b").unwrap().selection("color"), Some("blue"));

        for variation in built.variations.values() {
            assert_eq!(variation.parent_id(), parent);
            assert!(variation.is_persisted());
        }

        let stored = catalog.load_product(parent).unwrap();
        assert_eq!(stored.children(), built.product.children());
    }

    #[test]
    fn default_spec_builds_single_size_variation() {
        let catalog = InMemoryCatalog::new();
        let built = Fixtures::new(&catalog)
            .variable_product(&VariableProductSpec::default())
            .unwrap();

        let attrs = built.product.attributes();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name(), "size");
        assert_eq!(attrs[0].options(), ["s".to_string()]);
        assert!(attrs[0].is_visible() && attrs[0].is_variation());

        assert_eq!(built.variations.len(), 1);
        let variation = built.variation("product_variation").unwrap();
        assert_eq!(variation.selection("size"), Some("s"));
        assert_eq!(built.product.children(), [variation.id().unwrap()]);
        assert_eq!(built.product.product().name(), "Product");
    }

    #[test]
    fn attribute_order_follows_spec_order() {
        let spec = VariableProductSpec {
            attributes: Some(OrderedMap::from([
                ("size", options(&["s", "m"])),
                ("color", options(&["red"])),
                ("fabric", options(&["wool"])),
            ])),
            variations: Some(OrderedMap::from([(
                "v",
                select(&[("size", "m"), ("color", "red"), ("fabric", "wool")]),
            )])),
            ..VariableProductSpec::default()
        };

        let catalog = InMemoryCatalog::new();
        let built = Fixtures::new(&catalog).variable_product(&spec).unwrap();
        let stored = catalog.load_product(built.product_id().unwrap()).unwrap();

        let names: Vec<_> = stored.attributes().iter().map(Attribute::name).collect();
        assert_eq!(names, ["size", "color", "fabric"]);
    }

    #[test]
    fn child_list_is_written_after_every_variation() {
        let catalog = InMemoryCatalog::new();
        let built = Fixtures::new(&catalog).variable_product(&color_spec()).unwrap();
        let parent = built.product_id().unwrap();

        let journal = catalog.journal().unwrap();
        let last_variation = journal
            .iter()
            .rposition(|op| matches!(op, CatalogOp::SaveVariation { .. }))
            .unwrap();
        let children_write = journal
            .iter()
            .position(|op| matches!(op, CatalogOp::SaveProduct { children, .. } if !children.is_empty()))
            .unwrap();

        assert!(children_write > last_variation);
        assert_eq!(
            journal[children_write],
            CatalogOp::SaveProduct {
                id: parent,
                attributes: 1,
                children: built.product.children().to_vec(),
            }
        );
        // base save, attribute save, two variations, children save
        assert_eq!(journal.len(), 5);
    }

    #[test]
    fn failed_variation_save_aborts_without_linking_children() {
        let catalog = InMemoryCatalog::new();
        catalog.fail_variation_saves_after(1).unwrap();

        let err = Fixtures::new(&catalog)
            .variable_product(&color_spec())
            .unwrap_err();
        assert!(matches!(err, FixtureError::Store(StoreError::Unavailable(_))));

        let journal = catalog.journal().unwrap();
        assert!(journal.iter().all(|op| match op {
            CatalogOp::SaveProduct { children, .. } => children.is_empty(),
            _ => true,
        }));
    }

    #[test]
    fn type_override_is_forced_back_to_variable() {
        let spec = VariableProductSpec {
            product: ProductSpec {
                product_type: Some(ProductType::Simple),
                ..ProductSpec::default()
            },
            ..VariableProductSpec::default()
        };

        let catalog = InMemoryCatalog::new();
        let built = Fixtures::new(&catalog).variable_product(&spec).unwrap();

        assert!(built.product.product().is_variable());
        assert_eq!(catalog.sync_enabled(built.product_id().unwrap()).unwrap(), None);
    }

    #[test]
    fn undeclared_attribute_is_rejected_before_any_write() {
        let spec = VariableProductSpec {
            variations: Some(OrderedMap::from([("x", select(&[("color", "red")]))])),
            ..VariableProductSpec::default()
        };

        let catalog = InMemoryCatalog::new();
        let err = Fixtures::new(&catalog).variable_product(&spec).unwrap_err();

        assert!(matches!(err, FixtureError::Domain(DomainError::Validation(_))));
        assert!(catalog.journal().unwrap().is_empty());
    }

    #[test]
    fn unknown_option_is_rejected_but_any_is_allowed() {
        let catalog = InMemoryCatalog::new();
        let fixtures = Fixtures::new(&catalog);

        let bad = VariableProductSpec {
            variations: Some(OrderedMap::from([("x", select(&[("size", "xl")]))])),
            ..VariableProductSpec::default()
        };
        assert!(fixtures.variable_product(&bad).is_err());

        let any = VariableProductSpec {
            variations: Some(OrderedMap::from([("any", select(&[("size", "")]))])),
            ..VariableProductSpec::default()
        };
        let built = fixtures.variable_product(&any).unwrap();
        assert_eq!(built.variation("any").unwrap().selection("size"), Some(""));
    }

    #[test]
    fn no_variations_leaves_empty_child_list() {
        let spec = VariableProductSpec {
            variations: Some(OrderedMap::new()),
            ..VariableProductSpec::default()
        };

        let catalog = InMemoryCatalog::new();
        let built = Fixtures::new(&catalog).variable_product(&spec).unwrap();

        assert!(built.variations.is_empty());
        assert!(built.product.children().is_empty());
        assert_eq!(built.product.attributes().len(), 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn matrix() -> impl Strategy<Value = (Vec<String>, Vec<(String, usize)>)> {
            let options = proptest::collection::hash_set("[a-z]{1,6}", 1..6)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>());
            options.prop_flat_map(|options| {
                let n = options.len();
                let variations =
                    proptest::collection::vec(("[a-z_]{1,10}", 0..n), 0..12);
                (Just(options), variations)
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: the child list equals the built variation ids, one
            /// variation per distinct label, each pointing at the parent.
            #[test]
            fn children_match_built_variations((opts, picks) in matrix()) {
                let variations: VariationSpecs = picks
                    .iter()
                    .map(|(label, i)| (label.clone(), select(&[("size", opts[*i].as_str())])))
                    .collect();
                let spec = VariableProductSpec {
                    product: ProductSpec::default(),
                    attributes: Some(OrderedMap::from([("size", opts.clone())])),
                    variations: Some(variations.clone()),
                };

                let catalog = InMemoryCatalog::new();
                let built = Fixtures::new(&catalog).variable_product(&spec).unwrap();
                let parent = built.product_id().unwrap();

                let children: HashSet<ProductId> = built.product.children().iter().copied().collect();
                let ids: HashSet<ProductId> = built
                    .variations
                    .values()
                    .map(|v| v.id().unwrap())
                    .collect();

                prop_assert_eq!(built.product.children().len(), children.len());
                prop_assert_eq!(&children, &ids);
                prop_assert_eq!(built.variations.len(), variations.len());
                prop_assert_eq!(
                    built.variations.keys().collect::<Vec<_>>(),
                    variations.keys().collect::<Vec<_>>()
                );
                for v in built.variations.values() {
                    prop_assert_eq!(v.parent_id(), parent);
                }
                prop_assert_eq!(catalog.variations_of(parent).unwrap().len(), ids.len());
            }
        }
    }
}
