use tracing::{debug, info, instrument};

use shopkit_catalog::{CatalogStore, Order, Product, ProductType, SyncControl};
use shopkit_core::ProductId;

use crate::error::FixtureResult;
use crate::spec::{ProductConfig, ProductSpec};

/// Fixture builders bound to an explicit catalog handle.
///
/// `S` is usually `&InMemoryCatalog` or an `Arc` of a real store adapter.
#[derive(Debug, Clone)]
pub struct Fixtures<S> {
    pub(crate) store: S,
}

impl<S> Fixtures<S>
where
    S: CatalogStore + SyncControl,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create and persist a product from `spec` merged over the defaults.
    ///
    /// For simple products the sync and visibility flags are applied after the
    /// first save; variable products skip both.
    #[instrument(skip(self, spec))]
    pub fn product(&self, spec: &ProductSpec) -> FixtureResult<Product> {
        let config = ProductConfig::merge(&ProductConfig::default(), spec);
        self.product_from_config(&config)
    }

    pub(crate) fn product_from_config(&self, config: &ProductConfig) -> FixtureResult<Product> {
        let mut product = Product::new(config.product_type);
        product.set_name(config.title.as_str());
        product.set_price(config.price);
        product.set_description(config.description.as_str());

        let id = self.store.save_product(&mut product)?;
        debug!(product_id = %id, product_type = %config.product_type, "product persisted");

        if config.product_type != ProductType::Variable {
            self.apply_sync_flags(id, config)?;
        }

        info!(product_id = %id, title = %product.name(), "product fixture ready");
        Ok(product)
    }

    /// Create and persist an empty order.
    #[instrument(skip(self))]
    pub fn order(&self) -> FixtureResult<Order> {
        let mut order = Order::new();
        let id = self.store.save_order(&mut order)?;
        info!(order_id = %id, "order fixture ready");
        Ok(order)
    }

    fn apply_sync_flags(&self, id: ProductId, config: &ProductConfig) -> FixtureResult<()> {
        if config.sync_enabled {
            self.store.enable_sync(&[id])?;
        } else {
            self.store.disable_sync(&[id])?;
        }
        self.store.set_visibility(id, config.visible)?;
        debug!(product_id = %id, sync_enabled = config.sync_enabled, visible = config.visible, "sync flags applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopkit_catalog::Price;
    use shopkit_core::Entity;
    use shopkit_infra::{CatalogOp, InMemoryCatalog};

    #[test]
    fn default_product_is_simple_synced_and_visible() {
        let catalog = InMemoryCatalog::new();
        let fixtures = Fixtures::new(&catalog);

        let product = fixtures.product(&ProductSpec::default()).unwrap();
        let id = product.id().unwrap();

        assert_eq!(product.name(), "Product");
        assert_eq!(product.price(), Price::from_minor(100));
        assert_eq!(product.description(), "This is a test product");
        assert_eq!(product.product_type(), ProductType::Simple);
        assert_eq!(catalog.sync_enabled(id).unwrap(), Some(true));
        assert_eq!(catalog.is_visible(id).unwrap(), Some(true));
        assert_eq!(catalog.load_product(id).unwrap(), product);
    }

    #[test]
    fn disabled_sync_calls_disable_then_sets_visibility() {
        let catalog = InMemoryCatalog::new();
        let fixtures = Fixtures::new(&catalog);

        let spec = ProductSpec {
            sync_enabled: Some(false),
            visible: Some(false),
            ..ProductSpec::default()
        };
        let product = fixtures.product(&spec).unwrap();
        let id = product.id().unwrap();

        let journal = catalog.journal().unwrap();
        assert_eq!(journal.len(), 3);
        assert!(journal[0].is_product_save(id));
        assert_eq!(journal[1], CatalogOp::DisableSync { ids: vec![id] });
        assert_eq!(journal[2], CatalogOp::SetVisibility { id, visible: false });
        assert!(product.attributes().is_empty());
        assert_eq!(catalog.variation_count().unwrap(), 0);
    }

    #[test]
    fn variable_type_skips_sync_flags() {
        let catalog = InMemoryCatalog::new();
        let fixtures = Fixtures::new(&catalog);

        let spec = ProductSpec {
            product_type: Some(ProductType::Variable),
            sync_enabled: Some(false),
            ..ProductSpec::default()
        };
        let product = fixtures.product(&spec).unwrap();
        let id = product.id().unwrap();

        assert!(product.is_variable());
        assert_eq!(catalog.sync_enabled(id).unwrap(), None);
        assert_eq!(catalog.is_visible(id).unwrap(), None);
        assert_eq!(catalog.journal().unwrap().len(), 1);
    }

    #[test]
    fn order_fixture_is_persisted_empty() {
        let catalog = InMemoryCatalog::new();
        let fixtures = Fixtures::new(&catalog);

        let order = fixtures.order().unwrap();
        let id = order.id().unwrap();

        assert!(order.created_at().is_some());
        assert_eq!(catalog.load_order(id).unwrap(), order);
    }
}
