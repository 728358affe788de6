//! Persistence boundary between fixture builders and the catalog under test.
//!
//! Implementations must be synchronous, assign an identity on first persist,
//! and accept repeated saves of the same entity as updates.

use std::sync::Arc;

use thiserror::Error;

use shopkit_core::{DomainError, OrderId, ProductId};

use crate::order::Order;
use crate::product::Product;
use crate::variation::Variation;

pub type StoreResult<T> = Result<T, StoreError>;

/// Catalog persistence error.
///
/// These are storage failures, as opposed to domain errors raised by the
/// entities themselves (which are wrapped in `Domain`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("variation {0} not found")]
    VariationNotFound(ProductId),

    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// A variation referenced a parent that is not a persisted variable product.
    #[error("variation parent {0} is not a persisted variable product")]
    MissingParent(ProductId),

    /// A child list referenced ids that are not variations of this product.
    #[error("product {product} lists foreign children: {children:?}")]
    ForeignChildren {
        product: ProductId,
        children: Vec<ProductId>,
    },

    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Create/update operations on catalog rows.
pub trait CatalogStore {
    /// Insert or update a product; assigns and returns its id.
    fn save_product(&self, product: &mut Product) -> StoreResult<ProductId>;

    /// Insert or update a variation; its parent must already be persisted.
    fn save_variation(&self, variation: &mut Variation) -> StoreResult<ProductId>;

    fn save_order(&self, order: &mut Order) -> StoreResult<OrderId>;

    fn load_product(&self, id: ProductId) -> StoreResult<Product>;

    fn load_variation(&self, id: ProductId) -> StoreResult<Variation>;

    fn load_order(&self, id: OrderId) -> StoreResult<Order>;
}

/// Sync and visibility switches the catalog exposes for simple products.
///
/// Enabling or disabling sync twice has the same effect as doing it once.
pub trait SyncControl {
    fn enable_sync(&self, products: &[ProductId]) -> StoreResult<()>;

    fn disable_sync(&self, products: &[ProductId]) -> StoreResult<()>;

    fn set_visibility(&self, product: ProductId, visible: bool) -> StoreResult<()>;
}

macro_rules! forward_store {
    ($($ptr:ty),*) => {$(
        impl<S> CatalogStore for $ptr
        where
            S: CatalogStore + ?Sized,
        {
            fn save_product(&self, product: &mut Product) -> StoreResult<ProductId> {
                (**self).save_product(product)
            }

            fn save_variation(&self, variation: &mut Variation) -> StoreResult<ProductId> {
                (**self).save_variation(variation)
            }

            fn save_order(&self, order: &mut Order) -> StoreResult<OrderId> {
                (**self).save_order(order)
            }

            fn load_product(&self, id: ProductId) -> StoreResult<Product> {
                (**self).load_product(id)
            }

            fn load_variation(&self, id: ProductId) -> StoreResult<Variation> {
                (**self).load_variation(id)
            }

            fn load_order(&self, id: OrderId) -> StoreResult<Order> {
                (**self).load_order(id)
            }
        }

        impl<S> SyncControl for $ptr
        where
            S: SyncControl + ?Sized,
        {
            fn enable_sync(&self, products: &[ProductId]) -> StoreResult<()> {
                (**self).enable_sync(products)
            }

            fn disable_sync(&self, products: &[ProductId]) -> StoreResult<()> {
                (**self).disable_sync(products)
            }

            fn set_visibility(&self, product: ProductId, visible: bool) -> StoreResult<()> {
                (**self).set_visibility(product, visible)
            }
        }
    )*};
}

forward_store!(&S, Arc<S>);
