use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use shopkit_catalog::{
    CatalogStore, Order, Product, StoreError, StoreResult, SyncControl, Variation,
};
use shopkit_core::{Entity, OrderId, ProductId};

use super::journal::CatalogOp;

#[derive(Debug, Default)]
struct CatalogState {
    /// Last handed-out post id. Products, variations and orders share it.
    last_id: u64,
    products: BTreeMap<ProductId, Product>,
    variations: BTreeMap<ProductId, Variation>,
    orders: BTreeMap<OrderId, Order>,
    sync_enabled: HashMap<ProductId, bool>,
    visible: HashMap<ProductId, bool>,
    journal: Vec<CatalogOp>,
    /// Remaining variation saves before the store starts failing.
    variation_budget: Option<usize>,
}

impl CatalogState {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory catalog for tests/dev.
///
/// Keeps an operation journal so tests can assert on the order of saves.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Drop every row and flag. Ids keep counting up, like a real database.
    pub fn reset(&self) -> StoreResult<()> {
        let mut state = self.write()?;
        let last_id = state.last_id;
        *state = CatalogState {
            last_id,
            ..CatalogState::default()
        };
        Ok(())
    }

    /// Make every variation save after the first `allowed` fail with
    /// [`StoreError::Unavailable`].
    pub fn fail_variation_saves_after(&self, allowed: usize) -> StoreResult<()> {
        self.write()?.variation_budget = Some(allowed);
        Ok(())
    }

    pub fn journal(&self) -> StoreResult<Vec<CatalogOp>> {
        Ok(self.read()?.journal.clone())
    }

    pub fn sync_enabled(&self, id: ProductId) -> StoreResult<Option<bool>> {
        Ok(self.read()?.sync_enabled.get(&id).copied())
    }

    pub fn is_visible(&self, id: ProductId) -> StoreResult<Option<bool>> {
        Ok(self.read()?.visible.get(&id).copied())
    }

    pub fn product_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.products.len())
    }

    pub fn variation_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.variations.len())
    }

    /// Persisted variations whose parent is `parent`, in id order.
    pub fn variations_of(&self, parent: ProductId) -> StoreResult<Vec<Variation>> {
        Ok(self
            .read()?
            .variations
            .values()
            .filter(|v| v.parent_id() == parent)
            .cloned()
            .collect())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, CatalogState>> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, CatalogState>> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn ensure_product(state: &CatalogState, id: ProductId) -> StoreResult<()> {
        if state.products.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ProductNotFound(id))
        }
    }

    fn check_children(state: &CatalogState, product: &Product, id: ProductId) -> StoreResult<()> {
        let foreign: Vec<ProductId> = product
            .children()
            .iter()
            .copied()
            .filter(|child| {
                state
                    .variations
                    .get(child)
                    .is_none_or(|v| v.parent_id() != id)
            })
            .collect();

        if foreign.is_empty() {
            Ok(())
        } else {
            Err(StoreError::ForeignChildren {
                product: id,
                children: foreign,
            })
        }
    }
}

impl CatalogStore for InMemoryCatalog {
    fn save_product(&self, product: &mut Product) -> StoreResult<ProductId> {
        let mut state = self.write()?;

        let id = match product.id() {
            Some(id) => {
                Self::ensure_product(&state, id)?;
                id
            }
            None => ProductId::new(state.next_id())?,
        };
        Self::check_children(&state, product, id)?;

        product.assign_id(id)?;
        state.products.insert(id, product.clone());
        state.journal.push(CatalogOp::SaveProduct {
            id,
            attributes: product.attributes().len(),
            children: product.children().to_vec(),
        });

        debug!(product_id = %id, product_type = %product.product_type(), "saved product");
        Ok(id)
    }

    fn save_variation(&self, variation: &mut Variation) -> StoreResult<ProductId> {
        let mut state = self.write()?;

        if let Some(budget) = state.variation_budget.as_mut() {
            if *budget == 0 {
                return Err(StoreError::Unavailable(
                    "variation writes are disabled".to_string(),
                ));
            }
            *budget -= 1;
        }

        let parent = variation.parent_id();
        match state.products.get(&parent) {
            Some(p) if p.is_variable() => {}
            _ => return Err(StoreError::MissingParent(parent)),
        }

        let id = match variation.id() {
            Some(id) if state.variations.contains_key(&id) => id,
            Some(id) => return Err(StoreError::VariationNotFound(id)),
            None => ProductId::new(state.next_id())?,
        };

        variation.assign_id(id)?;
        state.variations.insert(id, variation.clone());
        state.journal.push(CatalogOp::SaveVariation { id, parent });

        debug!(variation_id = %id, parent_id = %parent, "saved variation");
        Ok(id)
    }

    fn save_order(&self, order: &mut Order) -> StoreResult<OrderId> {
        let mut state = self.write()?;

        let id = match order.id() {
            Some(id) if state.orders.contains_key(&id) => id,
            Some(id) => return Err(StoreError::OrderNotFound(id)),
            None => OrderId::new(state.next_id())?,
        };

        order.mark_persisted(id, Utc::now())?;
        state.orders.insert(id, order.clone());
        state.journal.push(CatalogOp::SaveOrder { id });

        debug!(order_id = %id, "saved order");
        Ok(id)
    }

    fn load_product(&self, id: ProductId) -> StoreResult<Product> {
        self.read()?
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::ProductNotFound(id))
    }

    fn load_variation(&self, id: ProductId) -> StoreResult<Variation> {
        self.read()?
            .variations
            .get(&id)
            .cloned()
            .ok_or(StoreError::VariationNotFound(id))
    }

    fn load_order(&self, id: OrderId) -> StoreResult<Order> {
        self.read()?
            .orders
            .get(&id)
            .cloned()
            .ok_or(StoreError::OrderNotFound(id))
    }
}

impl SyncControl for InMemoryCatalog {
    fn enable_sync(&self, products: &[ProductId]) -> StoreResult<()> {
        let mut state = self.write()?;
        for id in products {
            Self::ensure_product(&state, *id)?;
        }
        for id in products {
            state.sync_enabled.insert(*id, true);
        }
        state.journal.push(CatalogOp::EnableSync {
            ids: products.to_vec(),
        });
        Ok(())
    }

    fn disable_sync(&self, products: &[ProductId]) -> StoreResult<()> {
        let mut state = self.write()?;
        for id in products {
            Self::ensure_product(&state, *id)?;
        }
        for id in products {
            state.sync_enabled.insert(*id, false);
        }
        state.journal.push(CatalogOp::DisableSync {
            ids: products.to_vec(),
        });
        Ok(())
    }

    fn set_visibility(&self, product: ProductId, visible: bool) -> StoreResult<()> {
        let mut state = self.write()?;
        Self::ensure_product(&state, product)?;
        state.visible.insert(product, visible);
        state.journal.push(CatalogOp::SetVisibility {
            id: product,
            visible,
        });
        Ok(())
    }
}
