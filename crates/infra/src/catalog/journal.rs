use serde::Serialize;

use shopkit_core::{OrderId, ProductId};

/// One write the in-memory catalog accepted, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CatalogOp {
    SaveProduct {
        id: ProductId,
        attributes: usize,
        children: Vec<ProductId>,
    },
    SaveVariation {
        id: ProductId,
        parent: ProductId,
    },
    SaveOrder {
        id: OrderId,
    },
    EnableSync {
        ids: Vec<ProductId>,
    },
    DisableSync {
        ids: Vec<ProductId>,
    },
    SetVisibility {
        id: ProductId,
        visible: bool,
    },
}

impl CatalogOp {
    pub fn is_product_save(&self, product: ProductId) -> bool {
        matches!(self, CatalogOp::SaveProduct { id, .. } if *id == product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_op_tag() {
        let id = ProductId::new(4).unwrap();
        let json = serde_json::to_value(CatalogOp::DisableSync { ids: vec![id] }).unwrap();
        assert_eq!(json, serde_json::json!({ "op": "disable_sync", "ids": [4] }));
    }
}
