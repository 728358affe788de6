use core::fmt;

use shopkit_core::{OrderId, ProductId};

/// Admin screens tests navigate to, as paths relative to the admin root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRoute {
    Products,
    ProductEdit(ProductId),
    Orders,
    OrderEdit(OrderId),
    IntegrationSettings,
}

impl AdminRoute {
    pub fn path(&self) -> String {
        match self {
            AdminRoute::Products => "edit.php?post_type=product".to_string(),
            AdminRoute::ProductEdit(id) => format!("post.php?post={id}&action=edit"),
            AdminRoute::Orders => "edit.php?post_type=shop_order".to_string(),
            AdminRoute::OrderEdit(id) => format!("post.php?post={id}&action=edit"),
            AdminRoute::IntegrationSettings => {
                "admin.php?page=wc-settings&tab=integration&section=facebookcommerce".to_string()
            }
        }
    }
}

impl fmt::Display for AdminRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_admin_paths() {
        let product = ProductId::new(12).unwrap();
        let order = OrderId::new(30).unwrap();

        assert_eq!(AdminRoute::Products.path(), "edit.php?post_type=product");
        assert_eq!(AdminRoute::ProductEdit(product).path(), "post.php?post=12&action=edit");
        assert_eq!(AdminRoute::Orders.path(), "edit.php?post_type=shop_order");
        assert_eq!(AdminRoute::OrderEdit(order).to_string(), "post.php?post=30&action=edit");
        assert_eq!(
            AdminRoute::IntegrationSettings.path(),
            "admin.php?page=wc-settings&tab=integration&section=facebookcommerce"
        );
    }
}
