//! Purchase graph domain models.

use serde::{Deserialize, Serialize};

use crate::error::{require_non_empty, ShopResult};

/// A validated (customer, order, product) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Purchase {
    pub customer: String,
    pub order: String,
    pub product: String,
}

impl Purchase {
    /// Build a purchase, rejecting empty identifiers.
    pub fn new(customer: &str, order: &str, product: &str) -> ShopResult<Self> {
        require_non_empty("customer", customer)?;
        require_non_empty("order", order)?;
        require_non_empty("product", product)?;

        Ok(Self {
            customer: customer.to_string(),
            order: order.to_string(),
            product: product.to_string(),
        })
    }
}

/// Node and relationship counts for status display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub customers: usize,
    pub orders: usize,
    pub products: usize,
    pub placed: usize,
    pub contains: usize,
}

impl GraphCounts {
    pub fn nodes(&self) -> usize {
        self.customers + self.orders + self.products
    }

    pub fn relationships(&self) -> usize {
        self.placed + self.contains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShopError;

    #[test]
    fn test_new_purchase_keeps_values() {
        let p = Purchase::new("alice", "order-1", "Widget").unwrap();
        assert_eq!(p.customer, "alice");
        assert_eq!(p.order, "order-1");
        assert_eq!(p.product, "Widget");
    }

    #[test]
    fn test_each_field_is_required() {
        for (c, o, p) in [("", "o1", "p1"), ("c1", "", "p1"), ("c1", "o1", " ")] {
            let err = Purchase::new(c, o, p).unwrap_err();
            assert!(matches!(err, ShopError::Validation(_)), "got {:?}", err);
        }
    }
}
