use log::trace;
use thiserror::Error;

use crate::catalog::{Catalog, ProductId};

#[derive(Debug, Error, PartialEq)]
pub enum TransactionError {
    #[error("Invalid product ID!")]
    UnknownProduct(ProductId),
    #[error("Must be at least 1!")]
    InvalidQuantity(i64),
    #[error("Quantity too large!")]
    QuantityTooLarge(i64),
    #[error("Not enough stock. Available: {available} (including free items)")]
    InsufficientStock { available: u32 },
}

#[derive(Debug, PartialEq)]
pub struct SaleLine {
    pub name: String,
    pub qty: u32,
    pub free: u32,
    pub price: f64,
}

/// One customer purchase session. Items are validated against and
/// deducted from the catalog as they are added; the running total only
/// counts charged units.
#[derive(Debug)]
pub struct Sale {
    pub customer: String,
    lines: Vec<SaleLine>,
    total: f64,
}

impl Sale {
    pub fn new(customer: impl Into<String>) -> Self {
        Sale {
            customer: customer.into(),
            lines: Vec::new(),
            total: 0.0,
        }
    }

    /// Sells `qty` units of a product under the buy-3-get-1-free offer.
    /// `qty / 3` extra units leave the stock for free; the guard checks
    /// charged plus free units against the available stock and nothing
    /// is mutated on rejection.
    pub fn add_item(
        &mut self,
        catalog: &mut Catalog,
        id: ProductId,
        qty: i64,
    ) -> Result<&SaleLine, TransactionError> {
        let Some(product) = catalog.get_mut(id) else {
            trace!("Purchase rejected: product {} does not exist.", id);
            return Err(TransactionError::UnknownProduct(id));
        };
        if qty <= 0 {
            trace!("Purchase of {} rejected: quantity {} is not positive.", product.name, qty);
            return Err(TransactionError::InvalidQuantity(qty));
        }
        let Ok(qty) = u32::try_from(qty) else {
            trace!("Purchase of {} rejected: quantity {} is too large.", product.name, qty);
            return Err(TransactionError::QuantityTooLarge(qty));
        };

        let free = qty / 3;
        // Compared in u64 so qty + free cannot wrap before the guard fires.
        let required = u64::from(qty) + u64::from(free);
        if required > u64::from(product.stock) {
            trace!(
                "Purchase of {} x{} rejected: {} units required, {} in stock.",
                product.name, qty, required, product.stock
            );
            return Err(TransactionError::InsufficientStock {
                available: product.stock,
            });
        }

        product.stock -= qty + free;
        let price = product.cost * 2.0 * f64::from(qty);
        self.total += price;
        self.lines.push(SaleLine {
            name: product.name.clone(),
            qty,
            free,
            price,
        });
        Ok(self.lines.last().unwrap())
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, PartialEq)]
pub struct RestockLine {
    pub product_id: ProductId,
    pub qty: u32,
    pub total_cost: f64,
}

/// One vendor restock session. The vendor name is captured once, on the
/// first successful item, and reused for the whole session.
#[derive(Debug)]
pub struct Restock {
    pub vendor: String,
    lines: Vec<RestockLine>,
    grand_total: f64,
}

impl Restock {
    pub fn new() -> Self {
        Restock {
            vendor: String::new(),
            lines: Vec::new(),
            grand_total: 0.0,
        }
    }

    /// Adds `qty` units of a product to stock at the product's cost.
    pub fn add_item(
        &mut self,
        catalog: &mut Catalog,
        id: ProductId,
        qty: i64,
    ) -> Result<&RestockLine, TransactionError> {
        let Some(product) = catalog.get_mut(id) else {
            trace!("Restock rejected: product {} does not exist.", id);
            return Err(TransactionError::UnknownProduct(id));
        };
        if qty <= 0 {
            trace!("Restock of {} rejected: quantity {} is not positive.", product.name, qty);
            return Err(TransactionError::InvalidQuantity(qty));
        }
        let Ok(qty) = u32::try_from(qty) else {
            trace!("Restock of {} rejected: quantity {} is too large.", product.name, qty);
            return Err(TransactionError::QuantityTooLarge(qty));
        };

        let total_cost = f64::from(qty) * product.cost;
        product.stock = product.stock.saturating_add(qty);
        self.grand_total += total_cost;
        self.lines.push(RestockLine {
            product_id: id,
            qty,
            total_cost,
        });
        Ok(self.lines.last().unwrap())
    }

    pub fn lines(&self) -> &[RestockLine] {
        &self.lines
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Restock {
    fn default() -> Self {
        Restock::new()
    }
}
