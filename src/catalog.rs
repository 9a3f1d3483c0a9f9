use std::collections::BTreeMap;

use serde::Deserialize;

pub type ProductId = u32;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub stock: u32,
    pub cost: f64,
    pub country: String,
}

impl Product {
    /// Sale price is derived, never stored: twice the cost.
    pub fn price(&self) -> f64 {
        self.cost * 2.0
    }
}

/// The in-memory catalog, keyed by ids assigned 1..N at load time.
/// Ids are stable within a run but not across runs.
#[derive(Debug, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    /// Builds a catalog from products in file order, assigning dense 1-based ids.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Catalog {
            products: (1..).zip(products).collect(),
        }
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductId, &Product)> {
        self.products.iter().map(|(&id, product)| (id, product))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, stock: u32, cost: f64) -> Product {
        Product {
            name: name.to_string(),
            brand: "Generic".to_string(),
            stock,
            cost,
            country: "US".to_string(),
        }
    }

    #[test]
    fn test_ids_are_dense_and_in_order() {
        let catalog = Catalog::from_products(vec![
            product("Soap", 10, 2.0),
            product("Shampoo", 5, 4.5),
            product("Lotion", 0, 1.0),
        ]);

        let ids: Vec<ProductId> = catalog.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.get(1).unwrap().name, "Soap");
        assert_eq!(catalog.get(3).unwrap().name, "Lotion");
        assert!(catalog.get(4).is_none());
        assert!(catalog.get(0).is_none());
    }

    #[test]
    fn test_price_is_twice_cost() {
        assert_eq!(product("Soap", 10, 2.0).price(), 4.0);
        assert_eq!(product("Sample", 1, 0.0).price(), 0.0);
    }
}
