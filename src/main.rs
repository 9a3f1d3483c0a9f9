use log::warn;

use crate::catalog::Catalog;
use crate::store::CatalogStore;

mod catalog;
mod engine;
mod invoice;
mod menu;
mod store;

const DEFAULT_CATALOG_FILE: &str = "products.txt";

fn main() {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CATALOG_FILE.to_string());

    let store = CatalogStore::new(path);
    let mut catalog = match store.load() {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("{e}");
            println!("Could not load products");
            Catalog::default()
        }
    };

    let stdin = std::io::stdin();
    menu::run(&mut catalog, &store, &mut stdin.lock());
}
