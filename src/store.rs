use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::catalog::{Catalog, Product};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("catalog file {0} not found")]
    NotFound(PathBuf),
    #[error("failed to read catalog file: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[source] csv::Error),
    #[error("failed to write catalog file: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to write invoice {path}: {source}")]
    Invoice {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Owns the path of the delimited catalog file and loads/saves the
/// catalog as a whole. One line per product, five fields joined by
/// `", "`: name, brand, stock, cost, country.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog, assigning ids 1..N in file order. Records that
    /// fail to deserialize (wrong field count, non-numeric stock or cost)
    /// are skipped and occupy no id slot.
    pub fn load(&self) -> Result<Catalog, StoreError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(self.path.clone()),
            _ => StoreError::Read(e),
        })?;

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut products = Vec::new();
        for result in reader.into_records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                    warn!("Failed to read a catalog record: {}. Skipping invalid record.", e);
                    continue;
                }
                Err(e) => return Err(StoreError::Parse(e)),
            };
            // Exactly five fields per line; anything else is skipped and
            // occupies no id slot.
            if record.len() != 5 {
                warn!(
                    "Skipping catalog record with {} fields instead of 5: {:?}",
                    record.len(),
                    record
                );
                continue;
            }
            match record.deserialize::<Product>(None) {
                Ok(product) if product.cost < 0.0 => {
                    warn!(
                        "Skipping catalog record for {:?} with negative cost {}.",
                        product.name, product.cost
                    );
                }
                Ok(product) => products.push(product),
                Err(e) => {
                    warn!("Failed to parse a catalog record: {}. Skipping invalid record.", e);
                }
            }
        }
        Ok(Catalog::from_products(products))
    }

    /// Rewrites the whole catalog file from memory, overwriting prior
    /// contents. Fields are not escaped: a literal `", "` inside a field
    /// will corrupt that line on the next load.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let mut file = File::create(&self.path).map_err(StoreError::Write)?;
        for (_, p) in catalog.iter() {
            writeln!(
                file,
                "{}, {}, {}, {}, {}",
                p.name, p.brand, p.stock, p.cost, p.country
            )
            .map_err(StoreError::Write)?;
        }
        Ok(())
    }
}
