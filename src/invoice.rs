use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::catalog::Catalog;
use crate::engine::{Restock, Sale};
use crate::store::StoreError;

pub(crate) const RULE: &str = "--------------------------------------------------";

/// Timestamp used in invoice names and headers: YYYYMMDDHHMM, local clock.
pub fn timestamp() -> String {
    format_timestamp(Local::now())
}

fn format_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d%H%M").to_string()
}

pub fn sale_filename(customer: &str, timestamp: &str) -> String {
    format!("invoice_{}_{}.txt", customer.replace(' ', "_"), timestamp)
}

pub fn restock_filename(vendor: &str, timestamp: &str) -> String {
    format!("restock_{}_{}.txt", vendor.replace(' ', "_"), timestamp)
}

pub fn render_sale(sale: &Sale, timestamp: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "INVOICE - {timestamp}");
    let _ = writeln!(out, "Customer: {}", sale.customer);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Item\t\tQty\tFree\tPrice");
    let _ = writeln!(out, "{RULE}");
    for line in sale.lines() {
        let _ = writeln!(out, "{}\t{}\t{}\t{:.2}", line.name, line.qty, line.free, line.price);
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "TOTAL:\t\t\t\t{:.2}", sale.total());
    let _ = writeln!(out, "{RULE}");
    out
}

/// Brand and rate come from the catalog at render time; the session only
/// carries product ids.
pub fn render_restock(restock: &Restock, catalog: &Catalog, timestamp: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "RESTOCK INVOICE - {timestamp}");
    let _ = writeln!(out, "Vendor: {}", restock.vendor);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Product\t\tBrand\t\tQty\tRate\tAmount");
    let _ = writeln!(out, "{RULE}");
    for line in restock.lines() {
        if let Some(p) = catalog.get(line.product_id) {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{:.2}\t{:.2}",
                p.name, p.brand, line.qty, p.cost, line.total_cost
            );
        }
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "TOTAL:\t\t\t\t\t\t{:.2}", restock.grand_total());
    let _ = writeln!(out, "{RULE}");
    out
}

/// Writes an invoice next to the catalog file's working directory.
/// Invoices are write-once and never read back.
pub fn write(filename: &str, contents: &str) -> Result<(), StoreError> {
    std::fs::write(filename, contents).map_err(|source| StoreError::Invoice {
        path: PathBuf::from(filename),
        source,
    })
}
