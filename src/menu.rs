use std::io::{self, BufRead, Write};

use log::warn;

use crate::catalog::{Catalog, ProductId};
use crate::engine::{Restock, Sale};
use crate::invoice::{self, RULE};
use crate::store::CatalogStore;

const BANNER: &str = "==================================================";

/// Interactive dispatch loop. Reads from any buffered reader so the
/// binary can be driven by a pipe; ends on option 4 or end of input.
pub fn run(catalog: &mut Catalog, store: &CatalogStore, input: &mut impl BufRead) {
    loop {
        println!("\n{BANNER}");
        println!("              STOREFRONT INVENTORY");
        println!("{BANNER}");
        println!("1. Show Products");
        println!("2. Make Purchase");
        println!("3. Restock Products");
        println!("4. Exit");

        let Some(choice) = prompt(input, "Enter your choice (1-4): ") else {
            break;
        };
        match choice.as_str() {
            "1" => show_products(catalog),
            "2" => purchase(catalog, store, input),
            "3" => restock(catalog, store, input),
            "4" => {
                println!("\nThank you! Goodbye.");
                break;
            }
            _ => println!("\nInvalid choice! Enter 1-4."),
        }
    }
}

/// Prints a prompt and reads one trimmed line. None on end of input.
fn prompt(input: &mut impl BufRead, message: &str) -> Option<String> {
    print!("{message}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn show_products(catalog: &Catalog) {
    println!("\n{RULE}");
    println!("ID\tName\t\tBrand\t\tStock\tPrice\tCountry");
    println!("{RULE}");
    for (id, p) in catalog.iter() {
        println!(
            "{}\t{}\t{}\t{}\t{:.2}\t{}",
            id,
            p.name,
            p.brand,
            p.stock,
            p.price(),
            p.country
        );
    }
    println!("{RULE}");
}

fn purchase(catalog: &mut Catalog, store: &CatalogStore, input: &mut impl BufRead) {
    show_products(catalog);
    let Some(customer) = prompt(input, "\nEnter customer name: ") else {
        return;
    };
    let mut sale = Sale::new(customer);

    println!("\n{RULE}");
    println!("Item\t\tQty\tFree\tPrice");
    println!("{RULE}");

    loop {
        let Some(raw_id) = prompt(input, "\nEnter product ID (0 to finish): ") else {
            break;
        };
        let Ok(id) = raw_id.parse::<ProductId>() else {
            println!("Numbers only please!");
            continue;
        };
        if id == 0 {
            break;
        }
        let Some(product) = catalog.get(id) else {
            println!("Invalid ID! Try again.");
            continue;
        };

        let Some(raw_qty) = prompt(input, &format!("How many {}? ", product.name)) else {
            break;
        };
        let Ok(qty) = raw_qty.parse::<i64>() else {
            println!("Numbers only please!");
            continue;
        };

        match sale.add_item(catalog, id, qty) {
            Ok(line) => {
                println!("{}\t{}\t{}\t{:.2}", line.name, line.qty, line.free, line.price);
                println!("{RULE}");
            }
            Err(e) => println!("{e}"),
        }
    }

    if sale.is_empty() {
        println!("\nNo items purchased.");
        return;
    }

    let timestamp = invoice::timestamp();
    let filename = invoice::sale_filename(&sale.customer, &timestamp);
    match invoice::write(&filename, &invoice::render_sale(&sale, &timestamp)) {
        Ok(()) => println!("Invoice saved as {filename}"),
        Err(e) => {
            warn!("{e}");
            println!("Error saving invoice");
        }
    }
    if let Err(e) = store.save(catalog) {
        warn!("{e}");
        println!("Could not save products");
    }
}

fn restock(catalog: &mut Catalog, store: &CatalogStore, input: &mut impl BufRead) {
    let mut session = Restock::new();

    'session: loop {
        show_products(catalog);
        let Some(raw_id) = prompt(input, "\nEnter product ID to restock (0 to cancel): ") else {
            break;
        };
        let Ok(id) = raw_id.parse::<ProductId>() else {
            println!("Invalid input! Numbers only.");
            continue;
        };
        if id == 0 {
            break;
        }
        let Some(product) = catalog.get(id) else {
            println!("Invalid product ID!");
            continue;
        };
        let name = product.name.clone();

        let Some(raw_amount) = prompt(input, "How many to add? ") else {
            break;
        };
        let Ok(amount) = raw_amount.parse::<i64>() else {
            println!("Invalid input! Numbers only.");
            continue;
        };
        if amount <= 0 {
            println!("Must add at least 1 item!");
            continue;
        }

        // The vendor is asked once, on the first accepted item.
        while session.vendor.is_empty() {
            let Some(vendor) = prompt(input, "Enter vendor/supplier name: ") else {
                break 'session;
            };
            if vendor.is_empty() {
                println!("Vendor name cannot be empty!");
            } else {
                session.vendor = vendor;
            }
        }

        match session.add_item(catalog, id, amount) {
            Ok(line) => {
                let qty = line.qty;
                let new_stock = catalog.get(id).map(|p| p.stock).unwrap_or_default();
                println!("\nRestocked {qty} {name}. New stock: {new_stock}");
                // Saved after each item, not batched at session end.
                if let Err(e) = store.save(catalog) {
                    warn!("{e}");
                    println!("Could not save products");
                }
            }
            Err(e) => {
                println!("{e}");
                continue;
            }
        }

        let Some(more) = prompt(input, "\nDo you want to restock another item? (y/n): ") else {
            break;
        };
        if !more.eq_ignore_ascii_case("y") {
            break;
        }
    }

    if session.is_empty() {
        return;
    }

    let timestamp = invoice::timestamp();
    let filename = invoice::restock_filename(&session.vendor, &timestamp);
    match invoice::write(&filename, &invoice::render_restock(&session, catalog, &timestamp)) {
        Ok(()) => println!("Restock invoice saved as {filename}"),
        Err(e) => {
            warn!("{e}");
            println!("Error saving restock invoice");
        }
    }
}
