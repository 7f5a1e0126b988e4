//! # Cart Demo
//!
//! Seeds the showcase cart and prints the order summary.
//!
//! ## Usage
//! ```bash
//! # Summary for the full showcase cart
//! cargo run -p karigar-store --bin cart-demo
//!
//! # Apply a coupon, leave one line out, print the checkout hand-off as JSON
//! cargo run -p karigar-store --bin cart-demo -- --coupon artisan20 --deselect madhubani-painting --json
//!
//! # Use a specific config file
//! cargo run -p karigar-store --bin cart-demo -- --config ./karigar.toml
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use karigar_core::ItemId;
use karigar_store::sample::sample_cart_items;
use karigar_store::{init_tracing, CartStore, StoreConfig, StoreError};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut coupon: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut deselect: Vec<ItemId> = Vec::new();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--coupon" | "-c" => {
                if i + 1 < args.len() {
                    coupon = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--deselect" | "-d" => {
                if i + 1 < args.len() {
                    deselect.push(ItemId::new(args[i + 1].as_str()));
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Karigar Cart Demo");
                println!();
                println!("Usage: cart-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --coupon <CODE>    Apply a coupon code");
                println!("  -d, --deselect <ID>    Leave a line out of checkout (repeatable)");
                println!("      --config <PATH>    Config file (default: platform config dir)");
                println!("      --json             Print the checkout hand-off as JSON");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let config = StoreConfig::load_or_default(config_path);
    let mut store = CartStore::from_config(&config);
    for item in sample_cart_items() {
        store.add_item(item)?;
    }
    for id in &deselect {
        if store.is_selected(id) {
            store.toggle(id);
        }
    }

    println!("Cart");
    println!("====");
    for item in store.items() {
        let mark = if store.is_selected(&item.id) { "x" } else { " " };
        println!(
            "[{}] {:<34} x{:<3} {:>14}",
            mark,
            item.name,
            item.quantity,
            item.line_total().to_string()
        );
    }
    println!();

    if let Some(code) = coupon {
        match store.apply_coupon_code(&code) {
            Ok(applied) => println!("Coupon applied! You saved {}", applied.discount),
            Err(e) => println!("Coupon not applied: {}", e),
        }
        println!();
    }

    let b = store.breakdown();
    println!("Order Summary");
    println!("=============");
    println!("Subtotal ({} items) {:>20}", b.selected_units, b.subtotal.to_string());
    if let Some(code) = &b.coupon_code {
        println!("Coupon {:<12} {:>20}", code, format!("-{}", b.discount));
    }
    if b.has_free_shipping() {
        println!("Shipping {:>31}", "FREE");
    } else {
        println!("Shipping {:>31}", b.shipping.to_string());
    }
    println!(
        "Tax (GST {}) {:>25}",
        store.pricing().tax_rate,
        b.tax.to_string()
    );
    if let Some(needed) = b.free_shipping_shortfall {
        println!("Add {} more for FREE shipping", needed);
    }
    println!("Total Amount {:>27}", b.total.to_string());
    if b.savings.is_positive() {
        println!("You save {} against list prices", b.savings);
    }
    println!();

    match store.checkout() {
        Ok(handoff) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&handoff)?);
            } else {
                println!(
                    "Proceed to checkout ({} items): {} [ref {}]",
                    handoff.items.len(),
                    handoff.total(),
                    handoff.reference
                );
            }
        }
        Err(StoreError::EmptySelection) => println!("Select items to continue"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
