//! # Seed Data Generator
//!
//! Populates the database with a small menu and a few customers so the
//! order workflow can be exercised by hand.
//!
//! ## Usage
//! ```bash
//! # Seed ./jati.db
//! cargo run -p jati-db --bin seed
//!
//! # Specify database path
//! cargo run -p jati-db --bin seed -- --db ./data/jati.db
//! ```
//!
//! Every product gets a unique SKU `{CATEGORY}-{NNN}`. Ids are printed so
//! they can be pasted into `POST /api/v1/orders` requests.

use chrono::Utc;
use jati_core::{Customer, Money, Product};
use jati_db::{Database, DbConfig};
use std::env;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Menu by category: (name, price in cents)
const MENU: &[(&str, &[(&str, i64)])] = &[
    (
        "BEV",
        &[
            ("Kopi Susu", 2_500),
            ("Es Teh Manis", 1_000),
            ("Jus Alpukat", 2_200),
            ("Air Mineral", 500),
        ],
    ),
    (
        "FOD",
        &[
            ("Nasi Goreng", 10_000),
            ("Mie Ayam", 8_500),
            ("Sate Ayam", 12_000),
            ("Gado-Gado", 9_000),
        ],
    ),
    (
        "SNK",
        &[
            ("Pisang Goreng", 1_500),
            ("Kerupuk", 300),
        ],
    ),
];

/// Sample customers: (name, email, phone)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Sari Wulandari", "sari@example.com", "+62-811-0001"),
    ("Budi Santoso", "budi@example.com", "+62-811-0002"),
    ("Dewi Lestari", "dewi@example.com", "+62-811-0003"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| String::from("./jati.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Jati POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $DATABASE_PATH or ./jati.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Jati POS Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Products:");

    let now = Utc::now();
    for (category, items) in MENU {
        for (idx, (name, price_cents)) in items.iter().enumerate() {
            let product = Product {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                description: None,
                sku: Some(format!("{}-{:03}", category, idx + 1)),
                price_cents: *price_cents,
                created_at: now,
                updated_at: now,
            };

            if let Err(e) = db.products().insert(&product).await {
                warn!(name = %name, error = %e, "Failed to insert product");
                continue;
            }

            println!(
                "  {}  {:<14} {:>8}",
                product.id,
                name,
                Money::from_cents(*price_cents).to_string()
            );
        }
    }

    println!();
    println!("Customers:");

    for (name, email, phone) in CUSTOMERS {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            address: None,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.customers().insert(&customer).await {
            warn!(name = %name, error = %e, "Failed to insert customer");
            continue;
        }

        println!("  {}  {}", customer.id, name);
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
