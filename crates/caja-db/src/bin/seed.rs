//! Demo data generator.
//!
//! Fills a development database with a small catalog, one operator, and a
//! couple of weeks of sales and expenses, so the listings, reports and the
//! calendar have something to show. Refuses to run on a database that
//! already has products.
//!
//! ```text
//! cargo run -p caja-db --bin seed -- --db ./caja_dev.db
//! ```

use std::env;

use chrono::{Duration, Utc};

use caja_core::{Money, Role};
use caja_db::repository::user::DEFAULT_OWNER_NAME;
use caja_db::{Database, DbConfig};

/// (name, unit price in cents, stock)
const PRODUCTS: &[(&str, i64, i64)] = &[
    ("Coca-Cola 600ml", 250, 48),
    ("Agua 1L", 120, 60),
    ("Pan dulce", 80, 30),
    ("Tortillas kg", 220, 25),
    ("Jabón de barra", 180, 18),
    ("Papel higiénico", 350, 24),
    ("Leche 1L", 290, 20),
    ("Huevos docena", 420, 15),
    ("Sabritas", 170, 36),
    ("Galletas María", 140, 28),
];

/// (description, amount in cents, days ago)
const EXPENSES: &[(&str, i64, i64)] = &[
    ("Hielo", 500, 1),
    ("Bolsas", 250, 3),
    ("Flete de refrescos", 1800, 5),
    ("Luz", 4200, 9),
    ("Escoba nueva", 650, 12),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./caja_dev.db");

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
                println!("Caja Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./caja_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Caja Seed Data Generator");
    println!("========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied, owner ready");

    // Refuse to double-seed
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let owner = db
        .users()
        .get_by_name(DEFAULT_OWNER_NAME)
        .await?
        .ok_or("owner account missing after bootstrap")?;
    let maria = db.users().insert("Maria", Role::Operator, true).await?;
    println!("✓ Operator account: {}", maria.name);

    // Catalog
    let mut catalog = Vec::with_capacity(PRODUCTS.len());
    for (name, price_cents, stock) in PRODUCTS {
        let product = db
            .products()
            .insert(name, Money::from_cents(*price_cents), *stock)
            .await?;
        catalog.push(product);
    }
    println!("✓ {} products", catalog.len());

    // Two weeks of sales, spread between the owner and the operator.
    // Deterministic index math instead of a rand dependency.
    let now = Utc::now();
    let mut sales = 0usize;
    for days_ago in 0..14i64 {
        let per_day = 1 + (days_ago as usize * 7) % 3;
        for slot in 0..per_day {
            let product = &catalog[(days_ago as usize * 3 + slot * 5) % catalog.len()];
            let quantity = 1 + ((days_ago as usize + slot) % 3) as i64;
            let total = product.price().multiply_quantity(quantity);
            let recorded_at =
                now - Duration::days(days_ago) - Duration::hours(2 + slot as i64 * 3);
            let user_id = if (days_ago as usize + slot) % 2 == 0 {
                &maria.id
            } else {
                &owner.id
            };
            db.sales()
                .insert(&product.id, quantity, total, recorded_at, user_id)
                .await?;
            sales += 1;
        }
    }
    println!("✓ {} sales over the last 14 days", sales);

    for (description, amount_cents, days_ago) in EXPENSES {
        let date = (now - Duration::days(*days_ago)).date_naive();
        db.expenses()
            .insert(description, Money::from_cents(*amount_cents), date, &owner.id)
            .await?;
    }
    println!("✓ {} expenses", EXPENSES.len());

    println!();
    println!("✓ Seed complete!");
    Ok(())
}
