//! # Sales Module Walk-through
//!
//! Runs every repository operation once against a real database.
//!
//! ## Usage
//! ```bash
//! # Uses ./ventas.db (created if missing)
//! cargo run -p ventas-db --bin demo
//!
//! # Specify database path
//! cargo run -p ventas-db --bin demo -- --db ./data/ventas.db
//! ```
//!
//! ## Steps
//! 1. Insert two sales
//! 2. Fetch the first one by its new id
//! 3. Change its status and total, update it
//! 4. Fetch it again
//! 5. List all sales
//! 6. Delete the second sale
//! 7. List all sales again

use std::env;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;
use ventas_core::Sale;
use ventas_db::{schema, ConnectionProvider, DbConfig, SaleRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match db_path_arg()? {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_env()?,
    };

    println!("--- SALES MODULE DEMO ---");
    println!("Database: {}", config.database_path.display());

    let provider = ConnectionProvider::new(config)?;
    schema::ensure_schema(&provider)
        .await
        .context("could not create the Ventas table")?;
    let sales = provider.sales();

    // 1. Insert
    println!("\n--- 1. INSERT ---");
    let mut first = Sale::new(iso_date("2025-10-15")?, "Sofía Rodríguez", 150.50, "Pendiente");
    let mut second = Sale::new(iso_date("2025-10-16")?, "Carlos Martínez", 300.00, "Pagada");

    for sale in [&mut first, &mut second] {
        if sales.insert(sale).await {
            println!("Inserted: {}", sale);
        } else {
            println!("Insert failed: {}", sale);
        }
    }

    let Some(first_id) = first.id() else {
        bail!("first sale was not stored; see log for the cause");
    };

    // 2. Fetch
    println!("\n--- 2. FETCH ---");
    let fetched = sales.fetch_by_id(first_id).await;
    match &fetched {
        Some(sale) => println!("Found (ID {}): {}", first_id, sale),
        None => println!("Sale ID {} not found.", first_id),
    }

    // 3. Update
    println!("\n--- 3. UPDATE ---");
    if let Some(mut sale) = fetched {
        sale.status = "Enviada".to_string();
        sale.total = 155.50;
        if sales.update(&sale).await {
            println!("Sale ID {} updated.", first_id);
        }
    }

    // 4. Verify
    if let Some(sale) = sales.fetch_by_id(first_id).await {
        println!("After update: {}", sale);
    }

    // 5. List
    print_sales(&sales, "ALL SALES").await;

    // 6. Delete
    println!("\n--- 6. DELETE ---");
    match second.id() {
        Some(id) => {
            if sales.delete_by_id(id).await {
                println!("Sale ID {} deleted.", id);
            } else {
                println!("Sale ID {} was not deleted.", id);
            }
        }
        None => println!("Second sale was never stored, nothing to delete."),
    }

    // 7. List again
    print_sales(&sales, "AFTER DELETE").await;

    println!("\n--- DEMO FINISHED ---");
    Ok(())
}

/// Prints every stored sale, one per line.
async fn print_sales(sales: &SaleRepository, title: &str) {
    println!("\n--- {} ---", title);
    let all = sales.list_all().await;
    for sale in &all {
        println!("{}", sale);
    }
    println!("({} rows)", all.len());
}

fn iso_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("bad date literal {raw}"))
}

/// Reads `--db <path>` from the command line.
fn db_path_arg() -> anyhow::Result<Option<String>> {
    let args: Vec<String> = env::args().collect();
    match args.iter().position(|a| a == "--db") {
        Some(i) => match args.get(i + 1) {
            Some(path) => Ok(Some(path.clone())),
            None => bail!("--db needs a path"),
        },
        None => Ok(None),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ventas_db=info,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
