//! Database initialization and status

use anyhow::{Context, Result};
use cpres_persistence::{CustomerRepo, RecordRepo};
use sqlx::SqlitePool;
use std::path::Path;

/// Create the parent directory of the database file if it is missing
pub fn ensure_data_dir(db_path: &Path) -> Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent)),
        _ => Ok(()),
    }
}

/// Initialize the database with schema
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    let pool = cpres_persistence::init_database(&db_url(db_path))
        .await
        .context("Failed to initialize database")?;

    pool.close().await;
    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'cpres init' to create the database");
        return Ok(());
    }

    let pool = connect(db_path).await?;

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();

    let counts = RecordRepo::count_by_tier(&pool).await?;
    if counts.is_empty() {
        println!("   Records:      0");
    }
    for row in &counts {
        println!("   {:<4} {:<14} {}", row.subsystem, row.tier, row.count);
    }

    let customers = CustomerRepo::count(&pool).await?;
    println!("   Customers:    {}", customers);

    pool.close().await;
    Ok(())
}

/// Connect to database pool
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    cpres_persistence::create_pool(&db_url(db_path))
        .await
        .context("Failed to connect to database. Run 'cpres init' first.")
}

fn db_url(db_path: &Path) -> String {
    format!("sqlite:{}", db_path.display())
}
