//! Fixture loading command

use anyhow::{Context, Result};
use cpres_persistence::Fixture;
use std::path::Path;

use crate::db;

/// Load a JSON fixture into the database
pub async fn run(db_path: &Path, file: &Path) -> Result<()> {
    let fixture = Fixture::from_file(file)
        .with_context(|| format!("Failed to read fixture {:?}", file))?;

    let pool = db::connect(db_path).await?;
    let summary = fixture
        .load_into(&pool)
        .await
        .context("Failed to load fixture")?;
    pool.close().await;

    println!(
        "📥 Loaded {} records and {} customers from {:?}",
        summary.records, summary.customers, file
    );
    Ok(())
}
