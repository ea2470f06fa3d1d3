//! JSON fixtures - nạp records và customers vào store
//!
//! ```json
//! {
//!   "records": [
//!     { "subsystem": "FT", "tier": "history", "key": "FT2401500123",
//!       "fields": { "ORDERING.CUST": ["C100234"] } }
//!   ],
//!   "customers": [
//!     { "id": "C100234", "short_name": "ACME", "name_1": "ACME TRADING LTD" }
//!   ]
//! }
//! ```

use cpres_core::{Record, StorageTier, SubsystemType};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::Path;

use crate::error::{PersistenceError, PersistenceResult};
use crate::memory::MemoryGateway;
use crate::sqlite::repos::{CustomerRepo, RecordRepo};
use crate::sqlite::schema::{CustomerRow, RecordRow};

/// Một record trong fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub subsystem: SubsystemType,
    /// Code tier (`current`, `history`, `unauthorised`, `$HIS`, ...)
    pub tier: String,
    pub key: String,
    #[serde(default)]
    pub fields: Record,
}

/// Một customer trong fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCustomer {
    pub id: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub name_1: Option<String>,
}

/// Số lượng đã nạp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub records: usize,
    pub customers: usize,
}

/// Fixture file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub records: Vec<FixtureRecord>,
    #[serde(default)]
    pub customers: Vec<FixtureCustomer>,
}

impl Fixture {
    /// Đọc fixture từ file JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Nạp vào SQLite (upsert)
    pub async fn load_into(&self, pool: &SqlitePool) -> PersistenceResult<LoadSummary> {
        // Validate toàn bộ trước khi ghi
        let rows = self
            .records
            .iter()
            .map(|r| RecordRow::new(r.subsystem, r.storage_tier()?, &r.key, &r.fields))
            .collect::<PersistenceResult<Vec<_>>>()?;

        for row in &rows {
            RecordRepo::upsert(pool, row).await?;
        }
        for customer in &self.customers {
            CustomerRepo::upsert(pool, &customer.to_row()).await?;
        }

        tracing::info!(
            records = rows.len(),
            customers = self.customers.len(),
            "Fixture loaded"
        );
        Ok(LoadSummary {
            records: rows.len(),
            customers: self.customers.len(),
        })
    }

    /// Nạp vào MemoryGateway
    pub fn load_into_memory(&self, gateway: &MemoryGateway) -> PersistenceResult<LoadSummary> {
        for record in &self.records {
            gateway.insert_record(
                record.subsystem,
                record.storage_tier()?,
                &record.key,
                record.fields.clone(),
            );
        }
        for customer in &self.customers {
            if let Some(name) = customer.to_row().display_name() {
                gateway.insert_customer(&customer.id, name);
            }
        }
        Ok(LoadSummary {
            records: self.records.len(),
            customers: self.customers.len(),
        })
    }
}

impl FixtureRecord {
    fn storage_tier(&self) -> PersistenceResult<StorageTier> {
        StorageTier::parse(&self.tier).ok_or_else(|| PersistenceError::invalid_enum("tier", &self.tier))
    }
}

impl FixtureCustomer {
    fn to_row(&self) -> CustomerRow {
        CustomerRow::new(&self.id, self.short_name.as_deref(), self.name_1.as_deref())
    }
}
