//! Database schema definitions
//!
//! Row types cho sqlx mapping từ SQLite tables.
//! Schema được định nghĩa trong migrations/20261016_init.sql

use chrono::{DateTime, Utc};
use cpres_core::{Record, StorageTier, SubsystemType};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceResult;

/// Row type cho bảng `transaction_records`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct RecordRow {
    pub subsystem: String,
    pub tier: String,
    pub record_key: String,
    pub body: String, // Record stored as JSON TEXT
    pub updated_at: DateTime<Utc>,
}

/// Row type cho bảng `customers`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CustomerRow {
    pub id: String,
    pub short_name: Option<String>,
    pub name_1: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Số record theo (subsystem, tier) - dùng cho `cpres status`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct RecordCountRow {
    pub subsystem: String,
    pub tier: String,
    pub count: i64,
}

impl RecordRow {
    /// Tạo row mới từ record
    pub fn new(
        subsystem: SubsystemType,
        tier: StorageTier,
        key: &str,
        record: &Record,
    ) -> PersistenceResult<Self> {
        Ok(Self {
            subsystem: subsystem.tag().to_string(),
            tier: tier.as_str().to_string(),
            record_key: key.to_string(),
            body: record.to_json()?,
            updated_at: Utc::now(),
        })
    }

    /// Parse body JSON thành Record
    pub fn record(&self) -> PersistenceResult<Record> {
        Ok(Record::from_json(&self.body)?)
    }
}

impl CustomerRow {
    pub fn new(id: &str, short_name: Option<&str>, name_1: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            short_name: short_name.map(str::to_string),
            name_1: name_1.map(str::to_string),
            updated_at: Utc::now(),
        }
    }

    /// Display name: SHORT.NAME, fallback NAME.1 khi short name trống
    pub fn display_name(&self) -> Option<&str> {
        [self.short_name.as_deref(), self.name_1.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
    }
}
