//! Storage Gateway trên SQLite

use async_trait::async_trait;
use cpres_core::{LookupOutcome, Record, StorageTier, SubsystemType, TransactionKey};
use sqlx::SqlitePool;

use crate::gateway::StorageGateway;
use crate::sqlite::repos::{CustomerRepo, RecordRepo};

/// Storage Gateway đọc records theo tier và customers từ SQLite
#[derive(Clone)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageGateway for SqliteGateway {
    async fn fetch(
        &self,
        subsystem: SubsystemType,
        tier: StorageTier,
        key: &TransactionKey,
    ) -> LookupOutcome<Record> {
        let row = match RecordRepo::get(&self.pool, subsystem, tier, key.as_str()).await {
            Ok(Some(row)) => row,
            Ok(None) => return LookupOutcome::NotFound,
            Err(e) => return LookupOutcome::store_error(e.to_string()),
        };

        // Body không phải JSON object là lỗi store, không phải miss
        match row.record() {
            Ok(record) => LookupOutcome::Found(record),
            Err(e) => LookupOutcome::store_error(format!(
                "{}{} {}: {}",
                subsystem.application(),
                tier.file_suffix(),
                key,
                e
            )),
        }
    }

    async fn directory_name(&self, customer_id: &str) -> LookupOutcome<String> {
        match CustomerRepo::get_by_id(&self.pool, customer_id).await {
            Ok(customer) => match customer.display_name() {
                Some(name) => LookupOutcome::Found(name.to_string()),
                None => LookupOutcome::NotFound,
            },
            Err(e) if e.is_not_found() => LookupOutcome::NotFound,
            Err(e) => LookupOutcome::store_error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::repos::init_database;
    use crate::sqlite::schema::{CustomerRow, RecordRow};
    use tempfile::tempdir;

    async fn gateway(dir: &tempfile::TempDir) -> SqliteGateway {
        let url = format!("sqlite:{}", dir.path().join("gateway.db").display());
        SqliteGateway::new(init_database(&url).await.unwrap())
    }

    #[tokio::test]
    async fn test_fetch_outcomes() {
        let dir = tempdir().unwrap();
        let gateway = gateway(&dir).await;
        let key = TransactionKey::new("MM2401500042").unwrap();

        let record = Record::new().with_field("CUSTOMER.ID", "C100234");
        let row = RecordRow::new(
            SubsystemType::MoneyMarket,
            StorageTier::Current,
            key.as_str(),
            &record,
        )
        .unwrap();
        RecordRepo::upsert(gateway.pool(), &row).await.unwrap();

        assert_eq!(
            gateway
                .fetch(SubsystemType::MoneyMarket, StorageTier::Current, &key)
                .await,
            LookupOutcome::Found(record)
        );
        assert_eq!(
            gateway
                .fetch(SubsystemType::MoneyMarket, StorageTier::Historical, &key)
                .await,
            LookupOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_non_string_field_still_found() {
        let dir = tempdir().unwrap();
        let gateway = gateway(&dir).await;
        let key = TransactionKey::new("TT24015").unwrap();

        let mut row = RecordRow::new(
            SubsystemType::Teller,
            StorageTier::Current,
            key.as_str(),
            &Record::new(),
        )
        .unwrap();
        row.body = r#"{"CUSTOMER.NAME": 42, "AMOUNT.LOCAL.1": 1000000}"#.to_string();
        RecordRepo::upsert(gateway.pool(), &row).await.unwrap();

        match gateway
            .fetch(SubsystemType::Teller, StorageTier::Current, &key)
            .await
        {
            LookupOutcome::Found(record) => {
                assert_eq!(record.len(), 2);
                assert_eq!(record.first_value("CUSTOMER.NAME"), None);
            }
            other => panic!("expected found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_broken_body_is_store_error() {
        let dir = tempdir().unwrap();
        let gateway = gateway(&dir).await;
        let key = TransactionKey::new("TT24016").unwrap();

        let mut row = RecordRow::new(
            SubsystemType::Teller,
            StorageTier::Current,
            key.as_str(),
            &Record::new(),
        )
        .unwrap();
        row.body = "{broken".to_string();
        RecordRepo::upsert(gateway.pool(), &row).await.unwrap();

        let outcome = gateway
            .fetch(SubsystemType::Teller, StorageTier::Current, &key)
            .await;
        match outcome {
            LookupOutcome::StoreError(detail) => assert!(detail.starts_with("TELLER TT24016")),
            other => panic!("expected store error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_directory_name() {
        let dir = tempdir().unwrap();
        let gateway = gateway(&dir).await;

        CustomerRepo::upsert(
            gateway.pool(),
            &CustomerRow::new("C100234", None, Some("ACME TRADING LTD")),
        )
        .await
        .unwrap();
        CustomerRepo::upsert(gateway.pool(), &CustomerRow::new("C100235", None, None))
            .await
            .unwrap();

        assert_eq!(
            gateway.directory_name("C100234").await,
            LookupOutcome::Found("ACME TRADING LTD".to_string())
        );
        assert_eq!(gateway.directory_name("C100235").await, LookupOutcome::NotFound);
        assert_eq!(gateway.directory_name("C999").await, LookupOutcome::NotFound);
    }
}
