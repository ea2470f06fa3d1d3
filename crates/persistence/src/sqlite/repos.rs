//! Repository implementations cho SQLite
//!
//! Truy cập bảng `transaction_records` và `customers`.

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::*;
use cpres_core::{StorageTier, SubsystemType};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

// ============================================================================
// Record Repository
// ============================================================================

/// Repository cho transaction_records table
pub struct RecordRepo;

impl RecordRepo {
    /// Lấy record theo (subsystem, tier, key)
    pub async fn get(
        pool: &SqlitePool,
        subsystem: SubsystemType,
        tier: StorageTier,
        key: &str,
    ) -> PersistenceResult<Option<RecordRow>> {
        let row = sqlx::query_as::<_, RecordRow>(
            "SELECT * FROM transaction_records WHERE subsystem = ? AND tier = ? AND record_key = ?",
        )
        .bind(subsystem.tag())
        .bind(tier.as_str())
        .bind(key)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Thêm hoặc thay thế record
    pub async fn upsert(pool: &SqlitePool, row: &RecordRow) -> PersistenceResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO transaction_records (subsystem, tier, record_key, body, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&row.subsystem)
        .bind(&row.tier)
        .bind(&row.record_key)
        .bind(&row.body)
        .bind(row.updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Đếm records theo subsystem và tier
    pub async fn count_by_tier(pool: &SqlitePool) -> PersistenceResult<Vec<RecordCountRow>> {
        let rows = sqlx::query_as::<_, RecordCountRow>(
            "SELECT subsystem, tier, COUNT(*) AS count FROM transaction_records GROUP BY subsystem, tier ORDER BY subsystem, tier",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}

// ============================================================================
// Customer Repository
// ============================================================================

/// Repository cho customers table
pub struct CustomerRepo;

impl CustomerRepo {
    /// Lấy customer theo ID
    pub async fn get_by_id(pool: &SqlitePool, id: &str) -> PersistenceResult<CustomerRow> {
        sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Customer", id))
    }

    /// Thêm hoặc cập nhật customer
    pub async fn upsert(pool: &SqlitePool, customer: &CustomerRow) -> PersistenceResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO customers (id, short_name, name_1, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&customer.id)
        .bind(&customer.short_name)
        .bind(&customer.name_1)
        .bind(customer.updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Đếm customers
    pub async fn count(pool: &SqlitePool) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Database initialization
// ============================================================================

/// Khởi tạo database connection pool (database phải tồn tại)
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    Ok(pool)
}

/// Chạy migrations
pub async fn run_migrations(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Tạo database mới với schema
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    // Tạo file nếu chưa có
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpres_core::Record;
    use tempfile::tempdir;

    async fn test_pool(dir: &tempfile::TempDir) -> SqlitePool {
        let url = format!("sqlite:{}", dir.path().join("repos.db").display());
        init_database(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_record_upsert_and_get() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;

        let record = Record::new().with_field("ORDERING.CUST", vec!["C100234"]);
        let row = RecordRow::new(
            SubsystemType::FundsTransfer,
            StorageTier::Historical,
            "FT2401500123",
            &record,
        )
        .unwrap();
        RecordRepo::upsert(&pool, &row).await.unwrap();

        let fetched = RecordRepo::get(
            &pool,
            SubsystemType::FundsTransfer,
            StorageTier::Historical,
            "FT2401500123",
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(fetched.record().unwrap(), record);

        let other_tier = RecordRepo::get(
            &pool,
            SubsystemType::FundsTransfer,
            StorageTier::Current,
            "FT2401500123",
        )
        .await
        .unwrap();
        assert!(other_tier.is_none());
    }

    #[tokio::test]
    async fn test_count_by_tier() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;

        for (tier, key) in [
            (StorageTier::Current, "TT24001"),
            (StorageTier::Current, "TT24002"),
            (StorageTier::PendingAuthorization, "TT24003"),
        ] {
            let row = RecordRow::new(SubsystemType::Teller, tier, key, &Record::new()).unwrap();
            RecordRepo::upsert(&pool, &row).await.unwrap();
        }

        let counts = RecordRepo::count_by_tier(&pool).await.unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].tier, "current");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].tier, "unauthorised");
        assert_eq!(counts[1].count, 1);
    }

    #[tokio::test]
    async fn test_customer_repo() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;

        CustomerRepo::upsert(&pool, &CustomerRow::new("C100234", Some("ACME"), None))
            .await
            .unwrap();

        let customer = CustomerRepo::get_by_id(&pool, "C100234").await.unwrap();
        assert_eq!(customer.display_name(), Some("ACME"));
        assert_eq!(CustomerRepo::count(&pool).await.unwrap(), 1);

        let missing = CustomerRepo::get_by_id(&pool, "C999").await.unwrap_err();
        assert!(missing.is_not_found());
    }
}
