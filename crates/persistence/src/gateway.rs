//! Storage Gateway - interface chỉ đọc mà resolver truy vấn
//!
//! Mỗi lần truy cập trả về [`LookupOutcome`] tường minh: miss hợp lệ và store lỗi
//! là hai variant khác nhau.

use async_trait::async_trait;
use cpres_core::{LookupOutcome, Record, StorageTier, SubsystemType, TransactionKey};
use std::sync::Arc;

/// Storage Gateway trait - record store theo tier cùng customer directory
///
/// Implementations:
/// - `SqliteGateway`: records và customers trong SQLite
/// - `MemoryGateway`: map trong bộ nhớ kèm call log, cho tests và demo
///
/// Implementation phải an toàn khi đọc đồng thời.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Lấy một record của `subsystem` trong `tier` theo key
    async fn fetch(
        &self,
        subsystem: SubsystemType,
        tier: StorageTier,
        key: &TransactionKey,
    ) -> LookupOutcome<Record>;

    /// Tra display name của customer trong directory
    async fn directory_name(&self, customer_id: &str) -> LookupOutcome<String>;
}

#[async_trait]
impl<G: StorageGateway + ?Sized> StorageGateway for Arc<G> {
    async fn fetch(
        &self,
        subsystem: SubsystemType,
        tier: StorageTier,
        key: &TransactionKey,
    ) -> LookupOutcome<Record> {
        (**self).fetch(subsystem, tier, key).await
    }

    async fn directory_name(&self, customer_id: &str) -> LookupOutcome<String> {
        (**self).directory_name(customer_id).await
    }
}
