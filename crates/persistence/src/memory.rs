//! In-memory gateway
//!
//! Lưu records và customers trong map, ghi lại mọi call nhận được.
//! Dùng cho unit tests (đếm số call) và demo không cần database.

use async_trait::async_trait;
use cpres_core::{LookupOutcome, Record, StorageTier, SubsystemType, TransactionKey};
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::gateway::StorageGateway;

/// Một call gateway đã nhận
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Fetch {
        subsystem: SubsystemType,
        tier: StorageTier,
        key: String,
    },
    Directory {
        customer_id: String,
    },
}

type RecordKey = (SubsystemType, StorageTier, String);

/// Storage Gateway trong bộ nhớ
#[derive(Default)]
pub struct MemoryGateway {
    records: RwLock<HashMap<RecordKey, Record>>,
    customers: RwLock<HashMap<String, String>>,
    /// Các tier luôn trả về store error
    failing_tiers: RwLock<HashMap<(SubsystemType, StorageTier), String>>,
    failing_directory: RwLock<Option<String>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lưu record theo (subsystem, tier, key)
    pub fn insert_record(
        &self,
        subsystem: SubsystemType,
        tier: StorageTier,
        key: &str,
        record: Record,
    ) {
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert((subsystem, tier, key.to_string()), record);
    }

    /// Lưu display name của customer
    pub fn insert_customer(&self, customer_id: &str, display_name: &str) {
        self.customers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(customer_id.to_string(), display_name.to_string());
    }

    /// Mọi fetch trên (subsystem, tier) trả về store error
    pub fn fail_tier(&self, subsystem: SubsystemType, tier: StorageTier, detail: &str) {
        self.failing_tiers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert((subsystem, tier), detail.to_string());
    }

    /// Mọi lần tra directory trả về store error
    pub fn fail_directory(&self, detail: &str) {
        *self
            .failing_directory
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(detail.to_string());
    }

    /// Tất cả call đã nhận, theo thứ tự
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Các tier đã fetch, theo thứ tự
    pub fn fetched_tiers(&self) -> Vec<StorageTier> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Fetch { tier, .. } => Some(tier),
                GatewayCall::Directory { .. } => None,
            })
            .collect()
    }

    /// Các key đã fetch, theo thứ tự
    pub fn fetched_keys(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Fetch { key, .. } => Some(key),
                GatewayCall::Directory { .. } => None,
            })
            .collect()
    }

    /// Số lần tra directory
    pub fn directory_call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, GatewayCall::Directory { .. }))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record_call(&self, call: GatewayCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

#[async_trait]
impl StorageGateway for MemoryGateway {
    async fn fetch(
        &self,
        subsystem: SubsystemType,
        tier: StorageTier,
        key: &TransactionKey,
    ) -> LookupOutcome<Record> {
        self.record_call(GatewayCall::Fetch {
            subsystem,
            tier,
            key: key.to_string(),
        });

        let failing = self.failing_tiers.read().unwrap_or_else(|e| e.into_inner());
        if let Some(detail) = failing.get(&(subsystem, tier)) {
            return LookupOutcome::store_error(detail.clone());
        }

        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        match records.get(&(subsystem, tier, key.to_string())) {
            Some(record) => LookupOutcome::Found(record.clone()),
            None => LookupOutcome::NotFound,
        }
    }

    async fn directory_name(&self, customer_id: &str) -> LookupOutcome<String> {
        self.record_call(GatewayCall::Directory {
            customer_id: customer_id.to_string(),
        });

        let failing = self.failing_directory.read().unwrap_or_else(|e| e.into_inner());
        if let Some(detail) = failing.as_ref() {
            return LookupOutcome::store_error(detail.clone());
        }

        let customers = self.customers.read().unwrap_or_else(|e| e.into_inner());
        match customers.get(customer_id) {
            Some(name) => LookupOutcome::Found(name.clone()),
            None => LookupOutcome::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(reference: &str) -> TransactionKey {
        TransactionKey::new(reference).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_found_and_missing() {
        let gateway = MemoryGateway::new();
        let record = Record::new().with_field("COUNTERPARTY", "C100234");
        gateway.insert_record(
            SubsystemType::ForeignExchange,
            StorageTier::Historical,
            "FX2401500001",
            record.clone(),
        );

        let hit = gateway
            .fetch(
                SubsystemType::ForeignExchange,
                StorageTier::Historical,
                &key("FX2401500001"),
            )
            .await;
        assert_eq!(hit, LookupOutcome::Found(record));

        let miss = gateway
            .fetch(
                SubsystemType::ForeignExchange,
                StorageTier::Current,
                &key("FX2401500001"),
            )
            .await;
        assert_eq!(miss, LookupOutcome::NotFound);

        assert_eq!(
            gateway.fetched_tiers(),
            vec![StorageTier::Historical, StorageTier::Current]
        );
    }

    #[tokio::test]
    async fn test_failing_tier() {
        let gateway = MemoryGateway::new();
        gateway.fail_tier(SubsystemType::Teller, StorageTier::Current, "disk offline");

        let outcome = gateway
            .fetch(SubsystemType::Teller, StorageTier::Current, &key("TT24015"))
            .await;
        assert_eq!(outcome, LookupOutcome::StoreError("disk offline".to_string()));
    }

    #[tokio::test]
    async fn test_directory_calls_are_counted() {
        let gateway = MemoryGateway::new();
        gateway.insert_customer("C100234", "ACME TRADING");

        assert_eq!(
            gateway.directory_name("C100234").await,
            LookupOutcome::Found("ACME TRADING".to_string())
        );
        assert_eq!(gateway.directory_name("C999").await, LookupOutcome::NotFound);
        assert_eq!(gateway.directory_call_count(), 2);

        gateway.fail_directory("directory locked");
        assert!(gateway.directory_name("C100234").await.is_store_error());

        gateway.clear_calls();
        assert!(gateway.calls().is_empty());
    }
}
