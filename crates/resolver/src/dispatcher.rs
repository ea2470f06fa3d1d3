//! Dispatcher - entry point of a counterparty resolution
//!
//! Maps the subsystem tag to its profile, runs the tiered lookup, then either
//! resolves the identifier through the directory (FT, FX, MM) or returns the
//! record field directly (PP, TT).

use std::any::Any;
use std::panic::AssertUnwindSafe;

use cpres_core::{NameOrigin, Resolution, ResolverConfig, SubsystemType};
use cpres_persistence::StorageGateway;
use futures::FutureExt;
use tracing::{debug, error, warn, Instrument};
use uuid::Uuid;

use crate::error::ResolveResult;
use crate::extractor::SubsystemProfile;
use crate::lookup::find_identifier;
use crate::name::resolve_name;

/// Counterparty resolver
///
/// Holds no mutable state: one instance can serve concurrent callers as long
/// as the gateway supports concurrent reads.
pub struct Resolver<G> {
    gateway: G,
    config: ResolverConfig,
}

impl<G: StorageGateway> Resolver<G> {
    /// Create resolver with default configuration
    pub fn new(gateway: G) -> Self {
        Self::with_config(gateway, ResolverConfig::default())
    }

    pub fn with_config(gateway: G, config: ResolverConfig) -> Self {
        Self { gateway, config }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the counterparty name of `reference`, originated by `subsystem_tag`.
    ///
    /// Never fails: unknown tags give `UnknownType` without touching the store,
    /// and internal errors or a panicking gateway are folded into `Failed`.
    pub async fn resolve(&self, subsystem_tag: &str, reference: &str) -> Resolution {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("resolve", %request_id, tag = subsystem_tag, reference);

        async move {
            let Some(subsystem) = SubsystemType::from_tag(subsystem_tag) else {
                debug!("Unknown subsystem tag");
                return Resolution::UnknownType;
            };

            match AssertUnwindSafe(self.dispatch(subsystem, reference))
                .catch_unwind()
                .await
            {
                Ok(Ok(resolution)) => resolution,
                Ok(Err(e)) => {
                    warn!(error = %e, "Resolution failed");
                    Resolution::failed(e.to_string())
                }
                Err(payload) => {
                    let detail = panic_detail(payload.as_ref());
                    error!(error = %detail, "Resolution panicked");
                    Resolution::failed(detail)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Resolve and render with the flat string contract
    /// (name, raw identifier, "Unknown System ID", "" or an error description).
    pub async fn resolve_to_string(&self, subsystem_tag: &str, reference: &str) -> String {
        self.resolve(subsystem_tag, reference)
            .await
            .render(&self.config)
    }

    async fn dispatch(&self, subsystem: SubsystemType, reference: &str) -> ResolveResult<Resolution> {
        let profile = SubsystemProfile::for_subsystem(subsystem);
        let key = profile.derive_key(reference, self.config.fx_key_width)?;

        let identifier =
            find_identifier(&self.gateway, profile, &key, self.config.store_error_policy).await?;

        if profile.needs_directory() {
            return Ok(resolve_name(&self.gateway, &identifier).await);
        }
        Ok(match identifier.value() {
            Some(name) => Resolution::resolved(name, NameOrigin::Record),
            None => Resolution::NotFound,
        })
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    format!("internal error: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cpres_core::{LookupOutcome, Record, StorageTier, StoreErrorPolicy, TransactionKey};
    use cpres_persistence::MemoryGateway;
    use std::sync::Arc;

    /// Gateway whose record store panics on every fetch
    struct PanickingGateway;

    #[async_trait]
    impl StorageGateway for PanickingGateway {
        async fn fetch(
            &self,
            _subsystem: SubsystemType,
            _tier: StorageTier,
            key: &TransactionKey,
        ) -> LookupOutcome<Record> {
            panic!("record store crashed on {}", key)
        }

        async fn directory_name(&self, _customer_id: &str) -> LookupOutcome<String> {
            LookupOutcome::NotFound
        }
    }

    #[tokio::test]
    async fn test_unknown_tag_touches_nothing() {
        let resolver = Resolver::new(MemoryGateway::new());

        for tag in ["LD", "ft", "", "FTX"] {
            assert_eq!(resolver.resolve(tag, "LD2401500001").await, Resolution::UnknownType);
            assert_eq!(
                resolver.resolve_to_string(tag, "LD2401500001").await,
                "Unknown System ID"
            );
        }
        assert!(resolver.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn test_mm_resolves_through_directory() {
        let gateway = MemoryGateway::new();
        gateway.insert_record(
            SubsystemType::MoneyMarket,
            StorageTier::Current,
            "MM2401500042",
            Record::new().with_field("CUSTOMER.ID", "C100234"),
        );
        gateway.insert_customer("C100234", "ACME TRADING");
        let resolver = Resolver::new(gateway);

        assert_eq!(
            resolver.resolve("MM", "MM2401500042").await,
            Resolution::resolved("ACME TRADING", NameOrigin::Directory)
        );
    }

    #[tokio::test]
    async fn test_teller_name_bypasses_directory() {
        let gateway = MemoryGateway::new();
        gateway.insert_record(
            SubsystemType::Teller,
            StorageTier::Historical,
            "TT24015ABCDE",
            Record::new().with_field("CUSTOMER.NAME", "JANE DOE"),
        );
        let resolver = Resolver::new(gateway);

        assert_eq!(
            resolver.resolve("TT", "TT24015ABCDE").await,
            Resolution::resolved("JANE DOE", NameOrigin::Record)
        );
        assert_eq!(resolver.gateway().directory_call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_reference_fails() {
        let resolver = Resolver::new(MemoryGateway::new());

        let resolution = resolver.resolve("FT", "  ").await;
        assert!(resolution.is_failed());
        assert_eq!(
            resolution.render(resolver.config()),
            "Error resolving counterparty: empty transaction reference"
        );
        assert!(resolver.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn test_reference_is_used_verbatim_as_key() {
        let resolver = Resolver::new(MemoryGateway::new());

        resolver.resolve("MM", " MM2401500042").await;
        assert_eq!(resolver.gateway().fetched_keys(), vec![" MM2401500042"; 3]);
    }

    #[tokio::test]
    async fn test_abort_policy_surfaces_failure() {
        let gateway = MemoryGateway::new();
        gateway.fail_tier(SubsystemType::ForeignExchange, StorageTier::Current, "malformed record");
        let config = ResolverConfig::default().with_store_error_policy(StoreErrorPolicy::Abort);
        let resolver = Resolver::with_config(gateway, config);

        let resolution = resolver.resolve("FX", "FX2401500001AB").await;
        assert_eq!(
            resolution,
            Resolution::failed("FX lookup aborted at current tier: malformed record")
        );
    }

    #[tokio::test]
    async fn test_gateway_panic_becomes_failure() {
        let resolver = Arc::new(Resolver::new(PanickingGateway));

        let task = {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve("FT", "FT2401500123").await })
        };
        let resolution = task.await.expect("resolve must not panic");

        assert_eq!(
            resolution,
            Resolution::failed("internal error: record store crashed on FT2401500123")
        );
        assert_eq!(
            resolver.resolve_to_string("FT", "FT2401500123").await,
            "Error resolving counterparty: internal error: record store crashed on FT2401500123"
        );
    }
}
