//! Name Resolver - customer identifier to display name

use cpres_core::{LookupOutcome, NameOrigin, RawIdentifier, Resolution};
use cpres_persistence::StorageGateway;
use tracing::{debug, warn};

/// Resolve an identifier through the customer directory.
///
/// The directory is advisory: a miss or an error degrades to the raw identifier.
/// An empty identifier is passed through as `NotFound` without a lookup.
pub async fn resolve_name<G>(gateway: &G, identifier: &RawIdentifier) -> Resolution
where
    G: StorageGateway + ?Sized,
{
    let Some(customer_id) = identifier.value() else {
        return Resolution::NotFound;
    };

    match gateway.directory_name(customer_id).await {
        LookupOutcome::Found(name) if !name.trim().is_empty() => {
            Resolution::resolved(name.trim(), NameOrigin::Directory)
        }
        LookupOutcome::Found(_) | LookupOutcome::NotFound => {
            debug!(customer_id, "Customer not in directory");
            Resolution::resolved(customer_id, NameOrigin::RawIdentifier)
        }
        LookupOutcome::StoreError(detail) => {
            warn!(customer_id, error = %detail, "Directory lookup failed");
            Resolution::resolved(customer_id, NameOrigin::RawIdentifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpres_persistence::MemoryGateway;

    #[tokio::test]
    async fn test_directory_hit() {
        let gateway = MemoryGateway::new();
        gateway.insert_customer("C100234", "ACME TRADING");

        let resolution = resolve_name(&gateway, &RawIdentifier::from("C100234")).await;
        assert_eq!(
            resolution,
            Resolution::resolved("ACME TRADING", NameOrigin::Directory)
        );
    }

    #[tokio::test]
    async fn test_directory_miss_returns_identifier() {
        let gateway = MemoryGateway::new();

        let resolution = resolve_name(&gateway, &RawIdentifier::from("C100234")).await;
        assert_eq!(
            resolution,
            Resolution::resolved("C100234", NameOrigin::RawIdentifier)
        );
    }

    #[tokio::test]
    async fn test_blank_directory_name_returns_identifier() {
        let gateway = MemoryGateway::new();
        gateway.insert_customer("C100234", "  ");

        let resolution = resolve_name(&gateway, &RawIdentifier::from("C100234")).await;
        assert_eq!(
            resolution,
            Resolution::resolved("C100234", NameOrigin::RawIdentifier)
        );
        assert_eq!(gateway.directory_call_count(), 1);
    }

    #[tokio::test]
    async fn test_directory_error_returns_identifier() {
        let gateway = MemoryGateway::new();
        gateway.fail_directory("directory offline");

        let resolution = resolve_name(&gateway, &RawIdentifier::from("C100234")).await;
        assert_eq!(resolution.name(), Some("C100234"));
    }

    #[tokio::test]
    async fn test_empty_identifier_skips_directory() {
        let gateway = MemoryGateway::new();

        assert_eq!(
            resolve_name(&gateway, &RawIdentifier::absent()).await,
            Resolution::NotFound
        );
        assert_eq!(
            resolve_name(&gateway, &RawIdentifier::from("")).await,
            Resolution::NotFound
        );
        assert_eq!(gateway.directory_call_count(), 0);
    }
}
