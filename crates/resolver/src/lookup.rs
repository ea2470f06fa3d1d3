//! Tiered Lookup
//!
//! Searches the profile's tiers in order and stops at the first tier whose
//! record yields a non-empty identifier. Each tier is tried at most once.

use cpres_core::{LookupOutcome, RawIdentifier, StoreErrorPolicy, TransactionKey};
use cpres_persistence::StorageGateway;
use tracing::{debug, warn};

use crate::error::{ResolveError, ResolveResult};
use crate::extractor::SubsystemProfile;

/// Find the counterparty identifier for `key`.
///
/// Misses and empty extractions fall through to the next tier. A store error
/// is logged and then either falls through or aborts, depending on `policy`.
/// Exhausting every tier yields an absent identifier, not an error.
pub async fn find_identifier<G>(
    gateway: &G,
    profile: &SubsystemProfile,
    key: &TransactionKey,
    policy: StoreErrorPolicy,
) -> ResolveResult<RawIdentifier>
where
    G: StorageGateway + ?Sized,
{
    for &tier in profile.tiers {
        match gateway.fetch(profile.subsystem, tier, key).await {
            LookupOutcome::Found(record) => {
                let identifier = profile.extract(&record);
                if !identifier.is_empty() {
                    debug!(%tier, %key, field = profile.field, "Identifier found");
                    return Ok(identifier);
                }
                debug!(%tier, %key, field = profile.field, "Record has no identifier");
            }
            LookupOutcome::NotFound => {
                debug!(%tier, %key, "Record not found");
            }
            LookupOutcome::StoreError(detail) => {
                warn!(subsystem = %profile.subsystem, %tier, %key, error = %detail, "Tier lookup failed");
                if policy == StoreErrorPolicy::Abort {
                    return Err(ResolveError::store_aborted(profile.subsystem, tier, &detail));
                }
            }
        }
    }

    Ok(RawIdentifier::absent())
}
