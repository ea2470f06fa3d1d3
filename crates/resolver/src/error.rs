//! Resolver errors
//!
//! Internal only: `Resolver::resolve` converts every error into `Resolution::Failed`.

use cpres_core::{StorageTier, SubsystemType};
use thiserror::Error;

/// Errors raised while resolving a counterparty
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Core(#[from] cpres_core::CoreError),

    /// Tier access failed and the store error policy is `Abort`
    #[error("{subsystem} lookup aborted at {tier} tier: {detail}")]
    StoreAborted {
        subsystem: SubsystemType,
        tier: StorageTier,
        detail: String,
    },
}

/// Result type alias for resolver operations
pub type ResolveResult<T> = Result<T, ResolveError>;

impl ResolveError {
    pub fn store_aborted(subsystem: SubsystemType, tier: StorageTier, detail: &str) -> Self {
        Self::StoreAborted {
            subsystem,
            tier,
            detail: detail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpres_core::CoreError;

    #[test]
    fn test_error_display() {
        let err = ResolveError::store_aborted(
            SubsystemType::FundsTransfer,
            StorageTier::Historical,
            "database is locked",
        );
        assert_eq!(
            err.to_string(),
            "FT lookup aborted at history tier: database is locked"
        );

        let err: ResolveError = CoreError::EmptyReference.into();
        assert_eq!(err.to_string(), "empty transaction reference");
    }
}
