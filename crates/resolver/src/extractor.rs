//! Type Extractor Set
//!
//! One [`SubsystemProfile`] per subsystem type. A profile says how to turn the
//! caller's reference into a store key, which tiers to search, which field
//! carries the counterparty, and whether that field still needs a directory
//! lookup. The lookup and dispatch code is generic over this table.

use cpres_core::{
    CoreResult, RawIdentifier, Record, StorageTier, SubsystemType, TransactionKey,
};

/// How the store key is derived from the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRule {
    /// Reference used as-is
    Identity,
    /// First `fx_key_width` characters only; the rest is an internal suffix
    Prefix,
}

/// What the extracted field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// A customer identifier, resolved through the directory
    Directory,
    /// Already a display name, returned as-is
    Record,
}

/// Extraction strategy for one subsystem type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsystemProfile {
    pub subsystem: SubsystemType,
    /// Field holding the counterparty; multi-valued fields yield their first entry
    pub field: &'static str,
    pub key_rule: KeyRule,
    /// Tiers to search, in order
    pub tiers: &'static [StorageTier],
    pub name_source: NameSource,
}

const ALL_TIERS: &[StorageTier] = &StorageTier::SEARCH_ORDER;
const CURRENT_ONLY: &[StorageTier] = &[StorageTier::Current];

pub const FUNDS_TRANSFER: SubsystemProfile = SubsystemProfile {
    subsystem: SubsystemType::FundsTransfer,
    field: "ORDERING.CUST",
    key_rule: KeyRule::Identity,
    tiers: ALL_TIERS,
    name_source: NameSource::Directory,
};

pub const FOREIGN_EXCHANGE: SubsystemProfile = SubsystemProfile {
    subsystem: SubsystemType::ForeignExchange,
    field: "COUNTERPARTY",
    key_rule: KeyRule::Prefix,
    tiers: ALL_TIERS,
    name_source: NameSource::Directory,
};

pub const MONEY_MARKET: SubsystemProfile = SubsystemProfile {
    subsystem: SubsystemType::MoneyMarket,
    field: "CUSTOMER.ID",
    key_rule: KeyRule::Identity,
    tiers: ALL_TIERS,
    name_source: NameSource::Directory,
};

pub const PAYMENT_ORDER: SubsystemProfile = SubsystemProfile {
    subsystem: SubsystemType::PaymentOrder,
    field: "DEBIT.PARTY.ADDR",
    key_rule: KeyRule::Identity,
    tiers: CURRENT_ONLY,
    name_source: NameSource::Record,
};

pub const TELLER: SubsystemProfile = SubsystemProfile {
    subsystem: SubsystemType::Teller,
    field: "CUSTOMER.NAME",
    key_rule: KeyRule::Identity,
    tiers: ALL_TIERS,
    name_source: NameSource::Record,
};

impl SubsystemProfile {
    /// Profile for a subsystem type
    pub fn for_subsystem(subsystem: SubsystemType) -> &'static SubsystemProfile {
        match subsystem {
            SubsystemType::FundsTransfer => &FUNDS_TRANSFER,
            SubsystemType::ForeignExchange => &FOREIGN_EXCHANGE,
            SubsystemType::MoneyMarket => &MONEY_MARKET,
            SubsystemType::PaymentOrder => &PAYMENT_ORDER,
            SubsystemType::Teller => &TELLER,
        }
    }

    /// Store key for a caller reference
    pub fn derive_key(&self, reference: &str, fx_key_width: usize) -> CoreResult<TransactionKey> {
        match self.key_rule {
            KeyRule::Identity => TransactionKey::new(reference),
            KeyRule::Prefix => TransactionKey::truncated(reference, fx_key_width),
        }
    }

    /// Pull the counterparty field out of a record; a missing field is an absent identifier
    pub fn extract(&self, record: &Record) -> RawIdentifier {
        RawIdentifier::from_value(record.first_value(self.field))
    }

    /// `true` when the extracted field is a customer id, not a display name
    pub fn needs_directory(&self) -> bool {
        self.name_source == NameSource::Directory
    }
}
