//! Cpres Core - Domain types
//!
//! Các kiểu dữ liệu dùng chung cho toàn bộ workspace:
//! - `SubsystemType`: phân hệ sinh giao dịch (FT, FX, MM, PP, TT)
//! - `StorageTier`: phân vùng lưu trữ theo thứ tự fallback
//! - `TransactionKey`, `Record`, `RawIdentifier`
//! - `LookupOutcome`, `Resolution`: kết quả tường minh thay cho exception/string
//! - `ResolverConfig`: cấu hình TOML

pub mod config;
pub mod error;
pub mod key;
pub mod record;
pub mod resolution;
pub mod subsystem;
pub mod tier;

pub use config::{ConfigError, ResolverConfig, StoreErrorPolicy};
pub use error::{CoreError, CoreResult};
pub use key::{TransactionKey, FX_KEY_WIDTH};
pub use record::{FieldValue, RawIdentifier, Record};
pub use resolution::{LookupOutcome, NameOrigin, Resolution, ResolvedName};
pub use subsystem::SubsystemType;
pub use tier::StorageTier;
