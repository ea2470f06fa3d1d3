//! # Tier Module
//!
//! StorageTier - ba phân vùng lưu trữ của cùng một họ record.
//! Thứ tự khai báo chính là thứ tự fallback khi tìm kiếm.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phân vùng lưu trữ theo vòng đời record.
///
/// - Current: record đang sống (đã authorise)
/// - Historical: record đã archive (`$HIS`)
/// - PendingAuthorization: record chờ duyệt (`$NAU`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageTier {
    Current,
    Historical,
    PendingAuthorization,
}

impl StorageTier {
    /// Thứ tự tìm kiếm cố định: Current → Historical → PendingAuthorization
    pub const SEARCH_ORDER: [StorageTier; 3] = [
        StorageTier::Current,
        StorageTier::Historical,
        StorageTier::PendingAuthorization,
    ];

    /// Code lưu trong DB
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageTier::Current => "current",
            StorageTier::Historical => "history",
            StorageTier::PendingAuthorization => "unauthorised",
        }
    }

    /// Parse từ code DB, chấp nhận thêm hậu tố file của platform
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "current" | "live" | "" => Some(StorageTier::Current),
            "history" | "historical" | "$his" => Some(StorageTier::Historical),
            "unauthorised" | "unauthorized" | "pending" | "$nau" => {
                Some(StorageTier::PendingAuthorization)
            }
            _ => None,
        }
    }

    /// Hậu tố tên file trên platform
    pub fn file_suffix(&self) -> &'static str {
        match self {
            StorageTier::Current => "",
            StorageTier::Historical => "$HIS",
            StorageTier::PendingAuthorization => "$NAU",
        }
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
