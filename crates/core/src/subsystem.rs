//! # Subsystem Module
//!
//! Định nghĩa SubsystemType - phân hệ nghiệp vụ sinh ra giao dịch.
//! - FT: Funds Transfer (chuyển tiền)
//! - FX: Foreign Exchange (ngoại hối)
//! - MM: Money Market (thị trường tiền tệ)
//! - PP: Payment Order (lệnh thanh toán)
//! - TT: Teller (giao dịch quầy)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phân hệ nghiệp vụ sinh ra giao dịch.
///
/// Mỗi phân hệ có cấu trúc record và quy tắc tạo key riêng.
/// Tag không thuộc danh sách này được coi là `Unknown` (xem [`SubsystemType::from_tag`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubsystemType {
    /// Chuyển tiền - FUNDS.TRANSFER
    #[serde(rename = "FT")]
    FundsTransfer,
    /// Ngoại hối - FOREX
    #[serde(rename = "FX")]
    ForeignExchange,
    /// Thị trường tiền tệ - MM.MONEY.MARKET
    #[serde(rename = "MM")]
    MoneyMarket,
    /// Lệnh thanh toán - PAYMENT.ORDER
    #[serde(rename = "PP")]
    PaymentOrder,
    /// Giao dịch quầy - TELLER
    #[serde(rename = "TT")]
    Teller,
}

impl SubsystemType {
    /// Tất cả các phân hệ được hỗ trợ
    pub const ALL: [SubsystemType; 5] = [
        SubsystemType::FundsTransfer,
        SubsystemType::ForeignExchange,
        SubsystemType::MoneyMarket,
        SubsystemType::PaymentOrder,
        SubsystemType::Teller,
    ];

    /// Parse từ tag do caller truyền vào.
    ///
    /// Chỉ bỏ khoảng trắng hai đầu; so khớp phân biệt hoa thường.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "FT" => Some(SubsystemType::FundsTransfer),
            "FX" => Some(SubsystemType::ForeignExchange),
            "MM" => Some(SubsystemType::MoneyMarket),
            "PP" => Some(SubsystemType::PaymentOrder),
            "TT" => Some(SubsystemType::Teller),
            _ => None,
        }
    }

    /// Trả về tag hai ký tự (dùng làm code trong DB)
    pub fn tag(&self) -> &'static str {
        match self {
            SubsystemType::FundsTransfer => "FT",
            SubsystemType::ForeignExchange => "FX",
            SubsystemType::MoneyMarket => "MM",
            SubsystemType::PaymentOrder => "PP",
            SubsystemType::Teller => "TT",
        }
    }

    /// Tên application trên core-banking platform
    pub fn application(&self) -> &'static str {
        match self {
            SubsystemType::FundsTransfer => "FUNDS.TRANSFER",
            SubsystemType::ForeignExchange => "FOREX",
            SubsystemType::MoneyMarket => "MM.MONEY.MARKET",
            SubsystemType::PaymentOrder => "PAYMENT.ORDER",
            SubsystemType::Teller => "TELLER",
        }
    }
}

impl fmt::Display for SubsystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(SubsystemType::from_tag("FT"), Some(SubsystemType::FundsTransfer));
        assert_eq!(SubsystemType::from_tag(" FX "), Some(SubsystemType::ForeignExchange));
        assert_eq!(SubsystemType::from_tag("TT"), Some(SubsystemType::Teller));
        assert_eq!(SubsystemType::from_tag("ft"), None);
        assert_eq!(SubsystemType::from_tag("LD"), None);
        assert_eq!(SubsystemType::from_tag(""), None);
    }

    #[test]
    fn test_tag_roundtrip() {
        for subsystem in SubsystemType::ALL {
            assert_eq!(SubsystemType::from_tag(subsystem.tag()), Some(subsystem));
        }
    }

    #[test]
    fn test_serde_uses_tag() {
        let json = serde_json::to_string(&SubsystemType::MoneyMarket).unwrap();
        assert_eq!(json, "\"MM\"");

        let parsed: SubsystemType = serde_json::from_str("\"PP\"").unwrap();
        assert_eq!(parsed, SubsystemType::PaymentOrder);
    }
}
