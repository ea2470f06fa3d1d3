//! # Resolution Module
//!
//! Kết quả tra cứu theo từng tier (`LookupOutcome`) và kết quả cuối cùng
//! của một lần resolve (`Resolution`).

use crate::config::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kết quả của một lần truy cập store (một tier hoặc directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    /// Có record
    Found(T),
    /// Store trả lời "không có"
    NotFound,
    /// Store lỗi (IO, record hỏng, ...) - khác với NotFound hợp lệ
    StoreError(String),
}

impl<T> LookupOutcome<T> {
    pub fn store_error(detail: impl Into<String>) -> Self {
        LookupOutcome::StoreError(detail.into())
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    pub fn is_store_error(&self) -> bool {
        matches!(self, LookupOutcome::StoreError(_))
    }

    /// Giá trị nếu Found
    pub fn found(self) -> Option<T> {
        match self {
            LookupOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LookupOutcome<U> {
        match self {
            LookupOutcome::Found(value) => LookupOutcome::Found(f(value)),
            LookupOutcome::NotFound => LookupOutcome::NotFound,
            LookupOutcome::StoreError(detail) => LookupOutcome::StoreError(detail),
        }
    }
}

/// Nguồn gốc của tên trả về
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameOrigin {
    /// Display name lấy từ customer directory
    Directory,
    /// Directory không có, trả về identifier thô
    RawIdentifier,
    /// Field của chính record giao dịch (PP, TT)
    Record,
}

/// Tên đã resolve cùng nguồn gốc của nó
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedName {
    pub name: String,
    pub origin: NameOrigin,
}

impl ResolvedName {
    pub fn new(name: impl Into<String>, origin: NameOrigin) -> Self {
        Self {
            name: name.into(),
            origin,
        }
    }
}

/// Kết quả cuối cùng của một lần resolve counterparty.
///
/// Thay cho kênh string duy nhất: caller branch theo variant thay vì so khớp nội dung.
/// [`Resolution::render`] vẫn cho ra string theo contract cũ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Resolved(ResolvedName),
    NotFound,
    UnknownType,
    Failed { detail: String },
}

impl Resolution {
    pub fn resolved(name: impl Into<String>, origin: NameOrigin) -> Self {
        Resolution::Resolved(ResolvedName::new(name, origin))
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Resolution::Failed {
            detail: detail.into(),
        }
    }

    /// Tên đã resolve, nếu có
    pub fn name(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(resolved) => Some(resolved.name.as_str()),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Resolution::Failed { .. })
    }

    /// Render thành string theo contract cũ:
    /// tên / identifier thô / sentinel "Unknown System ID" / "" / chuỗi mô tả lỗi.
    pub fn render(&self, config: &ResolverConfig) -> String {
        match self {
            Resolution::Resolved(resolved) => resolved.name.clone(),
            Resolution::NotFound => String::new(),
            Resolution::UnknownType => config.unknown_system_text.clone(),
            Resolution::Failed { detail } => format!("{}: {}", config.error_prefix, detail),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&ResolverConfig::default()))
    }
}
