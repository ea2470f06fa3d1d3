//! # Record Module
//!
//! Record của platform: map từ tên field sang giá trị single hoặc multi-value.
//! Record được lưu dưới dạng JSON object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Giá trị của một field: đơn hoặc đa trị (multi-value).
///
/// Giá trị không phải string (số, bool, object, list lẫn kiểu) được giữ nguyên
/// trong `Other`; `first()` của chúng là `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Giá trị đầu tiên (với Single là chính nó)
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldValue::Single(value) => Some(value.as_str()),
            FieldValue::Multi(values) => values.first().map(String::as_str),
            FieldValue::Other(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::Multi(values.into_iter().map(str::to_string).collect())
    }
}

/// Record giao dịch thô, chưa gắn với schema của phân hệ nào.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: thêm field
    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Giá trị đầu tiên của field, `None` nếu field không tồn tại hoặc list rỗng
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::first)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse từ JSON body lưu trong store; body phải là JSON object
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Identifier thô trích từ record, trước khi tra directory.
///
/// Vắng mặt và rỗng được coi như nhau: "tier này không cho kết quả".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawIdentifier(Option<String>);

impl RawIdentifier {
    pub fn absent() -> Self {
        Self(None)
    }

    /// Tạo từ giá trị field; khoảng trắng hai đầu bị bỏ
    pub fn from_value(value: Option<&str>) -> Self {
        Self(value.map(|v| v.trim().to_string()))
    }

    /// `true` nếu vắng mặt hoặc rỗng
    pub fn is_empty(&self) -> bool {
        self.0.as_deref().map_or(true, str::is_empty)
    }

    /// Giá trị non-empty, `None` nếu rỗng
    pub fn value(&self) -> Option<&str> {
        self.0.as_deref().filter(|v| !v.is_empty())
    }
}

impl From<&str> for RawIdentifier {
    fn from(value: &str) -> Self {
        Self::from_value(Some(value))
    }
}
