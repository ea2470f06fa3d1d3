//! TransactionKey - key dùng để tra cứu record trong store.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Độ rộng key mặc định của FX: phần còn lại của reference là suffix nội bộ.
pub const FX_KEY_WIDTH: usize = 12;

/// Key đã được chuẩn hoá, sẵn sàng dùng để query store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionKey(String);

impl TransactionKey {
    /// Key giữ nguyên reference (FT, MM, PP, TT), kể cả khoảng trắng.
    /// Reference rỗng hoặc toàn khoảng trắng bị từ chối.
    pub fn new(reference: &str) -> CoreResult<Self> {
        if reference.trim().is_empty() {
            return Err(CoreError::EmptyReference);
        }
        Ok(Self(reference.to_string()))
    }

    /// Key chỉ lấy `width` ký tự đầu của reference.
    ///
    /// Reference ngắn hơn `width` được dùng nguyên vẹn.
    pub fn truncated(reference: &str, width: usize) -> CoreResult<Self> {
        let key = Self::new(reference)?;
        Ok(Self(key.0.chars().take(width).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TransactionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
