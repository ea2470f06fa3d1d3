//! # Config Module
//!
//! Cấu hình resolver, đọc từ file TOML. Mọi field đều có default nên file rỗng vẫn hợp lệ.
//!
//! ```toml
//! fx_key_width = 12
//! store_error_policy = "fall_through"
//! unknown_system_text = "Unknown System ID"
//! error_prefix = "Error resolving counterparty"
//! ```

use crate::key::FX_KEY_WIDTH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Lỗi khi load cấu hình
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Hành vi của tiered lookup khi một tier lỗi (khác với miss hợp lệ)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorPolicy {
    /// Log rồi chuyển sang tier kế tiếp
    #[default]
    FallThrough,
    /// Dừng tìm kiếm, trả về resolution `Failed`
    Abort,
}

/// Cấu hình resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Số ký tự đầu của reference tạo thành key FX
    pub fx_key_width: usize,

    pub store_error_policy: StoreErrorPolicy,

    /// Sentinel cho tag không nhận diện được
    pub unknown_system_text: String,

    /// Tiền tố của chuỗi lỗi trong contract string
    pub error_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fx_key_width: FX_KEY_WIDTH,
            store_error_policy: StoreErrorPolicy::FallThrough,
            unknown_system_text: "Unknown System ID".to_string(),
            error_prefix: "Error resolving counterparty".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Load cấu hình từ file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::load_str(&content)?;

        tracing::info!(path = %path.display(), "Resolver configuration loaded");
        Ok(config)
    }

    /// Load cấu hình từ string
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let config: ResolverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder: đặt store error policy
    pub fn with_store_error_policy(mut self, policy: StoreErrorPolicy) -> Self {
        self.store_error_policy = policy;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fx_key_width == 0 {
            return Err(ConfigError::Validation(
                "fx_key_width must be greater than zero".to_string(),
            ));
        }
        if self.unknown_system_text.is_empty() {
            return Err(ConfigError::Validation(
                "unknown_system_text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
