//! # Error Module
//!
//! Domain errors cho Cpres sử dụng thiserror.

use thiserror::Error;

/// Lỗi domain của core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("empty transaction reference")]
    EmptyReference,
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;
