//! CLI command handlers

pub mod load;
pub mod resolve;
