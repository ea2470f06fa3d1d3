//! SQLite persistence module
//!
//! Repository pattern cho SQLite database access, cùng gateway đọc theo tier.

pub mod gateway;
pub mod repos;
pub mod schema;

pub use gateway::SqliteGateway;
pub use repos::{create_pool, init_database, run_migrations, CustomerRepo, RecordRepo};
pub use schema::{CustomerRow, RecordCountRow, RecordRow};
