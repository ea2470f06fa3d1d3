//! # Cpres Persistence
//!
//! Storage Gateway cho resolver - SQLite tiered record store + in-memory gateway.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     StorageGateway                            │
//! │  ┌────────────────┐   ┌────────────────┐   ┌───────────────┐ │
//! │  │ SqliteGateway  │   │ MemoryGateway  │   │   Fixtures    │ │
//! │  │ (records,      │   │ (tests, call   │   │ (JSON seed)   │ │
//! │  │  customers)    │   │  recording)    │   │               │ │
//! │  └────────────────┘   └────────────────┘   └───────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cpres_persistence::{init_database, SqliteGateway, StorageGateway};
//!
//! let pool = init_database("sqlite:data/cpres.db").await?;
//! let gateway = SqliteGateway::new(pool);
//! let outcome = gateway.fetch(SubsystemType::FundsTransfer, StorageTier::Current, &key).await;
//! ```

pub mod error;
pub mod fixture;
pub mod gateway;
pub mod memory;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use fixture::{Fixture, FixtureCustomer, FixtureRecord, LoadSummary};
pub use gateway::StorageGateway;
pub use memory::{GatewayCall, MemoryGateway};
pub use sqlite::{
    create_pool, init_database, run_migrations, CustomerRepo, CustomerRow, RecordCountRow,
    RecordRepo, RecordRow, SqliteGateway,
};
