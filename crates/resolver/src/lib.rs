//! # Cpres Resolver
//!
//! Transaction-counterparty resolution engine.
//!
//! ```text
//! resolve(tag, reference)
//!   └─ Dispatcher ── SubsystemProfile (key rule, field, tiers, name source)
//!        └─ Tiered Lookup: Current → Historical → PendingAuthorization
//!             └─ Name Resolver (FT, FX, MM) ── customer directory
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cpres_persistence::{init_database, SqliteGateway};
//! use cpres_resolver::Resolver;
//!
//! let resolver = Resolver::new(SqliteGateway::new(init_database(url).await?));
//! match resolver.resolve("FT", "FT2401500123").await {
//!     Resolution::Resolved(name) => println!("{}", name.name),
//!     other => println!("{:?}", other),
//! }
//! ```

pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod lookup;
pub mod name;

pub use dispatcher::Resolver;
pub use error::{ResolveError, ResolveResult};
pub use extractor::{KeyRule, NameSource, SubsystemProfile};
pub use lookup::find_identifier;
pub use name::resolve_name;
