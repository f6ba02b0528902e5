//! # workforce-database
//!
//! Connection management, SQL migrations, and the repository layer for
//! Workforce. Each repository is an `async_trait` object with a
//! PostgreSQL implementation and an in-memory one backed by `dashmap`.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::Repositories;
