//! # lendstock-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`DataGateway`](lendstock_app::ports::DataGateway) port
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `lendstock-app` (for port traits) and `lendstock-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod equipment_repo;
pub mod error;
mod gateway;
mod person_repo;
pub mod pool;
mod rental_repo;

pub use error::StorageError;
pub use gateway::SqliteGateway;
pub use pool::{Config, Database};
