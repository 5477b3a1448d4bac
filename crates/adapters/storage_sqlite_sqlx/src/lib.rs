//! # fleet-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the port traits defined in `fleet-app::ports`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Back the unit-of-work port with real `SQLite` transactions
//!
//! ## Dependency rule
//! Depends on `fleet-app` (for port traits) and `fleet-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod maintenance_repo;
mod pool;
mod unit_of_work;
mod vehicle_repo;

pub use error::StorageError;
pub use maintenance_repo::SqliteMaintenanceRepository;
pub use pool::{Config, DEFAULT_MAX_CONNECTIONS, Database};
pub use unit_of_work::{SqliteTransactionScope, SqliteUnitOfWork};
pub use vehicle_repo::SqliteVehicleRepository;
