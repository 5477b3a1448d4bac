//! # fleet-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `VehiclePersistencePort`: CRUD, plate uniqueness, status, history join
//!   - `MaintenancePersistencePort`: insert and cost aggregation
//!   - `UnitOfWork`: scoped transaction around multi-write use-cases
//! - Define **driving/inbound ports** as use-case structs:
//!   - `VehicleService`: register, look up, list, update, delete
//!   - `MaintenanceService`: record maintenance, total cost
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `fleet-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
