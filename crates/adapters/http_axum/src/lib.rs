//! # fleet-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON API for vehicles and their maintenance history
//!   (`/api/vehicles`, `/api/vehicles/{id}/maintenances`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map [`FleetError`](fleet_domain::error::FleetError) variants to status codes
//!
//! ## Dependency rule
//! Depends on `fleet-app` (for port traits and services) and `fleet-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
