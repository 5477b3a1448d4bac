//! # fleet-domain
//!
//! Pure domain model for the fleet maintenance tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, calendar dates
//! - Define **Vehicles** (identified by a storage-assigned id, unique by plate)
//! - Define **Maintenance** records (cost-bearing service events owned by a vehicle)
//! - Define the closed set of vehicle **statuses**
//! - Contain all invariant enforcement that does not need storage
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod maintenance;
pub mod vehicle;
