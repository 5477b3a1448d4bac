//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//! Services never call each other; they only share ports.

pub mod maintenance_service;
pub mod vehicle_service;
