//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`FleetError`]
//! via `#[from]`; storage failures are boxed so the domain stays IO-free.

use crate::id::VehicleId;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("duplicate license plate")]
    DuplicatePlate(#[from] DuplicatePlateError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("update failed")]
    UpdateFailed(#[from] UpdateFailedError),

    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated by the input.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("license plate must not be empty")]
    EmptyLicensePlate,

    #[error("model must not be empty")]
    EmptyModel,

    #[error("manufacturing date is required")]
    MissingManufacturingDate,

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("cost must not be negative")]
    NegativeCost,

    #[error("maintenance date is required")]
    MissingServiceDate,

    #[error("unknown vehicle status: {0}")]
    UnknownStatus(String),

    #[error("invalid id: {0}")]
    InvalidId(String),
}

/// Another vehicle already holds the license plate.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("a vehicle with license plate {license_plate} is already registered")]
pub struct DuplicatePlateError {
    pub license_plate: String,
}

/// The referenced record does not exist.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// An update matched no stored row.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("no vehicle matched id {id}")]
pub struct UpdateFailedError {
    pub id: VehicleId,
}
