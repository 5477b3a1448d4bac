//! Typed identifier newtypes backed by storage-assigned integers.
//!
//! The value `0` means "not yet persisted"; storage hands out positive ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Identifier of a record that storage has not assigned yet.
            pub const UNASSIGNED: Self = Self(0);

            /// Wrap a raw storage identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw storage identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Whether storage has assigned this identifier.
            #[must_use]
            pub const fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Vehicle`](crate::vehicle::Vehicle).
    VehicleId
);

define_id!(
    /// Unique identifier for a [`Maintenance`](crate::maintenance::Maintenance).
    MaintenanceId
);
