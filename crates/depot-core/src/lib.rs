//! # depot-core: Distribution Network Modeling Core
//!
//! Provides the entity types and the immutable registry used to formulate
//! two-echelon distribution network design problems.
//!
//! ## Design Philosophy
//!
//! A network is a fixed set of three tiers:
//! - **Plants** with unlimited supply
//! - **Distribution centers (DCs)**, candidates that may be opened at a fixed cost
//! - **Stores** with a known demand
//!
//! Plants reach DCs by rail and DCs reach stores by truck. Every lane is
//! identified by a strongly-typed composite key ([`PlantDcLane`],
//! [`DcStoreLane`]) rather than a loose tuple, so a rail lane can never be
//! looked up in the truck table.
//!
//! The registry ([`SupplyNetwork`]) is assembled once through
//! [`SupplyNetworkBuilder`], validated, and never mutated afterwards. Anything
//! that needs a variation (a different number of facilities, a higher fixed
//! cost) derives a fresh registry from an existing one.
//!
//! ## Quick Start
//!
//! ```
//! use depot_core::*;
//!
//! let network = SupplyNetwork::builder()
//!     .plant("Waterloo")
//!     .distribution_center("DC1", 16_000_000.0)
//!     .store("Store1", 3_000_000.0)
//!     .rail_distance("Waterloo", "DC1", 70.0)
//!     .truck_distance("DC1", "Store1", 50.0)
//!     .rail_unit_cost(0.046)
//!     .truck_unit_cost(0.81)
//!     .facilities_to_open(1)
//!     .build()?;
//!
//! assert_eq!(network.num_candidate_dcs(), 1);
//! assert_eq!(network.total_demand(), Quantity(3_000_000.0));
//! # Ok::<(), DepotError>(())
//! ```
//!
//! ## Modules
//!
//! - [`lane`] - Composite lane keys
//! - [`network`] - The registry and its builder
//! - [`units`] - Kilometres, currency and quantity newtypes

use serde::{Deserialize, Serialize};

pub mod error;
pub mod lane;
pub mod network;
pub mod units;

pub use error::{DepotError, DepotResult};
pub use lane::{DcStoreLane, PlantDcLane};
pub use network::{SupplyNetwork, SupplyNetworkBuilder};
pub use units::{Currency, Kilometers, Quantity};

/// Declares a string-backed identifier newtype.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[inline]
            pub fn new(value: impl Into<String>) -> Self {
                $name(value.into())
            }
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a production plant
    PlantId
);
string_id!(
    /// Identifier of a candidate distribution center
    DcId
);
string_id!(
    /// Identifier of a retail store
    StoreId
);

/// A production plant. Supply is unlimited in this formulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    /// Human-readable location, e.g. "Waterloo, ON"
    pub location: Option<String>,
}

impl Plant {
    pub fn new(id: impl Into<PlantId>) -> Self {
        Self {
            id: id.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A candidate distribution center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionCenter {
    pub id: DcId,
    /// Cost incurred once if the DC is opened
    pub fixed_cost: Currency,
    pub location: Option<String>,
}

impl DistributionCenter {
    pub fn new(id: impl Into<DcId>, fixed_cost: f64) -> Self {
        Self {
            id: id.into(),
            fixed_cost: Currency(fixed_cost),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A retail store served by exactly one open DC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub demand: Quantity,
    pub location: Option<String>,
}

impl Store {
    pub fn new(id: impl Into<StoreId>, demand: f64) -> Self {
        Self {
            id: id.into(),
            demand: Quantity(demand),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
