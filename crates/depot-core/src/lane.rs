//! Composite lane keys.
//!
//! A lane is an ordered pair of facilities. The two echelons get separate key
//! types so that rail and truck tables, and the decision variables keyed on
//! them, cannot be mixed up.

use crate::{DcId, PlantId, StoreId};
use serde::{Deserialize, Serialize};

/// Rail lane from a plant to a distribution center.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlantDcLane {
    pub plant: PlantId,
    pub dc: DcId,
}

impl PlantDcLane {
    pub fn new(plant: impl Into<PlantId>, dc: impl Into<DcId>) -> Self {
        Self {
            plant: plant.into(),
            dc: dc.into(),
        }
    }
}

impl std::fmt::Display for PlantDcLane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.plant, self.dc)
    }
}

/// Truck lane from a distribution center to a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DcStoreLane {
    pub dc: DcId,
    pub store: StoreId,
}

impl DcStoreLane {
    pub fn new(dc: impl Into<DcId>, store: impl Into<StoreId>) -> Self {
        Self {
            dc: dc.into(),
            store: store.into(),
        }
    }
}

impl std::fmt::Display for DcStoreLane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.dc, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_lane_keys_hash_by_both_ends() {
        let mut table = HashMap::new();
        table.insert(DcStoreLane::new("DC1", "Store1"), 50.0);
        table.insert(DcStoreLane::new("DC1", "Store2"), 3200.0);

        assert_eq!(table.get(&DcStoreLane::new("DC1", "Store2")), Some(&3200.0));
        assert!(table.get(&DcStoreLane::new("DC2", "Store1")).is_none());
    }

    #[test]
    fn test_lane_display() {
        assert_eq!(
            PlantDcLane::new("Waterloo", "DC1").to_string(),
            "Waterloo -> DC1"
        );
    }
}
