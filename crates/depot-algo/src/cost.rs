//! Lane cost derivation.
//!
//! Every (plant, DC) lane gets a rail cost of `km × rail_unit_cost` and every
//! (DC, store) lane a truck cost of `km × truck_unit_cost`. Both tables must
//! cover their full cartesian product; a gap is reported, never defaulted.

use depot_core::{Currency, DcId, DcStoreLane, PlantDcLane, StoreId, SupplyNetwork};
use std::collections::HashMap;
use thiserror::Error;

/// A distance table does not cover every lane the model needs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaneCostError {
    #[error("no rail distance for lane {lane} ({missing} rail lane(s) missing in total)")]
    MissingRailDistance { lane: PlantDcLane, missing: usize },

    #[error("no truck distance for lane {lane} ({missing} truck lane(s) missing in total)")]
    MissingTruckDistance { lane: DcStoreLane, missing: usize },
}

/// Per-unit transport cost of every lane in a network.
#[derive(Debug, Clone, Default)]
pub struct LaneCosts {
    rail: HashMap<PlantDcLane, Currency>,
    truck: HashMap<DcStoreLane, Currency>,
}

impl LaneCosts {
    /// Price every lane of `network`.
    ///
    /// Fails on the first tier with an uncovered lane, naming the first
    /// missing lane in registry order and how many are missing.
    pub fn compute(network: &SupplyNetwork) -> Result<Self, LaneCostError> {
        let rail_rate = network.rail_unit_cost();
        let truck_rate = network.truck_unit_cost();

        let mut rail = HashMap::with_capacity(network.num_plants() * network.num_candidate_dcs());
        let mut missing_rail = Vec::new();
        for plant in network.plants() {
            for dc in network.distribution_centers() {
                let lane = PlantDcLane::new(plant.id.clone(), dc.id.clone());
                match network.rail_distance(&lane) {
                    Some(km) => {
                        rail.insert(lane, km.priced_at(rail_rate));
                    }
                    None => missing_rail.push(lane),
                }
            }
        }
        if let Some(lane) = missing_rail.first() {
            return Err(LaneCostError::MissingRailDistance {
                lane: lane.clone(),
                missing: missing_rail.len(),
            });
        }

        let mut truck = HashMap::with_capacity(network.num_candidate_dcs() * network.num_stores());
        let mut missing_truck = Vec::new();
        for dc in network.distribution_centers() {
            for store in network.stores() {
                let lane = DcStoreLane::new(dc.id.clone(), store.id.clone());
                match network.truck_distance(&lane) {
                    Some(km) => {
                        truck.insert(lane, km.priced_at(truck_rate));
                    }
                    None => missing_truck.push(lane),
                }
            }
        }
        if let Some(lane) = missing_truck.first() {
            return Err(LaneCostError::MissingTruckDistance {
                lane: lane.clone(),
                missing: missing_truck.len(),
            });
        }

        Ok(Self { rail, truck })
    }

    /// Rail cost per unit shipped on `lane`
    pub fn rail(&self, lane: &PlantDcLane) -> Option<Currency> {
        self.rail.get(lane).copied()
    }

    /// Truck cost per unit of store demand on `lane`
    pub fn truck(&self, lane: &DcStoreLane) -> Option<Currency> {
        self.truck.get(lane).copied()
    }

    /// Truck cost between a DC and a store, by id
    pub fn truck_between(&self, dc: &DcId, store: &StoreId) -> Option<Currency> {
        self.truck(&DcStoreLane::new(dc.clone(), store.clone()))
    }

    /// Cheapest rail cost into `dc` over all plants.
    ///
    /// Plants have unlimited supply, so an optimal design always sources a
    /// DC's inbound volume from this lane.
    pub fn cheapest_rail_into(&self, dc: &DcId) -> Option<Currency> {
        self.rail
            .iter()
            .filter(|(lane, _)| &lane.dc == dc)
            .map(|(_, cost)| *cost)
            .min_by(|a, b| a.value().total_cmp(&b.value()))
    }

    pub fn num_rail_lanes(&self) -> usize {
        self.rail.len()
    }

    pub fn num_truck_lanes(&self) -> usize {
        self.truck.len()
    }
}
