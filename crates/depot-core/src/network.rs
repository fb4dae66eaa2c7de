//! The supply network registry.
//!
//! [`SupplyNetwork`] holds everything a single optimization run reads:
//! facilities, demands, lane distances and the unit-cost scalars. It is
//! validated once in [`SupplyNetworkBuilder::build`] and exposes no setters.
//!
//! Entity-level problems (duplicate ids, non-positive demand or fixed cost,
//! negative distances, lanes naming undeclared facilities) are rejected here.
//! Completeness of the distance tables over the full cartesian products is
//! checked later, when lane costs are derived.

use crate::{
    DcId, DcStoreLane, DepotError, DepotResult, DistributionCenter, Kilometers, Plant, PlantDcLane,
    PlantId, Quantity, Store, StoreId,
};
use std::collections::{HashMap, HashSet};

/// Immutable registry of one network design instance.
#[derive(Debug, Clone)]
pub struct SupplyNetwork {
    plants: Vec<Plant>,
    dcs: Vec<DistributionCenter>,
    stores: Vec<Store>,
    dc_index: HashMap<DcId, usize>,
    store_index: HashMap<StoreId, usize>,
    rail_distances: HashMap<PlantDcLane, Kilometers>,
    truck_distances: HashMap<DcStoreLane, Kilometers>,
    rail_unit_cost: f64,
    truck_unit_cost: f64,
    facilities_to_open: usize,
}

impl SupplyNetwork {
    /// Start assembling a network
    pub fn builder() -> SupplyNetworkBuilder {
        SupplyNetworkBuilder::new()
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn distribution_centers(&self) -> &[DistributionCenter] {
        &self.dcs
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn num_plants(&self) -> usize {
        self.plants.len()
    }

    pub fn num_candidate_dcs(&self) -> usize {
        self.dcs.len()
    }

    pub fn num_stores(&self) -> usize {
        self.stores.len()
    }

    /// Number of DCs that must be opened (K)
    pub fn facilities_to_open(&self) -> usize {
        self.facilities_to_open
    }

    /// Rail cost per kilometre per unit shipped
    pub fn rail_unit_cost(&self) -> f64 {
        self.rail_unit_cost
    }

    /// Truck cost per kilometre per unit of store demand
    pub fn truck_unit_cost(&self) -> f64 {
        self.truck_unit_cost
    }

    pub fn distribution_center(&self, id: &DcId) -> Option<&DistributionCenter> {
        self.dc_index.get(id).map(|&i| &self.dcs[i])
    }

    pub fn store(&self, id: &StoreId) -> Option<&Store> {
        self.store_index.get(id).map(|&i| &self.stores[i])
    }

    pub fn rail_distance(&self, lane: &PlantDcLane) -> Option<Kilometers> {
        self.rail_distances.get(lane).copied()
    }

    pub fn truck_distance(&self, lane: &DcStoreLane) -> Option<Kilometers> {
        self.truck_distances.get(lane).copied()
    }

    /// All rail distances in plant-major, DC-minor registry order.
    /// Lanes without a distance entry are skipped.
    pub fn rail_distances(&self) -> Vec<(PlantDcLane, Kilometers)> {
        let mut out = Vec::with_capacity(self.rail_distances.len());
        for plant in &self.plants {
            for dc in &self.dcs {
                let lane = PlantDcLane::new(plant.id.clone(), dc.id.clone());
                if let Some(km) = self.rail_distance(&lane) {
                    out.push((lane, km));
                }
            }
        }
        out
    }

    /// All truck distances in DC-major, store-minor registry order.
    pub fn truck_distances(&self) -> Vec<(DcStoreLane, Kilometers)> {
        let mut out = Vec::with_capacity(self.truck_distances.len());
        for dc in &self.dcs {
            for store in &self.stores {
                let lane = DcStoreLane::new(dc.id.clone(), store.id.clone());
                if let Some(km) = self.truck_distance(&lane) {
                    out.push((lane, km));
                }
            }
        }
        out
    }

    /// Summed demand over every store
    pub fn total_demand(&self) -> Quantity {
        self.stores.iter().map(|s| s.demand).sum()
    }

    /// Derive a registry that differs only in the number of DCs to open.
    pub fn with_facilities_to_open(mut self, k: usize) -> Self {
        self.facilities_to_open = k;
        self
    }

    /// Derive a registry with one DC's fixed cost replaced.
    pub fn with_fixed_cost(mut self, dc: &DcId, fixed_cost: f64) -> DepotResult<Self> {
        let index = *self
            .dc_index
            .get(dc)
            .ok_or_else(|| DepotError::UnknownDistributionCenter(dc.clone()))?;
        if !(fixed_cost.is_finite() && fixed_cost > 0.0) {
            return Err(DepotError::Validation(format!(
                "distribution center '{}' must have a positive fixed cost, got {}",
                dc, fixed_cost
            )));
        }
        self.dcs[index].fixed_cost.0 = fixed_cost;
        Ok(self)
    }
}

/// Builder for [`SupplyNetwork`].
///
/// Methods never fail; problems are collected and reported together by
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SupplyNetworkBuilder {
    plants: Vec<Plant>,
    dcs: Vec<DistributionCenter>,
    stores: Vec<Store>,
    rail: Vec<(PlantDcLane, Kilometers)>,
    truck: Vec<(DcStoreLane, Kilometers)>,
    rail_unit_cost: f64,
    truck_unit_cost: f64,
    facilities_to_open: usize,
    problems: Vec<String>,
}

impl SupplyNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plant by id
    pub fn plant(self, id: impl Into<PlantId>) -> Self {
        self.add_plant(Plant::new(id))
    }

    pub fn add_plant(mut self, plant: Plant) -> Self {
        self.plants.push(plant);
        self
    }

    /// Add a candidate DC with its fixed opening cost
    pub fn distribution_center(self, id: impl Into<DcId>, fixed_cost: f64) -> Self {
        self.add_distribution_center(DistributionCenter::new(id, fixed_cost))
    }

    pub fn add_distribution_center(mut self, dc: DistributionCenter) -> Self {
        self.dcs.push(dc);
        self
    }

    /// Add a store with its demand
    pub fn store(self, id: impl Into<StoreId>, demand: f64) -> Self {
        self.add_store(Store::new(id, demand))
    }

    pub fn add_store(mut self, store: Store) -> Self {
        self.stores.push(store);
        self
    }

    pub fn rail_distance(
        mut self,
        plant: impl Into<PlantId>,
        dc: impl Into<DcId>,
        km: f64,
    ) -> Self {
        self.rail.push((PlantDcLane::new(plant, dc), Kilometers(km)));
        self
    }

    pub fn truck_distance(
        mut self,
        dc: impl Into<DcId>,
        store: impl Into<StoreId>,
        km: f64,
    ) -> Self {
        self.truck.push((DcStoreLane::new(dc, store), Kilometers(km)));
        self
    }

    /// Add one DC's truck distances to every store declared so far, in
    /// declaration order.
    pub fn truck_distance_row(mut self, dc: impl Into<DcId>, kms: &[f64]) -> Self {
        let dc = dc.into();
        if kms.len() != self.stores.len() {
            self.problems.push(format!(
                "truck distance row for '{}' has {} entries but {} stores are declared",
                dc,
                kms.len(),
                self.stores.len()
            ));
            return self;
        }
        let lanes: Vec<(DcStoreLane, Kilometers)> = self
            .stores
            .iter()
            .zip(kms)
            .map(|(store, &km)| {
                (
                    DcStoreLane::new(dc.clone(), store.id.clone()),
                    Kilometers(km),
                )
            })
            .collect();
        self.truck.extend(lanes);
        self
    }

    pub fn rail_unit_cost(mut self, cost: f64) -> Self {
        self.rail_unit_cost = cost;
        self
    }

    pub fn truck_unit_cost(mut self, cost: f64) -> Self {
        self.truck_unit_cost = cost;
        self
    }

    /// Set the number of DCs to open (K)
    pub fn facilities_to_open(mut self, k: usize) -> Self {
        self.facilities_to_open = k;
        self
    }

    /// Validate and freeze the registry
    pub fn build(self) -> DepotResult<SupplyNetwork> {
        let mut problems = self.problems;

        if self.plants.is_empty() {
            problems.push("no plants declared".to_string());
        }
        if self.dcs.is_empty() {
            problems.push("no distribution centers declared".to_string());
        }
        if self.stores.is_empty() {
            problems.push("no stores declared".to_string());
        }

        let plant_ids = unique_ids(self.plants.iter().map(|p| &p.id), "plant", &mut problems);

        let mut dc_index = HashMap::new();
        for (i, dc) in self.dcs.iter().enumerate() {
            if dc_index.insert(dc.id.clone(), i).is_some() {
                problems.push(format!("duplicate distribution center '{}'", dc.id));
            }
            if !dc.fixed_cost.is_positive() {
                problems.push(format!(
                    "distribution center '{}' must have a positive fixed cost, got {}",
                    dc.id,
                    dc.fixed_cost.value()
                ));
            }
        }

        let mut store_index = HashMap::new();
        for (i, store) in self.stores.iter().enumerate() {
            if store_index.insert(store.id.clone(), i).is_some() {
                problems.push(format!("duplicate store '{}'", store.id));
            }
            if !store.demand.is_positive() {
                problems.push(format!(
                    "store '{}' must have a positive demand, got {}",
                    store.id,
                    store.demand.value()
                ));
            }
        }

        for (label, cost) in [
            ("rail", self.rail_unit_cost),
            ("truck", self.truck_unit_cost),
        ] {
            if !(cost.is_finite() && cost >= 0.0) {
                problems.push(format!(
                    "{} unit cost must be non-negative, got {}",
                    label, cost
                ));
            }
        }

        let mut rail_distances = HashMap::with_capacity(self.rail.len());
        for (lane, km) in self.rail {
            if !plant_ids.contains(&lane.plant) {
                problems.push(format!("rail lane {} names an undeclared plant", lane));
            }
            if !dc_index.contains_key(&lane.dc) {
                problems.push(format!(
                    "rail lane {} names an undeclared distribution center",
                    lane
                ));
            }
            if !km.is_non_negative() {
                problems.push(format!(
                    "rail lane {} has invalid distance {}",
                    lane,
                    km.value()
                ));
            }
            if rail_distances.contains_key(&lane) {
                problems.push(format!("rail lane {} is declared twice", lane));
            } else {
                rail_distances.insert(lane, km);
            }
        }

        let mut truck_distances = HashMap::with_capacity(self.truck.len());
        for (lane, km) in self.truck {
            if !dc_index.contains_key(&lane.dc) {
                problems.push(format!(
                    "truck lane {} names an undeclared distribution center",
                    lane
                ));
            }
            if !store_index.contains_key(&lane.store) {
                problems.push(format!("truck lane {} names an undeclared store", lane));
            }
            if !km.is_non_negative() {
                problems.push(format!(
                    "truck lane {} has invalid distance {}",
                    lane,
                    km.value()
                ));
            }
            if truck_distances.contains_key(&lane) {
                problems.push(format!("truck lane {} is declared twice", lane));
            } else {
                truck_distances.insert(lane, km);
            }
        }

        if !problems.is_empty() {
            return Err(DepotError::Validation(problems.join("; ")));
        }

        Ok(SupplyNetwork {
            plants: self.plants,
            dcs: self.dcs,
            stores: self.stores,
            dc_index,
            store_index,
            rail_distances,
            truck_distances,
            rail_unit_cost: self.rail_unit_cost,
            truck_unit_cost: self.truck_unit_cost,
            facilities_to_open: self.facilities_to_open,
        })
    }
}

fn unique_ids<'a>(
    ids: impl Iterator<Item = &'a PlantId>,
    label: &str,
    problems: &mut Vec<String>,
) -> HashSet<PlantId> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            problems.push(format!("duplicate {} '{}'", label, id));
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Currency;

    fn two_by_two() -> SupplyNetworkBuilder {
        SupplyNetwork::builder()
            .plant("P1")
            .distribution_center("D1", 100.0)
            .distribution_center("D2", 80.0)
            .store("S1", 10.0)
            .store("S2", 5.0)
            .rail_distance("P1", "D1", 10.0)
            .rail_distance("P1", "D2", 20.0)
            .truck_distance_row("D1", &[1.0, 2.0])
            .truck_distance_row("D2", &[3.0, 4.0])
            .rail_unit_cost(0.5)
            .truck_unit_cost(1.0)
            .facilities_to_open(1)
    }

    #[test]
    fn test_build_valid_network() {
        let network = two_by_two().build().unwrap();

        assert_eq!(network.num_plants(), 1);
        assert_eq!(network.num_candidate_dcs(), 2);
        assert_eq!(network.num_stores(), 2);
        assert_eq!(network.total_demand(), Quantity(15.0));
        assert_eq!(
            network.truck_distance(&DcStoreLane::new("D2", "S1")),
            Some(Kilometers(3.0))
        );
        assert_eq!(network.rail_distances().len(), 2);
        assert_eq!(network.truck_distances()[1].0, DcStoreLane::new("D1", "S2"));
    }

    #[test]
    fn test_rejects_non_positive_demand_and_cost() {
        let err = SupplyNetwork::builder()
            .plant("P1")
            .distribution_center("D1", 0.0)
            .store("S1", -3.0)
            .build()
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("'D1' must have a positive fixed cost"));
        assert!(msg.contains("'S1' must have a positive demand"));
    }

    #[test]
    fn test_rejects_duplicates_and_unknown_endpoints() {
        let err = two_by_two()
            .store("S1", 1.0)
            .rail_distance("P9", "D1", 5.0)
            .rail_distance("P1", "D1", 11.0)
            .build()
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("duplicate store 'S1'"));
        assert!(msg.contains("undeclared plant"));
        assert!(msg.contains("rail lane P1 -> D1 is declared twice"));
    }

    #[test]
    fn test_rejects_mismatched_truck_row() {
        let err = SupplyNetwork::builder()
            .plant("P1")
            .distribution_center("D1", 1.0)
            .store("S1", 1.0)
            .truck_distance_row("D1", &[1.0, 2.0])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("has 2 entries but 1 stores"));
    }

    #[test]
    fn test_rejects_negative_distance_and_unit_cost() {
        let err = two_by_two()
            .truck_distance("D1", "S1", -1.0)
            .rail_unit_cost(-0.1)
            .build()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("rail unit cost must be non-negative"));
        assert!(msg.contains("invalid distance -1"));
    }

    #[test]
    fn test_empty_tiers_are_rejected() {
        let err = SupplyNetwork::builder().build().unwrap_err();
        assert!(matches!(err, DepotError::Validation(_)));
        assert!(err.to_string().contains("no plants declared"));
    }

    #[test]
    fn test_missing_lanes_are_not_a_registry_error() {
        let network = SupplyNetwork::builder()
            .plant("P1")
            .distribution_center("D1", 1.0)
            .store("S1", 1.0)
            .build()
            .unwrap();
        assert!(network
            .rail_distance(&PlantDcLane::new("P1", "D1"))
            .is_none());
    }

    #[test]
    fn test_derived_networks_leave_original_untouched() {
        let base = two_by_two().build().unwrap();
        let wider = base.clone().with_facilities_to_open(2);
        assert_eq!(base.facilities_to_open(), 1);
        assert_eq!(wider.facilities_to_open(), 2);

        let pricier = base
            .clone()
            .with_fixed_cost(&DcId::new("D2"), 500.0)
            .unwrap();
        assert_eq!(
            pricier.distribution_center(&DcId::new("D2")).unwrap().fixed_cost,
            Currency(500.0)
        );
        assert_eq!(
            base.distribution_center(&DcId::new("D2")).unwrap().fixed_cost,
            Currency(80.0)
        );

        assert!(matches!(
            base.clone().with_fixed_cost(&DcId::new("D9"), 1.0),
            Err(DepotError::UnknownDistributionCenter(ref dc)) if dc.as_str() == "D9"
        ));
        assert!(base.with_fixed_cost(&DcId::new("D1"), 0.0).is_err());
    }
}
