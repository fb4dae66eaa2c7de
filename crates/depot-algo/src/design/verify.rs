//! Independent checks on a returned design.
//!
//! Re-derives every structural property of an optimal design from the
//! registry and the reported decisions, without looking at solver values.

use super::solution::{CostBreakdown, NetworkDesignSolution};
use crate::cost::LaneCosts;
use depot_core::{Currency, DcId, DcStoreLane, PlantDcLane, Quantity, StoreId, SupplyNetwork};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One property a design fails to satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Σ y ≠ K
    FacilityCount { expected: usize, actual: usize },
    /// A DC, plant or store id the registry does not know
    UnknownEntity(String),
    StoreUnassigned(StoreId),
    StoreMultiplyAssigned { store: StoreId, count: usize },
    AssignedToClosedDc { dc: DcId, store: StoreId },
    InboundAtClosedDc { dc: DcId, quantity: Quantity },
    /// Inbound rail volume differs from assigned demand at an open DC
    FlowImbalance { dc: DcId, inbound: Quantity, demand: Quantity },
    /// DC→store shipments do not mirror assignments at full demand
    StoreShipmentMismatch { dc: DcId, store: StoreId },
    NonPositiveShipment { plant: String, dc: DcId },
    /// Cost terms do not recompute, or do not add up to the total
    CostMismatch { reported: Currency, recomputed: Currency },
    UnpricedNetwork(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::FacilityCount { expected, actual } => {
                write!(f, "{} DCs open, expected {}", actual, expected)
            }
            Violation::UnknownEntity(what) => write!(f, "unknown entity {}", what),
            Violation::StoreUnassigned(store) => write!(f, "store {} is not assigned", store),
            Violation::StoreMultiplyAssigned { store, count } => {
                write!(f, "store {} is assigned to {} DCs", store, count)
            }
            Violation::AssignedToClosedDc { dc, store } => {
                write!(f, "store {} is assigned to closed DC {}", store, dc)
            }
            Violation::InboundAtClosedDc { dc, quantity } => {
                write!(f, "closed DC {} receives {:.0}", dc, quantity.value())
            }
            Violation::FlowImbalance { dc, inbound, demand } => write!(
                f,
                "DC {} receives {:.0} but serves demand {:.0}",
                dc,
                inbound.value(),
                demand.value()
            ),
            Violation::StoreShipmentMismatch { dc, store } => {
                write!(f, "shipment {} -> {} does not match its assignment", dc, store)
            }
            Violation::NonPositiveShipment { plant, dc } => {
                write!(f, "shipment {} -> {} is not positive", plant, dc)
            }
            Violation::CostMismatch {
                reported,
                recomputed,
            } => write!(
                f,
                "reported cost {:.2} but decisions cost {:.2}",
                reported.value(),
                recomputed.value()
            ),
            Violation::UnpricedNetwork(msg) => write!(f, "cannot price network: {}", msg),
        }
    }
}

fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

/// Check `solution` against `network`; an empty result means every property holds.
///
/// `tolerance` is relative, with a floor of 1 on the magnitude.
pub fn verify_solution(
    network: &SupplyNetwork,
    solution: &NetworkDesignSolution,
    tolerance: f64,
) -> Vec<Violation> {
    let mut out = Vec::new();

    let costs = match LaneCosts::compute(network) {
        Ok(costs) => costs,
        Err(e) => {
            out.push(Violation::UnpricedNetwork(e.to_string()));
            return out;
        }
    };

    let k = network.facilities_to_open();
    if solution.open_dcs.len() != k {
        out.push(Violation::FacilityCount {
            expected: k,
            actual: solution.open_dcs.len(),
        });
    }
    let open: HashSet<&DcId> = solution.open_dcs.iter().collect();
    for dc in &open {
        if network.distribution_center(dc).is_none() {
            out.push(Violation::UnknownEntity(format!("DC {}", dc)));
        }
    }

    let mut per_store: HashMap<&StoreId, usize> = HashMap::new();
    let mut assigned_demand: HashMap<&DcId, Quantity> = HashMap::new();
    for a in &solution.assignments {
        let Some(store) = network.store(&a.store) else {
            out.push(Violation::UnknownEntity(format!("store {}", a.store)));
            continue;
        };
        *per_store.entry(&a.store).or_default() += 1;
        *assigned_demand.entry(&a.dc).or_default() += store.demand;
        if !open.contains(&a.dc) {
            out.push(Violation::AssignedToClosedDc {
                dc: a.dc.clone(),
                store: a.store.clone(),
            });
        }
    }
    for store in network.stores() {
        match per_store.get(&store.id).copied().unwrap_or(0) {
            0 => out.push(Violation::StoreUnassigned(store.id.clone())),
            1 => {}
            count => out.push(Violation::StoreMultiplyAssigned {
                store: store.id.clone(),
                count,
            }),
        }
    }

    let mut store_shipments: HashSet<(&DcId, &StoreId)> = HashSet::new();
    for sh in &solution.dc_store_shipments {
        let matches = network
            .store(&sh.store)
            .is_some_and(|s| close(s.demand.value(), sh.quantity.value(), tolerance))
            && solution
                .assignments
                .iter()
                .any(|a| a.dc == sh.dc && a.store == sh.store);
        if !matches {
            out.push(Violation::StoreShipmentMismatch {
                dc: sh.dc.clone(),
                store: sh.store.clone(),
            });
        }
        store_shipments.insert((&sh.dc, &sh.store));
    }
    for a in &solution.assignments {
        if !store_shipments.contains(&(&a.dc, &a.store)) {
            out.push(Violation::StoreShipmentMismatch {
                dc: a.dc.clone(),
                store: a.store.clone(),
            });
        }
    }

    let mut breakdown = CostBreakdown::default();
    for sh in &solution.shipments {
        if sh.quantity.value() <= 0.0 {
            out.push(Violation::NonPositiveShipment {
                plant: sh.plant.to_string(),
                dc: sh.dc.clone(),
            });
        }
        match costs.rail(&PlantDcLane::new(sh.plant.clone(), sh.dc.clone())) {
            Some(rate) => breakdown.rail += rate * sh.quantity.value(),
            None => out.push(Violation::UnknownEntity(format!(
                "rail lane {} -> {}",
                sh.plant, sh.dc
            ))),
        }
    }

    for dc in network.distribution_centers() {
        let inbound = solution.inbound(&dc.id);
        if open.contains(&dc.id) {
            breakdown.fixed += dc.fixed_cost;
            let demand = assigned_demand.get(&dc.id).copied().unwrap_or_default();
            if !close(inbound.value(), demand.value(), tolerance) {
                out.push(Violation::FlowImbalance {
                    dc: dc.id.clone(),
                    inbound,
                    demand,
                });
            }
        } else if inbound.value() > 0.0 {
            out.push(Violation::InboundAtClosedDc {
                dc: dc.id.clone(),
                quantity: inbound,
            });
        }
    }

    for a in &solution.assignments {
        let lane = DcStoreLane::new(a.dc.clone(), a.store.clone());
        if let (Some(rate), Some(store)) = (costs.truck(&lane), network.store(&a.store)) {
            breakdown.truck += rate * store.demand.value();
        }
    }

    for (reported, recomputed) in [
        (solution.cost_breakdown.rail, breakdown.rail),
        (solution.cost_breakdown.truck, breakdown.truck),
        (solution.cost_breakdown.fixed, breakdown.fixed),
        (solution.total_cost, breakdown.total()),
    ] {
        if !close(reported.value(), recomputed.value(), tolerance) {
            out.push(Violation::CostMismatch {
                reported,
                recomputed,
            });
        }
    }

    out
}
