//! Reading decisions back out of solved variable values.

use super::formulation::DesignFormulation;
use super::solution::{Assignment, CostBreakdown, DcStoreShipment, NetworkDesignSolution, Shipment};
use super::NetworkDesignError;
use crate::cost::LaneCosts;
use crate::milp::{OracleSolution, OracleStatus, SolverConfig};
use depot_core::{Currency, DcStoreLane, PlantDcLane, Quantity, SupplyNetwork};
use std::time::Duration;

/// Turn an optimal assignment into result sets.
///
/// Binaries count as 1 above `config.binary_threshold`. Shipment variables
/// are integral, so they are rounded before the `flow_epsilon` cut.
pub(crate) fn extract(
    network: &SupplyNetwork,
    costs: &LaneCosts,
    formulation: &DesignFormulation,
    solved: &OracleSolution,
    config: &SolverConfig,
    backend: &str,
    solve_time: Duration,
) -> Result<NetworkDesignSolution, NetworkDesignError> {
    let expected = formulation.model().num_variables();
    if solved.values.len() != expected {
        return Err(NetworkDesignError::SolverFailure {
            backend: backend.to_string(),
            status: OracleStatus::Error,
            message: format!(
                "optimal status with {} values for {} variables",
                solved.values.len(),
                expected
            ),
        });
    }
    let value = |var: crate::milp::VarId| solved.values[var.index()];
    let missing = |what: String| {
        NetworkDesignError::Configuration(format!("no {} variable in formulation", what))
    };

    let mut breakdown = CostBreakdown::default();

    let mut open_dcs = Vec::new();
    for dc in network.distribution_centers() {
        let var = formulation
            .open_var(&dc.id)
            .ok_or_else(|| missing(format!("open[{}]", dc.id)))?;
        if value(var) > config.binary_threshold {
            breakdown.fixed += dc.fixed_cost;
            open_dcs.push(dc.id.clone());
        }
    }

    let mut assignments = Vec::new();
    let mut dc_store_shipments = Vec::new();
    for dc in network.distribution_centers() {
        for store in network.stores() {
            let lane = DcStoreLane::new(dc.id.clone(), store.id.clone());
            let var = formulation
                .assign_var(&lane)
                .ok_or_else(|| missing(format!("assign[{}]", lane)))?;
            if value(var) > config.binary_threshold {
                if let Some(rate) = costs.truck(&lane) {
                    breakdown.truck += rate * store.demand.value();
                }
                assignments.push(Assignment {
                    dc: dc.id.clone(),
                    store: store.id.clone(),
                });
                dc_store_shipments.push(DcStoreShipment {
                    dc: dc.id.clone(),
                    store: store.id.clone(),
                    quantity: store.demand,
                });
            }
        }
    }

    let mut shipments = Vec::new();
    for plant in network.plants() {
        for dc in network.distribution_centers() {
            let lane = PlantDcLane::new(plant.id.clone(), dc.id.clone());
            let var = formulation
                .ship_var(&lane)
                .ok_or_else(|| missing(format!("ship[{}]", lane)))?;
            let quantity = value(var).round();
            if quantity > config.flow_epsilon {
                if let Some(rate) = costs.rail(&lane) {
                    breakdown.rail += rate * quantity;
                }
                shipments.push(Shipment {
                    plant: plant.id.clone(),
                    dc: dc.id.clone(),
                    quantity: Quantity(quantity),
                });
            }
        }
    }

    Ok(NetworkDesignSolution {
        backend: backend.to_string(),
        total_cost: Currency(solved.objective),
        cost_breakdown: breakdown,
        open_dcs,
        assignments,
        shipments,
        dc_store_shipments,
        solve_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::DcId;

    fn fixture() -> (SupplyNetwork, LaneCosts, DesignFormulation) {
        let net = SupplyNetwork::builder()
            .plant("P1")
            .plant("P2")
            .distribution_center("D1", 10.0)
            .distribution_center("D2", 20.0)
            .store("S1", 4.0)
            .store("S2", 6.0)
            .rail_distance("P1", "D1", 1.0)
            .rail_distance("P1", "D2", 2.0)
            .rail_distance("P2", "D1", 3.0)
            .rail_distance("P2", "D2", 1.0)
            .truck_distance_row("D1", &[1.0, 2.0])
            .truck_distance_row("D2", &[3.0, 1.0])
            .rail_unit_cost(1.0)
            .truck_unit_cost(1.0)
            .facilities_to_open(2)
            .build()
            .unwrap();
        let costs = LaneCosts::compute(&net).unwrap();
        let formulation = DesignFormulation::build(&net, &costs).unwrap();
        (net, costs, formulation)
    }

    #[test]
    fn test_thresholds_tolerate_solver_slack() {
        let (net, costs, f) = fixture();
        let mut values = vec![0.0; f.model().num_variables()];
        let mut set = |var: Option<crate::milp::VarId>, v: f64| values[var.unwrap().index()] = v;
        set(f.open_var(&DcId::new("D1")), 0.999_999);
        set(f.open_var(&DcId::new("D2")), 1.0);
        set(f.assign_var(&DcStoreLane::new("D1", "S1")), 1.0);
        set(f.assign_var(&DcStoreLane::new("D2", "S1")), 1e-7);
        set(f.assign_var(&DcStoreLane::new("D2", "S2")), 0.999_999_9);
        set(f.ship_var(&PlantDcLane::new("P1", "D1")), 4.000_000_1);
        set(f.ship_var(&PlantDcLane::new("P2", "D2")), 6.0);
        set(f.ship_var(&PlantDcLane::new("P1", "D2")), 1e-9);

        let solved = OracleSolution::optimal(f.model().evaluate_objective(&values), values);
        let sol = extract(
            &net,
            &costs,
            &f,
            &solved,
            &SolverConfig::default(),
            "test",
            Duration::ZERO,
        )
        .unwrap();

        assert_eq!(sol.open_dcs, vec![DcId::new("D1"), DcId::new("D2")]);
        assert_eq!(sol.assignments.len(), 2);
        assert_eq!(sol.shipments.len(), 2);
        assert_eq!(sol.shipments[0].quantity, Quantity(4.0));
        assert_eq!(sol.dc_store_shipments[1].quantity, Quantity(6.0));
        // rail 4 + 6, truck 4 + 6, fixed 30
        assert_eq!(sol.cost_breakdown.rail, Currency(10.0));
        assert_eq!(sol.cost_breakdown.truck, Currency(10.0));
        assert_eq!(sol.cost_breakdown.fixed, Currency(30.0));
        assert!(sol.total_cost.relative_gap(sol.cost_breakdown.total()) < 1e-6);
    }

    #[test]
    fn test_short_assignment_is_a_solver_failure() {
        let (net, costs, f) = fixture();
        let solved = OracleSolution::optimal(0.0, vec![1.0; 3]);
        let err = extract(
            &net,
            &costs,
            &f,
            &solved,
            &SolverConfig::default(),
            "test",
            Duration::ZERO,
        )
        .unwrap_err();
        assert!(matches!(err, NetworkDesignError::SolverFailure { .. }));
    }
}
