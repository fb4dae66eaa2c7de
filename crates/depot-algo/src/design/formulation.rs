//! MILP formulation of the two-echelon design problem.

use super::NetworkDesignError;
use crate::cost::LaneCosts;
use crate::milp::{LinearConstraint, LinearExpr, MilpModel, Sense, VarId, VariableSpec};
use depot_core::{DcId, DcStoreLane, PlantDcLane, SupplyNetwork};
use std::collections::HashMap;

/// The model built for one network plus the handle of every decision variable.
///
/// Variable maps are keyed by typed lanes and cover the full cartesian
/// products: one `open` per DC, one `assign` per (DC, store), one `ship` per
/// (plant, DC).
#[derive(Debug, Clone)]
pub struct DesignFormulation {
    model: MilpModel,
    open: HashMap<DcId, VarId>,
    assign: HashMap<DcStoreLane, VarId>,
    ship: HashMap<PlantDcLane, VarId>,
    big_m: f64,
}

impl DesignFormulation {
    /// Declare variables, constraints C1-C4 and the cost objective.
    ///
    /// Fails with `InfeasibleModel` when K cannot be met by the candidate DCs
    /// and with `Configuration` when a lane has no cost.
    pub fn build(network: &SupplyNetwork, costs: &LaneCosts) -> Result<Self, NetworkDesignError> {
        let k = network.facilities_to_open();
        let candidates = network.num_candidate_dcs();
        if k > candidates {
            return Err(NetworkDesignError::InfeasibleModel(format!(
                "cannot open {} facilities: only {} candidate distribution centers",
                k, candidates
            )));
        }
        if k == 0 {
            return Err(NetworkDesignError::InfeasibleModel(format!(
                "opening 0 facilities leaves {} store(s) unserved",
                network.num_stores()
            )));
        }

        let mut model = MilpModel::new("distribution_network_design");
        let total_demand = network.total_demand().value();

        // y[i]
        let mut open = HashMap::with_capacity(candidates);
        for dc in network.distribution_centers() {
            let var = model.declare_variable(VariableSpec::binary(format!("open[{}]", dc.id)));
            open.insert(dc.id.clone(), var);
        }

        // x[i,j]
        let mut assign = HashMap::with_capacity(candidates * network.num_stores());
        for dc in network.distribution_centers() {
            for store in network.stores() {
                let lane = DcStoreLane::new(dc.id.clone(), store.id.clone());
                let var = model.declare_variable(VariableSpec::binary(format!(
                    "assign[{},{}]",
                    dc.id, store.id
                )));
                assign.insert(lane, var);
            }
        }

        // z[p,i]; the upper bound is implied by C4 and tightens the relaxation
        let mut ship = HashMap::with_capacity(network.num_plants() * candidates);
        for plant in network.plants() {
            for dc in network.distribution_centers() {
                let lane = PlantDcLane::new(plant.id.clone(), dc.id.clone());
                let var = model.declare_variable(
                    VariableSpec::integer(format!("ship[{},{}]", plant.id, dc.id))
                        .min(0.0)
                        .max(total_demand),
                );
                ship.insert(lane, var);
            }
        }

        let mut objective = LinearExpr::new();
        for plant in network.plants() {
            for dc in network.distribution_centers() {
                let lane = PlantDcLane::new(plant.id.clone(), dc.id.clone());
                let cost = costs.rail(&lane).ok_or_else(|| {
                    NetworkDesignError::Configuration(format!("no rail cost for lane {}", lane))
                })?;
                objective.add_term(ship[&lane], cost.value());
            }
        }
        for dc in network.distribution_centers() {
            for store in network.stores() {
                let lane = DcStoreLane::new(dc.id.clone(), store.id.clone());
                let cost = costs.truck(&lane).ok_or_else(|| {
                    NetworkDesignError::Configuration(format!("no truck cost for lane {}", lane))
                })?;
                // priced against the store's full demand, not a flow variable
                objective.add_term(assign[&lane], cost.value() * store.demand.value());
            }
        }
        for dc in network.distribution_centers() {
            objective.add_term(open[&dc.id], dc.fixed_cost.value());
        }
        model.set_objective(objective, Sense::Minimise);

        // C1: Σ_i y_i = K
        model.add_constraint(LinearConstraint::eq(
            "facility_count",
            LinearExpr::sum(network.distribution_centers().iter().map(|dc| open[&dc.id])),
            k as f64,
        ));

        // C2: Σ_i x_ij = 1
        for store in network.stores() {
            let served_by = network
                .distribution_centers()
                .iter()
                .map(|dc| assign[&DcStoreLane::new(dc.id.clone(), store.id.clone())]);
            model.add_constraint(LinearConstraint::eq(
                format!("single_source[{}]", store.id),
                LinearExpr::sum(served_by),
                1.0,
            ));
        }

        // C3: Σ_j x_ij - M·y_i <= 0
        let big_m = network.num_stores() as f64;
        for dc in network.distribution_centers() {
            let mut lhs = LinearExpr::sum(
                network
                    .stores()
                    .iter()
                    .map(|store| assign[&DcStoreLane::new(dc.id.clone(), store.id.clone())]),
            );
            lhs.add_term(open[&dc.id], -big_m);
            model.add_constraint(LinearConstraint::le(format!("link[{}]", dc.id), lhs, 0.0));
        }

        // C4: Σ_p z_pi - Σ_j d_j·x_ij = 0
        for dc in network.distribution_centers() {
            let mut lhs = LinearExpr::sum(
                network
                    .plants()
                    .iter()
                    .map(|plant| ship[&PlantDcLane::new(plant.id.clone(), dc.id.clone())]),
            );
            for store in network.stores() {
                let lane = DcStoreLane::new(dc.id.clone(), store.id.clone());
                lhs.add_term(assign[&lane], -store.demand.value());
            }
            model.add_constraint(LinearConstraint::eq(
                format!("flow_balance[{}]", dc.id),
                lhs,
                0.0,
            ));
        }

        Ok(Self {
            model,
            open,
            assign,
            ship,
            big_m,
        })
    }

    pub fn model(&self) -> &MilpModel {
        &self.model
    }

    pub fn open_var(&self, dc: &DcId) -> Option<VarId> {
        self.open.get(dc).copied()
    }

    pub fn assign_var(&self, lane: &DcStoreLane) -> Option<VarId> {
        self.assign.get(lane).copied()
    }

    pub fn ship_var(&self, lane: &PlantDcLane) -> Option<VarId> {
        self.ship.get(lane).copied()
    }

    /// Linking constant used in C3 (the store count)
    pub fn big_m(&self) -> f64 {
        self.big_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::{Comparison, VarKind};

    fn small(k: usize) -> SupplyNetwork {
        SupplyNetwork::builder()
            .plant("P1")
            .distribution_center("D1", 10.0)
            .distribution_center("D2", 20.0)
            .store("S1", 4.0)
            .store("S2", 6.0)
            .store("S3", 1.0)
            .rail_distance("P1", "D1", 1.0)
            .rail_distance("P1", "D2", 2.0)
            .truck_distance_row("D1", &[1.0, 2.0, 3.0])
            .truck_distance_row("D2", &[3.0, 2.0, 1.0])
            .rail_unit_cost(1.0)
            .truck_unit_cost(1.0)
            .facilities_to_open(k)
            .build()
            .unwrap()
    }

    fn build(k: usize) -> Result<DesignFormulation, NetworkDesignError> {
        let net = small(k);
        let costs = LaneCosts::compute(&net).unwrap();
        DesignFormulation::build(&net, &costs)
    }

    #[test]
    fn test_variable_and_constraint_counts() {
        let f = build(1).unwrap();
        let model = f.model();
        // 2 open + 6 assign + 2 ship
        assert_eq!(model.num_variables(), 10);
        assert_eq!(model.num_integer_variables(), 10);
        // C1 + 3×C2 + 2×C3 + 2×C4
        assert_eq!(model.num_constraints(), 8);
        assert_eq!(f.big_m(), 3.0);
        assert_eq!(model.sense(), Sense::Minimise);
    }

    #[test]
    fn test_variable_domains() {
        let f = build(1).unwrap();
        let model = f.model();
        let y = f.open_var(&DcId::new("D1")).unwrap();
        assert_eq!(model.variable(y).kind(), VarKind::Binary);

        let z = f.ship_var(&PlantDcLane::new("P1", "D2")).unwrap();
        assert_eq!(model.variable(z).kind(), VarKind::Integer);
        assert_eq!(model.variable(z).lower(), 0.0);
        assert_eq!(model.variable(z).upper(), 11.0);
        assert_eq!(model.variable(z).name(), "ship[P1,D2]");
    }

    #[test]
    fn test_objective_coefficients() {
        let f = build(1).unwrap();
        let coeff = |var: VarId| -> f64 {
            f.model()
                .objective()
                .terms()
                .iter()
                .filter(|(v, _)| *v == var)
                .map(|(_, c)| c)
                .sum()
        };
        // truck cost 2 km × 1.0 × demand 6
        let x = f.assign_var(&DcStoreLane::new("D2", "S2")).unwrap();
        assert_eq!(coeff(x), 12.0);
        let z = f.ship_var(&PlantDcLane::new("P1", "D2")).unwrap();
        assert_eq!(coeff(z), 2.0);
        let y = f.open_var(&DcId::new("D2")).unwrap();
        assert_eq!(coeff(y), 20.0);
    }

    #[test]
    fn test_constraints_are_named_per_entity() {
        let f = build(2).unwrap();
        let names: Vec<&str> = f.model().constraints().iter().map(|c| c.name()).collect();
        assert_eq!(names[0], "facility_count");
        assert!(names.contains(&"single_source[S3]"));
        assert!(names.contains(&"link[D2]"));
        assert!(names.contains(&"flow_balance[D1]"));

        let c1 = &f.model().constraints()[0];
        assert_eq!(c1.comparison(), Comparison::Eq);
        assert_eq!(c1.rhs(), 2.0);
    }

    #[test]
    fn test_feasible_assignment_satisfies_model() {
        let f = build(1).unwrap();
        let mut values = vec![0.0; f.model().num_variables()];
        values[f.open_var(&DcId::new("D1")).unwrap().index()] = 1.0;
        for s in ["S1", "S2", "S3"] {
            values[f.assign_var(&DcStoreLane::new("D1", s)).unwrap().index()] = 1.0;
        }
        values[f.ship_var(&PlantDcLane::new("P1", "D1")).unwrap().index()] = 11.0;
        assert!(f.model().violations(&values, 1e-9).is_empty());
        // 1·11 rail + (4 + 12 + 3) truck + 10 fixed
        assert_eq!(f.model().evaluate_objective(&values), 40.0);
    }

    #[test]
    fn test_too_many_facilities_is_infeasible() {
        let err = build(3).unwrap_err();
        assert!(matches!(err, NetworkDesignError::InfeasibleModel(_)));
        assert!(err.to_string().contains("only 2 candidate"));
    }

    #[test]
    fn test_zero_facilities_is_infeasible() {
        assert!(matches!(
            build(0).unwrap_err(),
            NetworkDesignError::InfeasibleModel(_)
        ));
    }
}
