//! Network design solution data structures.

use depot_core::{Currency, DcId, PlantId, Quantity, StoreId};
use serde::Serialize;
use std::time::Duration;

/// Store `store` is served by `dc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Assignment {
    pub dc: DcId,
    pub store: StoreId,
}

/// Volume moved by rail from a plant into a DC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment {
    pub plant: PlantId,
    pub dc: DcId,
    /// Always positive
    pub quantity: Quantity,
}

/// Volume moved by truck from a DC to the store it serves (the store's demand).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcStoreShipment {
    pub dc: DcId,
    pub store: StoreId,
    pub quantity: Quantity,
}

/// The three terms of the objective, recomputed from the extracted decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Σ rail cost × shipped quantity
    pub rail: Currency,
    /// Σ truck cost × store demand over assignments
    pub truck: Currency,
    /// Σ fixed cost over open DCs
    pub fixed: Currency,
}

impl CostBreakdown {
    pub fn total(&self) -> Currency {
        self.rail + self.truck + self.fixed
    }
}

/// Optimal design returned by [`solve_network_design`](super::solve_network_design).
///
/// All collections follow registry order.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkDesignSolution {
    /// Backend that produced the solution
    pub backend: String,
    /// Objective value reported for the optimal solution
    pub total_cost: Currency,
    pub cost_breakdown: CostBreakdown,
    pub open_dcs: Vec<DcId>,
    pub assignments: Vec<Assignment>,
    pub shipments: Vec<Shipment>,
    pub dc_store_shipments: Vec<DcStoreShipment>,
    /// Build + solve + extract wall time
    pub solve_time: Duration,
}

impl NetworkDesignSolution {
    pub fn is_open(&self, dc: &DcId) -> bool {
        self.open_dcs.contains(dc)
    }

    pub fn num_open(&self) -> usize {
        self.open_dcs.len()
    }

    /// DC serving `store`, if it is assigned
    pub fn assigned_dc(&self, store: &StoreId) -> Option<&DcId> {
        self.assignments
            .iter()
            .find(|a| &a.store == store)
            .map(|a| &a.dc)
    }

    /// Stores served by `dc`
    pub fn stores_served_by<'a>(&'a self, dc: &'a DcId) -> impl Iterator<Item = &'a StoreId> + 'a {
        self.assignments
            .iter()
            .filter(move |a| &a.dc == dc)
            .map(|a| &a.store)
    }

    /// Total rail volume into `dc`
    pub fn inbound(&self, dc: &DcId) -> Quantity {
        self.shipments
            .iter()
            .filter(|s| &s.dc == dc)
            .map(|s| s.quantity)
            .sum()
    }

    /// Total truck volume out of `dc`
    pub fn outbound(&self, dc: &DcId) -> Quantity {
        self.dc_store_shipments
            .iter()
            .filter(|s| &s.dc == dc)
            .map(|s| s.quantity)
            .sum()
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "Distribution Network Design\n{}\n",
            "=".repeat(40)
        ));
        s.push_str(&format!("Backend: {}\n", self.backend));
        s.push_str(&format!("Total Cost: ${:.2}\n", self.total_cost.value()));
        s.push_str(&format!("  Rail: ${:.2}\n", self.cost_breakdown.rail.value()));
        s.push_str(&format!("  Truck: ${:.2}\n", self.cost_breakdown.truck.value()));
        s.push_str(&format!("  Fixed: ${:.2}\n", self.cost_breakdown.fixed.value()));
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));

        s.push_str(&format!("\nOpen DCs ({}):\n", self.num_open()));
        for dc in &self.open_dcs {
            s.push_str(&format!(
                "  {} - inbound {:.0}, {} store(s)\n",
                dc,
                self.inbound(dc).value(),
                self.stores_served_by(dc).count()
            ));
        }

        s.push_str("\nAssignments:\n");
        for a in &self.assignments {
            s.push_str(&format!("  {} -> {}\n", a.dc, a.store));
        }

        s.push_str("\nPlant -> DC Shipments:\n");
        for sh in &self.shipments {
            s.push_str(&format!(
                "  {} -> {}: {:.0}\n",
                sh.plant,
                sh.dc,
                sh.quantity.value()
            ));
        }

        s.push_str("\nDC -> Store Shipments:\n");
        for sh in &self.dc_store_shipments {
            s.push_str(&format!(
                "  {} -> {}: {:.0}\n",
                sh.dc,
                sh.store,
                sh.quantity.value()
            ));
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NetworkDesignSolution {
        NetworkDesignSolution {
            backend: "microlp".to_string(),
            total_cost: Currency(1_500.0),
            cost_breakdown: CostBreakdown {
                rail: Currency(300.0),
                truck: Currency(200.0),
                fixed: Currency(1_000.0),
            },
            open_dcs: vec![DcId::new("D1")],
            assignments: vec![
                Assignment {
                    dc: DcId::new("D1"),
                    store: StoreId::new("S1"),
                },
                Assignment {
                    dc: DcId::new("D1"),
                    store: StoreId::new("S2"),
                },
            ],
            shipments: vec![
                Shipment {
                    plant: PlantId::new("P1"),
                    dc: DcId::new("D1"),
                    quantity: Quantity(40.0),
                },
                Shipment {
                    plant: PlantId::new("P2"),
                    dc: DcId::new("D1"),
                    quantity: Quantity(20.0),
                },
            ],
            dc_store_shipments: vec![
                DcStoreShipment {
                    dc: DcId::new("D1"),
                    store: StoreId::new("S1"),
                    quantity: Quantity(50.0),
                },
                DcStoreShipment {
                    dc: DcId::new("D1"),
                    store: StoreId::new("S2"),
                    quantity: Quantity(10.0),
                },
            ],
            solve_time: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_queries() {
        let sol = sample();
        let d1 = DcId::new("D1");
        assert!(sol.is_open(&d1));
        assert!(!sol.is_open(&DcId::new("D2")));
        assert_eq!(sol.assigned_dc(&StoreId::new("S2")), Some(&d1));
        assert_eq!(sol.assigned_dc(&StoreId::new("S9")), None);
        assert_eq!(sol.inbound(&d1), Quantity(60.0));
        assert_eq!(sol.outbound(&d1), Quantity(60.0));
        assert_eq!(sol.stores_served_by(&d1).count(), 2);
        assert_eq!(sol.cost_breakdown.total(), sol.total_cost);
    }

    #[test]
    fn test_solution_summary() {
        let summary = sample().summary();
        assert!(summary.contains("Total Cost: $1500.00"));
        assert!(summary.contains("Open DCs (1):"));
        assert!(summary.contains("D1 - inbound 60, 2 store(s)"));
        assert!(summary.contains("P2 -> D1: 20"));
        assert!(summary.contains("D1 -> S1: 50"));
    }

    #[test]
    fn test_solution_serializes() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["open_dcs"][0], "D1");
        assert_eq!(json["shipments"][1]["quantity"], 20.0);
        assert_eq!(json["cost_breakdown"]["fixed"], 1000.0);
    }
}
