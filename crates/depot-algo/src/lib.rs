//! # depot-algo: Distribution Network Design
//!
//! Decides which candidate distribution centers to open, which DC serves each
//! store and how much each plant ships to each open DC, minimizing fixed,
//! rail and truck cost with a mixed-integer linear program.
//!
//! ## Architecture
//!
//! | Module | Role |
//! |--------|------|
//! | [`cost`] | Per-lane rail and truck costs from distances × unit costs |
//! | [`milp`] | Solver-neutral model, [`milp::MilpBackend`] trait, `good_lp` backend |
//! | [`design`] | Formulation (C1-C4), solve pipeline, extraction, verification |
//! | [`test_utils`] | The bundled 2-plant / 6-DC / 10-store reference instance |
//!
//! The formulation only talks to a [`milp::MilpBackend`], so the underlying
//! solver can be swapped (`microlp`, HiGHS, CBC, or a caller-supplied
//! backend) without touching the model.
//!
//! ## Example
//!
//! ```no_run
//! use depot_algo::{solve_network_design, verify_solution, SolverConfig};
//! use depot_algo::test_utils::reference_network;
//!
//! let network = reference_network(2)?;
//! let config = SolverConfig::default();
//! let solution = solve_network_design(&network, &config)?;
//!
//! assert!(verify_solution(&network, &solution, config.verify_tolerance).is_empty());
//! println!("Total cost: ${:.2}", solution.total_cost.value());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cost;
pub mod design;
pub mod milp;
pub mod test_utils;

pub use cost::{LaneCostError, LaneCosts};
pub use design::{
    solve_network_design, solve_network_design_with, verify_solution, NetworkDesignError,
    NetworkDesignSolution, Violation,
};
pub use milp::{LpSolverKind, MilpBackend, SolverConfig};
