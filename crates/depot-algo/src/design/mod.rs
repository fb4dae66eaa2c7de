//! Two-echelon distribution network design
//!
//! Chooses which candidate distribution centers (DCs) to open, assigns every
//! store to one open DC and routes plant→DC rail volume, at minimum cost.
//!
//! ## Problem Overview
//!
//! ```text
//!   plants ──rail──▶ DCs (open K) ──truck──▶ stores
//!   unlimited supply  fixed cost     demand, single-sourced
//! ```
//!
//! ## MILP Formulation
//!
//! ```text
//! minimize    Σ_{p,i} r_pi · z_pi + Σ_{i,j} t_ij · d_j · x_ij + Σ_i f_i · y_i
//!             └──────────────────┘ └───────────────────────┘ └──────────────┘
//!             rail (per unit)      truck (per unit demand)    fixed
//!
//! subject to:
//!   Σ_i y_i = K                           (C1) facility count
//!   Σ_i x_ij = 1              ∀ j         (C2) single sourcing
//!   Σ_j x_ij ≤ M · y_i        ∀ i         (C3) linking, M = |stores|
//!   Σ_p z_pi = Σ_j d_j · x_ij ∀ i         (C4) flow balance
//!   y, x ∈ {0,1},  z ∈ ℤ≥0
//! ```
//!
//! The truck term prices each store's full demand through the 0/1
//! assignment while the rail term prices the shipped quantity. The two
//! unit conventions differ and are kept as-is.
//!
//! ## Pipeline
//!
//! [`LaneCosts`](crate::cost::LaneCosts) → [`DesignFormulation`] →
//! [`MilpBackend`](crate::milp::MilpBackend) → extraction into a
//! [`NetworkDesignSolution`]. [`verify_solution`] re-checks the result
//! against the registry.

mod extract;
mod formulation;
mod solution;
mod solver;
mod verify;

pub use formulation::DesignFormulation;
pub use solution::{Assignment, CostBreakdown, DcStoreShipment, NetworkDesignSolution, Shipment};
pub use solver::{solve_network_design, solve_network_design_with, NetworkDesignError};
pub use verify::{verify_solution, Violation};
