//! Solver-neutral mixed-integer linear programming.
//!
//! Formulations build a [`MilpModel`] and hand it to a [`MilpBackend`]:
//!
//! - **[`MilpModel`]**: variables, linear constraints, objective (what to solve)
//! - **[`MilpBackend`]**: turns a model into a terminal [`OracleSolution`] (how to solve it)
//! - **[`GoodLpBackend`]**: the stock backend, driving `microlp`, HiGHS or CBC via `good_lp`
//!
//! Any other type implementing [`MilpBackend`] can stand in for the stock
//! backend, which is how the tests script solver outcomes.

mod backend;
mod config;
mod good_lp_backend;
mod model;

pub use backend::{MilpBackend, OracleSolution, OracleStatus, SolverError};
pub use config::{LpSolverKind, SolverConfig};
pub use good_lp_backend::GoodLpBackend;
pub use model::{
    Comparison, LinearConstraint, LinearExpr, MilpModel, Sense, VarId, VarKind, VariableSpec,
};
