//! The solving oracle contract.
//!
//! A [`MilpBackend`] takes a fully specified [`MilpModel`] and returns one
//! terminal [`OracleSolution`]. Branch-and-bound lives entirely behind this
//! trait; callers only see the status and, when optimal, one value per
//! declared variable.

use super::config::SolverConfig;
use super::model::MilpModel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal status reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Solver hit its time limit.
    Timeout,
    /// Numerical difficulties.
    NumericalError,
    /// Any other backend-specific failure.
    Error,
}

impl std::fmt::Display for OracleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleStatus::Optimal => write!(f, "optimal"),
            OracleStatus::Infeasible => write!(f, "infeasible"),
            OracleStatus::Unbounded => write!(f, "unbounded"),
            OracleStatus::Timeout => write!(f, "timeout"),
            OracleStatus::NumericalError => write!(f, "numerical_error"),
            OracleStatus::Error => write!(f, "error"),
        }
    }
}

/// What a backend returns for one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSolution {
    pub status: OracleStatus,
    /// Objective value; NaN unless optimal
    pub objective: f64,
    /// One value per declared variable, indexed by `VarId::index`; empty unless optimal
    pub values: Vec<f64>,
    /// Backend diagnostic, if any
    pub message: Option<String>,
}

impl OracleSolution {
    pub fn optimal(objective: f64, values: Vec<f64>) -> Self {
        Self {
            status: OracleStatus::Optimal,
            objective,
            values,
            message: None,
        }
    }

    /// A non-optimal terminal status with no assignment.
    pub fn terminal(status: OracleStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective: f64::NAN,
            values: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Errors raised by a backend before a terminal status could be produced.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("backend {backend} is not available in this build")]
    Unavailable { backend: String },

    #[error("backend {backend} rejected the model: {message}")]
    InvalidModel { backend: String, message: String },

    #[error("backend {backend} failed: {message}")]
    Backend { backend: String, message: String },
}

/// Solves MILP models (how to solve).
///
/// Implementations must not keep state between calls: every solve receives
/// its own model and produces its own values.
pub trait MilpBackend: Send + Sync {
    /// Unique identifier (e.g., "microlp", "highs")
    fn id(&self) -> &str;

    /// Check if this backend can be used at runtime
    fn is_available(&self) -> bool {
        true
    }

    /// Solve the model to a terminal status
    fn solve(&self, model: &MilpModel, config: &SolverConfig) -> Result<OracleSolution, SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_trait_is_object_safe() {
        fn _accepts_backend(_b: &dyn MilpBackend) {}
        fn _assert_send_sync<T: Send + Sync>() {}
        _assert_send_sync::<Box<dyn MilpBackend>>();
    }

    #[test]
    fn test_terminal_solution_has_no_values() {
        let sol = OracleSolution::terminal(OracleStatus::Timeout, "hit 10s limit");
        assert!(sol.values.is_empty());
        assert!(sol.objective.is_nan());
        assert_eq!(sol.status.to_string(), "timeout");
    }
}
