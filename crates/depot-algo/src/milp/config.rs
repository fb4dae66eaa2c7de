//! Backend selection and solver configuration.

use super::backend::MilpBackend;
use super::good_lp_backend::GoodLpBackend;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// MILP backends compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LpSolverKind {
    /// Pure-Rust simplex with branch-and-bound
    #[default]
    Microlp,
    #[cfg(feature = "solver-highs")]
    Highs,
    #[cfg(feature = "solver-cbc")]
    Cbc,
}

const AVAILABLE_LP_SOLVERS: &[&str] = &[
    "microlp",
    #[cfg(feature = "solver-highs")]
    "highs",
    #[cfg(feature = "solver-cbc")]
    "cbc",
];

impl LpSolverKind {
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_LP_SOLVERS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LpSolverKind::Microlp => "microlp",
            #[cfg(feature = "solver-highs")]
            LpSolverKind::Highs => "highs",
            #[cfg(feature = "solver-cbc")]
            LpSolverKind::Cbc => "cbc",
        }
    }

    /// Instantiate the backend for this kind
    pub fn build_backend(self) -> Box<dyn MilpBackend> {
        Box::new(GoodLpBackend::new(self))
    }
}

impl std::fmt::Display for LpSolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unknown_solver_error(label: &str) -> anyhow::Error {
    anyhow!(
        "unknown milp solver '{}'; supported values: {}",
        label,
        LpSolverKind::available().join(", ")
    )
}

impl FromStr for LpSolverKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_ascii_lowercase();
        match normalized.as_str() {
            "microlp" | "default" => Ok(LpSolverKind::Microlp),
            "highs" => {
                #[cfg(feature = "solver-highs")]
                {
                    Ok(LpSolverKind::Highs)
                }
                #[cfg(not(feature = "solver-highs"))]
                {
                    Err(unknown_solver_error(&normalized))
                }
            }
            "cbc" | "coin_cbc" => {
                #[cfg(feature = "solver-cbc")]
                {
                    Ok(LpSolverKind::Cbc)
                }
                #[cfg(not(feature = "solver-cbc"))]
                {
                    Err(unknown_solver_error(&normalized))
                }
            }
            other => Err(unknown_solver_error(other)),
        }
    }
}

/// Configuration for one network design solve.
///
/// Loaded from the `[solver]` table of a TOML config file; every field has a
/// default so an empty table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Backend used by [`crate::design::solve_network_design`]
    pub backend: LpSolverKind,
    /// Wall-clock limit handed to backends that support one
    pub time_limit_seconds: Option<f64>,
    /// Let the backend print its own log
    pub verbose: bool,
    /// Binary variables above this value count as 1
    pub binary_threshold: f64,
    /// Shipment variables above this value are reported
    pub flow_epsilon: f64,
    /// Relative tolerance used when verifying a returned solution
    pub verify_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: LpSolverKind::default(),
            time_limit_seconds: None,
            verbose: false,
            binary_threshold: 0.5,
            flow_epsilon: 0.0,
            verify_tolerance: 1e-6,
        }
    }
}

impl SolverConfig {
    pub fn with_backend(mut self, backend: LpSolverKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_seconds = Some(seconds);
        self
    }
}
