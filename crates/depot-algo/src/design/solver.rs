//! Network design pipeline: price lanes, build, solve, extract.

use super::extract::extract;
use super::formulation::DesignFormulation;
use super::NetworkDesignSolution;
use crate::cost::{LaneCostError, LaneCosts};
use crate::milp::{MilpBackend, OracleStatus, SolverConfig, SolverError};
use depot_core::{DepotError, SupplyNetwork};
use thiserror::Error;
use tracing::{debug, info};
use web_time::Instant;

/// Why a network design run produced no result.
#[derive(Debug, Error)]
pub enum NetworkDesignError {
    /// Missing distance, bad entity data or unusable solver settings
    #[error("configuration error: {0}")]
    Configuration(String),

    /// K exceeds the candidate DCs, or the constraints cannot all hold
    #[error("infeasible model: {0}")]
    InfeasibleModel(String),

    /// The backend ended without an optimal or infeasible verdict
    #[error("solver failure ({backend}, {status}): {message}")]
    SolverFailure {
        backend: String,
        status: OracleStatus,
        message: String,
    },
}

impl NetworkDesignError {
    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkDesignError::Configuration(_) => "configuration",
            NetworkDesignError::InfeasibleModel(_) => "infeasible_model",
            NetworkDesignError::SolverFailure { .. } => "solver_failure",
        }
    }
}

impl From<DepotError> for NetworkDesignError {
    fn from(err: DepotError) -> Self {
        NetworkDesignError::Configuration(err.to_string())
    }
}

impl From<LaneCostError> for NetworkDesignError {
    fn from(err: LaneCostError) -> Self {
        NetworkDesignError::Configuration(err.to_string())
    }
}

/// Solve the design problem with the backend named in `config`.
///
/// # Example
///
/// ```no_run
/// use depot_algo::design::solve_network_design;
/// use depot_algo::milp::SolverConfig;
/// use depot_algo::test_utils::reference_network;
///
/// let network = reference_network(2)?;
/// let solution = solve_network_design(&network, &SolverConfig::default())?;
/// println!("{}", solution.summary());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn solve_network_design(
    network: &SupplyNetwork,
    config: &SolverConfig,
) -> Result<NetworkDesignSolution, NetworkDesignError> {
    let backend = config.backend.build_backend();
    solve_network_design_with(network, backend.as_ref(), config)
}

/// Solve the design problem with an explicit backend.
///
/// Every call builds a fresh model; nothing is shared between runs.
pub fn solve_network_design_with(
    network: &SupplyNetwork,
    backend: &dyn MilpBackend,
    config: &SolverConfig,
) -> Result<NetworkDesignSolution, NetworkDesignError> {
    let start = Instant::now();
    check_config(config)?;

    let costs = LaneCosts::compute(network)?;
    let formulation = DesignFormulation::build(network, &costs)?;
    let model = formulation.model();
    info!(
        backend = backend.id(),
        plants = network.num_plants(),
        dcs = network.num_candidate_dcs(),
        stores = network.num_stores(),
        k = network.facilities_to_open(),
        variables = model.num_variables(),
        constraints = model.num_constraints(),
        "solving network design"
    );

    let solved = if backend.is_available() {
        backend.solve(model, config)
    } else {
        Err(SolverError::Unavailable {
            backend: backend.id().to_string(),
        })
    }
    .map_err(|e| NetworkDesignError::SolverFailure {
        backend: backend.id().to_string(),
        status: OracleStatus::Error,
        message: e.to_string(),
    })?;
    debug!(status = %solved.status, objective = solved.objective, "backend finished");

    match solved.status {
        OracleStatus::Optimal => {
            let solution = extract(
                network,
                &costs,
                &formulation,
                &solved,
                config,
                backend.id(),
                start.elapsed(),
            )?;
            info!(
                total_cost = solution.total_cost.value(),
                open = ?solution.open_dcs.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                elapsed_ms = solution.solve_time.as_millis() as u64,
                "network design solved"
            );
            Ok(solution)
        }
        OracleStatus::Infeasible => Err(NetworkDesignError::InfeasibleModel(
            solved
                .message
                .unwrap_or_else(|| "constraints are jointly unsatisfiable".to_string()),
        )),
        status => Err(NetworkDesignError::SolverFailure {
            backend: backend.id().to_string(),
            status,
            message: solved
                .message
                .unwrap_or_else(|| format!("terminated with status {}", status)),
        }),
    }
}

fn check_config(config: &SolverConfig) -> Result<(), NetworkDesignError> {
    if !(config.binary_threshold > 0.0 && config.binary_threshold < 1.0) {
        return Err(NetworkDesignError::Configuration(format!(
            "binary_threshold must lie strictly between 0 and 1, got {}",
            config.binary_threshold
        )));
    }
    if !(config.flow_epsilon.is_finite() && config.flow_epsilon >= 0.0) {
        return Err(NetworkDesignError::Configuration(format!(
            "flow_epsilon must be non-negative, got {}",
            config.flow_epsilon
        )));
    }
    if let Some(limit) = config.time_limit_seconds {
        if !(limit.is_finite() && limit > 0.0) {
            return Err(NetworkDesignError::Configuration(format!(
                "time_limit_seconds must be positive, got {}",
                limit
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            NetworkDesignError::Configuration("x".into()).kind(),
            "configuration"
        );
        let failure = NetworkDesignError::SolverFailure {
            backend: "highs".into(),
            status: OracleStatus::Timeout,
            message: "time limit reached".into(),
        };
        assert_eq!(failure.kind(), "solver_failure");
        assert_eq!(
            failure.to_string(),
            "solver failure (highs, timeout): time limit reached"
        );
    }

    #[test]
    fn test_depot_error_is_configuration() {
        let err: NetworkDesignError = DepotError::Validation("bad demand".into()).into();
        assert!(matches!(err, NetworkDesignError::Configuration(ref m) if m.contains("bad demand")));
    }

    #[test]
    fn test_bad_thresholds_rejected() {
        let mut config = SolverConfig::default();
        config.binary_threshold = 1.0;
        assert!(check_config(&config).is_err());

        let mut config = SolverConfig::default();
        config.flow_epsilon = -1.0;
        assert!(check_config(&config).is_err());

        let config = SolverConfig::default().with_time_limit(0.0);
        assert!(check_config(&config).is_err());

        assert!(check_config(&SolverConfig::default()).is_ok());
    }
}
