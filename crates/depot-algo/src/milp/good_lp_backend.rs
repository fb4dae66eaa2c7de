//! `good_lp` implementation of [`MilpBackend`].
//!
//! Translates a [`MilpModel`] into `good_lp` variables, constraints and an
//! objective, then hands it to the selected solver. `microlp` is always
//! compiled in; HiGHS and CBC need the `solver-highs` / `solver-cbc` features.

use super::backend::{MilpBackend, OracleSolution, OracleStatus, SolverError};
use super::config::{LpSolverKind, SolverConfig};
use super::model::{Comparison, LinearExpr, MilpModel, Sense, VarKind, VariableSpec};
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolutionStatus, Solver, SolverModel, Variable, VariableDefinition,
};
use tracing::{debug, warn};
use web_time::Instant;

/// Backend driving one of the `good_lp` solvers.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend {
    kind: LpSolverKind,
}

impl GoodLpBackend {
    pub fn new(kind: LpSolverKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> LpSolverKind {
        self.kind
    }
}

impl MilpBackend for GoodLpBackend {
    fn id(&self) -> &str {
        self.kind.as_str()
    }

    fn solve(&self, model: &MilpModel, config: &SolverConfig) -> Result<OracleSolution, SolverError> {
        check_model(self.id(), model)?;

        let start = Instant::now();
        debug!(
            backend = self.id(),
            model = model.name(),
            variables = model.num_variables(),
            integer_variables = model.num_integer_variables(),
            constraints = model.num_constraints(),
            "handing model to good_lp"
        );

        let outcome = match self.kind {
            LpSolverKind::Microlp => {
                if config.time_limit_seconds.is_some() {
                    warn!("microlp has no time limit option; ignoring time_limit_seconds");
                }
                solve_with(model, good_lp::solvers::microlp::microlp, |problem| problem)
            }
            #[cfg(feature = "solver-highs")]
            LpSolverKind::Highs => {
                let verbose = config.verbose;
                let time_limit = config.time_limit_seconds;
                solve_with(model, good_lp::solvers::highs::highs, move |mut problem| {
                    problem.set_verbose(verbose);
                    match time_limit {
                        Some(seconds) => problem.set_time_limit(seconds),
                        None => problem,
                    }
                })
            }
            #[cfg(feature = "solver-cbc")]
            LpSolverKind::Cbc => {
                let verbose = config.verbose;
                let time_limit = config.time_limit_seconds;
                solve_with(model, good_lp::solvers::coin_cbc::coin_cbc, move |mut problem| {
                    problem.set_parameter("logLevel", if verbose { "1" } else { "0" });
                    if let Some(seconds) = time_limit {
                        problem.set_parameter("seconds", &seconds.to_string());
                    }
                    problem
                })
            }
        };

        debug!(
            backend = self.id(),
            status = %outcome.status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "good_lp returned"
        );
        Ok(outcome)
    }
}

/// Reject models no solver could accept (inverted bounds, NaN coefficients).
fn check_model(backend: &str, model: &MilpModel) -> Result<(), SolverError> {
    let invalid = |message: String| SolverError::InvalidModel {
        backend: backend.to_string(),
        message,
    };

    for spec in model.variables() {
        if spec.lower().is_nan() || spec.upper().is_nan() || spec.lower() > spec.upper() {
            return Err(invalid(format!(
                "variable {} has bounds [{}, {}]",
                spec.name(),
                spec.lower(),
                spec.upper()
            )));
        }
    }
    let finite = |expr: &LinearExpr| {
        expr.terms().iter().all(|(_, c)| c.is_finite()) && expr.constant().is_finite()
    };
    if !finite(model.objective()) {
        return Err(invalid("objective has a non-finite coefficient".into()));
    }
    for c in model.constraints() {
        if !finite(c.lhs()) || !c.rhs().is_finite() {
            return Err(invalid(format!(
                "constraint {} has a non-finite coefficient",
                c.name()
            )));
        }
    }
    Ok(())
}

fn definition(spec: &VariableSpec) -> VariableDefinition {
    let mut def = variable().name(spec.name());
    def = match spec.kind() {
        VarKind::Binary => def.binary(),
        VarKind::Integer => def.integer(),
        VarKind::Continuous => def,
    };
    if spec.lower().is_finite() {
        def = def.min(spec.lower());
    }
    if spec.upper().is_finite() {
        def = def.max(spec.upper());
    }
    def
}

fn expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::from(expr.constant());
    for &(var, coeff) in expr.terms() {
        out += coeff * handles[var.index()];
    }
    out
}

/// Status of a solution `good_lp` handed back as `Ok`.
///
/// HiGHS and CBC return their incumbent when a time, iteration or interrupt
/// limit stops the search; that incumbent is not optimal. A gap-limited stop
/// is within the backend's own MIP gap tolerance and counts as optimal.
fn incumbent_status(status: SolutionStatus) -> OracleStatus {
    match status {
        SolutionStatus::Optimal => OracleStatus::Optimal,
        SolutionStatus::GapLimit => {
            debug!("solver stopped within its MIP gap tolerance");
            OracleStatus::Optimal
        }
        SolutionStatus::TimeLimit => OracleStatus::Timeout,
    }
}

fn solve_with<S, F>(model: &MilpModel, solver: S, configure: F) -> OracleSolution
where
    S: Solver,
    S::Model: SolverModel<Error = ResolutionError>,
    F: FnOnce(S::Model) -> S::Model,
{
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variables()
        .iter()
        .map(|spec| vars.add(definition(spec)))
        .collect();

    let objective = expression(model.objective(), &handles);
    let unsolved = match model.sense() {
        Sense::Minimise => vars.minimise(objective),
        Sense::Maximise => vars.maximise(objective),
    };
    let mut problem = configure(unsolved.using(solver));

    for c in model.constraints() {
        let lhs = expression(c.lhs(), &handles);
        let rhs = c.rhs();
        problem = match c.comparison() {
            Comparison::Eq => problem.with(constraint!(lhs == rhs)),
            Comparison::Le => problem.with(constraint!(lhs <= rhs)),
            Comparison::Ge => problem.with(constraint!(lhs >= rhs)),
        };
    }

    match problem.solve() {
        Ok(solution) => match incumbent_status(solution.status()) {
            OracleStatus::Optimal => {
                let values: Vec<f64> = handles.iter().map(|v| solution.value(*v)).collect();
                let objective = model.evaluate_objective(&values);
                OracleSolution::optimal(objective, values)
            }
            status => OracleSolution::terminal(
                status,
                "solver stopped on a limit before proving optimality",
            ),
        },
        Err(ResolutionError::Infeasible) => {
            OracleSolution::terminal(OracleStatus::Infeasible, "problem is infeasible")
        }
        Err(ResolutionError::Unbounded) => {
            OracleSolution::terminal(OracleStatus::Unbounded, "problem is unbounded")
        }
        Err(other) => {
            let message = other.to_string();
            let lowered = message.to_ascii_lowercase();
            let status = if lowered.contains("time") {
                OracleStatus::Timeout
            } else if lowered.contains("numeric") {
                OracleStatus::NumericalError
            } else {
                OracleStatus::Error
            };
            OracleSolution::terminal(status, message)
        }
    }
}
