//! Solver-neutral MILP model.
//!
//! [`MilpModel`] is what formulations build and what backends consume. It
//! only knows about variables with bounds and integrality, linear
//! constraints, and a linear objective with a direction.

use serde::{Deserialize, Serialize};

/// Handle to a variable declared in a [`MilpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarKind {
    Continuous,
    Integer,
    /// Integer restricted to {0, 1}
    Binary,
}

/// Declaration of a single variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    name: String,
    kind: VarKind,
    lower: f64,
    upper: f64,
}

impl VariableSpec {
    /// Continuous variable, unbounded below and above
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VarKind::Continuous,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    /// Integer variable, unbounded below and above
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            kind: VarKind::Integer,
            ..Self::continuous(name)
        }
    }

    /// Binary variable in {0, 1}
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VarKind::Binary,
            lower: 0.0,
            upper: 1.0,
        }
    }

    pub fn min(mut self, lower: f64) -> Self {
        self.lower = lower;
        self
    }

    pub fn max(mut self, upper: f64) -> Self {
        self.upper = upper;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    /// Lower bound; `-inf` when unbounded
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound; `+inf` when unbounded
    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn is_integral(&self) -> bool {
        matches!(self.kind, VarKind::Integer | VarKind::Binary)
    }
}

/// Affine expression `Σ coeff·var + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the given variables with unit coefficients
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    pub fn add_term(&mut self, var: VarId, coeff: f64) {
        self.terms.push((var, coeff));
    }

    pub fn with_term(mut self, var: VarId, coeff: f64) -> Self {
        self.add_term(var, coeff);
        self
    }

    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Evaluate against a full assignment indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coeff)| coeff * values.get(var.index()).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

impl Extend<(VarId, f64)> for LinearExpr {
    fn extend<I: IntoIterator<Item = (VarId, f64)>>(&mut self, iter: I) {
        self.terms.extend(iter);
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
            constant: 0.0,
        }
    }
}

/// Relation between the two sides of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Eq => write!(f, "=="),
            Comparison::Le => write!(f, "<="),
            Comparison::Ge => write!(f, ">="),
        }
    }
}

/// `lhs (==|<=|>=) rhs` with all variables on the left.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    name: String,
    lhs: LinearExpr,
    comparison: Comparison,
    rhs: f64,
}

impl LinearConstraint {
    /// Build a constraint; any constant on the left is folded into `rhs`.
    pub fn new(name: impl Into<String>, mut lhs: LinearExpr, comparison: Comparison, rhs: f64) -> Self {
        let rhs = rhs - lhs.constant;
        lhs.constant = 0.0;
        Self {
            name: name.into(),
            lhs,
            comparison,
            rhs,
        }
    }

    pub fn eq(name: impl Into<String>, lhs: LinearExpr, rhs: f64) -> Self {
        Self::new(name, lhs, Comparison::Eq, rhs)
    }

    pub fn le(name: impl Into<String>, lhs: LinearExpr, rhs: f64) -> Self {
        Self::new(name, lhs, Comparison::Le, rhs)
    }

    pub fn ge(name: impl Into<String>, lhs: LinearExpr, rhs: f64) -> Self {
        Self::new(name, lhs, Comparison::Ge, rhs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lhs(&self) -> &LinearExpr {
        &self.lhs
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Amount by which `values` violates this constraint (0 when satisfied).
    pub fn violation(&self, values: &[f64]) -> f64 {
        let lhs = self.lhs.evaluate(values);
        match self.comparison {
            Comparison::Eq => (lhs - self.rhs).abs(),
            Comparison::Le => (lhs - self.rhs).max(0.0),
            Comparison::Ge => (self.rhs - lhs).max(0.0),
        }
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    #[default]
    Minimise,
    Maximise,
}

/// A complete mixed-integer linear program.
#[derive(Debug, Clone, Default)]
pub struct MilpModel {
    name: String,
    variables: Vec<VariableSpec>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
    sense: Sense,
}

impl MilpModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare a variable and get its handle
    pub fn declare_variable(&mut self, spec: VariableSpec) -> VarId {
        self.variables.push(spec);
        VarId(self.variables.len() - 1)
    }

    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        debug_assert!(
            constraint
                .lhs()
                .terms()
                .iter()
                .all(|(v, _)| v.index() < self.variables.len()),
            "constraint '{}' references an undeclared variable",
            constraint.name()
        );
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, objective: LinearExpr, sense: Sense) {
        self.objective = objective;
        self.sense = sense;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[VariableSpec] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &VariableSpec {
        &self.variables[id.index()]
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integral()).count()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value of a full assignment
    pub fn evaluate_objective(&self, values: &[f64]) -> f64 {
        self.objective.evaluate(values)
    }

    /// Names of constraints and bounds violated by more than `tolerance`.
    pub fn violations(&self, values: &[f64], tolerance: f64) -> Vec<String> {
        let mut out = Vec::new();
        if values.len() != self.variables.len() {
            out.push(format!(
                "assignment has {} values for {} variables",
                values.len(),
                self.variables.len()
            ));
            return out;
        }
        for (spec, &value) in self.variables.iter().zip(values) {
            if value < spec.lower - tolerance || value > spec.upper + tolerance {
                out.push(format!("bound on {}", spec.name));
            } else if spec.is_integral() && (value - value.round()).abs() > tolerance {
                out.push(format!("integrality of {}", spec.name));
            }
        }
        for constraint in &self.constraints {
            if constraint.violation(values) > tolerance {
                out.push(constraint.name.clone());
            }
        }
        out
    }
}
