//! CLI configuration file.
//!
//! ```toml
//! [solver]
//! backend = "microlp"
//! time_limit_seconds = 60
//! binary_threshold = 0.5
//! ```

use anyhow::{Context, Result};
use depot_algo::{LpSolverKind, SolverConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub solver: SolverConfig,
}

impl CliConfig {
    /// Load `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(mut self, solver: Option<&str>, time_limit: Option<f64>) -> Result<Self> {
        if let Some(name) = solver {
            self.solver.backend = name.parse::<LpSolverKind>()?;
        }
        if let Some(seconds) = time_limit {
            self.solver.time_limit_seconds = Some(seconds);
        }
        Ok(self)
    }
}
