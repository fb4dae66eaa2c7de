//! `depot sample`

use anyhow::{Context, Result};
use depot_algo::test_utils::reference_network;
use depot_cli::InstanceFile;
use std::path::Path;
use tracing::info;

pub fn handle(facilities: usize, out: Option<&Path>) -> Result<()> {
    let network = reference_network(facilities).context("building reference network")?;
    let instance = InstanceFile::from_network(&network);
    match out {
        Some(path) => {
            instance.save(path)?;
            info!(path = %path.display(), "wrote reference instance");
            println!("Wrote reference instance to {}", path.display());
        }
        None => print!("{}", instance.to_toml()?),
    }
    Ok(())
}
