//! `depot validate`

use anyhow::{Context, Result};
use depot_algo::design::DesignFormulation;
use depot_algo::LaneCosts;
use depot_cli::InstanceFile;
use std::path::Path;

pub fn handle(path: &Path) -> Result<()> {
    let network = InstanceFile::load(path)?
        .into_network()
        .context("validating instance")?;
    let costs = LaneCosts::compute(&network).context("pricing lanes")?;
    let formulation = DesignFormulation::build(&network, &costs).context("building model")?;
    let model = formulation.model();

    println!("Instance {} is valid", path.display());
    println!("  Plants: {}", network.num_plants());
    println!("  Candidate DCs: {}", network.num_candidate_dcs());
    println!("  Stores: {}", network.num_stores());
    println!("  Facilities to open: {}", network.facilities_to_open());
    println!("  Total demand: {:.0}", network.total_demand().value());
    println!(
        "  Lanes: {} rail, {} truck",
        costs.num_rail_lanes(),
        costs.num_truck_lanes()
    );
    println!(
        "  Model: {} variables ({} integer), {} constraints",
        model.num_variables(),
        model.num_integer_variables(),
        model.num_constraints()
    );
    Ok(())
}
