//! `depot solve`

use anyhow::{bail, Context, Result};
use depot_algo::{solve_network_design, verify_solution, NetworkDesignSolution};
use depot_cli::{CliConfig, InstanceFile, OutputFormat};
use depot_core::SupplyNetwork;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tabwriter::TabWriter;
use tracing::info;

pub struct SolveArgs<'a> {
    pub instance: &'a Path,
    pub config: Option<&'a Path>,
    pub solver: Option<&'a str>,
    pub time_limit: Option<f64>,
    pub facilities: Option<usize>,
    pub out: Option<&'a Path>,
    pub format: OutputFormat,
}

/// Solution output format
#[derive(Debug, Serialize)]
struct SolveOutput<'a> {
    status: &'static str,
    instance: String,
    facilities_to_open: usize,
    solve_time_ms: u64,
    #[serde(flatten)]
    solution: &'a NetworkDesignSolution,
}

pub fn handle(args: &SolveArgs<'_>) -> Result<()> {
    let config = CliConfig::load(args.config)?.with_overrides(args.solver, args.time_limit)?;

    let mut network = InstanceFile::load(args.instance)?
        .into_network()
        .context("validating instance")?;
    if let Some(k) = args.facilities {
        network = network.with_facilities_to_open(k);
    }
    info!(
        instance = %args.instance.display(),
        backend = %config.solver.backend,
        k = network.facilities_to_open(),
        "solving"
    );

    let solution = solve_network_design(&network, &config.solver)
        .with_context(|| format!("solving {}", args.instance.display()))?;

    let violations = verify_solution(&network, &solution, config.solver.verify_tolerance);
    if !violations.is_empty() {
        let listed: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        bail!("solution failed verification: {}", listed.join("; "));
    }

    let output = SolveOutput {
        status: "optimal",
        instance: args.instance.display().to_string(),
        facilities_to_open: network.facilities_to_open(),
        solve_time_ms: solution.solve_time.as_millis() as u64,
        solution: &solution,
    };

    match args.format {
        OutputFormat::Table => print_tables(&network, &solution)?,
        OutputFormat::Summary => print!("{}", solution.summary()),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &output).context("writing JSON to stdout")?;
            println!();
        }
    }

    if let Some(path) = args.out {
        let file =
            File::create(path).with_context(|| format!("creating output file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &output).context("serializing solution")?;
        writer.flush()?;
        if args.format != OutputFormat::Json {
            println!("\nSolution written to {}", path.display());
        }
    }
    Ok(())
}

fn location(label: &Option<String>) -> &str {
    label.as_deref().unwrap_or("-")
}

fn print_tables(network: &SupplyNetwork, solution: &NetworkDesignSolution) -> Result<()> {
    let mut w = TabWriter::new(io::stdout());
    let costs = &solution.cost_breakdown;
    writeln!(w, "Total cost:\t{:.2}", solution.total_cost.value())?;
    writeln!(w, "  rail:\t{:.2}", costs.rail.value())?;
    writeln!(w, "  truck:\t{:.2}", costs.truck.value())?;
    writeln!(w, "  fixed:\t{:.2}", costs.fixed.value())?;
    writeln!(w, "Backend:\t{} ({:.2?})", solution.backend, solution.solve_time)?;

    writeln!(w, "\nOPEN DC\tLOCATION\tFIXED COST\tINBOUND\tSTORES")?;
    for dc in network.distribution_centers() {
        if !solution.is_open(&dc.id) {
            continue;
        }
        writeln!(
            w,
            "{}\t{}\t{:.2}\t{:.0}\t{}",
            dc.id,
            location(&dc.location),
            dc.fixed_cost.value(),
            solution.inbound(&dc.id).value(),
            solution.stores_served_by(&dc.id).count()
        )?;
    }

    writeln!(w, "\nPLANT\tDC\tSHIPPED")?;
    for shipment in &solution.shipments {
        writeln!(
            w,
            "{}\t{}\t{:.0}",
            shipment.plant,
            shipment.dc,
            shipment.quantity.value()
        )?;
    }

    writeln!(w, "\nDC\tSTORE\tLOCATION\tSHIPPED")?;
    for shipment in &solution.dc_store_shipments {
        let label = network
            .store(&shipment.store)
            .map(|s| location(&s.location))
            .unwrap_or("-");
        writeln!(
            w,
            "{}\t{}\t{}\t{:.0}",
            shipment.dc,
            shipment.store,
            label,
            shipment.quantity.value()
        )?;
    }
    w.flush()?;
    Ok(())
}
