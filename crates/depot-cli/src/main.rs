use clap::Parser;
use depot_cli::{Cli, Commands};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match &cli.command {
        Commands::Solve {
            instance,
            config,
            solver,
            time_limit,
            facilities,
            out,
            format,
        } => commands::solve::handle(&commands::solve::SolveArgs {
            instance,
            config: config.as_deref(),
            solver: solver.as_deref(),
            time_limit: *time_limit,
            facilities: *facilities,
            out: out.as_deref(),
            format: *format,
        }),
        Commands::Validate { instance } => commands::validate::handle(instance),
        Commands::Sample { facilities, out } => commands::sample::handle(*facilities, out.as_deref()),
        Commands::Solvers => commands::solvers::handle(),
    };

    if let Err(e) = result {
        error!("command failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
