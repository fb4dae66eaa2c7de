pub mod cli;
pub mod config;
pub mod instance;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::CliConfig;
pub use instance::InstanceFile;
