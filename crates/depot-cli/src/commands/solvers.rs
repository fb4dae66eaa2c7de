//! `depot solvers`

use anyhow::Result;
use depot_algo::LpSolverKind;
use std::io::{self, Write};
use tabwriter::TabWriter;

pub fn handle() -> Result<()> {
    let default = LpSolverKind::default();
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "BACKEND\tDEFAULT")?;
    for name in LpSolverKind::available() {
        let marker = if *name == default.as_str() { "yes" } else { "" };
        writeln!(writer, "{}\t{}", name, marker)?;
    }
    writer.flush()?;
    Ok(())
}
