//! Build the project-wide documentation index.

use anyhow::Result;
use colored::Colorize;

use sysdocs_core::orchestrator::INDEX_TASK;

pub fn run(path: &str) -> Result<()> {
    let session = super::configure(path)?;

    let report = super::run_targets(&session, &[INDEX_TASK])?;

    println!(
        "{} project index built ({} tasks)",
        "ok".green().bold(),
        report.executed
    );
    Ok(())
}
