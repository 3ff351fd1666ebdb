//! Build the merged system diagram.

use anyhow::Result;
use colored::Colorize;

use sysdocs_core::orchestrator::SYSTEM_VIEW_TASK;

pub fn run(path: &str) -> Result<()> {
    let session = super::configure(path)?;

    let report = super::run_targets(&session, &[SYSTEM_VIEW_TASK])?;

    println!(
        "{} system view built ({} tasks)",
        "ok".green().bold(),
        report.executed
    );
    Ok(())
}
