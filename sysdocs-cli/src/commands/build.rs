//! Full build: every module's docs plus both project-wide artifacts.

use anyhow::Result;
use colored::Colorize;

use sysdocs_core::orchestrator::{INDEX_TASK, SYSTEM_VIEW_TASK};

pub fn run(path: &str) -> Result<()> {
    let session = super::configure(path)?;

    let module_count = session.pipeline.graph().modules().len();
    println!(
        "Building documentation for {} modules + root",
        module_count.to_string().bold()
    );

    let report = super::run_targets(&session, &[INDEX_TASK, SYSTEM_VIEW_TASK])?;

    println!(
        "{} index and system view built ({} tasks)",
        "ok".green().bold(),
        report.executed
    );
    Ok(())
}
