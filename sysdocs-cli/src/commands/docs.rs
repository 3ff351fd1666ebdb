//! Build one module's documentation bundle.

use anyhow::Result;
use colored::Colorize;

use sysdocs_core::orchestrator::build_task_name;

pub fn run(path: &str, module: &str) -> Result<()> {
    let session = super::configure(path)?;

    let task = build_task_name(module);
    let report = super::run_targets(&session, &[task.as_str()])?;

    println!(
        "{} docs for `{}` built ({} tasks)",
        "ok".green().bold(),
        module,
        report.executed
    );
    Ok(())
}
