//! Command implementations for the sysdocs CLI.
//!
//! Each command module provides a `run` function. They share one setup
//! path: load configuration, discover the module graph, let the
//! orchestrator register the task chains, then execute the requested
//! targets on the embedded executor.

pub mod build;
pub mod docs;
pub mod index;
pub mod system_view;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use sysdocs_core::executor::{RunReport, TaskGraphExecutor};
use sysdocs_core::{DocsPipeline, ModuleGraph, Orchestrator, PipelineOptions};

use crate::config::SysdocsConfig;

/// A fully configured build: pipeline plus registered task graph.
pub(crate) struct BuildSession {
    pub pipeline: DocsPipeline,
    pub executor: TaskGraphExecutor,
}

/// Load config, discover modules, and register all documentation tasks.
pub(crate) fn configure(path: &str) -> Result<BuildSession> {
    let root = fs::canonicalize(path)
        .with_context(|| format!("project root `{path}` does not exist"))?;

    let config = SysdocsConfig::load(&root);
    let output_rel = PathBuf::from(config.output_dir());

    let graph = ModuleGraph::discover(&root, config.modules(), &output_rel)
        .context("module discovery failed")?;

    let options = PipelineOptions {
        output_dir: root.join(&output_rel),
        entities_subdir: config.entities_output_dir().to_string(),
        jobs_subdir: config.jobs_output_dir().to_string(),
    };
    let pipeline = DocsPipeline::new(graph, options);

    let mut executor = TaskGraphExecutor::new();
    let mut orchestrator = Orchestrator::new();
    pipeline
        .configure(&mut orchestrator, &mut executor)
        .context("task registration failed")?;

    Ok(BuildSession { pipeline, executor })
}

/// Execute the named tasks and their dependencies.
pub(crate) fn run_targets(session: &BuildSession, names: &[&str]) -> Result<RunReport> {
    let targets = names
        .iter()
        .map(|name| session.executor.task_id(name))
        .collect::<sysdocs_core::Result<Vec<_>>>()?;

    let report = session
        .executor
        .run(&targets, |kind| session.pipeline.execute(kind))?;
    Ok(report)
}
