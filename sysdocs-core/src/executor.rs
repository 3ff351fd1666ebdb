//! Minimal task-graph executor standing in for the host build system.
//!
//! Real deployments hang the pipeline off an external build tool's task
//! graph through [`BuildGraph`]; the CLI needs something to execute those
//! registrations, and this is it. Tasks run in dependency waves: every
//! task whose dependencies have completed forms the next wave, and tasks
//! within a wave run in parallel under rayon. The pipeline's outputs do
//! not depend on wave parallelism because every task writes only
//! module-scoped files and the aggregation tasks order their input by
//! sorting, not by completion order.
//!
//! Failure propagation is the standard kind: a failed task marks all its
//! transitive dependents skipped, and the run reports the failure.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::error::{DocsError, Result};
use crate::orchestrator::{BuildGraph, TaskId, TaskKind};

#[derive(Debug)]
struct TaskEntry {
    name: String,
    kind: TaskKind,
    deps: Vec<TaskId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Pending,
    Done,
    Failed,
    Skipped,
}

/// Summary of one executor run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Tasks that executed successfully.
    pub executed: usize,
    /// Tasks skipped because a dependency failed.
    pub skipped: usize,
}

/// In-process build graph with wave-parallel execution.
#[derive(Debug, Default)]
pub struct TaskGraphExecutor {
    tasks: Vec<TaskEntry>,
    names: HashMap<String, TaskId>,
}

impl BuildGraph for TaskGraphExecutor {
    fn register(&mut self, name: &str, kind: TaskKind) -> Result<TaskId> {
        if self.names.contains_key(name) {
            return Err(DocsError::DuplicateTask {
                name: name.to_string(),
            });
        }
        let id = self.tasks.len();
        self.tasks.push(TaskEntry {
            name: name.to_string(),
            kind,
            deps: Vec::new(),
        });
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    fn find(&self, name: &str) -> Option<TaskId> {
        self.names.get(name).copied()
    }

    fn add_dependency(&mut self, task: TaskId, depends_on: TaskId) {
        let entry = &mut self.tasks[task];
        if !entry.deps.contains(&depends_on) {
            entry.deps.push(depends_on);
        }
    }
}

impl TaskGraphExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a task name, erroring on unknown names.
    pub fn task_id(&self, name: &str) -> Result<TaskId> {
        self.find(name).ok_or_else(|| DocsError::UnknownTask {
            name: name.to_string(),
        })
    }

    pub fn task_name(&self, id: TaskId) -> &str {
        &self.tasks[id].name
    }

    /// Execute the targets and their transitive dependencies.
    ///
    /// `action` interprets a [`TaskKind`]; it runs on rayon worker threads
    /// and must only touch task-scoped state. Returns the first task
    /// failure after finishing everything that could still run.
    pub fn run<F>(&self, targets: &[TaskId], action: F) -> Result<RunReport>
    where
        F: Fn(&TaskKind) -> Result<()> + Sync,
    {
        let needed = self.closure(targets);
        let mut status: Vec<Status> = vec![Status::Pending; self.tasks.len()];
        let mut first_failure: Option<DocsError> = None;

        loop {
            self.propagate_skips(&needed, &mut status);

            let ready: Vec<TaskId> = needed
                .iter()
                .copied()
                .filter(|&id| {
                    status[id] == Status::Pending
                        && self.tasks[id].deps.iter().all(|&d| status[d] == Status::Done)
                })
                .collect();

            if ready.is_empty() {
                break;
            }

            let results: Vec<(TaskId, Result<()>)> = ready
                .par_iter()
                .map(|&id| {
                    tracing::debug!("running task `{}`", self.tasks[id].name);
                    (id, action(&self.tasks[id].kind))
                })
                .collect();

            for (id, result) in results {
                match result {
                    Ok(()) => status[id] = Status::Done,
                    Err(err) => {
                        tracing::error!("task `{}` failed: {}", self.tasks[id].name, err);
                        status[id] = Status::Failed;
                        if first_failure.is_none() {
                            first_failure = Some(err);
                        }
                    }
                }
            }
        }

        if let Some(err) = first_failure {
            return Err(err);
        }

        // Nothing failed, so leftover pending tasks mean a cycle.
        if let Some(&stuck) = needed.iter().find(|&&id| status[id] == Status::Pending) {
            return Err(DocsError::DependencyCycle {
                name: self.tasks[stuck].name.clone(),
            });
        }

        Ok(RunReport {
            executed: needed
                .iter()
                .filter(|&&id| status[id] == Status::Done)
                .count(),
            skipped: needed
                .iter()
                .filter(|&&id| status[id] == Status::Skipped)
                .count(),
        })
    }

    /// Targets plus transitive dependencies, in stable id order.
    fn closure(&self, targets: &[TaskId]) -> Vec<TaskId> {
        let mut seen = HashSet::new();
        let mut stack: Vec<TaskId> = targets.to_vec();
        while let Some(id) = stack.pop() {
            if seen.insert(id) {
                stack.extend(&self.tasks[id].deps);
            }
        }
        let mut needed: Vec<TaskId> = seen.into_iter().collect();
        needed.sort_unstable();
        needed
    }

    /// Mark pending tasks whose dependencies failed or were skipped.
    fn propagate_skips(&self, needed: &[TaskId], status: &mut [Status]) {
        loop {
            let mut changed = false;
            for &id in needed {
                if status[id] != Status::Pending {
                    continue;
                }
                let blocked = self.tasks[id]
                    .deps
                    .iter()
                    .any(|&d| matches!(status[d], Status::Failed | Status::Skipped));
                if blocked {
                    tracing::warn!(
                        "skipping task `{}`: a dependency failed",
                        self.tasks[id].name
                    );
                    status[id] = Status::Skipped;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }
}
