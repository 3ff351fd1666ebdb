//! Task orchestration against the host build graph.
//!
//! Every module's setup code applies the documentation capability
//! independently and in unpredictable order, so the orchestrator keeps a
//! per-module state machine (`Unconfigured` -> `Configured`, re-entry is a
//! no-op) and creates the two project-wide aggregation tasks lazily on
//! first demand. Later modules find the existing root task and only add a
//! dependency edge, which is the check-then-act-once registration the
//! "exactly one aggregation task" guarantee rests on.
//!
//! The host build system itself stays behind the [`BuildGraph`] trait: the
//! orchestrator registers names, kinds, and edges, nothing more. Execution
//! order, caching, and failure propagation belong to whoever implements
//! the trait (in this workspace, [`crate::executor::TaskGraphExecutor`]).

use std::collections::HashMap;

use crate::error::Result;

/// Identifier of a registered task, scoped to one [`BuildGraph`].
pub type TaskId = usize;

/// Name of the singleton project index task.
pub const INDEX_TASK: &str = "buildDocsIndex";

/// Name of the singleton system view task.
pub const SYSTEM_VIEW_TASK: &str = "buildSystemView";

/// What a registered task does when executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Run one module's element extraction into its fragment store.
    ExtractDocs { module: String },
    /// Build one module's documentation bundle.
    BuildDocs { module: String },
    /// Build the project-wide index (root singleton).
    BuildDocsIndex,
    /// Build the merged system diagram (root singleton).
    BuildSystemView,
}

/// Scoped task-registration interface onto the host build graph.
pub trait BuildGraph {
    /// Register a task under a unique name.
    ///
    /// Fails with [`crate::DocsError::DuplicateTask`] when the name is
    /// taken; callers wanting find-or-create semantics use [`Self::find`]
    /// first.
    fn register(&mut self, name: &str, kind: TaskKind) -> Result<TaskId>;

    /// Look up a task by name.
    fn find(&self, name: &str) -> Option<TaskId>;

    /// Declare that `task` depends on `depends_on`. Duplicate edges are
    /// tolerated.
    fn add_dependency(&mut self, task: TaskId, depends_on: TaskId);
}

/// Task name for a module's extraction step.
pub fn extract_task_name(module_id: &str) -> String {
    format!("extractDocs:{module_id}")
}

/// Task name for a module's doc build step.
pub fn build_task_name(module_id: &str) -> String {
    format!("buildDocs:{module_id}")
}

/// Wires per-module task chains and the root aggregation tasks.
#[derive(Debug, Default)]
pub struct Orchestrator {
    /// Build task id per configured module; absence means unconfigured.
    configured: HashMap<String, TaskId>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the documentation capability to one module.
    ///
    /// First application registers the module's extract and build tasks
    /// (build depends on extract), ensures both root aggregation tasks
    /// exist, and adds this module's build task to their dependency sets.
    /// Re-application is ignored. Returns whether this call configured the
    /// module.
    pub fn apply(&mut self, graph: &mut dyn BuildGraph, module_id: &str) -> Result<bool> {
        if self.configured.contains_key(module_id) {
            tracing::trace!("module `{}` already configured", module_id);
            return Ok(false);
        }

        let extract = graph.register(
            &extract_task_name(module_id),
            TaskKind::ExtractDocs {
                module: module_id.to_string(),
            },
        )?;
        let build = graph.register(
            &build_task_name(module_id),
            TaskKind::BuildDocs {
                module: module_id.to_string(),
            },
        )?;
        graph.add_dependency(build, extract);

        let index = ensure_root_task(graph, INDEX_TASK, TaskKind::BuildDocsIndex)?;
        graph.add_dependency(index, build);

        let view = ensure_root_task(graph, SYSTEM_VIEW_TASK, TaskKind::BuildSystemView)?;
        graph.add_dependency(view, build);

        self.configured.insert(module_id.to_string(), build);
        tracing::debug!("configured documentation tasks for `{}`", module_id);
        Ok(true)
    }

    /// Whether a module has been configured.
    pub fn is_configured(&self, module_id: &str) -> bool {
        self.configured.contains_key(module_id)
    }

    /// The build task of a configured module.
    pub fn build_task(&self, module_id: &str) -> Option<TaskId> {
        self.configured.get(module_id).copied()
    }
}

/// Find-or-create a root singleton task.
fn ensure_root_task(graph: &mut dyn BuildGraph, name: &str, kind: TaskKind) -> Result<TaskId> {
    match graph.find(name) {
        Some(id) => Ok(id),
        None => graph.register(name, kind),
    }
}
