//! Pipeline wiring: module graph + options into executable tasks.
//!
//! [`DocsPipeline`] is the piece between orchestration and the component
//! builders. It knows the on-disk layout (where each module's fragment
//! store and bundle live under the output directory) and interprets
//! [`TaskKind`]s for whatever executes the registered build graph.

use std::path::PathBuf;

use crate::bundle;
use crate::error::{DocsError, Result};
use crate::extract;
use crate::graph::{ModuleGraph, ModuleRef};
use crate::index;
use crate::orchestrator::{BuildGraph, Orchestrator, TaskKind};
use crate::store::FragmentStore;
use crate::system_view;

/// Recognized pipeline options.
///
/// The two subdirectory names are the extraction step's only configuration
/// surface, mirroring the jobs/entities output-directory options handed to
/// the annotation scanner.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    /// Project-level output directory (absolute).
    pub output_dir: PathBuf,
    /// Entity fragment directory per module, relative to the module's
    /// output directory.
    pub entities_subdir: String,
    /// Job fragment directory per module, same convention.
    pub jobs_subdir: String,
}

impl PipelineOptions {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            entities_subdir: "entities".to_string(),
            jobs_subdir: "jobs".to_string(),
        }
    }
}

/// Executable documentation pipeline over one discovered module graph.
#[derive(Debug)]
pub struct DocsPipeline {
    graph: ModuleGraph,
    options: PipelineOptions,
}

impl DocsPipeline {
    pub fn new(graph: ModuleGraph, options: PipelineOptions) -> Self {
        Self { graph, options }
    }

    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    /// Apply the documentation capability to every module in the graph.
    ///
    /// Each module is applied independently, the way per-module setup code
    /// would in a real host build; the orchestrator guarantees singleton
    /// root tasks regardless of order.
    pub fn configure(
        &self,
        orchestrator: &mut Orchestrator,
        build_graph: &mut dyn BuildGraph,
    ) -> Result<()> {
        for module in self.graph.iter_all() {
            orchestrator.apply(build_graph, &module.id)?;
        }
        Ok(())
    }

    /// Execute one registered task.
    pub fn execute(&self, kind: &TaskKind) -> Result<()> {
        match kind {
            TaskKind::ExtractDocs { module } => {
                let module_ref = self.module(module)?;
                extract::run_extraction(module, &module_ref.dir, &self.store_for(module))?;
                Ok(())
            }
            TaskKind::BuildDocs { module } => {
                let module_ref = self.module(module)?;
                bundle::build_module_docs(
                    module_ref,
                    &self.store_for(module),
                    &bundle::bundle_path(&self.options.output_dir, module),
                )?;
                Ok(())
            }
            TaskKind::BuildDocsIndex => {
                index::build_index(&self.graph, &self.options.output_dir)?;
                Ok(())
            }
            TaskKind::BuildSystemView => {
                system_view::build_system_view(&self.graph, &self.options.output_dir)?;
                Ok(())
            }
        }
    }

    /// Fragment store location for one module.
    pub fn store_for(&self, module_id: &str) -> FragmentStore {
        let base = self.options.output_dir.join(module_id);
        FragmentStore::new(
            base.join(&self.options.entities_subdir),
            base.join(&self.options.jobs_subdir),
        )
    }

    fn module(&self, module_id: &str) -> Result<&ModuleRef> {
        self.graph
            .find(module_id)
            .ok_or_else(|| DocsError::UnknownModule {
                module: module_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_store_layout_follows_options() {
        let dir = TempDir::new().unwrap();
        let graph =
            ModuleGraph::discover(dir.path(), Some(&[]), Path::new("build/docs")).unwrap();

        let mut options = PipelineOptions::new(dir.path().join("build/docs"));
        options.jobs_subdir = "docs/jobs".to_string();
        let pipeline = DocsPipeline::new(graph, options);

        let store = pipeline.store_for("billing");
        assert!(store
            .dir(crate::types::Category::Job)
            .ends_with("billing/docs/jobs"));
    }

    #[test]
    fn test_execute_unknown_module_fails() {
        let dir = TempDir::new().unwrap();
        let graph =
            ModuleGraph::discover(dir.path(), Some(&[]), Path::new("build/docs")).unwrap();
        let pipeline = DocsPipeline::new(
            graph,
            PipelineOptions::new(dir.path().join("build/docs")),
        );

        let err = pipeline
            .execute(&TaskKind::ExtractDocs {
                module: "ghost".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, DocsError::UnknownModule { .. }));
    }
}
