//! Project index builder: one navigable index over every module's bundle.
//!
//! Runs once per project, after every module's doc builder. Reads the
//! already-built bundle artifacts and stitches them root-first, then in
//! sorted module-path order, so the index diffs cleanly between builds.
//!
//! Failure policy: a module without a built bundle fails the index. The
//! index never silently omits a module; if a module's build failed, the
//! scheduler will not have run the index at all (standard fail
//! propagation), and a missing artifact here means broken wiring.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle;
use crate::error::{DocsError, Result};
use crate::graph::ModuleGraph;
use crate::render;
use crate::store;

/// Index artifact name at the project output root.
pub const INDEX_FILE: &str = "index.md";

/// Build the project index and write it to `<output_dir>/index.md`.
///
/// Returns the path of the written artifact.
pub fn build_index(graph: &ModuleGraph, output_dir: &Path) -> Result<PathBuf> {
    let mut sections = Vec::new();

    for module in graph.iter_all() {
        let path = bundle::bundle_path(output_dir, &module.id);
        let rendered = fs::read_to_string(&path).map_err(|_| DocsError::MissingBundle {
            module: module.id.clone(),
            path: path.display().to_string(),
        })?;
        sections.push((module.id.clone(), rendered));
    }

    let out_path = output_dir.join(INDEX_FILE);
    store::replace_atomic(&out_path, &render::project_index(&sections))?;
    tracing::info!("built project index with {} modules", sections.len());
    Ok(out_path)
}
