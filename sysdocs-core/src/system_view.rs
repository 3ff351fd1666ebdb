//! System view builder: one merged diagram over all module fragments.
//!
//! Runs once per project with the same ordering contract as the index:
//! root fragment first, then modules in sorted module-path order. Fragment
//! content is treated as opaque diagram-language text; the merge is textual
//! concatenation under per-module delimiters, never structural validation.
//!
//! Diagram fragments are optional inputs: a module without one is skipped
//! with a warning, matching the missing-description policy.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::graph::ModuleGraph;
use crate::render;
use crate::store;
use crate::types::DiagramFragment;

/// Per-module diagram fragment input, relative to the module directory.
pub const DIAGRAM_FRAGMENT_FILE: &str = "docs/system.puml";

/// Merged system diagram artifact name at the project output root.
pub const SYSTEM_VIEW_FILE: &str = "system.puml";

/// Build the merged system diagram and write it to
/// `<output_dir>/system.puml`. Returns the path of the written artifact.
pub fn build_system_view(graph: &ModuleGraph, output_dir: &Path) -> Result<PathBuf> {
    let mut fragments = Vec::new();

    for module in graph.iter_all() {
        let path = module.dir.join(DIAGRAM_FRAGMENT_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => fragments.push(DiagramFragment {
                module_id: module.id.clone(),
                content,
            }),
            Err(err) => {
                tracing::warn!(
                    "module `{}` has no readable diagram fragment at {:?} ({}), skipping",
                    module.id,
                    path,
                    err
                );
            }
        }
    }

    let out_path = output_dir.join(SYSTEM_VIEW_FILE);
    store::replace_atomic(&out_path, &render::system_diagram(&fragments))?;
    tracing::info!(
        "built system view from {} diagram fragments",
        fragments.len()
    );
    Ok(out_path)
}
