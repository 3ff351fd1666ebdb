//! Module graph discovery.
//!
//! The set of modules participating in a build is discovered once per
//! invocation by walking the project tree (gitignore-aware, like any other
//! build input scan) and collecting directories that carry documentation
//! inputs: a `description.md`, a `docs/elements.json`, or a
//! `docs/system.puml`. A configuration file may list modules explicitly
//! instead, which skips the walk.
//!
//! Modules are held sorted by relative path. All aggregation output
//! ordering derives from this order (root first, then sorted modules), so
//! index and diagram output are reproducible regardless of build
//! parallelism or discovery timing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::Result;
use crate::extract;
use crate::system_view;

/// Module id of the designated root project.
pub const ROOT_ID: &str = "root";

/// One module of the project: stable id plus source directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleRef {
    /// Relative module path with `/` separators; `root` for the root.
    pub id: String,
    /// Absolute source directory of the module.
    pub dir: PathBuf,
}

/// The modules participating in a build, with one designated root.
#[derive(Clone, Debug)]
pub struct ModuleGraph {
    root: ModuleRef,
    modules: Vec<ModuleRef>,
}

impl ModuleGraph {
    /// Discover the module graph under `root_dir`.
    ///
    /// `explicit` overrides discovery with a fixed module list (relative
    /// paths). `exclude` is the build output directory relative to the
    /// root; anything under it is never a module.
    pub fn discover(
        root_dir: &Path,
        explicit: Option<&[String]>,
        exclude: &Path,
    ) -> Result<ModuleGraph> {
        let root = ModuleRef {
            id: ROOT_ID.to_string(),
            dir: root_dir.to_path_buf(),
        };

        let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();

        match explicit {
            Some(ids) => {
                for id in ids {
                    found.insert(normalize_id(Path::new(id)), root_dir.join(id));
                }
            }
            None => {
                for candidate in walk_for_candidates(root_dir, exclude) {
                    let rel = match candidate.strip_prefix(root_dir) {
                        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
                        _ => continue, // the root itself
                    };
                    if rel.starts_with(exclude) {
                        continue;
                    }
                    found.insert(normalize_id(&rel), candidate);
                }
            }
        }

        let modules = found
            .into_iter()
            .map(|(id, dir)| ModuleRef { id, dir })
            .collect();

        let graph = ModuleGraph { root, modules };
        tracing::debug!(
            "discovered {} modules under {:?}",
            graph.modules.len(),
            root_dir
        );
        Ok(graph)
    }

    pub fn root(&self) -> &ModuleRef {
        &self.root
    }

    /// Non-root modules, sorted by module path.
    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    /// All modules in aggregation order: root first, then sorted modules.
    pub fn iter_all(&self) -> impl Iterator<Item = &ModuleRef> {
        std::iter::once(&self.root).chain(self.modules.iter())
    }

    /// Look up a module (including the root) by id.
    pub fn find(&self, id: &str) -> Option<&ModuleRef> {
        self.iter_all().find(|m| m.id == id)
    }
}

/// Directories under `root_dir` that carry documentation inputs.
///
/// The walk never descends into `exclude`: the pipeline's own output
/// contains files shaped like module markers (`system.puml`, module
/// bundles) which must not re-enter discovery on a rebuild.
fn walk_for_candidates(root_dir: &Path, exclude: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let excluded = root_dir.join(exclude);

    let walker = WalkBuilder::new(root_dir)
        .git_ignore(true)
        .git_exclude(true)
        .filter_entry(move |entry| entry.path() != excluded)
        .build();

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.into_path();
        if let Some(dir) = module_dir_for_marker(&path) {
            candidates.push(dir);
        }
    }

    candidates
}

/// The module directory a marker file belongs to, if it is one.
fn module_dir_for_marker(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let parent = path.parent()?;

    if name == crate::bundle::DESCRIPTION_FILE {
        return Some(parent.to_path_buf());
    }

    // docs/elements.json and docs/system.puml mark the directory above docs/.
    let in_docs = parent.file_name().map(|n| n == "docs").unwrap_or(false);
    let rel = format!("docs/{name}");
    if in_docs && (rel == extract::ELEMENTS_FILE || rel == system_view::DIAGRAM_FRAGMENT_FILE) {
        return parent.parent().map(|p| p.to_path_buf());
    }

    None
}

/// Normalize a relative path into a stable module id with `/` separators.
fn normalize_id(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_discover_sorted_modules() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("shipping/description.md"));
        touch(&dir.path().join("billing/description.md"));
        touch(&dir.path().join("billing/docs/elements.json"));

        let graph =
            ModuleGraph::discover(dir.path(), None, Path::new("build/docs")).unwrap();

        let ids: Vec<&str> = graph.modules().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["billing", "shipping"]);
        assert_eq!(graph.root().id, ROOT_ID);
    }

    #[test]
    fn test_discover_root_inputs_do_not_create_module() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("description.md"));
        touch(&dir.path().join("docs/system.puml"));

        let graph =
            ModuleGraph::discover(dir.path(), None, Path::new("build/docs")).unwrap();
        assert!(graph.modules().is_empty());
    }

    #[test]
    fn test_discover_skips_output_dir() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("billing/description.md"));
        touch(&dir.path().join("build/docs/billing/description.md"));

        let graph =
            ModuleGraph::discover(dir.path(), None, Path::new("build/docs")).unwrap();
        let ids: Vec<&str> = graph.modules().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["billing"]);
    }

    #[test]
    fn test_discover_ignores_generated_output_markers() {
        // A completed build leaves marker-shaped files under the output
        // dir; rediscovery on the same tree must not pick them up.
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("billing/description.md"));
        touch(&dir.path().join("build/docs/system.puml"));
        touch(&dir.path().join("build/docs/billing/module.md"));

        let graph =
            ModuleGraph::discover(dir.path(), None, Path::new("build/docs")).unwrap();
        let ids: Vec<&str> = graph.modules().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["billing"]);
    }

    #[test]
    fn test_discover_nested_module_id_uses_slashes() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("services/billing/docs/system.puml"));

        let graph =
            ModuleGraph::discover(dir.path(), None, Path::new("build/docs")).unwrap();
        assert_eq!(graph.modules()[0].id, "services/billing");
    }

    #[test]
    fn test_explicit_module_list_overrides_discovery() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("ignored/description.md"));

        let explicit = vec!["shipping".to_string(), "billing".to_string()];
        let graph =
            ModuleGraph::discover(dir.path(), Some(&explicit), Path::new("build/docs"))
                .unwrap();

        let ids: Vec<&str> = graph.modules().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["billing", "shipping"]);
    }

    #[test]
    fn test_iter_all_is_root_first() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("billing/description.md"));

        let graph =
            ModuleGraph::discover(dir.path(), None, Path::new("build/docs")).unwrap();
        let ids: Vec<&str> = graph.iter_all().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "billing"]);
    }

    #[test]
    fn test_find() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("billing/description.md"));

        let graph =
            ModuleGraph::discover(dir.path(), None, Path::new("build/docs")).unwrap();
        assert!(graph.find("root").is_some());
        assert!(graph.find("billing").is_some());
        assert!(graph.find("nope").is_none());
    }
}
