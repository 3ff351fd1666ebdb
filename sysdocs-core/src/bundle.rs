//! Module doc builder: fragments + description into one rendered bundle.
//!
//! Runs after the module's extraction step and reads nothing outside the
//! module's own inputs, so sibling modules can build in any order or in
//! parallel. Optional inputs degrade gracefully: a missing description is
//! replaced by a placeholder section and a warning, never a failure.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::graph::ModuleRef;
use crate::render;
use crate::store::{self, FragmentStore};
use crate::types::{Category, DocumentationFragment, ModuleDocBundle};

/// Per-module free-text description input.
pub const DESCRIPTION_FILE: &str = "description.md";

/// Rendered bundle artifact name within a module's output directory.
pub const BUNDLE_FILE: &str = "module.md";

/// Path of a module's rendered bundle under the project output directory.
pub fn bundle_path(output_dir: &Path, module_id: &str) -> PathBuf {
    output_dir.join(module_id).join(BUNDLE_FILE)
}

/// Assemble a module's bundle from its fragment store and description.
///
/// Fragment ordering within each category is element name ascending, as
/// guaranteed by the store's sorted listing.
pub fn build_bundle(module: &ModuleRef, fragment_store: &FragmentStore) -> Result<ModuleDocBundle> {
    let description_path = module.dir.join(DESCRIPTION_FILE);
    let description = match fs::read_to_string(&description_path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                "module `{}` has no readable {} ({}), using placeholder",
                module.id,
                DESCRIPTION_FILE,
                err
            );
            render::NO_DESCRIPTION.to_string()
        }
    };

    Ok(ModuleDocBundle {
        module_id: module.id.clone(),
        description,
        entity_fragments: read_category(module, fragment_store, Category::Entity)?,
        job_fragments: read_category(module, fragment_store, Category::Job)?,
    })
}

/// Build a module's bundle and write the rendered artifact.
pub fn build_module_docs(
    module: &ModuleRef,
    fragment_store: &FragmentStore,
    out_path: &Path,
) -> Result<ModuleDocBundle> {
    let bundle = build_bundle(module, fragment_store)?;
    store::replace_atomic(out_path, &render::module_bundle(&bundle))?;
    tracing::debug!("built bundle for `{}` at {:?}", module.id, out_path);
    Ok(bundle)
}

fn read_category(
    module: &ModuleRef,
    fragment_store: &FragmentStore,
    category: Category,
) -> Result<Vec<DocumentationFragment>> {
    Ok(fragment_store
        .read_fragments(category)?
        .into_iter()
        .map(|(element_name, rendered_body)| DocumentationFragment {
            module_id: module.id.clone(),
            category,
            element_name,
            rendered_body,
        })
        .collect())
}
