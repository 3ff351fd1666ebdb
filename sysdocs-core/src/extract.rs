//! Element extraction: descriptor lists in, documentation fragments out.
//!
//! The scanning front end is external to this crate. It walks a module's
//! compilation unit, finds persistent-entity declarations and triggered job
//! methods, and emits one [`AnnotatedElementDescriptor`] per construct into
//! `docs/elements.json`. This module validates those descriptors and turns
//! each one into a fragment in the module's fragment store.
//!
//! Documentation completeness is a build-time invariant: an annotated
//! construct without its documentation annotation fails the module's
//! extraction step with an error naming the construct, never a silent skip.

use std::fs;
use std::path::Path;

use crate::error::{DocsError, Result};
use crate::render;
use crate::store::FragmentStore;
use crate::types::{AnnotatedElementDescriptor, Category, DocumentationFragment};

/// Per-module descriptor input file, written by the scanning front end.
pub const ELEMENTS_FILE: &str = "docs/elements.json";

/// Outcome of one module's extraction step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionOutcome {
    /// Whether extraction was skipped because input was unchanged.
    pub up_to_date: bool,
    /// Fragments produced (0 when up to date).
    pub fragments: usize,
    /// Fragment files actually rewritten.
    pub written: usize,
}

/// Load a module's descriptor list.
///
/// A missing file means the module has no annotated elements, which is
/// valid; malformed JSON is an error.
pub fn load_descriptors(path: &Path) -> Result<Vec<AnnotatedElementDescriptor>> {
    if !path.exists() {
        tracing::debug!("no descriptor file at {:?}", path);
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Produce one fragment per descriptor.
///
/// Fails on the first descriptor whose documentation annotation is missing
/// or whose job trigger is absent. Fragment bodies are pure functions of
/// their descriptors.
pub fn extract_fragments(
    module_id: &str,
    descriptors: &[AnnotatedElementDescriptor],
) -> Result<Vec<DocumentationFragment>> {
    let mut fragments = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let documentation = descriptor
            .documentation
            .as_deref()
            .ok_or_else(|| DocsError::missing_documentation(descriptor))?;

        if descriptor.kind == Category::Job && descriptor.trigger.is_none() {
            return Err(DocsError::MissingTrigger {
                element: descriptor.qualified_name.clone(),
            });
        }

        fragments.push(DocumentationFragment {
            module_id: module_id.to_string(),
            category: descriptor.kind,
            element_name: descriptor.qualified_name.clone(),
            rendered_body: render::fragment_body(descriptor, documentation),
        });
    }

    Ok(fragments)
}

/// Run the full extraction step for one module.
///
/// Skips work when the descriptor input hash matches the recorded stamp
/// (incremental-build support). On changed input, category directories are
/// cleared and repopulated; unchanged fragment bytes are still not
/// rewritten, so downstream caching sees stable files.
pub fn run_extraction(
    module_id: &str,
    module_dir: &Path,
    store: &FragmentStore,
) -> Result<ExtractionOutcome> {
    let elements_path = module_dir.join(ELEMENTS_FILE);
    let input = if elements_path.exists() {
        fs::read(&elements_path)?
    } else {
        Vec::new()
    };

    let hash = FragmentStore::input_hash(&input);
    if store.is_up_to_date(&hash) {
        tracing::debug!("extraction for `{}` is up to date", module_id);
        return Ok(ExtractionOutcome {
            up_to_date: true,
            ..Default::default()
        });
    }

    let descriptors = load_descriptors(&elements_path)?;
    let fragments = extract_fragments(module_id, &descriptors)?;

    store.ensure_dirs()?;
    store.clear(Category::Entity)?;
    store.clear(Category::Job)?;

    let mut written = 0;
    for fragment in &fragments {
        if store.write_fragment(fragment)? {
            written += 1;
        }
    }
    store.record_stamp(&hash)?;

    tracing::debug!(
        "extracted {} fragments for `{}` ({} written)",
        fragments.len(),
        module_id,
        written
    );

    Ok(ExtractionOutcome {
        up_to_date: false,
        fragments: fragments.len(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TriggerKind;
    use tempfile::TempDir;

    fn descriptor(kind: Category, name: &str, doc: Option<&str>) -> AnnotatedElementDescriptor {
        AnnotatedElementDescriptor {
            kind,
            trigger: match kind {
                Category::Job => Some(TriggerKind::Scheduled),
                Category::Entity => None,
            },
            qualified_name: name.to_string(),
            documentation: doc.map(|d| d.to_string()),
            source_location: format!("{}.kt:1", name),
        }
    }

    fn store_in(dir: &TempDir) -> FragmentStore {
        FragmentStore::new(
            dir.path().join("build/docs/entities"),
            dir.path().join("build/docs/jobs"),
        )
    }

    #[test]
    fn test_extract_fragments_deterministic() {
        let descriptors = vec![
            descriptor(Category::Entity, "billing.Invoice", Some("Tracks invoices.")),
            descriptor(Category::Job, "billing.SendReminder", Some("Sends reminders.")),
        ];

        let first = extract_fragments("billing", &descriptors).unwrap();
        let second = extract_fragments("billing", &descriptors).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].category, Category::Entity);
        assert_eq!(first[1].category, Category::Job);
    }

    #[test]
    fn test_extract_fragments_missing_documentation_fails() {
        let descriptors = vec![descriptor(Category::Entity, "billing.Invoice", None)];

        let err = extract_fragments("billing", &descriptors).unwrap_err();
        match err {
            DocsError::MissingDocumentation { ref element, .. } => {
                assert_eq!(element, "billing.Invoice");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_fragments_job_without_trigger_fails() {
        let mut d = descriptor(Category::Job, "billing.SendReminder", Some("doc"));
        d.trigger = None;

        let err = extract_fragments("billing", &[d]).unwrap_err();
        assert!(matches!(err, DocsError::MissingTrigger { .. }));
    }

    #[test]
    fn test_load_descriptors_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let descriptors = load_descriptors(&dir.path().join("docs/elements.json")).unwrap();
        assert!(descriptors.is_empty());
    }

    #[test]
    fn test_run_extraction_writes_and_stamps() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        let json = serde_json::to_string(&vec![descriptor(
            Category::Entity,
            "billing.Invoice",
            Some("Tracks invoices."),
        )])
        .unwrap();
        fs::write(dir.path().join(ELEMENTS_FILE), &json).unwrap();

        let store = store_in(&dir);
        let outcome = run_extraction("billing", dir.path(), &store).unwrap();
        assert!(!outcome.up_to_date);
        assert_eq!(outcome.fragments, 1);
        assert_eq!(outcome.written, 1);

        // Second run with unchanged input is a no-op.
        let outcome = run_extraction("billing", dir.path(), &store).unwrap();
        assert!(outcome.up_to_date);
        assert_eq!(outcome.written, 0);
    }

    #[test]
    fn test_run_extraction_rebuilds_after_outputs_cleaned() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        let json = serde_json::to_string(&vec![descriptor(
            Category::Entity,
            "billing.Invoice",
            Some("Tracks invoices."),
        )])
        .unwrap();
        fs::write(dir.path().join(ELEMENTS_FILE), &json).unwrap();

        let store = store_in(&dir);
        run_extraction("billing", dir.path(), &store).unwrap();

        // Fragment dirs removed, stamp file left behind.
        fs::remove_dir_all(dir.path().join("build/docs/entities")).unwrap();
        fs::remove_dir_all(dir.path().join("build/docs/jobs")).unwrap();

        let outcome = run_extraction("billing", dir.path(), &store).unwrap();
        assert!(!outcome.up_to_date);
        assert_eq!(outcome.written, 1);
        assert_eq!(store.read_fragments(Category::Entity).unwrap().len(), 1);
    }

    #[test]
    fn test_run_extraction_removes_stale_fragments() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        let store = store_in(&dir);

        let both = vec![
            descriptor(Category::Entity, "billing.Invoice", Some("a")),
            descriptor(Category::Entity, "billing.LineItem", Some("b")),
        ];
        fs::write(
            dir.path().join(ELEMENTS_FILE),
            serde_json::to_string(&both).unwrap(),
        )
        .unwrap();
        run_extraction("billing", dir.path(), &store).unwrap();

        let one = vec![descriptor(Category::Entity, "billing.Invoice", Some("a"))];
        fs::write(
            dir.path().join(ELEMENTS_FILE),
            serde_json::to_string(&one).unwrap(),
        )
        .unwrap();
        run_extraction("billing", dir.path(), &store).unwrap();

        let names: Vec<String> = store
            .read_fragments(Category::Entity)
            .unwrap()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["billing.Invoice"]);
    }

    #[test]
    fn test_run_extraction_no_elements_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let outcome = run_extraction("empty", dir.path(), &store).unwrap();
        assert!(!outcome.up_to_date);
        assert_eq!(outcome.fragments, 0);
    }
}
