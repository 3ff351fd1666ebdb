//! Markdown rendering for fragments, bundles, and the project-wide views.
//!
//! Rendering is deliberately dumb: pure functions from the data model to
//! strings, no IO. Swapping the output format means adding a sibling
//! module, not touching the pipeline.

use crate::types::{AnnotatedElementDescriptor, Category, DiagramFragment, ModuleDocBundle};

/// Placeholder section for modules without a `description.md`.
pub const NO_DESCRIPTION: &str = "_No description provided._";

/// Render the fragment body for a single annotated element.
///
/// The body depends only on the descriptor, so unchanged elements produce
/// byte-identical fragments across builds.
pub fn fragment_body(descriptor: &AnnotatedElementDescriptor, documentation: &str) -> String {
    let mut lines = Vec::new();

    lines.push(format!("### {}", descriptor.simple_name()));
    lines.push(String::new());

    let tag = match (descriptor.kind, descriptor.trigger) {
        (Category::Job, Some(trigger)) => format!("job, {}", trigger.label()),
        _ => descriptor.kind.construct_name().to_string(),
    };
    lines.push(format!("`{}` ({})", descriptor.qualified_name, tag));
    lines.push(String::new());

    lines.push(documentation.trim_end().to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// Render one module's documentation bundle.
///
/// Empty categories are omitted entirely rather than rendered as empty
/// sections.
pub fn module_bundle(bundle: &ModuleDocBundle) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# {}", bundle.module_id));
    lines.push(String::new());
    lines.push(bundle.description.trim_end().to_string());
    lines.push(String::new());

    if !bundle.entity_fragments.is_empty() {
        lines.push("## Entities".to_string());
        lines.push(String::new());
        for fragment in &bundle.entity_fragments {
            lines.push(fragment.rendered_body.trim_end().to_string());
            lines.push(String::new());
        }
    }

    if !bundle.job_fragments.is_empty() {
        lines.push("## Jobs".to_string());
        lines.push(String::new());
        for fragment in &bundle.job_fragments {
            lines.push(fragment.rendered_body.trim_end().to_string());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Render the project index from already-rendered module sections.
///
/// `sections` must arrive in final order (root first, then modules sorted
/// by module path); this function does not reorder.
pub fn project_index(sections: &[(String, String)]) -> String {
    let mut output = String::new();

    output.push_str("# System Documentation\n\n");
    for (module_id, _) in sections {
        output.push_str(&format!("- [{}](#{})\n", module_id, anchor(module_id)));
    }
    output.push('\n');

    for (_, rendered) in sections {
        output.push_str(rendered.trim_end());
        output.push_str("\n\n---\n\n");
    }

    output
}

/// Render the merged system diagram.
///
/// Fragment content is opaque diagram-language text: each fragment is
/// emitted verbatim under a per-module delimiter comment line.
pub fn system_diagram(fragments: &[DiagramFragment]) -> String {
    let mut output = String::new();

    for fragment in fragments {
        output.push_str(&format!("' ==== {} ====\n", fragment.module_id));
        output.push_str(fragment.content.trim_end());
        output.push('\n');
    }

    output
}

/// Markdown anchor for a module heading.
fn anchor(module_id: &str) -> String {
    module_id
        .chars()
        .map(|c| match c {
            '/' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
