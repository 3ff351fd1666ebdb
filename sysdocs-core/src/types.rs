//! Data model for the documentation pipeline.
//!
//! These types describe annotated source elements as reported by the
//! external scanning front end, the documentation fragments derived from
//! them, and the per-module bundles consumed by the project-wide builders.

use serde::{Deserialize, Serialize};

/// Documentation category of an annotated element.
///
/// Doubles as the fragment-store partition key: entity fragments and job
/// fragments land in separate directories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entity,
    Job,
}

impl Category {
    /// Human-readable construct name, used in error messages and headers.
    pub fn construct_name(&self) -> &'static str {
        match self {
            Category::Entity => "persistent entity",
            Category::Job => "triggered job",
        }
    }

    /// The documentation annotation kind the scanner expects on this
    /// construct.
    pub fn expected_annotation(&self) -> &'static str {
        match self {
            Category::Entity => "an entity documentation annotation",
            Category::Job => "a job documentation annotation",
        }
    }
}

/// How a job method gets triggered by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Runs on a fixed schedule.
    Scheduled,
    /// Runs once after construction, at startup.
    Startup,
    /// Runs in response to an application event.
    EventListener,
}

impl TriggerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerKind::Scheduled => "scheduled",
            TriggerKind::Startup => "startup initializer",
            TriggerKind::EventListener => "event listener",
        }
    }
}

/// One annotated source element found in a module's compilation unit.
///
/// Produced by the external scanning front end (one JSON array per module
/// in `docs/elements.json`). `documentation` is the text of the required
/// documentation annotation; `None` means the annotation is missing, which
/// the extractor treats as a build-breaking configuration error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnnotatedElementDescriptor {
    /// Entity or job.
    pub kind: Category,

    /// Trigger kind, present for jobs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerKind>,

    /// Fully qualified element name, e.g. `billing.Invoice`.
    pub qualified_name: String,

    /// Text of the documentation annotation, if present.
    #[serde(default)]
    pub documentation: Option<String>,

    /// Opaque source location (file:line as reported by the scanner).
    #[serde(default)]
    pub source_location: String,
}

impl AnnotatedElementDescriptor {
    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

/// One rendered documentation unit for a single annotated element.
///
/// Content is a pure function of the descriptor it was derived from, so a
/// fragment file only changes when its source element changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentationFragment {
    pub module_id: String,
    pub category: Category,
    /// Qualified element name; also the fragment's file identity.
    pub element_name: String,
    pub rendered_body: String,
}

impl DocumentationFragment {
    /// File name of this fragment within its category directory.
    ///
    /// Element names come from an external scanner; path separators are
    /// replaced so a fragment can never land outside its category
    /// directory.
    pub fn file_name(&self) -> String {
        let safe: String = self
            .element_name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        format!("{safe}.md")
    }
}

/// A module's complete documentation, built once per module per invocation
/// and never mutated afterwards.
///
/// Fragment sequences are sorted by element name ascending, which is what
/// makes the downstream index reproducible.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleDocBundle {
    pub module_id: String,
    pub description: String,
    pub entity_fragments: Vec<DocumentationFragment>,
    pub job_fragments: Vec<DocumentationFragment>,
}

/// Free-text diagram source contributed by one module.
///
/// The content is opaque to the pipeline: the system view builder
/// concatenates fragments with per-module delimiters and applies no
/// semantic transformation.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramFragment {
    pub module_id: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_deserialization() {
        let json = r#"{
            "kind": "job",
            "trigger": "event_listener",
            "qualified_name": "shipping.DispatchOrder",
            "documentation": "Dispatches orders on payment events.",
            "source_location": "shipping/src/dispatch.kt:42"
        }"#;

        let d: AnnotatedElementDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(d.kind, Category::Job);
        assert_eq!(d.trigger, Some(TriggerKind::EventListener));
        assert_eq!(d.simple_name(), "DispatchOrder");
    }

    #[test]
    fn test_descriptor_missing_documentation_is_none() {
        let json = r#"{"kind": "entity", "qualified_name": "billing.Invoice"}"#;
        let d: AnnotatedElementDescriptor = serde_json::from_str(json).unwrap();
        assert!(d.documentation.is_none());
        assert!(d.source_location.is_empty());
    }

    #[test]
    fn test_simple_name_without_package() {
        let d = AnnotatedElementDescriptor {
            kind: Category::Entity,
            trigger: None,
            qualified_name: "Invoice".to_string(),
            documentation: None,
            source_location: String::new(),
        };
        assert_eq!(d.simple_name(), "Invoice");
    }

    #[test]
    fn test_fragment_file_name() {
        let f = DocumentationFragment {
            module_id: "billing".to_string(),
            category: Category::Entity,
            element_name: "billing.Invoice".to_string(),
            rendered_body: String::new(),
        };
        assert_eq!(f.file_name(), "billing.Invoice.md");
    }

    #[test]
    fn test_fragment_file_name_rejects_path_separators() {
        let f = DocumentationFragment {
            module_id: "billing".to_string(),
            category: Category::Entity,
            element_name: "../escape/Invoice".to_string(),
            rendered_body: String::new(),
        };
        assert_eq!(f.file_name(), ".._escape_Invoice.md");
    }
}
