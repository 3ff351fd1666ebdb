//! Error types for the documentation pipeline.

use thiserror::Error;

use crate::types::AnnotatedElementDescriptor;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Errors that can occur while building documentation.
#[derive(Error, Debug)]
pub enum DocsError {
    /// An annotated construct lacks the required documentation annotation.
    /// Fatal to the owning module's extraction step.
    #[error("missing documentation annotation on {construct} `{element}`{location}: expected {expected}")]
    MissingDocumentation {
        /// Construct kind, e.g. "persistent entity".
        construct: String,
        /// Qualified name of the offending element.
        element: String,
        /// Source location suffix, empty when the scanner reported none.
        location: String,
        /// The annotation kind that was expected.
        expected: String,
    },

    /// A job descriptor carries no trigger kind. The scanner front end is
    /// expected to only emit job descriptors for recognized trigger
    /// markers, so this indicates broken scanner output.
    #[error("job `{element}` has no trigger kind: scanner output is malformed")]
    MissingTrigger {
        /// Qualified name of the offending element.
        element: String,
    },

    /// A task name was registered twice on the build graph.
    #[error("task `{name}` is already registered")]
    DuplicateTask {
        /// Name of the duplicate task.
        name: String,
    },

    /// A referenced task does not exist on the build graph.
    #[error("unknown task `{name}`")]
    UnknownTask {
        /// Name of the missing task.
        name: String,
    },

    /// A referenced module is not part of the discovered module graph.
    #[error("unknown module `{module}`")]
    UnknownModule {
        /// Module id.
        module: String,
    },

    /// A module's bundle artifact is missing when the index expects it.
    #[error("module `{module}` has no built documentation bundle at {path}")]
    MissingBundle {
        /// Module id.
        module: String,
        /// Expected bundle path.
        path: String,
    },

    /// Task dependencies form a cycle; the build graph cannot schedule.
    #[error("dependency cycle involving task `{name}`")]
    DependencyCycle {
        /// One task on the cycle.
        name: String,
    },

    /// IO error reading inputs or writing artifacts.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed descriptor input.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocsError {
    /// Build a [`DocsError::MissingDocumentation`] pointing at the given
    /// descriptor's construct and the annotation kind it should carry.
    pub fn missing_documentation(descriptor: &AnnotatedElementDescriptor) -> Self {
        let location = if descriptor.source_location.is_empty() {
            String::new()
        } else {
            format!(" ({})", descriptor.source_location)
        };
        DocsError::MissingDocumentation {
            construct: descriptor.kind.construct_name().to_string(),
            element: descriptor.qualified_name.clone(),
            location,
            expected: descriptor.kind.expected_annotation().to_string(),
        }
    }
}
