//! Core documentation aggregation pipeline for sysdocs.
//!
//! sysdocs automates architecture documentation for a multi-module project.
//! Each module may carry annotated source elements (persistent entities,
//! triggered jobs, scanned by an external front end into descriptor lists),
//! a free-text `description.md`, and a diagram fragment. This crate extracts
//! per-element documentation fragments, builds per-module bundles, and
//! merges everything into a project-wide index and a system-level diagram.
//!
//! # Pipeline
//!
//! ```text
//! elements.json -> extract -> fragment store -> module bundle
//!                                                    |
//!                              +---------------------+--------------------+
//!                              v                                          v
//!                        project index                              system view
//! ```
//!
//! Output is deterministic: for a fixed module graph and fixed inputs the
//! index and the system view are byte-identical across runs, regardless of
//! how many modules build in parallel. Aggregation order is root first,
//! then modules sorted by module path.

pub mod bundle;
pub mod error;
pub mod executor;
pub mod extract;
pub mod graph;
pub mod index;
pub mod orchestrator;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod system_view;
pub mod types;

pub use error::{DocsError, Result};
pub use graph::{ModuleGraph, ModuleRef};
pub use orchestrator::{BuildGraph, Orchestrator, TaskId, TaskKind};
pub use pipeline::{DocsPipeline, PipelineOptions};
pub use types::{
    AnnotatedElementDescriptor, Category, DiagramFragment, DocumentationFragment,
    ModuleDocBundle, TriggerKind,
};
