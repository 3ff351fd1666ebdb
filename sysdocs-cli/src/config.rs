//! Configuration loading from `sysdocs.toml`.
//!
//! Configuration is optional: without a file, modules are auto-discovered
//! and output goes to `build/docs`. The extractor section carries the only
//! two recognized extraction options, the per-module jobs and entities
//! output directories.
//!
//! # Example Configuration
//!
//! ```toml
//! [project]
//! modules = ["billing", "shipping"]
//!
//! [output]
//! dir = "build/docs"
//!
//! [extractor]
//! entities_output_dir = "entities"
//! jobs_output_dir = "jobs"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuration file name at the project root.
const CONFIG_FILE: &str = "sysdocs.toml";

/// Root configuration structure loaded from `sysdocs.toml`.
///
/// All sections are optional and default sensibly.
#[derive(Debug, Deserialize, Default)]
pub struct SysdocsConfig {
    /// Module graph settings.
    #[serde(default)]
    pub project: ProjectSection,

    /// Artifact placement.
    #[serde(default)]
    pub output: OutputSection,

    /// Extraction step options.
    #[serde(default)]
    pub extractor: ExtractorSection,
}

/// Module graph settings.
#[derive(Debug, Deserialize, Default)]
pub struct ProjectSection {
    /// Explicit module list (relative paths). When absent, modules are
    /// discovered by scanning for documentation inputs.
    #[serde(default)]
    pub modules: Option<Vec<String>>,
}

/// Artifact placement settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSection {
    /// Output directory relative to the project root.
    #[serde(default)]
    pub dir: Option<String>,
}

/// Extraction step options: the fragment store layout per module.
#[derive(Debug, Deserialize, Default)]
pub struct ExtractorSection {
    /// Entity fragment directory, relative to a module's output directory.
    #[serde(default)]
    pub entities_output_dir: Option<String>,

    /// Job fragment directory, same convention.
    #[serde(default)]
    pub jobs_output_dir: Option<String>,
}

impl SysdocsConfig {
    /// Load configuration from `<root>/sysdocs.toml`.
    ///
    /// Missing file or parse errors fall back to defaults with a warning;
    /// configuration is never a reason to fail a documentation build.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("no {} found, using defaults", CONFIG_FILE);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse {}: {}, using defaults", CONFIG_FILE, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read {}: {}, using defaults", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    /// Explicit module list, if configured.
    pub fn modules(&self) -> Option<&[String]> {
        self.project.modules.as_deref()
    }

    /// Output directory relative to the project root.
    pub fn output_dir(&self) -> &str {
        self.output.dir.as_deref().unwrap_or("build/docs")
    }

    /// Entity fragment directory per module.
    pub fn entities_output_dir(&self) -> &str {
        self.extractor
            .entities_output_dir
            .as_deref()
            .unwrap_or("entities")
    }

    /// Job fragment directory per module.
    pub fn jobs_output_dir(&self) -> &str {
        self.extractor.jobs_output_dir.as_deref().unwrap_or("jobs")
    }
}
