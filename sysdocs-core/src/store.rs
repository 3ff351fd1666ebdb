//! Fragment store: the on-disk handoff between extraction and aggregation.
//!
//! Each module owns two category directories (entities, jobs) under its
//! build output directory, one fragment file per annotated element. Writes
//! are idempotent: a fragment whose bytes are unchanged is left untouched,
//! so file timestamps only move when content moves and downstream build
//! caching stays effective.
//!
//! The store also keeps an extraction stamp, an xxh3 hash of the descriptor
//! input, letting the extraction step skip entirely when module sources are
//! unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use xxhash_rust::xxh3::xxh3_64;

use crate::error::Result;
use crate::types::{Category, DocumentationFragment};

/// Stamp file recording the descriptor input hash of the last extraction.
const STAMP_FILE: &str = ".extract-stamp";

/// Per-module fragment store with one directory per category.
#[derive(Clone, Debug)]
pub struct FragmentStore {
    entities_dir: PathBuf,
    jobs_dir: PathBuf,
}

impl FragmentStore {
    pub fn new(entities_dir: PathBuf, jobs_dir: PathBuf) -> Self {
        Self {
            entities_dir,
            jobs_dir,
        }
    }

    /// Directory holding fragments of the given category.
    pub fn dir(&self, category: Category) -> &Path {
        match category {
            Category::Entity => &self.entities_dir,
            Category::Job => &self.jobs_dir,
        }
    }

    /// Create both category directories if absent.
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.entities_dir)?;
        fs::create_dir_all(&self.jobs_dir)?;
        Ok(())
    }

    /// Remove all fragment files of one category.
    ///
    /// Used when re-extracting changed input, so fragments of deleted
    /// elements do not linger.
    pub fn clear(&self, category: Category) -> Result<()> {
        let dir = self.dir(category);
        if !dir.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Write one fragment, skipping the write when bytes are unchanged.
    ///
    /// Returns `true` when the file was actually written.
    pub fn write_fragment(&self, fragment: &DocumentationFragment) -> Result<bool> {
        let path = self.dir(fragment.category).join(fragment.file_name());

        if let Ok(existing) = fs::read(&path) {
            if existing == fragment.rendered_body.as_bytes() {
                tracing::trace!("fragment {:?} unchanged, skipping write", path);
                return Ok(false);
            }
        }

        fs::write(&path, &fragment.rendered_body)?;
        Ok(true)
    }

    /// Read all fragments of one category, sorted by element name ascending.
    ///
    /// Returns `(element_name, rendered_body)` pairs. A missing category
    /// directory reads as empty: a module without entities is not an error.
    pub fn read_fragments(&self, category: Category) -> Result<Vec<(String, String)>> {
        let dir = self.dir(category);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut fragments = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let body = fs::read_to_string(&path)?;
            fragments.push((name, body));
        }

        // Directory iteration order is platform-dependent; the sorted
        // element-name order is the contract.
        fragments.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(fragments)
    }

    /// xxh3 content hash in the store's stamp format.
    pub fn input_hash(bytes: &[u8]) -> String {
        format!("xxh3:{:016x}", xxh3_64(bytes))
    }

    /// Whether the recorded extraction stamp matches `hash`.
    ///
    /// A stamp only counts while both category directories still exist;
    /// outputs can be cleaned independently of the stamp file, and a stamp
    /// without its outputs is stale.
    pub fn is_up_to_date(&self, hash: &str) -> bool {
        if !self.entities_dir.is_dir() || !self.jobs_dir.is_dir() {
            return false;
        }
        fs::read_to_string(self.stamp_path())
            .map(|recorded| recorded == hash)
            .unwrap_or(false)
    }

    /// Record the extraction stamp for the current input.
    pub fn record_stamp(&self, hash: &str) -> Result<()> {
        fs::write(self.stamp_path(), hash)?;
        Ok(())
    }

    fn stamp_path(&self) -> PathBuf {
        match self.entities_dir.parent() {
            Some(parent) => parent.join(STAMP_FILE),
            None => self.entities_dir.join(STAMP_FILE),
        }
    }
}

/// All-or-nothing file replacement for aggregate artifacts.
///
/// Writes to a sibling temp file and renames over the target, so a crashed
/// build never leaves a half-written index or system view behind.
pub fn replace_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
