//! Generated-file manifest assembly.

use std::path::Path;

use crate::{diagnostic::Diagnostic, error::Result, paths};

/// A single artifact produced by a run. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Normalized, slash-separated destination path.
    pub path: String,
    /// Rendered content.
    pub content: Vec<u8>,
}

impl GeneratedFile {
    /// Create an artifact. The path is lexically normalized so that two
    /// logically identical paths reached via different relative-path
    /// arithmetic compare equal.
    pub fn new(path: impl AsRef<str>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: paths::clean(path.as_ref()),
            content: content.into(),
        }
    }
}

/// The ordered output of one generation run: artifacts in emission order,
/// plus the informational diagnostics recorded along the way.
#[derive(Debug, Default)]
pub struct Manifest {
    files: Vec<GeneratedFile>,
    diagnostics: Vec<Diagnostic>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an artifact.
    pub fn push(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Record a diagnostic.
    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Artifacts in emission order.
    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    /// Look up an artifact by its normalized path.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        let path = paths::clean(path);
        self.files.iter().find(|f| f.path == path)
    }

    /// Diagnostics recorded during the run.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every artifact under `base`, creating parent directories.
    /// Idempotence was already decided at emission time, so entries are
    /// written unconditionally.
    pub fn write_all(&self, base: &Path) -> Result<()> {
        for file in &self.files {
            let path = base.join(&file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| crate::Error::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&path, &file.content).map_err(|source| crate::Error::Io {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
