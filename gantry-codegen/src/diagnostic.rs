//! Diagnostics recorded while a run progresses.
//!
//! Skip conditions are reported here rather than as errors: a file with no
//! services, a stub whose declaration already exists, an unresolvable
//! fallback import path. The run continues past all of them.

use std::fmt;

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Something degraded (e.g. an import path could not be resolved).
    Warning,
    /// Informational note about a skipped artifact.
    Info,
}

impl Severity {
    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Returns true if this is an info severity.
    pub fn is_info(&self) -> bool {
        matches!(self, Severity::Info)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single diagnostic tied to the input file it concerns.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Severity of the message.
    pub severity: Severity,
    /// Source name of the input file being processed.
    pub file: String,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create an info diagnostic.
    pub fn info(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            file: file.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.file, self.message)
    }
}
