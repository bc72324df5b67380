//! Error taxonomy for a generation run.
//!
//! Skip conditions (no services, stub already present, documentation
//! absent) are *not* errors; they surface as [`crate::Diagnostic`]s and
//! generation continues. Everything in this module is fatal for the run.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a [`crate::Renderer`] implementation: the
/// parameter model was malformed or a template field was missing.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RenderError(pub String);

/// Failure reported by a [`crate::Formatter`] implementation: the
/// rendered source was not syntactically valid.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FormatError(pub String);

/// Fatal errors that abort the whole generation run.
#[derive(Debug, Error)]
pub enum Error {
    /// Template rendering failed for an artifact of `file`.
    #[error("rendering artifact of `{file}`: {source}")]
    Render {
        /// Input file whose artifact was being rendered.
        file: String,
        source: RenderError,
    },

    /// Source formatting rejected rendered output. `annotated` carries the
    /// offending text, line-numbered, to localize template faults.
    #[error("formatting `{path}`: {source}\n{annotated}")]
    Format {
        /// Destination path of the artifact being formatted.
        path: String,
        /// The pre-format text with line numbers prefixed.
        annotated: String,
        source: FormatError,
    },

    /// Pre-existing source in a destination directory could not be
    /// scanned. Idempotence cannot be decided without a trustworthy
    /// declaration index, so this aborts the run.
    #[error("scanning existing source `{path}`: {reason}")]
    SourceParse { path: PathBuf, reason: String },

    /// Filesystem access failed outside of the absorbed missing-directory
    /// and missing-marker cases.
    #[error("reading `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Prefix every line of `src` with its line number, for fault
/// localization in [`Error::Format`] diagnostics.
pub fn annotate(src: &str) -> String {
    src.lines()
        .enumerate()
        .map(|(pos, line)| format!("{}: {}", pos + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}
