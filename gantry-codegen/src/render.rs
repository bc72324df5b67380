//! Collaborator seams: template rendering and source formatting.
//!
//! The engine decides *what* to emit and *where*; turning a parameter
//! model into literal source text, and pretty-printing that text, are
//! external concerns reached through these traits.

use std::path::Path;

use gantry_descriptor::{FileDescriptor, MethodDescriptor, ServiceDescriptor};

use crate::error::{FormatError, RenderError};

/// One import line of a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// Import path.
    pub path: String,
    /// Local alias allocated for this run. Renderers may print the import
    /// bare when the alias equals the package's own final path segment.
    pub alias: String,
}

impl ImportBinding {
    pub fn new(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: alias.into(),
        }
    }
}

/// Parameter model for the always-regenerated binding artifact.
#[derive(Debug)]
pub struct BindingParams<'a> {
    /// The input file being generated.
    pub file: &'a FileDescriptor,
    /// Every import the artifact needs, aliases pre-allocated.
    pub imports: Vec<ImportBinding>,
    /// Whether to wire the default middleware chain.
    pub apply_middlewares: bool,
    /// API-documentation payload to embed, when the file carries one.
    pub openapi: Option<&'a [u8]>,
}

/// Parameter model for service scaffolds, method stubs and stub tests.
#[derive(Debug)]
pub struct ImplParams<'a> {
    pub file: &'a FileDescriptor,
    pub service: &'a ServiceDescriptor,
    /// `None` when rendering the service scaffold.
    pub method: Option<&'a MethodDescriptor>,
    /// Import path of the package the stub itself belongs to.
    pub impl_import_path: String,
    /// Alias under which the stub refers to the binding package, when the
    /// stub lives in a separate package from the binding artifact.
    pub binding_alias: Option<String>,
    /// Every import the stub needs, aliases pre-allocated.
    pub imports: Vec<ImportBinding>,
}

/// Renders a filled parameter model into literal source text.
pub trait Renderer {
    /// Render the binding artifact.
    fn binding(&self, params: &BindingParams<'_>) -> Result<String, RenderError>;

    /// Render the service scaffold (constructor + receiver type).
    fn service_scaffold(&self, params: &ImplParams<'_>) -> Result<String, RenderError>;

    /// Render a single method's implementation stub.
    fn method_impl(&self, params: &ImplParams<'_>) -> Result<String, RenderError>;

    /// Render the companion test for a method stub.
    fn method_test(&self, params: &ImplParams<'_>) -> Result<String, RenderError>;
}

/// Pretty-prints and import-organizes rendered source.
pub trait Formatter {
    /// Format `src`, destined for `path`. Must fail on syntactically
    /// invalid input rather than pass it through.
    fn format(&self, src: &str, path: &Path) -> Result<String, FormatError>;
}

/// Formatter that returns its input untouched, for callers that run an
/// external `gofmt`/`goimports` pass over the written manifest instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    fn format(&self, src: &str, _path: &Path) -> Result<String, FormatError> {
        Ok(src.to_string())
    }
}
