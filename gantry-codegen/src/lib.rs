//! Idempotent code-emission engine for the gantry generator.
//!
//! Given a registry of parsed service descriptors, this crate decides
//! *what* to emit, *where* to emit it, under *what* import identity, and
//! whether to skip emission because a human already hand-wrote the target
//! declaration. Template rendering and source formatting stay behind the
//! [`Renderer`] and [`Formatter`] traits.
//!
//! # Module Organization
//!
//! - [`alias`] - Run-scoped import-alias allocation
//! - [`project`] - Project-root discovery and import-path resolution
//! - [`oracle`] - Symbol presence over existing destination packages
//! - [`generator`] - The per-file emission orchestrator
//! - [`render`] - Collaborator traits and parameter models
//! - [`manifest`] - Output collection and path normalization
//! - [`testing`] - Test utilities (feature-gated)

pub mod alias;
pub mod diagnostic;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod naming;
pub mod options;
pub mod oracle;
pub mod paths;
pub mod project;
pub mod render;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use alias::AliasRegistry;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, FormatError, RenderError, Result};
pub use generator::Generator;
pub use manifest::{GeneratedFile, Manifest};
pub use options::{Options, PathMode};
pub use oracle::{DeclarationIndex, DeclarationOracle};
pub use project::{ModuleInfo, ProjectRoots};
pub use render::{
    BindingParams, Formatter, ImplParams, ImportBinding, PassthroughFormatter, Renderer,
};
