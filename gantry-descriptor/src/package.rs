//! Output package identity.

use serde::Serialize;

/// Identity of the Go package a descriptor's artifacts belong to, as
/// declared by the upstream compiler (the `go_package` option).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GoPackage {
    /// Package name, e.g. `strings`.
    pub name: String,
    /// Package path relative to the project, e.g. `pb/strings`.
    pub path: String,
    /// Explicit import alias, if the descriptor declared one.
    pub alias: Option<String>,
}

impl GoPackage {
    /// Create a package identity with no explicit alias.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            alias: None,
        }
    }

    /// Attach an explicit import alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Identifier generated code uses to reference this package: the
    /// declared alias when present, the package name otherwise.
    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
