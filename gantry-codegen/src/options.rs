//! Run configuration.

/// Where artifacts land on disk relative to the output root. This choice
/// never affects the import path computed for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Mirror the declared output-package path of each descriptor.
    #[default]
    ImportPath,
    /// Mirror the source file's own directory.
    SourceRelative,
}

/// Options recognized by a generation run.
///
/// # Example
///
/// ```
/// use gantry_codegen::Options;
///
/// let options = Options::new()
///     .with_impl_stubs(true)
///     .with_tests(true)
///     .with_impl_path("internal/app");
/// assert!(options.impl_stubs);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Re-emit stubs even when their declarations already exist.
    pub force: bool,
    /// Emit hand-editable implementation stub files.
    pub impl_stubs: bool,
    /// Emit a companion test file next to each method stub.
    pub with_tests: bool,
    /// Namespace stubs into a kebab-case subdirectory per service.
    pub service_subdir: bool,
    /// Subpath under the output prefix where stubs are placed.
    pub impl_path: String,
    /// Directory for API-documentation artifacts; `None` disables them.
    pub openapi_path: Option<String>,
    /// Wire the default middleware chain into binding artifacts.
    pub apply_default_middlewares: bool,
    /// Output placement mode.
    pub path_mode: PathMode,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_impl_stubs(mut self, impl_stubs: bool) -> Self {
        self.impl_stubs = impl_stubs;
        self
    }

    pub fn with_tests(mut self, with_tests: bool) -> Self {
        self.with_tests = with_tests;
        self
    }

    pub fn with_service_subdir(mut self, service_subdir: bool) -> Self {
        self.service_subdir = service_subdir;
        self
    }

    pub fn with_impl_path(mut self, impl_path: impl Into<String>) -> Self {
        self.impl_path = impl_path.into();
        self
    }

    pub fn with_openapi_path(mut self, openapi_path: impl Into<String>) -> Self {
        self.openapi_path = Some(openapi_path.into());
        self
    }

    pub fn with_default_middlewares(mut self, apply: bool) -> Self {
        self.apply_default_middlewares = apply;
        self
    }

    pub fn with_path_mode(mut self, path_mode: PathMode) -> Self {
        self.path_mode = path_mode;
        self
    }
}
