//! Generation orchestration.
//!
//! One [`Generator`] drives one run: for each input file it decides which
//! artifacts to produce, resolves their destinations, allocates import
//! aliases, gates hand-editable stubs on the symbol-presence oracle, and
//! assembles the final manifest. Files are processed strictly in the
//! order supplied; within a file the stages run in a fixed order
//! (skip-check, binding, documentation, implementation). Any stage
//! failure aborts the run.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use gantry_descriptor::{FileDescriptor, GoPackage, MethodDescriptor, ServiceDescriptor};
use tracing::{debug, info, warn};

use crate::{
    alias::AliasRegistry,
    diagnostic::Diagnostic,
    error::{Error, Result, annotate},
    manifest::{GeneratedFile, Manifest},
    naming,
    options::{Options, PathMode},
    oracle::DeclarationOracle,
    paths::{self, runtime},
    project::ProjectRoots,
    render::{BindingParams, Formatter, ImplParams, ImportBinding, Renderer},
};

/// Imports every service scaffold needs.
const SCAFFOLD_DEPS: &[&str] = &[runtime::TRANSPORT];

/// Imports every method stub needs.
const METHOD_DEPS: &[&str] = &["context", "github.com/pkg/errors"];

/// Imports every stub companion test needs.
const TEST_DEPS: &[&str] = &["context", "testing", "github.com/stretchr/testify/require"];

/// The generation orchestrator. Owns all run-scoped state (alias
/// registry, project-root cache, declaration-index cache); construct one
/// per run and discard it afterwards.
pub struct Generator<R, F> {
    options: Options,
    renderer: R,
    formatter: F,
    roots: ProjectRoots,
    aliases: AliasRegistry,
    oracle: DeclarationOracle,
    /// Imports added to every artifact, configured at wiring time.
    common_imports: Vec<GoPackage>,
}

impl<R: Renderer, F: Formatter> Generator<R, F> {
    pub fn new(options: Options, roots: ProjectRoots, renderer: R, formatter: F) -> Self {
        Self {
            options,
            renderer,
            formatter,
            roots,
            aliases: AliasRegistry::new(),
            oracle: DeclarationOracle::new(),
            common_imports: Vec::new(),
        }
    }

    /// Add imports that every artifact of this run should carry.
    pub fn with_common_imports(mut self, imports: impl IntoIterator<Item = GoPackage>) -> Self {
        self.common_imports.extend(imports);
        self
    }

    /// The run configuration.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Process `targets` in order and assemble the output manifest.
    pub fn generate(&mut self, targets: &[FileDescriptor]) -> Result<Manifest> {
        let mut manifest = Manifest::new();
        for file in targets {
            debug!(file = %file.name(), "processing");

            if file.services().is_empty() {
                let message = "no service definitions found; nothing to generate";
                info!(file = %file.name(), "{message}");
                manifest.diagnose(Diagnostic::info(file.name(), message));
                continue;
            }

            self.emit_binding(file, &mut manifest)?;
            self.emit_openapi(file, &mut manifest);
            if self.options.impl_stubs {
                self.emit_impl(file, &mut manifest)?;
            }
        }
        Ok(manifest)
    }

    /// Stage 2: the binding artifact. Always regenerated.
    fn emit_binding(&mut self, file: &FileDescriptor, manifest: &mut Manifest) -> Result<()> {
        let params = self.binding_params(file);
        let code = self.renderer.binding(&params).map_err(|source| Error::Render {
            file: file.name().to_string(),
            source,
        })?;

        let output = paths::join(&[
            &self.output_prefix_for(file),
            &naming::binding_file_name(file.base_name()),
        ]);
        let code = self.format_artifact(code, &output)?;

        info!(path = %output, "will emit");
        manifest.push(GeneratedFile::new(&output, code.into_bytes()));
        Ok(())
    }

    /// Stage 3: the API-documentation artifact. Emitted only when both a
    /// documentation path is configured and the file carries a payload.
    fn emit_openapi(&self, file: &FileDescriptor, manifest: &mut Manifest) {
        let Some(dir) = &self.options.openapi_path else {
            return;
        };
        let Some(payload) = file.openapi() else {
            return;
        };
        let output = paths::join(&[dir, &format!("{}.json", file.base_name())]);
        info!(path = %output, "will emit");
        manifest.push(GeneratedFile::new(&output, payload.to_vec()));
    }

    /// Stage 4: implementation stubs, gated per declaration on the
    /// symbol-presence oracle.
    fn emit_impl(&mut self, file: &FileDescriptor, manifest: &mut Manifest) -> Result<()> {
        for service in file.services() {
            self.emit_service(file, service, manifest)?;
        }
        Ok(())
    }

    fn emit_service(
        &mut self,
        file: &FileDescriptor,
        service: &ServiceDescriptor,
        manifest: &mut Manifest,
    ) -> Result<()> {
        let out_dir = self.stub_out_dir(file, service);
        let oracle_dir = self.oracle_consult_dir(file, service)?;
        let type_name = naming::impl_type_name(service.name());

        let exists =
            self.oracle
                .type_exists(&oracle_dir, &file.package().name, &type_name)?;
        if !exists || self.options.force {
            let params = self.impl_params(file, service, None, SCAFFOLD_DEPS, manifest)?;
            let code = self
                .renderer
                .service_scaffold(&params)
                .map_err(|source| Error::Render {
                    file: file.name().to_string(),
                    source,
                })?;
            let output = paths::join(&[
                &out_dir,
                &format!("{}.go", naming::impl_file_name(service.name(), None)),
            ]);
            let code = self.format_artifact(code, &output)?;
            info!(path = %output, "will emit");
            manifest.push(GeneratedFile::new(&output, code.into_bytes()));
        } else {
            let message = format!(
                "implementation of service `{}` will not be emitted: type `{}` already exists in package `{}`",
                service.name(),
                type_name,
                file.package().name,
            );
            info!(file = %file.name(), "{message}");
            manifest.diagnose(Diagnostic::info(file.name(), message));
        }

        for method in service.methods() {
            self.emit_method(file, service, method, &oracle_dir, &out_dir, manifest)?;
        }
        Ok(())
    }

    fn emit_method(
        &mut self,
        file: &FileDescriptor,
        service: &ServiceDescriptor,
        method: &MethodDescriptor,
        oracle_dir: &Path,
        out_dir: &str,
        manifest: &mut Manifest,
    ) -> Result<()> {
        let type_name = naming::impl_type_name(service.name());
        let method_name = naming::to_pascal_case(method.name());

        let exists = self.oracle.method_exists(
            oracle_dir,
            &file.package().name,
            &type_name,
            &method_name,
        )?;
        if exists && !self.options.force {
            let message = format!(
                "implementation of method `{}` for service `{}` will not be emitted: method already exists in package `{}`",
                method_name,
                service.name(),
                file.package().name,
            );
            info!(file = %file.name(), "{message}");
            manifest.diagnose(Diagnostic::info(file.name(), message));
            return Ok(());
        }

        let params = self.impl_params(file, service, Some(method), METHOD_DEPS, manifest)?;
        let code = self
            .renderer
            .method_impl(&params)
            .map_err(|source| Error::Render {
                file: file.name().to_string(),
                source,
            })?;
        let output = paths::join(&[
            out_dir,
            &format!(
                "{}.go",
                naming::impl_file_name(service.name(), Some(method.name()))
            ),
        ]);
        let code = self.format_artifact(code, &output)?;
        info!(path = %output, "will emit");
        manifest.push(GeneratedFile::new(&output, code.into_bytes()));

        if self.options.with_tests {
            let params = self.impl_params(file, service, Some(method), TEST_DEPS, manifest)?;
            let test_code = self
                .renderer
                .method_test(&params)
                .map_err(|source| Error::Render {
                    file: file.name().to_string(),
                    source,
                })?;
            let test_output = format!("{}_test.go", output.strip_suffix(".go").unwrap_or(&output));
            let test_code = self.format_artifact(test_code, &test_output)?;
            info!(path = %test_output, "will emit");
            manifest.push(GeneratedFile::new(&test_output, test_code.into_bytes()));
        }
        Ok(())
    }

    /// Build the parameter model for the binding artifact: the fixed
    /// runtime import set, request/response packages of HTTP-bound
    /// methods, and the conditionally wired client/middleware packages.
    fn binding_params<'a>(&mut self, file: &'a FileDescriptor) -> BindingParams<'a> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut imports: Vec<ImportBinding> = Vec::new();

        for pkg in &self.common_imports {
            if seen.insert(pkg.path.clone()) {
                let alias = self.aliases.acquire(&pkg.path, pkg.reference()).to_string();
                imports.push(ImportBinding::new(&pkg.path, alias));
            }
        }
        for path in paths::BINDING_IMPORTS {
            if seen.insert((*path).to_string()) {
                let alias = self.aliases.acquire(path, "").to_string();
                imports.push(ImportBinding::new(*path, alias));
            }
        }
        if file.openapi().is_some() && seen.insert(paths::OPENAPI_SPEC_IMPORT.to_string()) {
            let alias = self.aliases.acquire(paths::OPENAPI_SPEC_IMPORT, "").to_string();
            imports.push(ImportBinding::new(paths::OPENAPI_SPEC_IMPORT, alias));
        }

        for service in file.services() {
            for method in service.methods() {
                // Only HTTP-bound methods pull their message packages into
                // the binding file; the file's own package is never imported.
                if !method.has_binding() {
                    continue;
                }
                for pkg in [&method.request().package, &method.response().package] {
                    if pkg.path == file.package().path || !seen.insert(pkg.path.clone()) {
                        continue;
                    }
                    let alias = self.aliases.acquire(&pkg.path, pkg.reference()).to_string();
                    imports.push(ImportBinding::new(&pkg.path, alias));
                }
            }

            if service.has_bindings() && seen.insert(runtime::HTTP_CLIENT.to_string()) {
                let alias = self.aliases.acquire(runtime::HTTP_CLIENT, "").to_string();
                imports.push(ImportBinding::new(runtime::HTTP_CLIENT, alias));
            }
            if self.options.apply_default_middlewares
                && service.has_bindings()
                && seen.insert(runtime::HTTP_MIDDLEWARE.to_string())
            {
                let alias = self.aliases.acquire(runtime::HTTP_MIDDLEWARE, "").to_string();
                imports.push(ImportBinding::new(runtime::HTTP_MIDDLEWARE, alias));
            }
        }

        BindingParams {
            file,
            imports,
            apply_middlewares: self.options.apply_default_middlewares,
            openapi: file.openapi(),
        }
    }

    /// Build the parameter model for a scaffold, stub or stub test.
    fn impl_params<'a>(
        &mut self,
        file: &'a FileDescriptor,
        service: &'a ServiceDescriptor,
        method: Option<&'a MethodDescriptor>,
        deps: &[&str],
        manifest: &mut Manifest,
    ) -> Result<ImplParams<'a>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut imports: Vec<ImportBinding> = Vec::new();

        for pkg in &self.common_imports {
            if seen.insert(pkg.path.clone()) {
                let alias = self.aliases.acquire(&pkg.path, pkg.reference()).to_string();
                imports.push(ImportBinding::new(&pkg.path, alias));
            }
        }
        for dep in deps {
            if seen.insert((*dep).to_string()) {
                let alias = self.aliases.acquire(dep, "").to_string();
                imports.push(ImportBinding::new(*dep, alias));
            }
        }

        let file_pkg = file.package();
        let mut impl_import_path = paths::clean(&file_pkg.path);
        let mut binding_alias = None;

        if !self.options.impl_path.is_empty() {
            let binding_import = self.roots.resolve_import_path(&file_pkg.path)?;
            if binding_import.is_empty() {
                let message =
                    "import path could not be resolved; binding package import omitted from stubs";
                warn!(file = %file.name(), "{message}");
                manifest.diagnose(Diagnostic::warning(file.name(), message));
            }
            impl_import_path = paths::join(&[&binding_import, &self.options.impl_path]);

            // Stubs reference their request/response types through the
            // binding package unless both message packages are distinct
            // importable packages of their own.
            let needs_binding_import = match method {
                Some(m) => {
                    let req = paths::clean(&m.request().package.path);
                    let resp = paths::clean(&m.response().package.path);
                    !(req.contains('/')
                        && !binding_import.ends_with(&req)
                        && resp.contains('/')
                        && !binding_import.ends_with(&resp))
                }
                None => true,
            };
            if needs_binding_import
                && !binding_import.is_empty()
                && seen.insert(binding_import.clone())
            {
                let alias = self.aliases.acquire(&binding_import, "desc").to_string();
                imports.push(ImportBinding::new(&binding_import, alias.clone()));
                binding_alias = Some(alias);
            }
        }

        if let Some(m) = method {
            for pkg in [&m.request().package, &m.response().package] {
                if pkg.path == file_pkg.path || !seen.insert(pkg.path.clone()) {
                    continue;
                }
                let alias = self.aliases.acquire(&pkg.path, pkg.reference()).to_string();
                imports.push(ImportBinding::new(&pkg.path, alias));
            }
        }

        Ok(ImplParams {
            file,
            service,
            method,
            impl_import_path,
            binding_alias,
            imports,
        })
    }

    /// Disk prefix for a file's artifacts, per the output-path mode.
    fn output_prefix_for(&self, file: &FileDescriptor) -> String {
        match self.options.path_mode {
            PathMode::SourceRelative => {
                let prefix = file.generated_filename_prefix();
                match prefix.rfind('/') {
                    Some(split) => prefix[..split].to_string(),
                    None => String::new(),
                }
            }
            PathMode::ImportPath => file.package().path.clone(),
        }
    }

    /// Output directory of a service's stubs, relative to the run root.
    fn stub_out_dir(&self, file: &FileDescriptor, service: &ServiceDescriptor) -> String {
        let prefix = self.output_prefix_for(file);
        let mut segments = vec![prefix.as_str(), self.options.impl_path.as_str()];
        let subdir;
        if self.options.service_subdir {
            subdir = naming::to_kebab_case(service.name());
            segments.push(&subdir);
        }
        paths::join(&segments)
    }

    /// Directory whose existing declarations gate this service's stubs.
    /// Normally the stub output directory itself; when that holds no
    /// declarations of the destination package, the source-relative
    /// variant is consulted so hand-written implementations kept next to
    /// their sources are still honored.
    fn oracle_consult_dir(
        &mut self,
        file: &FileDescriptor,
        service: &ServiceDescriptor,
    ) -> Result<PathBuf> {
        let package = file.package().name.clone();
        let primary = self.roots.start_dir().join(self.stub_out_dir(file, service));
        if self.oracle.package_present(&primary, &package)? {
            return Ok(primary);
        }

        let impl_relative = match self.options.path_mode {
            PathMode::SourceRelative => {
                paths::join(&[&file.package().path, &self.options.impl_path])
            }
            PathMode::ImportPath => self.options.impl_path.clone(),
        };
        let prefix = self.output_prefix_for(file);
        let mut segments = vec![prefix.as_str(), impl_relative.as_str()];
        let subdir;
        if self.options.service_subdir {
            subdir = naming::to_kebab_case(service.name());
            segments.push(&subdir);
        }
        let secondary = self.roots.start_dir().join(paths::join(&segments));

        if secondary != primary && self.oracle.package_present(&secondary, &package)? {
            return Ok(secondary);
        }
        Ok(primary)
    }

    fn format_artifact(&self, code: String, output: &str) -> Result<String> {
        self.formatter
            .format(&code, Path::new(output))
            .map_err(|source| Error::Format {
                path: output.to_string(),
                annotated: annotate(&code),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use gantry_descriptor::{
        FileDescriptor, GoPackage, HttpBinding, MethodDescriptor, ServiceDescriptor, TypeRef,
    };
    use tempfile::TempDir;

    use super::*;
    use crate::{
        Severity,
        render::PassthroughFormatter,
        testing::{
            FailingRenderer, MockRenderer, RejectingFormatter, empty_file, strings_file,
            write_existing_strings_impl,
        },
    };

    fn generator_at(
        start: &Path,
        options: Options,
    ) -> Generator<MockRenderer, PassthroughFormatter> {
        Generator::new(
            options,
            ProjectRoots::new(start, Vec::new()),
            MockRenderer,
            PassthroughFormatter,
        )
    }

    fn stub_options() -> Options {
        Options::new().with_impl_stubs(true).with_tests(true)
    }

    #[test]
    fn test_no_services_skip() {
        let temp = TempDir::new().unwrap();
        let mut generator = generator_at(temp.path(), Options::new());

        let manifest = generator.generate(&[empty_file()]).unwrap();

        assert!(manifest.is_empty());
        assert_eq!(manifest.diagnostics().len(), 1);
        assert_eq!(manifest.diagnostics()[0].severity, Severity::Info);
    }

    #[test]
    fn test_binding_always_emitted() {
        let temp = TempDir::new().unwrap();
        let mut generator = generator_at(temp.path(), Options::new());

        let manifest = generator.generate(&[strings_file()]).unwrap();

        assert_eq!(manifest.len(), 1);
        let binding = manifest.file("pb/strings/strings.pb.gantry.go").unwrap();
        let content = String::from_utf8(binding.content.clone()).unwrap();
        assert!(content.starts_with("// Code generated by gantry."));
        assert!(content.contains("package strings"));
    }

    #[test]
    fn test_openapi_needs_path_and_payload() {
        let temp = TempDir::new().unwrap();

        // Payload but no configured path: nothing extra.
        let mut generator = generator_at(temp.path(), Options::new());
        let with_payload = strings_file().with_openapi(b"{}".to_vec());
        let manifest = generator.generate(&[with_payload.clone()]).unwrap();
        assert_eq!(manifest.len(), 1);

        // Path but no payload: nothing extra.
        let mut generator =
            generator_at(temp.path(), Options::new().with_openapi_path("docs"));
        let manifest = generator.generate(&[strings_file()]).unwrap();
        assert_eq!(manifest.len(), 1);

        // Both: sibling JSON artifact derived from the base name.
        let mut generator =
            generator_at(temp.path(), Options::new().with_openapi_path("docs"));
        let manifest = generator.generate(&[with_payload]).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.file("docs/strings.json").unwrap().content, b"{}");
    }

    #[test]
    fn test_stub_emission_into_fresh_directory() {
        let temp = TempDir::new().unwrap();
        let mut generator = generator_at(temp.path(), stub_options());

        let manifest = generator.generate(&[strings_file()]).unwrap();

        let emitted: Vec<&str> = manifest.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            emitted,
            vec![
                "pb/strings/strings.pb.gantry.go",
                "pb/strings/strings.go",
                "pb/strings/strings_to_lower.go",
                "pb/strings/strings_to_lower_test.go",
            ]
        );
    }

    #[test]
    fn test_existing_declarations_skip_stubs() {
        let temp = TempDir::new().unwrap();
        write_existing_strings_impl(&temp.path().join("pb/strings")).unwrap();
        let mut generator = generator_at(temp.path(), stub_options());

        let manifest = generator.generate(&[strings_file()]).unwrap();

        // The binding file is regenerated unconditionally; both stubs are
        // skipped with informational diagnostics.
        assert_eq!(manifest.len(), 1);
        assert!(manifest.file("pb/strings/strings.pb.gantry.go").is_some());
        let skips: Vec<&str> = manifest
            .diagnostics()
            .iter()
            .filter(|d| d.message.contains("will not be emitted"))
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(skips.len(), 2);
        assert!(skips[0].contains("`StringsImplementation`"));
        assert!(skips[1].contains("`ToLower`"));
    }

    #[test]
    fn test_force_re_emits_existing_stubs() {
        let temp = TempDir::new().unwrap();
        write_existing_strings_impl(&temp.path().join("pb/strings")).unwrap();
        let mut generator = generator_at(temp.path(), stub_options().with_force(true));

        let manifest = generator.generate(&[strings_file()]).unwrap();

        assert_eq!(manifest.len(), 4);
        assert!(manifest.file("pb/strings/strings_to_lower.go").is_some());
        assert!(manifest.file("pb/strings/strings_to_lower_test.go").is_some());
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let temp = TempDir::new().unwrap();

        let mut first_run = generator_at(temp.path(), stub_options());
        let first = first_run.generate(&[strings_file()]).unwrap();
        assert_eq!(first.len(), 4);
        first.write_all(temp.path()).unwrap();

        // A fresh run against the written tree: the binding file is
        // byte-identical and no stub or test files are produced.
        let mut second_run = generator_at(temp.path(), stub_options());
        let second = second_run.generate(&[strings_file()]).unwrap();

        assert_eq!(second.len(), 1);
        assert_eq!(
            second.file("pb/strings/strings.pb.gantry.go").unwrap(),
            first.file("pb/strings/strings.pb.gantry.go").unwrap(),
        );
    }

    #[test]
    fn test_shared_destination_snapshot_ordering() {
        let temp = TempDir::new().unwrap();
        let pkg = GoPackage::new("strings", "pb/strings");
        let message = TypeRef::new("String", pkg.clone());
        let file = FileDescriptor::new("strings.proto", pkg)
            .with_service(ServiceDescriptor::new("Strings").with_method(
                MethodDescriptor::new("to_lower", message.clone(), message.clone()),
            ))
            .with_service(ServiceDescriptor::new("Extra").with_method(MethodDescriptor::new(
                "to_upper",
                message.clone(),
                message,
            )));

        let mut generator = generator_at(temp.path(), stub_options());
        let manifest = generator.generate(&[file]).unwrap();

        // Both services target the same directory within one run; the
        // declaration snapshot was taken before any emission, so neither
        // sees the other's freshly emitted scaffold.
        assert!(manifest.file("pb/strings/strings.go").is_some());
        assert!(manifest.file("pb/strings/extra.go").is_some());
        assert!(manifest.file("pb/strings/extra_to_upper.go").is_some());
    }

    #[test]
    fn test_service_subdir_namespacing() {
        let temp = TempDir::new().unwrap();
        let options = stub_options()
            .with_service_subdir(true)
            .with_impl_path("internal/app");
        let mut generator = generator_at(temp.path(), options);

        let manifest = generator.generate(&[strings_file()]).unwrap();

        assert!(
            manifest
                .file("pb/strings/internal/app/strings/strings_to_lower.go")
                .is_some()
        );
    }

    #[test]
    fn test_source_relative_output_mode() {
        let temp = TempDir::new().unwrap();
        let file = strings_file().with_generated_filename_prefix("gen/out/strings");
        let options = Options::new().with_path_mode(PathMode::SourceRelative);
        let mut generator = generator_at(temp.path(), options);

        let manifest = generator.generate(&[file]).unwrap();

        assert!(manifest.file("gen/out/strings.pb.gantry.go").is_some());
    }

    #[test]
    fn test_render_failure_is_fatal_and_names_the_file() {
        let temp = TempDir::new().unwrap();
        let mut generator = Generator::new(
            Options::new(),
            ProjectRoots::new(temp.path(), Vec::new()),
            FailingRenderer,
            PassthroughFormatter,
        );

        let err = generator.generate(&[strings_file()]).unwrap_err();
        match err {
            Error::Render { file, .. } => assert_eq!(file, "strings.proto"),
            other => panic!("expected render error, got {other:?}"),
        }
    }

    #[test]
    fn test_format_failure_carries_annotated_text() {
        let temp = TempDir::new().unwrap();
        let mut generator = Generator::new(
            Options::new(),
            ProjectRoots::new(temp.path(), Vec::new()),
            MockRenderer,
            RejectingFormatter,
        );

        let err = generator.generate(&[strings_file()]).unwrap_err();
        match err {
            Error::Format { path, annotated, .. } => {
                assert_eq!(path, "pb/strings/strings.pb.gantry.go");
                assert!(annotated.starts_with("1: "));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    /// Renderer that records the import set of every binding artifact.
    #[derive(Clone)]
    struct RecordingRenderer {
        imports: Rc<RefCell<Vec<Vec<ImportBinding>>>>,
    }

    impl Renderer for RecordingRenderer {
        fn binding(&self, params: &BindingParams<'_>) -> std::result::Result<String, crate::RenderError> {
            self.imports.borrow_mut().push(params.imports.clone());
            MockRenderer.binding(params)
        }

        fn service_scaffold(&self, params: &ImplParams<'_>) -> std::result::Result<String, crate::RenderError> {
            MockRenderer.service_scaffold(params)
        }

        fn method_impl(&self, params: &ImplParams<'_>) -> std::result::Result<String, crate::RenderError> {
            MockRenderer.method_impl(params)
        }

        fn method_test(&self, params: &ImplParams<'_>) -> std::result::Result<String, crate::RenderError> {
            MockRenderer.method_test(params)
        }
    }

    #[test]
    fn test_aliases_are_stable_across_files_in_one_run() {
        let temp = TempDir::new().unwrap();
        let other = GoPackage::new("other", "pb/other");

        let file_for = |name: &str, pkg_path: &str| {
            let pkg = GoPackage::new("svc", pkg_path);
            let request = TypeRef::new("Req", other.clone());
            let response = TypeRef::new("Resp", other.clone());
            FileDescriptor::new(name, pkg).with_service(
                ServiceDescriptor::new("Svc").with_method(
                    MethodDescriptor::new("call", request, response)
                        .with_binding(HttpBinding::new("POST", "/v1/call")),
                ),
            )
        };

        let imports = Rc::new(RefCell::new(Vec::new()));
        let renderer = RecordingRenderer {
            imports: Rc::clone(&imports),
        };
        let mut generator = Generator::new(
            Options::new(),
            ProjectRoots::new(temp.path(), Vec::new()),
            renderer,
            PassthroughFormatter,
        );

        generator
            .generate(&[file_for("a.proto", "pb/a"), file_for("b.proto", "pb/b")])
            .unwrap();

        let recorded = imports.borrow();
        assert_eq!(recorded.len(), 2);
        let alias_in = |run: &[ImportBinding]| {
            run.iter()
                .find(|i| i.path == "pb/other")
                .map(|i| i.alias.clone())
                .expect("pb/other imported")
        };
        assert_eq!(alias_in(&recorded[0]), alias_in(&recorded[1]));
    }
}
