//! Test utilities for the emission engine.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::Path;

use eyre::Result;
use gantry_descriptor::{
    FileDescriptor, GoPackage, HttpBinding, MethodDescriptor, ServiceDescriptor, TypeRef,
};

use crate::{
    error::{FormatError, RenderError},
    naming,
    render::{BindingParams, Formatter, ImplParams, Renderer},
};

/// Renderer producing minimal but structurally valid Go source, so the
/// declaration oracle can scan re-run fixtures built from its output.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockRenderer;

impl Renderer for MockRenderer {
    fn binding(&self, params: &BindingParams<'_>) -> Result<String, RenderError> {
        let mut out = format!(
            "// Code generated by gantry. DO NOT EDIT.\npackage {}\n\nimport (\n",
            params.file.package().name
        );
        for import in &params.imports {
            out.push_str(&format!("\t{} \"{}\"\n", import.alias, import.path));
        }
        out.push_str(")\n");
        for service in params.file.services() {
            out.push_str(&format!("\ntype {}ServiceDesc struct{{}}\n", service.name()));
        }
        if params.openapi.is_some() {
            out.push_str("\nvar hasOpenAPIDefinition = true\n");
        }
        Ok(out)
    }

    fn service_scaffold(&self, params: &ImplParams<'_>) -> Result<String, RenderError> {
        let type_name = naming::impl_type_name(params.service.name());
        Ok(format!(
            "// Code generated by gantry, but you can (must) modify it.\n\
             package {pkg}\n\n\
             type {type_name} struct{{}}\n\n\
             func New{service}() *{type_name} {{\n\treturn &{type_name}{{}}\n}}\n",
            pkg = params.file.package().name,
            service = params.service.name(),
        ))
    }

    fn method_impl(&self, params: &ImplParams<'_>) -> Result<String, RenderError> {
        let method = params
            .method
            .ok_or_else(|| RenderError("method stub requires a method".to_string()))?;
        let type_name = naming::impl_type_name(params.service.name());
        let method_name = naming::to_pascal_case(method.name());
        Ok(format!(
            "package {pkg}\n\n\
             func (i *{type_name}) {method_name}(ctx context.Context) error {{\n\
             \treturn errors.New(\"not implemented\")\n}}\n",
            pkg = params.file.package().name,
        ))
    }

    fn method_test(&self, params: &ImplParams<'_>) -> Result<String, RenderError> {
        let method = params
            .method
            .ok_or_else(|| RenderError("method test requires a method".to_string()))?;
        let type_name = naming::impl_type_name(params.service.name());
        let method_name = naming::to_pascal_case(method.name());
        Ok(format!(
            "package {pkg}\n\n\
             func Test{type_name}_{method_name}(t *testing.T) {{\n\
             \tapi := New{service}()\n\trequire.NotNil(t, api)\n}}\n",
            pkg = params.file.package().name,
            service = params.service.name(),
        ))
    }
}

/// Renderer whose every method fails, for fatal-path tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn binding(&self, _: &BindingParams<'_>) -> Result<String, RenderError> {
        Err(RenderError("missing template field".to_string()))
    }

    fn service_scaffold(&self, _: &ImplParams<'_>) -> Result<String, RenderError> {
        Err(RenderError("missing template field".to_string()))
    }

    fn method_impl(&self, _: &ImplParams<'_>) -> Result<String, RenderError> {
        Err(RenderError("missing template field".to_string()))
    }

    fn method_test(&self, _: &ImplParams<'_>) -> Result<String, RenderError> {
        Err(RenderError("missing template field".to_string()))
    }
}

/// Formatter that rejects everything, for fatal-path tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectingFormatter;

impl Formatter for RejectingFormatter {
    fn format(&self, _: &str, _: &Path) -> Result<String, FormatError> {
        Err(FormatError("expected declaration".to_string()))
    }
}

/// A file descriptor with one `Strings` service exposing an HTTP-bound
/// `to_lower` method, mirroring the canonical integration fixture.
pub fn strings_file() -> FileDescriptor {
    let pkg = GoPackage::new("strings", "pb/strings");
    let string_type = TypeRef::new("String", pkg.clone());
    FileDescriptor::new("strings.proto", pkg)
        .with_generated_filename_prefix("pb/strings/strings")
        .with_service(
            ServiceDescriptor::new("Strings").with_method(
                MethodDescriptor::new("to_lower", string_type.clone(), string_type)
                    .with_binding(HttpBinding::new("POST", "/v1/strings/to_lower")),
            ),
        )
}

/// A file descriptor with no services, for skip-path tests.
pub fn empty_file() -> FileDescriptor {
    FileDescriptor::new("empty.proto", GoPackage::new("empty", "pb/empty"))
}

/// Write a hand-written implementation of `Strings.ToLower` into `dir`,
/// the shape the oracle must detect and skip.
pub fn write_existing_strings_impl(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(
        dir.join("strings.go"),
        "package strings\n\n\
         type StringsImplementation struct{}\n\n\
         func NewStrings() *StringsImplementation {\n\treturn &StringsImplementation{}\n}\n\n\
         func (i *StringsImplementation) ToLower(ctx context.Context) error {\n\treturn nil\n}\n",
    )?;
    Ok(())
}
