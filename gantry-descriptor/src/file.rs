//! File, service and method descriptors.

use serde::Serialize;

use crate::GoPackage;

/// A parsed input file: one unit of generation.
///
/// Each file produces a binding artifact, optionally an API-documentation
/// artifact, and optionally implementation stubs for its services.
#[derive(Debug, Clone, Serialize)]
pub struct FileDescriptor {
    /// Source file name as reported by the upstream compiler,
    /// e.g. `strings.proto`.
    name: String,
    /// Output package identity for this file's generated code.
    package: GoPackage,
    /// Filename prefix chosen by the upstream compiler for generated
    /// artifacts, e.g. `pb/strings/strings`.
    generated_filename_prefix: String,
    /// Services declared in this file.
    services: Vec<ServiceDescriptor>,
    /// Optional API-documentation payload (an OpenAPI document) attached
    /// to this file by the upstream compiler.
    openapi: Option<Vec<u8>>,
}

impl FileDescriptor {
    /// Create a file descriptor. The generated-filename prefix defaults to
    /// the source name with its extension stripped.
    pub fn new(name: impl Into<String>, package: GoPackage) -> Self {
        let name = name.into();
        let prefix = name.rsplit_once('.').map_or(name.as_str(), |(stem, _)| stem);
        let generated_filename_prefix = prefix.to_string();
        Self {
            name,
            package,
            generated_filename_prefix,
            services: Vec::new(),
            openapi: None,
        }
    }

    /// Override the generated-filename prefix.
    pub fn with_generated_filename_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.generated_filename_prefix = prefix.into();
        self
    }

    /// Append a service declaration.
    pub fn with_service(mut self, service: ServiceDescriptor) -> Self {
        self.services.push(service);
        self
    }

    /// Attach an API-documentation payload.
    pub fn with_openapi(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.openapi = Some(payload.into());
        self
    }

    /// Source file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output package identity.
    pub fn package(&self) -> &GoPackage {
        &self.package
    }

    /// Generated-filename prefix.
    pub fn generated_filename_prefix(&self) -> &str {
        &self.generated_filename_prefix
    }

    /// Declared services.
    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    /// API-documentation payload, if any.
    pub fn openapi(&self) -> Option<&[u8]> {
        self.openapi.as_deref()
    }

    /// Base name shared by this file's artifacts: the final path segment
    /// of the source name, extension stripped.
    pub fn base_name(&self) -> &str {
        let tail = self.name.rsplit('/').next().unwrap_or(&self.name);
        tail.rsplit_once('.').map_or(tail, |(stem, _)| stem)
    }
}

/// A service declaration within a file.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    name: String,
    methods: Vec<MethodDescriptor>,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Append a method declaration.
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Service name as declared, e.g. `Strings`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared methods.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Whether any method of this service carries an HTTP binding.
    pub fn has_bindings(&self) -> bool {
        self.methods.iter().any(MethodDescriptor::has_binding)
    }
}

/// A method declaration within a service.
#[derive(Debug, Clone, Serialize)]
pub struct MethodDescriptor {
    name: String,
    request: TypeRef,
    response: TypeRef,
    bindings: Vec<HttpBinding>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, request: TypeRef, response: TypeRef) -> Self {
        Self {
            name: name.into(),
            request,
            response,
            bindings: Vec::new(),
        }
    }

    /// Append an HTTP binding.
    pub fn with_binding(mut self, binding: HttpBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Method name as declared, e.g. `to_lower`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request type handle.
    pub fn request(&self) -> &TypeRef {
        &self.request
    }

    /// Response type handle.
    pub fn response(&self) -> &TypeRef {
        &self.response
    }

    /// Declared HTTP bindings.
    pub fn bindings(&self) -> &[HttpBinding] {
        &self.bindings
    }

    /// Whether this method carries at least one HTTP binding.
    pub fn has_binding(&self) -> bool {
        !self.bindings.is_empty()
    }
}

/// Handle to a request or response message type, pointing back to the
/// package identity of the file that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    /// Message type name, e.g. `String`.
    pub name: String,
    /// Package identity of the declaring file.
    pub package: GoPackage,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, package: GoPackage) -> Self {
        Self {
            name: name.into(),
            package,
        }
    }
}

/// HTTP binding metadata attached to a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpBinding {
    /// HTTP verb, e.g. `POST`.
    pub verb: String,
    /// Path template, e.g. `/v1/strings/to_lower`.
    pub path: String,
    /// Request-body field selector, if the binding maps a body.
    pub body: Option<String>,
}

impl HttpBinding {
    pub fn new(verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            path: path.into(),
            body: None,
        }
    }

    /// Attach a request-body field selector.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
