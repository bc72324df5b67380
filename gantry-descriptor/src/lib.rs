//! Descriptor model consumed by the gantry code-emission engine.
//!
//! This crate defines the in-memory representation of parsed service
//! descriptors handed to the generator by an upstream protocol compiler.
//! It is a pure data model: no I/O, no protocol parsing.
//!
//! # Architecture
//!
//! ```text
//! .proto (upstream compiler) → gantry-descriptor (registry) → gantry-codegen
//! ```
//!
//! The descriptor types are designed to be:
//! - Transport-agnostic (HTTP binding metadata is optional per method)
//! - Self-contained (constructed entirely by the caller)
//! - Cheap to traverse (plain owned fields, no interior mutability)

mod file;
mod package;
mod registry;

pub use file::{FileDescriptor, HttpBinding, MethodDescriptor, ServiceDescriptor, TypeRef};
pub use package::GoPackage;
pub use registry::Registry;
