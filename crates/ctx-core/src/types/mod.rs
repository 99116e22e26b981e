//! Descriptores de tipos compuestos construibles desde datos.

pub mod registry;

pub use registry::{infer_setter_field, Constructor, Field, Object, Setter, TypeDescriptor, TypeDescriptorBuilder, TypeRegistry};
