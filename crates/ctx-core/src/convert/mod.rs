//! Conversión de valores sin tipo a parámetros tipados.

pub mod object;
pub mod param_converter;
pub mod registry;

pub use object::ObjectConverter;
pub use param_converter::{Conversion, ParamConverter};
pub use registry::ConverterRegistry;
