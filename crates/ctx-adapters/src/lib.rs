//! ctx-adapters: colaboradores concretos del motor.
//!
//! Este crate provee:
//! - Fuentes de entrada (`ArgvInput`, `GetOptInput`, `JsonBodyInput`).
//! - Convertidores de dominio: escalares, listas separadas por comas,
//!   fechas, instancias ya presentes, servicios, entidades por id y
//!   deserialización del payload crudo.
//!
//! Nota: el núcleo sólo conoce los contratos `InputSource` y
//! `ParamConverter`; nada aquí es obligatorio para usar `Engine`.

pub mod converters;
pub mod input;

pub use converters::{DateTimeConverter, DeserializeConverter, EntityConverter, EntityRepository, InMemoryEntityRepository,
                     InstanceConverter, ScalarConverter, ServiceLocator, ServiceMap, ServiceRegistryConverter,
                     StringToArrayConverter};
pub use input::{ArgvInput, GetOptInput, JsonBodyInput};
