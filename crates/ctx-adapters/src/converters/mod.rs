//! Convertidores de dominio.
//!
//! Prioridades: fechas 3, entidades 2, escalares y deserialización 1, el
//! resto 0 (junto al `ObjectConverter` del núcleo).

pub mod datetime;
pub mod deserialize;
pub mod entity;
pub mod instance;
pub mod scalar;
pub mod service;
pub mod string_to_array;

pub use datetime::DateTimeConverter;
pub use deserialize::DeserializeConverter;
pub use entity::{EntityConverter, EntityRepository, InMemoryEntityRepository};
pub use instance::InstanceConverter;
pub use scalar::ScalarConverter;
pub use service::{ServiceLocator, ServiceMap, ServiceRegistryConverter};
pub use string_to_array::StringToArrayConverter;
