//! Modelo de datos del motor: valores, descriptores de parámetros, bolsa de
//! entrada y callables con firma explícita.

pub mod argument;
pub mod callable;
pub mod request_data;
pub mod value;

pub use argument::{Argument, TypeRef};
pub use callable::{Args, Callable};
pub use request_data::{ParamKey, RequestData};
pub use value::{FromValue, Instance, Value};
