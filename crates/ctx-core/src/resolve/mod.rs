//! Resolución de argumentos: de las opciones de la invocación a la lista
//! posicional que recibe el callable.

pub mod converter;
pub mod params;

use std::fmt::Debug;

pub use converter::ConverterArgumentResolver;
pub use params::ParamsArgumentResolver;

use crate::errors::ContextError;
use crate::invocation::ContextInvocation;
use crate::model::Value;

pub trait ArgumentResolver: Send + Sync + Debug {
    /// Lee `context`, `params`, `data`, `arguments` e `interfaces` de las
    /// opciones actuales. Nunca modifica la `RequestData`.
    fn resolve(&self, invocation: &ContextInvocation) -> Result<Vec<Value>, ContextError>;
}
