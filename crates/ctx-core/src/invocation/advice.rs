//! Contrato de un interceptor (advice) de la cadena.
use std::fmt::Debug;

use super::ContextInvocation;
use crate::errors::ContextError;
use crate::model::Value;
use crate::options::OptionsSchema;

/// Un advice envuelve al resto de la cadena. En `around` puede leer o
/// reescribir las opciones, continuar con `invocation.invoke()` (y
/// post-procesar el resultado a la vuelta) o devolver sin continuar.
pub trait Advice: Send + Sync + Debug {
    /// Declara las opciones que entiende el advice.
    fn declare_default_options(&self, _schema: &mut OptionsSchema) {}

    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError>;
}
