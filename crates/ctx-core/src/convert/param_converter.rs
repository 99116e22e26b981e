//! Contrato para convertidores de parámetros.
//!
//! Un `ParamConverter` transforma un valor sin tipo (o ausente) en el valor
//! que espera un `Argument`. Las implementaciones no deben guardar estado
//! mutable por llamada: la misma instancia se usa desde invocaciones
//! concurrentes.
use std::fmt::Debug;

use super::ConverterRegistry;
use crate::errors::ContextError;
use crate::model::{Argument, RequestData, Value};

/// Resultado de un intento de conversión.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Converted(Value),
    /// El convertidor renuncia aunque `supports` fuera `true`; el registro
    /// prueba el siguiente.
    Declined,
}

pub trait ParamConverter: Send + Sync + Debug {
    /// `value` es `None` cuando no se encontró nada para el parámetro.
    fn supports(&self, value: Option<&Value>, argument: &Argument, data: &RequestData) -> bool;

    /// `converters` es el registro que está despachando, para recursión.
    fn convert(&self,
               value: Option<&Value>,
               argument: &Argument,
               data: &RequestData,
               converters: &ConverterRegistry)
               -> Result<Conversion, ContextError>;

    /// Mayor prioridad se prueba antes.
    fn priority(&self) -> i32 {
        crate::constants::DEFAULT_PRIORITY
    }
}
