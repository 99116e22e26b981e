//! `ConverterRegistry`: convertidores agrupados por prioridad.
//!
//! Orden de prueba: prioridad descendente y, dentro de la misma prioridad,
//! orden de registro. El despacho es first-match: el primer convertidor que
//! soporta el valor y no renuncia gana.
use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use super::{Conversion, ParamConverter};
use crate::errors::ContextError;
use crate::model::{Argument, RequestData, Value};

#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    buckets: BTreeMap<i32, Vec<Arc<dyn ParamConverter>>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<C: ParamConverter + 'static>(&mut self, converter: C) -> &mut Self {
        self.add_shared(Arc::new(converter))
    }

    pub fn add_shared(&mut self, converter: Arc<dyn ParamConverter>) -> &mut Self {
        self.buckets.entry(converter.priority()).or_default().push(converter);
        self
    }

    pub fn with<C: ParamConverter + 'static>(mut self, converter: C) -> Self {
        self.add(converter);
        self
    }

    /// Convertidores en orden de prueba.
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn ParamConverter>> {
        self.buckets.values().rev().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Despacha `value` al primer convertidor que lo soporte y no renuncie.
    /// Sin conversión devuelve el valor original (posiblemente `None`).
    pub fn convert(&self, value: Option<Value>, argument: &Argument, data: &RequestData) -> Result<Option<Value>, ContextError> {
        for converter in self.all() {
            if !converter.supports(value.as_ref(), argument, data) {
                continue;
            }
            match converter.convert(value.as_ref(), argument, data, self)? {
                Conversion::Converted(converted) => {
                    debug!("argument '{}' converted by {:?}", argument.name(), converter);
                    return Ok(Some(converted));
                }
                Conversion::Declined => debug!("{:?} declined argument '{}'", converter, argument.name()),
            }
        }
        Ok(value)
    }

    /// Resolución completa de un valor para `argument`: cortocircuito de
    /// identidad, conversión y, si sigue sin valor, default u error.
    pub fn resolve(&self, value: Option<Value>, argument: &Argument, data: &RequestData) -> Result<Value, ContextError> {
        if let Some(v) = &value {
            if argument.accepts(v) {
                return Ok(v.clone());
            }
        }
        match self.convert(value, argument, data)? {
            Some(resolved) => Ok(resolved),
            None if argument.is_optional() => Ok(argument.default_value()),
            None => Err(ContextError::UnresolvedArgument { name: argument.name().to_string() }),
        }
    }
}
