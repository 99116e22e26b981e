//! Resolvedor basado en convertidores.
//!
//! Por cada parámetro de la firma (o su sustituto en `arguments`):
//! - un `params[i]` que ya satisface el tipo declarado se usa sin más,
//! - si no, la semilla es `params[i]` o, ausente, `data` por nombre y luego
//!   por posición,
//! - `interfaces` puede reasignar el tipo declarado antes de convertir,
//! - el `ConverterRegistry` hace el resto (default u error si no hay valor).
use log::debug;

use super::ArgumentResolver;
use crate::convert::{ConverterRegistry, ParamConverter};
use crate::errors::ContextError;
use crate::invocation::ContextInvocation;
use crate::model::{RequestData, Value};

#[derive(Debug, Clone, Default)]
pub struct ConverterArgumentResolver {
    converters: ConverterRegistry,
}

impl ConverterArgumentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(converters: ConverterRegistry) -> Self {
        Self { converters }
    }

    pub fn add_converter<C: ParamConverter + 'static>(mut self, converter: C) -> Self {
        self.converters.add(converter);
        self
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }
}

impl ArgumentResolver for ConverterArgumentResolver {
    fn resolve(&self, invocation: &ContextInvocation) -> Result<Vec<Value>, ContextError> {
        let options = invocation.options();
        let context = options.context()?;
        let params = options.params()?;
        let overrides = options.arguments()?;
        let interfaces = options.interfaces()?;
        let empty = RequestData::default();
        let data = options.data()?.unwrap_or(&empty);

        let mut resolved = Vec::with_capacity(context.arity());
        for (i, reflected) in context.signature().iter().enumerate() {
            let argument = overrides.get(i).unwrap_or(reflected);

            if let Some(supplied) = params.get(i) {
                if argument.accepts(supplied) {
                    resolved.push(supplied.clone());
                    continue;
                }
            }

            let seed = params.get(i).or_else(|| data.lookup(argument.name(), i)).cloned();

            let bound = argument.declared_type()
                                .and_then(|declared| interfaces.and_then(|map| map.get(declared)))
                                .map(|concrete| argument.with_type(concrete.clone()));
            let argument = bound.as_ref().unwrap_or(argument);

            debug!("resolving argument '{}' of '{}' (seeded: {})", argument.name(), context.name(), seed.is_some());
            resolved.push(self.converters.resolve(seed, argument, data)?);
        }
        Ok(resolved)
    }
}
