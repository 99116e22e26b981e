//! Implementación del `Engine`.

use std::sync::Arc;

use log::{debug, warn};

use super::{Delegate, EngineBuilder, Proxy};
use crate::errors::ContextError;
use crate::invocation::{Advice, ContextInvocation};
use crate::model::Value;
use crate::options::{Options, OptionsSchema};

/// Motor de invocación
///
/// Guarda la cadena de advices ya compuesta y el esquema de opciones que
/// declararon. Es inmutable tras `build`, así que un mismo engine se puede
/// compartir entre hilos (`Arc<Engine>`) y cada `execute` crea su propia
/// `ContextInvocation`.
#[derive(Debug, Clone)]
pub struct Engine {
    advices: Vec<Arc<dyn Advice>>,
    schema: OptionsSchema,
    default_options: Options,
}

impl Engine {
    /// Crea un nuevo builder para configurar el engine
    #[inline]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Crea el engine a partir de una cadena ya ordenada (exterior primero).
    pub fn new(advices: Vec<Arc<dyn Advice>>, default_options: Options) -> Self {
        let mut schema = OptionsSchema::new();
        for advice in &advices {
            advice.declare_default_options(&mut schema);
        }
        Self { advices,
               schema,
               default_options }
    }

    /// Ejecuta la cadena con `options` fusionadas sobre los defaults del
    /// engine. Las opciones se validan antes de que corra ningún advice.
    pub fn execute(&self, options: Options) -> Result<Value, ContextError> {
        let options = self.schema.resolve(self.default_options.merged_with(options))?;
        let mut invocation = ContextInvocation::new(options, self.advices.clone());
        debug!("execute:start id={} advices={}", invocation.id(), self.advices.len());

        let result = invocation.invoke();
        match &result {
            Ok(_) => debug!("execute:done id={}", invocation.id()),
            Err(err) => warn!("execute:failed id={} error={err}", invocation.id()),
        }
        result
    }

    /// Envuelve `delegatee` para que cada llamada a método pase por el engine.
    pub fn proxy<D: Delegate>(&self, delegatee: D) -> Proxy<'_, D> {
        Proxy::new(self, delegatee)
    }

    pub fn advices(&self) -> &[Arc<dyn Advice>] {
        &self.advices
    }

    pub fn schema(&self) -> &OptionsSchema {
        &self.schema
    }

    pub fn default_options(&self) -> &Options {
        &self.default_options
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}
