//! Extracción de datos de entrada.
//!
//! Las fuentes concretas (argv, getopt, cuerpo JSON, ...) viven fuera del
//! núcleo; aquí sólo está el contrato y el advice que las consulta.
use std::fmt::Debug;
use std::sync::Arc;

use log::debug;

use crate::constants;
use crate::errors::ContextError;
use crate::invocation::{Advice, ContextInvocation};
use crate::model::{RequestData, Value};
use crate::options::{Options, OptionsSchema};

pub trait InputSource: Send + Sync + Debug {
    fn has_data(&self, options: &Options) -> bool;

    fn create_data(&self, options: &Options) -> Result<RequestData, ContextError>;

    fn declare_default_options(&self, _schema: &mut OptionsSchema) {}
}

/// Rellena `data` con la primera fuente que tenga datos, salvo que la
/// invocación ya traiga datos (parámetros o payload crudo).
#[derive(Debug, Clone, Default)]
pub struct InputAdvice {
    sources: Vec<Arc<dyn InputSource>>,
}

impl InputAdvice {
    pub fn new(sources: Vec<Arc<dyn InputSource>>) -> Self {
        Self { sources }
    }

    pub fn add_source(&mut self, source: Arc<dyn InputSource>) {
        self.sources.push(source);
    }

    pub fn sources(&self) -> &[Arc<dyn InputSource>] {
        &self.sources
    }
}

impl Advice for InputAdvice {
    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        for source in &self.sources {
            source.declare_default_options(schema);
        }
    }

    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        let has_data = invocation.options()
                                 .data()?
                                 .is_some_and(|data| !data.is_empty() || data.has_raw_input());
        if !has_data {
            let source = self.sources.iter().find(|s| s.has_data(invocation.options()));
            if let Some(source) = source {
                let data = source.create_data(invocation.options())?;
                debug!("invocation {}: {} parameter(s) extracted by {:?}", invocation.id(), data.len(), source);
                invocation.set_option(constants::DATA, data);
            }
        }
        invocation.invoke()
    }
}
