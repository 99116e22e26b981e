//! Contención de fallos de la aplicación.
//!
//! `ExceptionAdvice` captura cualquier error de los advices internos y lo
//! reparte entre handlers ordenados por prioridad (mayor primero) y, a igual
//! prioridad, por orden de registro. Un handler closure siempre se intenta;
//! uno basado en `ExceptionHandler` sólo si declara soportar el error. Si
//! nadie lo maneja se relanza envuelto en `ContextError::Contained`.
//!
//! Los errores de configuración (opciones) y la pila vacía atraviesan el
//! advice sin tocarse.
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::{error, warn};

use crate::constants;
use crate::errors::ContextError;
use crate::invocation::{Advice, ContextInvocation};
use crate::model::Value;
use crate::options::OptionsSchema;

pub trait ExceptionHandler: Send + Sync + fmt::Debug {
    fn supports(&self, error: &ContextError) -> bool;

    fn catch_exception(&self, error: ContextError) -> Result<Value, ContextError>;
}

type HandlerFn = dyn Fn(ContextError) -> Result<Value, ContextError> + Send + Sync;

#[derive(Clone)]
pub enum Handler {
    Closure(Arc<HandlerFn>),
    Capability(Arc<dyn ExceptionHandler>),
}

impl Handler {
    pub fn closure<F>(f: F) -> Self
        where F: Fn(ContextError) -> Result<Value, ContextError> + Send + Sync + 'static
    {
        Handler::Closure(Arc::new(f))
    }

    pub fn capability<H: ExceptionHandler + 'static>(handler: H) -> Self {
        Handler::Capability(Arc::new(handler))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Closure(_) => f.write_str("Handler::Closure"),
            Handler::Capability(h) => f.debug_tuple("Handler::Capability").field(h).finish(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExceptionAdvice {
    handlers: BTreeMap<i32, Vec<Handler>>,
}

impl ExceptionAdvice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler(&mut self, handler: Handler, priority: i32) -> &mut Self {
        self.handlers.entry(priority).or_default().push(handler);
        self
    }

    /// Handlers en orden de prueba.
    pub fn handlers(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.values().rev().flatten()
    }

    fn contain(&self, err: ContextError) -> Result<Value, ContextError> {
        for handler in self.handlers() {
            match handler {
                Handler::Closure(f) => return f(err),
                Handler::Capability(h) if h.supports(&err) => return h.catch_exception(err),
                Handler::Capability(_) => {}
            }
        }
        error!("unhandled application failure: {err}");
        Err(ContextError::Contained { source: Box::new(err) })
    }
}

impl Advice for ExceptionAdvice {
    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_default(constants::DISABLE_EXCEPTION_HANDLER, false);
    }

    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        if invocation.options().flag(constants::DISABLE_EXCEPTION_HANDLER)? {
            return invocation.invoke();
        }
        match invocation.invoke() {
            Ok(value) => Ok(value),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                warn!("invocation {}: containing failure: {err}", invocation.id());
                self.contain(err)
            }
        }
    }
}
