//! Callable de destino con firma explícita.
//!
//! La firma (`Vec<Argument>`) sustituye a la introspección: quien registra
//! el callable describe sus parámetros formales una vez y el resolvedor los
//! recorre posicionalmente.
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::errors::ContextError;

use super::{Argument, FromValue, Value};

type Body = dyn Fn(Args) -> Result<Value, ContextError> + Send + Sync;

#[derive(Clone)]
pub struct Callable {
    name: String,
    signature: Vec<Argument>,
    body: Arc<Body>,
}

impl Callable {
    pub fn new<F>(name: impl Into<String>, signature: Vec<Argument>, body: F) -> Self
        where F: Fn(Args) -> Result<Value, ContextError> + Send + Sync + 'static
    {
        Self { name: name.into(),
               signature,
               body: Arc::new(body) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &[Argument] {
        &self.signature
    }

    pub fn arity(&self) -> usize {
        self.signature.len()
    }

    /// Aplica el callable a una lista posicional ya resuelta.
    pub fn call(&self, values: Vec<Value>) -> Result<Value, ContextError> {
        (self.body)(Args::new(values))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
         .field("name", &self.name)
         .field("signature", &self.signature)
         .finish_non_exhaustive()
    }
}

/// Argumentos posicionales entregados al cuerpo de un `Callable`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Extracción tipada; falla con `ArgumentType` si falta o no encaja.
    pub fn get<T: FromValue>(&self, position: usize) -> Result<T, ContextError> {
        self.values
            .get(position)
            .and_then(T::from_value)
            .ok_or_else(|| ContextError::ArgumentType { position,
                                                        expected: T::expected().to_string() })
    }

    pub fn get_or<T: FromValue>(&self, position: usize, default: T) -> T {
        self.values.get(position).and_then(T::from_value).unwrap_or(default)
    }

    pub fn instance_ref<T: Any>(&self, position: usize) -> Option<&T> {
        self.values.get(position).and_then(Value::downcast_ref::<T>)
    }

    pub fn instance<T: Any + Clone>(&self, position: usize) -> Result<T, ContextError> {
        self.instance_ref::<T>(position)
            .cloned()
            .ok_or_else(|| ContextError::ArgumentType { position,
                                                        expected: std::any::type_name::<T>().to_string() })
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
