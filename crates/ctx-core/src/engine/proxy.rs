//! Proxy: enruta llamadas a métodos de un delegado a través del engine.
use indexmap::IndexMap;

use super::Engine;
use crate::constants;
use crate::errors::ContextError;
use crate::model::{Callable, Value};
use crate::options::Options;

/// Objeto cuyos métodos se pueden invocar por nombre.
pub trait Delegate: Send + Sync {
    fn method(&self, name: &str) -> Option<Callable>;
}

/// Delegado formado por una tabla nombre -> callable.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: IndexMap<String, Callable>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra `callable` bajo su propio nombre.
    pub fn with(mut self, callable: Callable) -> Self {
        self.insert(callable);
        self
    }

    pub fn insert(&mut self, callable: Callable) {
        self.methods.insert(callable.name().to_string(), callable);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl Delegate for MethodTable {
    fn method(&self, name: &str) -> Option<Callable> {
        self.methods.get(name).cloned()
    }
}

pub struct Proxy<'e, D> {
    engine: &'e Engine,
    delegatee: D,
    options: Options,
}

impl<'e, D: Delegate> Proxy<'e, D> {
    pub fn new(engine: &'e Engine, delegatee: D) -> Self {
        Self { engine,
               delegatee,
               options: Options::new() }
    }

    /// Opciones fijas añadidas a cada llamada.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn delegatee(&self) -> &D {
        &self.delegatee
    }

    /// Invoca `method` con `values` como `params` posicionales.
    pub fn call(&self, method: &str, values: Vec<Value>) -> Result<Value, ContextError> {
        let callable = self.delegatee
                           .method(method)
                           .ok_or_else(|| ContextError::UnknownMethod(method.to_string()))?;
        let options = self.options.clone().with(constants::CONTEXT, callable).with(constants::PARAMS, values);
        self.engine.execute(options)
    }
}
