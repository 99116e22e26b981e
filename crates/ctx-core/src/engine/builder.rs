//! Builder para `Engine`.
//!
//! Orden de la cadena resultante (exterior primero):
//! `InputAdvice` -> `ExceptionAdvice` -> advices de usuario (en orden de
//! registro) -> `InvocationAdvice`.
//!
//! Resolvedor del advice terminal:
//! - el explícito (`resolver`) si se dio,
//! - si no, un `ConverterArgumentResolver` cuando se registró algún
//!   convertidor,
//! - si no, `ParamsArgumentResolver`.
//!
//! ```ignore
//! let engine = Engine::builder()
//!     .input_source(ArgvInput::new())
//!     .param_converter(ScalarConverter)
//!     .exception_handler_fn(|err| Ok(Value::from(err.to_string())), 0)
//!     .build();
//! ```

use std::sync::Arc;

use super::Engine;
use crate::convert::{ConverterRegistry, ParamConverter};
use crate::errors::ContextError;
use crate::exception::{ExceptionAdvice, ExceptionHandler, Handler};
use crate::input::{InputAdvice, InputSource};
use crate::invocation::{Advice, InvocationAdvice};
use crate::model::Value;
use crate::options::{OptionValue, Options};
use crate::resolve::{ArgumentResolver, ConverterArgumentResolver, ParamsArgumentResolver};

#[derive(Debug, Default)]
pub struct EngineBuilder {
    input: InputAdvice,
    exception: ExceptionAdvice,
    advices: Vec<Arc<dyn Advice>>,
    converters: ConverterRegistry,
    resolver: Option<Arc<dyn ArgumentResolver>>,
    default_options: Options,
}

impl EngineBuilder {
    pub fn input_source<S: InputSource + 'static>(mut self, source: S) -> Self {
        self.input.add_source(Arc::new(source));
        self
    }

    pub fn exception_handler<H: ExceptionHandler + 'static>(mut self, handler: H, priority: i32) -> Self {
        self.exception.add_handler(Handler::capability(handler), priority);
        self
    }

    pub fn exception_handler_fn<F>(mut self, handler: F, priority: i32) -> Self
        where F: Fn(ContextError) -> Result<Value, ContextError> + Send + Sync + 'static
    {
        self.exception.add_handler(Handler::closure(handler), priority);
        self
    }

    /// Añade un advice de usuario; se ejecuta tras la contención de
    /// excepciones y antes de la llamada final.
    pub fn advice<A: Advice + 'static>(self, advice: A) -> Self {
        self.advice_shared(Arc::new(advice))
    }

    pub fn advice_shared(mut self, advice: Arc<dyn Advice>) -> Self {
        self.advices.push(advice);
        self
    }

    pub fn param_converter<C: ParamConverter + 'static>(mut self, converter: C) -> Self {
        self.converters.add(converter);
        self
    }

    /// Incorpora todos los convertidores de `registry`.
    pub fn converters(mut self, registry: ConverterRegistry) -> Self {
        for converter in registry.all() {
            self.converters.add_shared(converter.clone());
        }
        self
    }

    pub fn resolver<R: ArgumentResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn default_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.default_options.set(key, value);
        self
    }

    pub fn default_options(mut self, options: Options) -> Self {
        self.default_options = self.default_options.merged_with(options);
        self
    }

    /// Construye el `Engine` final. Consume el builder.
    pub fn build(self) -> Engine {
        let resolver: Arc<dyn ArgumentResolver> = match self.resolver {
            Some(resolver) => resolver,
            None if !self.converters.is_empty() => Arc::new(ConverterArgumentResolver::with_registry(self.converters)),
            None => Arc::new(ParamsArgumentResolver),
        };

        let mut chain: Vec<Arc<dyn Advice>> = Vec::with_capacity(self.advices.len() + 3);
        chain.push(Arc::new(self.input));
        chain.push(Arc::new(self.exception));
        chain.extend(self.advices);
        chain.push(Arc::new(InvocationAdvice::new(resolver)));

        Engine::new(chain, self.default_options)
    }
}
