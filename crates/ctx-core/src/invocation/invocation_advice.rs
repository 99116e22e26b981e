//! Advice terminal: resuelve los argumentos y llama al `context`.
use std::sync::Arc;

use log::debug;

use super::{Advice, ContextInvocation};
use crate::constants;
use crate::errors::ContextError;
use crate::model::Value;
use crate::options::{OptionValue, OptionsSchema};
use crate::resolve::{ArgumentResolver, ParamsArgumentResolver};

#[derive(Debug, Clone)]
pub struct InvocationAdvice {
    resolver: Arc<dyn ArgumentResolver>,
}

impl InvocationAdvice {
    pub fn new(resolver: Arc<dyn ArgumentResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<dyn ArgumentResolver> {
        &self.resolver
    }
}

impl Default for InvocationAdvice {
    fn default() -> Self {
        Self::new(Arc::new(ParamsArgumentResolver))
    }
}

impl Advice for InvocationAdvice {
    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_required(&[constants::CONTEXT])
              .set_default(constants::PARAMS, Vec::<Value>::new())
              .set_default(constants::DATA, OptionValue::null())
              .set_default(constants::ARGUMENTS, OptionValue::null())
              .set_default(constants::INTERFACES, OptionValue::null());
    }

    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        let values = self.resolver.resolve(invocation)?;
        let context = invocation.options().context()?;
        debug!("invocation {}: calling '{}' with {} argument(s)", invocation.id(), context.name(), values.len());
        context.call(values)
    }
}
