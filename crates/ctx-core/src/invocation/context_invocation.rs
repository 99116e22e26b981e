//! Estado de una invocación en curso: opciones mutables y cola de advices
//! pendientes. Se crea una por `Engine::execute` y se consume al avanzar.
use std::collections::VecDeque;
use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use super::Advice;
use crate::errors::ContextError;
use crate::model::Value;
use crate::options::{OptionValue, Options};

#[derive(Debug)]
pub struct ContextInvocation {
    id: Uuid,
    options: Options,
    advices: VecDeque<Arc<dyn Advice>>,
}

impl ContextInvocation {
    pub fn new(options: Options, advices: Vec<Arc<dyn Advice>>) -> Self {
        Self { id: Uuid::new_v4(),
               options,
               advices: advices.into() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.options.set(key, value);
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = self.options.merged_with(options);
    }

    /// Advices que quedan por ejecutar.
    pub fn remaining(&self) -> usize {
        self.advices.len()
    }

    /// Extrae el siguiente advice y lo ejecuta.
    pub fn invoke(&mut self) -> Result<Value, ContextError> {
        let advice = self.advices.pop_front().ok_or(ContextError::EmptyAdviceStack)?;
        debug!("invocation {}: entering {:?} ({} remaining)", self.id, advice, self.advices.len());
        advice.around(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Marker {
        name: &'static str,
        trace: Arc<Mutex<Vec<String>>>,
    }

    impl Advice for Marker {
        fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
            self.trace.lock().unwrap().push(format!("{}-before", self.name));
            let result = invocation.invoke();
            self.trace.lock().unwrap().push(format!("{}-after", self.name));
            result
        }
    }

    #[derive(Debug)]
    struct Terminal(Arc<Mutex<Vec<String>>>);

    impl Advice for Terminal {
        fn around(&self, _invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
            self.0.lock().unwrap().push("call".into());
            Ok(Value::from("done"))
        }
    }

    #[test]
    fn advices_nest_like_a_stack() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let marker = |name| Arc::new(Marker { name, trace: trace.clone() }) as Arc<dyn Advice>;
        let chain = vec![marker("A"), marker("B"), marker("C"), Arc::new(Terminal(trace.clone())) as Arc<dyn Advice>];

        let mut invocation = ContextInvocation::new(Options::new(), chain);
        assert_eq!(invocation.invoke(), Ok(Value::from("done")));
        assert_eq!(invocation.remaining(), 0);
        assert_eq!(*trace.lock().unwrap(),
                   vec!["A-before", "B-before", "C-before", "call", "C-after", "B-after", "A-after"]);
    }

    #[test]
    fn invoking_past_the_end_fails() {
        let mut invocation = ContextInvocation::new(Options::new(), vec![]);
        assert_eq!(invocation.invoke(), Err(ContextError::EmptyAdviceStack));
    }
}
