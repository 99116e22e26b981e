//! Transacciones alrededor de la llamada.
//!
//! Con `tx = true` la invocación interna corre entre `begin` y
//! `flush` + `commit`; cualquier error provoca `rollback` y se relanza tal
//! cual.
use std::fmt::Debug;
use std::sync::Arc;

use log::{debug, warn};

use ctx_core::{Advice, ContextError, ContextInvocation, OptionsSchema, Value};

pub const TX: &str = "tx";

pub trait TransactionManager: Send + Sync + Debug {
    fn begin(&self) -> Result<(), ContextError>;

    /// Vuelca los cambios pendientes antes del commit.
    fn flush(&self) -> Result<(), ContextError> {
        Ok(())
    }

    fn commit(&self) -> Result<(), ContextError>;

    fn rollback(&self) -> Result<(), ContextError>;
}

#[derive(Debug, Clone)]
pub struct TransactionAdvice {
    manager: Arc<dyn TransactionManager>,
}

impl TransactionAdvice {
    pub fn new<M: TransactionManager + 'static>(manager: M) -> Self {
        Self { manager: Arc::new(manager) }
    }

    pub fn shared(manager: Arc<dyn TransactionManager>) -> Self {
        Self { manager }
    }

    fn run(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        let value = invocation.invoke()?;
        self.manager.flush()?;
        self.manager.commit()?;
        Ok(value)
    }
}

impl Advice for TransactionAdvice {
    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_default(TX, false);
    }

    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        if !invocation.options().flag(TX)? {
            return invocation.invoke();
        }

        debug!("transaction:begin invocation={}", invocation.id());
        self.manager.begin()?;
        match self.run(invocation) {
            Ok(value) => {
                debug!("transaction:commit invocation={}", invocation.id());
                Ok(value)
            }
            Err(err) => {
                warn!("transaction:rollback invocation={} error={err}", invocation.id());
                if let Err(rollback) = self.manager.rollback() {
                    warn!("transaction:rollback_failed invocation={} error={rollback}", invocation.id());
                }
                Err(err)
            }
        }
    }
}
