//! Plazo máximo de la llamada interna.
//!
//! La cancelación es cooperativa: la llamada nunca se interrumpe, pero si
//! terminó después de `deadline_ms` su resultado se descarta y se devuelve
//! `DeadlineExceeded`. Los errores de la propia llamada tienen prioridad.
use std::time::Instant;

use log::warn;
use serde_json::Value as Json;

use ctx_core::{Advice, ContextError, ContextInvocation, OptionsSchema, Value};

pub const DEADLINE_MS: &str = "deadline_ms";

#[derive(Debug, Clone, Default)]
pub struct DeadlineAdvice;

impl Advice for DeadlineAdvice {
    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_default(DEADLINE_MS, Json::Null);
    }

    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        let Some(limit_ms) = invocation.options().u64(DEADLINE_MS)? else {
            return invocation.invoke();
        };

        let started = Instant::now();
        let value = invocation.invoke()?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        if elapsed_ms > limit_ms {
            warn!("deadline:exceeded invocation={} limit_ms={limit_ms} elapsed_ms={elapsed_ms}", invocation.id());
            return Err(ContextError::DeadlineExceeded { limit_ms, elapsed_ms });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    use ctx_core::constants::{CONTEXT, DISABLE_EXCEPTION_HANDLER};
    use ctx_core::{Callable, Engine, Options};

    fn sleeper(ms: u64) -> Callable {
        Callable::new("sleep", vec![], move |_| {
            thread::sleep(Duration::from_millis(ms));
            Ok(Value::from("awake"))
        })
    }

    fn engine() -> Engine {
        Engine::builder().advice(DeadlineAdvice).build()
    }

    #[test]
    fn slow_calls_fail_after_the_fact() {
        let options = Options::new().with(CONTEXT, sleeper(30))
                                    .with(DEADLINE_MS, 5i64)
                                    .with(DISABLE_EXCEPTION_HANDLER, true);
        match engine().execute(options) {
            Err(ContextError::DeadlineExceeded { limit_ms, elapsed_ms }) => {
                assert_eq!(limit_ms, 5);
                assert!(elapsed_ms >= 30);
            }
            other => panic!("expected a deadline error, got {other:?}"),
        }
    }

    #[test]
    fn fast_calls_and_unset_deadlines_pass() {
        let fast = Options::new().with(CONTEXT, sleeper(0)).with(DEADLINE_MS, 10_000i64);
        assert_eq!(engine().execute(fast), Ok(Value::from("awake")));
        assert_eq!(engine().execute(Options::new().with(CONTEXT, sleeper(1))), Ok(Value::from("awake")));
    }

    #[test]
    fn exceeded_deadlines_are_contained_like_any_failure() {
        let options = Options::new().with(CONTEXT, sleeper(20)).with(DEADLINE_MS, 1i64);
        let err = engine().execute(options).unwrap_err();
        assert!(matches!(err.cause(), Some(ContextError::DeadlineExceeded { limit_ms: 1, .. })));
    }
}
