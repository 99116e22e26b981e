//! Calculadora de demostración.
//!
//! Los métodos se exponen como una tabla de callables y se llaman a través
//! del `Proxy` del motor. Los argumentos salen de argv: `--nombre valor`
//! (getopt, nombres largos derivados de la firma) o posicionales.
//!
//! ```text
//! ctxflow add 2 3
//! ctxflow statistics --numbers 1,2,3,4,5,6
//! ctxflow days --from 2024-01-01 --to 2024-03-01
//! ```
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use serde_json::{json, Value as Json};

use ctx_adapters::converters::datetime::DATETIME;
use ctx_adapters::input::getopt::LONG_OPTIONS;
use ctx_adapters::{ArgvInput, DateTimeConverter, GetOptInput, ScalarConverter, StringToArrayConverter};
use ctx_core::constants::DISABLE_EXCEPTION_HANDLER;
use ctx_core::{Argument, Callable, ContextError, Delegate, Engine, ExceptionHandler, MethodTable, Options, TypeRef, Value};
use ctx_plugins::deadline::DEADLINE_MS;
use ctx_plugins::DeadlineAdvice;

use crate::config::{AppConfig, CONFIG};
use crate::errors::{CoreError, DomainError};

const PROGRAM: &str = "ctxflow";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub numbers: Vec<f64>,
    pub average: f64,
    pub variance: f64,
    pub standard_deviation: f64,
}

fn finite(x: f64) -> Result<f64, DomainError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(DomainError::NotFinite(x))
    }
}

pub fn add(x: f64, y: f64) -> Result<f64, DomainError> {
    finite(x + y)
}

pub fn square(x: f64) -> Result<f64, DomainError> {
    finite(x * x)
}

/// Media, varianza poblacional y desviación típica.
pub fn statistics(numbers: &[f64]) -> Result<Statistics, DomainError> {
    if numbers.is_empty() {
        return Err(DomainError::Validation("statistics needs at least one number".into()));
    }
    let n = numbers.len() as f64;
    let average = finite(numbers.iter().sum::<f64>() / n)?;
    let squares = numbers.iter().map(|x| square(*x)).collect::<Result<Vec<_>, _>>()?;
    let variance = (squares.iter().sum::<f64>() / n - square(average)?).max(0.0);
    Ok(Statistics { numbers: numbers.to_vec(),
                    average,
                    variance,
                    standard_deviation: variance.sqrt() })
}

pub fn days_between(from: &DateTime<Utc>, to: &DateTime<Utc>) -> i64 {
    (*to - *from).num_days()
}

fn date_arg<'a>(args: &'a ctx_core::Args, position: usize) -> Result<&'a DateTime<Utc>, ContextError> {
    args.instance_ref::<DateTime<Utc>>(position)
        .ok_or(ContextError::ArgumentType { position,
                                            expected: DATETIME.to_string() })
}

/// Métodos publicados por la calculadora.
pub fn method_table() -> MethodTable {
    let number = |name: &str| Argument::new(name).typed(TypeRef::Float);
    let date = |name: &str| Argument::new(name).typed(TypeRef::class(DATETIME));

    MethodTable::new().with(Callable::new("add", vec![number("x"), number("y")], |args| {
                          Ok(Value::from(add(args.get(0)?, args.get(1)?)?))
                      }))
                      .with(Callable::new("square", vec![number("x")], |args| Ok(Value::from(square(args.get(0)?)?))))
                      .with(Callable::new("statistics", vec![number("numbers").array()], |args| {
                          let numbers: Vec<f64> = args.get(0)?;
                          let stats = statistics(&numbers)?;
                          serde_json::to_value(stats).map(Value::from)
                                                     .map_err(|e| ContextError::Internal(e.to_string()))
                      }))
                      .with(Callable::new("days", vec![date("from"), date("to")], |args| {
                          Ok(Value::from(days_between(date_arg(&args, 0)?, date_arg(&args, 1)?)))
                      }))
}

/// Convierte los fallos de entrada y de dominio en una respuesta
/// `{"error": ...}`; el resto se deja contener por el motor.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvalidInputHandler;

impl ExceptionHandler for InvalidInputHandler {
    fn supports(&self, error: &ContextError) -> bool {
        matches!(error,
                 ContextError::Application(_)
                 | ContextError::ArgumentType { .. }
                 | ContextError::Conversion { .. }
                 | ContextError::UnresolvedArgument { .. })
    }

    fn catch_exception(&self, error: ContextError) -> Result<Value, ContextError> {
        Ok(Value::from(json!({ "error": error.to_string() })))
    }
}

fn uses_getopt(args: &[String]) -> bool {
    args.iter().any(|arg| arg.starts_with("--"))
}

/// `--nombre valor` para cada parámetro de la firma.
fn long_options(callable: &Callable) -> Vec<String> {
    callable.signature().iter().map(|arg| format!("{}:", arg.name())).collect()
}

fn argv(args: &[String]) -> impl Iterator<Item = String> + '_ {
    std::iter::once(PROGRAM.to_string()).chain(args.iter().cloned())
}

/// Motor configurado para una línea de comandos concreta.
pub fn engine(config: &AppConfig, args: &[String]) -> Engine {
    let mut dates = DateTimeConverter::new();
    if let Some(format) = &config.date_format {
        dates = dates.with_format(format.clone());
    }
    let builder = if uses_getopt(args) {
        Engine::builder().input_source(GetOptInput::with_args(argv(args)))
    } else {
        Engine::builder().input_source(ArgvInput::with_args(argv(args)))
    };
    let mut builder = builder.param_converter(ScalarConverter)
                             .param_converter(StringToArrayConverter)
                             .param_converter(dates)
                             .exception_handler(InvalidInputHandler, 0)
                             .advice(DeadlineAdvice)
                             .default_option(DISABLE_EXCEPTION_HANDLER, config.disable_exception_handler);
    if let Some(ms) = config.deadline_ms {
        builder = builder.default_option(DEADLINE_MS, Json::from(ms));
    }
    builder.build()
}

pub fn run_with(config: &AppConfig, method: &str, args: &[String]) -> Result<Json, CoreError> {
    let table = method_table();
    let callable = table.method(method).ok_or_else(|| ContextError::UnknownMethod(method.to_string()))?;

    let getopt = uses_getopt(args);
    debug!("calculator:run method={method} getopt={getopt} args={}", args.len());
    let mut options = Options::new();
    if getopt {
        options.set(LONG_OPTIONS, Json::from(long_options(&callable)));
    }

    let engine = engine(config, args);
    let value = engine.proxy(table).with_options(options).call(method, Vec::new())?;
    value.as_data()
         .cloned()
         .ok_or_else(|| CoreError::Internal(format!("'{method}' returned {}", value.describe())))
}

/// Ejecuta `method` con la configuración global del proceso.
pub fn run(method: &str, args: &[String]) -> Result<Json, CoreError> {
    run_with(&CONFIG, method, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_square() {
        for (x, y, z) in [(0.0, 0.0, 0.0), (1.0, 1.0, 2.0), (10.0, 100.0, 110.0), (1.0, -1.0, 0.0)] {
            assert_eq!(add(x, y), Ok(z));
        }
        for (x, x2) in [(0.0, 0.0), (2.0, 4.0), (-4.0, 16.0), (5.0, 25.0)] {
            assert_eq!(square(x), Ok(x2));
        }
        assert_eq!(add(f64::MAX, f64::MAX), Err(DomainError::NotFinite(f64::INFINITY)));
    }

    #[test]
    fn statistics_of_a_six_sided_die() {
        let stats = statistics(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(stats.average, 3.5);
        assert!((stats.variance - 2.916_666_666_7).abs() < 1e-9);
        assert!((stats.standard_deviation - 2.916_666_666_7_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn statistics_needs_numbers() {
        assert!(matches!(statistics(&[]), Err(DomainError::Validation(_))));
    }

    #[test]
    fn long_options_follow_the_signature() {
        let table = method_table();
        let days = table.method("days").unwrap();
        assert_eq!(long_options(&days), vec!["from:", "to:"]);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["add", "square", "statistics", "days"]);
    }

    #[test]
    fn invalid_input_is_reported_as_a_value() {
        let handler = InvalidInputHandler;
        let err = ContextError::application("nope");
        assert!(handler.supports(&err));
        assert_eq!(handler.catch_exception(err), Ok(Value::from(json!({ "error": "nope" }))));
        assert!(!handler.supports(&ContextError::DeadlineExceeded { limit_ms: 1, elapsed_ms: 2 }));
    }
}
