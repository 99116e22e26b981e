use std::sync::Arc;

use ctx_core::constants::{CONTEXT, DATA, PARAMS};
use ctx_core::{Advice, Argument, Callable, ContextError, ContextInvocation, Conversion, ConverterRegistry, Engine, InputSource,
               MethodTable, Options, OptionsSchema, ParamConverter, RequestData, TypeRef, Value};
use rayon::prelude::*;

#[derive(Debug)]
struct ParseInt;

impl ParamConverter for ParseInt {
    fn supports(&self, value: Option<&Value>, argument: &Argument, _data: &RequestData) -> bool {
        argument.declared_type() == Some(&TypeRef::Int) && value.and_then(Value::as_str).is_some()
    }

    fn convert(&self,
               value: Option<&Value>,
               _argument: &Argument,
               _data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        Ok(value.and_then(Value::as_str)
                .and_then(|s| s.parse::<i64>().ok())
                .map_or(Conversion::Declined, |n| Conversion::Converted(Value::from(n))))
    }
}

/// Fuente de prueba con datos fijos; `enabled` controla `has_data`.
#[derive(Debug)]
struct StaticSource {
    enabled: bool,
    data: RequestData,
}

impl InputSource for StaticSource {
    fn has_data(&self, _options: &Options) -> bool {
        self.enabled
    }

    fn create_data(&self, _options: &Options) -> Result<RequestData, ContextError> {
        Ok(self.data.clone())
    }

    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_default("static_source", true);
    }
}

/// Advice que reescribe el callable de destino.
#[derive(Debug)]
struct Reroute(Callable);

impl Advice for Reroute {
    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        invocation.set_option(CONTEXT, self.0.clone());
        invocation.invoke()
    }
}

/// Advice que corta la cadena sin llamar al destino.
#[derive(Debug)]
struct ShortCircuit;

impl Advice for ShortCircuit {
    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_default("cached", false);
    }

    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        if invocation.options().flag("cached")? {
            return Ok(Value::from("from cache"));
        }
        invocation.invoke()
    }
}

fn add() -> Callable {
    Callable::new("add",
                  vec![Argument::new("a").typed(TypeRef::Int), Argument::new("b").typed(TypeRef::Int).optional(0)],
                  |args| Ok(Value::from(args.get::<i64>(0)? + args.get::<i64>(1)?)))
}

fn constant(tag: &'static str) -> Callable {
    Callable::new(tag, vec![], move |_| Ok(Value::from(tag)))
}

#[test]
fn missing_context_is_rejected_before_any_advice() {
    let engine = Engine::builder().advice(ShortCircuit).build();
    let err = engine.execute(Options::new().with("cached", true)).unwrap_err();
    assert_eq!(err, ContextError::MissingOptions(vec!["context".into()]));
}

#[test]
fn undeclared_options_are_rejected() {
    let engine = Engine::default();
    let err = engine.execute(Options::new().with(CONTEXT, add()).with("tx", true)).unwrap_err();
    assert_eq!(err, ContextError::UndefinedOptions(vec!["tx".into()]));
}

#[test]
fn call_options_override_engine_defaults() {
    let engine = Engine::builder().advice(ShortCircuit).default_option("cached", true).build();
    assert_eq!(engine.execute(Options::new().with(CONTEXT, add())), Ok(Value::from("from cache")));

    let result = engine.execute(Options::new().with(CONTEXT, add())
                                              .with("cached", false)
                                              .with(PARAMS, vec![Value::from(2), Value::from(3)]));
    assert_eq!(result, Ok(Value::from(5)));
}

#[test]
fn advices_can_rewrite_the_target() {
    let engine = Engine::builder().advice(Reroute(constant("rerouted"))).build();
    assert_eq!(engine.execute(Options::new().with(CONTEXT, constant("original"))), Ok(Value::from("rerouted")));
}

#[test]
fn input_advice_uses_the_first_source_with_data() {
    let engine = Engine::builder().input_source(StaticSource { enabled: false,
                                                               data: RequestData::new([("a", "100")]) })
                                  .input_source(StaticSource { enabled: true,
                                                               data: RequestData::new([("a", "4"), ("b", "5")]) })
                                  .param_converter(ParseInt)
                                  .build();
    assert!(engine.schema().is_known("static_source"));
    assert_eq!(engine.execute(Options::new().with(CONTEXT, add())), Ok(Value::from(9)));
}

#[test]
fn explicit_data_is_not_replaced_by_sources() {
    let engine = Engine::builder().input_source(StaticSource { enabled: true,
                                                               data: RequestData::new([("a", "100")]) })
                                  .param_converter(ParseInt)
                                  .build();
    let result = engine.execute(Options::new().with(CONTEXT, add()).with(DATA, RequestData::new([("a", "1")])));
    assert_eq!(result, Ok(Value::from(1)));
}

#[test]
fn proxy_routes_method_calls_through_the_engine() {
    let engine = Engine::builder().param_converter(ParseInt).build();
    let proxy = engine.proxy(MethodTable::new().with(add()).with(constant("ping")));

    assert_eq!(proxy.call("add", vec![Value::from("2"), Value::from(40)]), Ok(Value::from(42)));
    assert_eq!(proxy.call("ping", vec![]), Ok(Value::from("ping")));
    assert_eq!(proxy.call("missing", vec![]), Err(ContextError::UnknownMethod("missing".into())));
}

#[test]
fn shared_engine_resolves_concurrent_invocations_independently() {
    let engine = Arc::new(Engine::builder().param_converter(ParseInt).build());

    let results: Vec<Result<Value, ContextError>> =
        (0..64i64).into_par_iter()
                  .map(|i| {
                      let data = RequestData::new([("a", i.to_string()), ("b", (i * 10).to_string())]);
                      engine.execute(Options::new().with(CONTEXT, add()).with(DATA, data))
                  })
                  .collect();

    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result, Ok(Value::from(i as i64 * 11)));
    }
}
