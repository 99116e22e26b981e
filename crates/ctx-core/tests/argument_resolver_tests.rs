use ctx_core::constants::{ARGUMENTS, CONTEXT, DATA, INTERFACES, PARAMS};
use ctx_core::{Argument, ArgumentResolver, Callable, ContextError, ContextInvocation, Conversion, ConverterArgumentResolver,
               ConverterRegistry, Instance, Options, ParamConverter, RequestData, TypeRef, Value};
use indexmap::IndexMap;

/// Falla el test si alguien intenta convertir.
#[derive(Debug)]
struct MustNotBeCalled;

impl ParamConverter for MustNotBeCalled {
    fn supports(&self, _value: Option<&Value>, _argument: &Argument, _data: &RequestData) -> bool {
        true
    }

    fn convert(&self,
               value: Option<&Value>,
               argument: &Argument,
               _data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        panic!("converter invoked for '{}' with {:?}", argument.name(), value);
    }
}

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

    fn priority(&self) -> i32 {
        1
    }
}

/// Devuelve el nombre del tipo declarado del argumento recibido.
#[derive(Debug)]
struct EchoType;

impl ParamConverter for EchoType {
    fn supports(&self, _value: Option<&Value>, argument: &Argument, _data: &RequestData) -> bool {
        argument.class_name().is_some()
    }

    fn convert(&self,
               _value: Option<&Value>,
               argument: &Argument,
               _data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        Ok(Conversion::Converted(Value::from(argument.class_name().unwrap_or_default())))
    }
}

fn echo(signature: Vec<Argument>) -> Callable {
    Callable::new("echo", signature, |args| Ok(Value::from(args.into_values().into_iter().map(|v| v.describe()).collect::<Vec<_>>())))
}

fn resolve(resolver: &ConverterArgumentResolver, options: Options) -> Result<Vec<Value>, ContextError> {
    resolver.resolve(&ContextInvocation::new(options, vec![]))
}

#[test]
fn numeric_string_from_data_becomes_a_number() {
    let resolver = ConverterArgumentResolver::new().add_converter(ParseInt);
    let options = Options::new().with(CONTEXT, echo(vec![Argument::new("x").typed(TypeRef::Int)]))
                                .with(PARAMS, Vec::<Value>::new())
                                .with(DATA, RequestData::new([("x", "5")]));
    assert_eq!(resolve(&resolver, options), Ok(vec![Value::from(5)]));
}

#[test]
fn values_that_already_match_skip_every_converter() {
    let resolver = ConverterArgumentResolver::new().add_converter(MustNotBeCalled);
    let shape = Instance::new("Circle", 2.0f64).implementing(["Shape"]);
    let signature = vec![Argument::new("n").typed(TypeRef::Int),
                         Argument::new("s").typed(TypeRef::class("Shape")),
                         Argument::new("tags").typed(TypeRef::String).array()];
    let params = vec![Value::from(7), Value::Instance(shape.clone()), Value::from(vec!["a", "b"])];
    let options = Options::new().with(CONTEXT, echo(signature)).with(PARAMS, params.clone());

    let resolved = resolve(&resolver, options).unwrap();
    assert_eq!(resolved, params);
    assert!(resolved[1].as_instance().is_some_and(|i| i.ptr_eq(&shape)));
}

#[test]
fn name_lookup_takes_precedence_over_position() {
    let resolver = ConverterArgumentResolver::new();
    let data = RequestData::from_json(serde_json::json!({"0": "by-position", "b": "by-name"}));
    let options = Options::new().with(CONTEXT, echo(vec![Argument::new("a"), Argument::new("b")]))
                                .with(DATA, data);
    assert_eq!(resolve(&resolver, options), Ok(vec![Value::from("by-position"), Value::from("by-name")]));
}

#[test]
fn optional_parameter_gets_its_default_and_required_one_fails() {
    let resolver = ConverterArgumentResolver::new();
    let optional = Options::new().with(CONTEXT, echo(vec![Argument::new("opt").typed(TypeRef::Int).optional(1234)]));
    assert_eq!(resolve(&resolver, optional), Ok(vec![Value::from(1234)]));

    let required = Options::new().with(CONTEXT, echo(vec![Argument::new("foo").typed(TypeRef::Int)]));
    assert_eq!(resolve(&resolver, required), Err(ContextError::UnresolvedArgument { name: "foo".into() }));
}

#[test]
fn interfaces_rebind_the_declared_type_before_conversion() {
    let resolver = ConverterArgumentResolver::new().add_converter(EchoType);
    let mut interfaces = IndexMap::new();
    interfaces.insert(TypeRef::class("Repository"), TypeRef::class("SqlRepository"));
    let options = Options::new().with(CONTEXT, echo(vec![Argument::new("repo").typed(TypeRef::class("Repository"))]))
                                .with(INTERFACES, interfaces);
    assert_eq!(resolve(&resolver, options), Ok(vec![Value::from("SqlRepository")]));
}

#[test]
fn explicit_arguments_replace_the_signature_positionally() {
    let resolver = ConverterArgumentResolver::new().add_converter(ParseInt);
    let options = Options::new().with(CONTEXT, echo(vec![Argument::new("x"), Argument::new("y")]))
                                .with(ARGUMENTS, vec![Argument::new("x").typed(TypeRef::Int)])
                                .with(PARAMS, vec![Value::from("1"), Value::from("2")]);
    assert_eq!(resolve(&resolver, options), Ok(vec![Value::from(1), Value::from("2")]));
}

#[test]
fn supplied_param_with_wrong_type_is_the_conversion_seed() {
    let resolver = ConverterArgumentResolver::new().add_converter(ParseInt);
    let options = Options::new().with(CONTEXT, echo(vec![Argument::new("x").typed(TypeRef::Int)]))
                                .with(PARAMS, vec![Value::from("42")])
                                .with(DATA, RequestData::new([("x", "7")]));
    assert_eq!(resolve(&resolver, options), Ok(vec![Value::from(42)]));
}
