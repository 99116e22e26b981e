//! Cadena -> entero/decimal/booleano para parámetros escalares.
use serde_json::Value as Json;

use ctx_core::{Argument, Conversion, ContextError, ConverterRegistry, ParamConverter, RequestData, TypeRef, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarConverter;

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl ParamConverter for ScalarConverter {
    fn supports(&self, value: Option<&Value>, argument: &Argument, _data: &RequestData) -> bool {
        !argument.is_array()
        && matches!(argument.declared_type(), Some(TypeRef::Int | TypeRef::Float | TypeRef::Bool))
        && value.and_then(Value::as_str).is_some()
    }

    fn convert(&self,
               value: Option<&Value>,
               argument: &Argument,
               _data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        let Some(raw) = value.and_then(Value::as_str) else {
            return Ok(Conversion::Declined);
        };
        let raw = raw.trim();
        let parsed = match argument.declared_type() {
            Some(TypeRef::Int) => raw.parse::<i64>().ok().map(Json::from),
            Some(TypeRef::Float) => raw.parse::<f64>()
                                       .ok()
                                       .filter(|f| f.is_finite())
                                       .map(Json::from),
            Some(TypeRef::Bool) => parse_bool(raw).map(Json::Bool),
            _ => None,
        };
        Ok(parsed.map_or(Conversion::Declined, |json| Conversion::Converted(Value::Data(json))))
    }

    fn priority(&self) -> i32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(raw: &str, ty: TypeRef) -> Conversion {
        ScalarConverter.convert(Some(&Value::from(raw)),
                                &Argument::new("x").typed(ty),
                                &RequestData::default(),
                                &ConverterRegistry::new())
                       .unwrap()
    }

    #[test]
    fn parses_by_declared_type() {
        assert_eq!(convert("5", TypeRef::Int), Conversion::Converted(Value::from(5)));
        assert_eq!(convert(" 2.5 ", TypeRef::Float), Conversion::Converted(Value::from(2.5)));
        assert_eq!(convert("yes", TypeRef::Bool), Conversion::Converted(Value::from(true)));
        assert_eq!(convert("five", TypeRef::Int), Conversion::Declined);
    }

    #[test]
    fn strings_and_lists_are_not_supported() {
        let data = RequestData::default();
        assert!(!ScalarConverter.supports(Some(&Value::from("a")), &Argument::new("s").typed(TypeRef::String), &data));
        assert!(!ScalarConverter.supports(Some(&Value::from("1,2")), &Argument::new("n").typed(TypeRef::Int).array(), &data));
        assert!(!ScalarConverter.supports(None, &Argument::new("n").typed(TypeRef::Int), &data));
    }
}
