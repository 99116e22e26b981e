//! Cadena separada por comas -> lista, para parámetros lista.
//!
//! Con tipo de elemento escalar cada trozo se resuelve a su vez a través del
//! registro (`"1, 2"` con elementos `Int` -> `[1, 2]`). Una cadena en blanco
//! es la lista vacía.
use serde_json::Value as Json;

use ctx_core::{Argument, Conversion, ContextError, ConverterRegistry, ParamConverter, RequestData, TypeRef, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct StringToArrayConverter;

impl ParamConverter for StringToArrayConverter {
    fn supports(&self, value: Option<&Value>, argument: &Argument, _data: &RequestData) -> bool {
        argument.is_array() && value.and_then(Value::as_str).is_some()
    }

    fn convert(&self,
               value: Option<&Value>,
               argument: &Argument,
               data: &RequestData,
               converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        let Some(raw) = value.and_then(Value::as_str) else {
            return Ok(Conversion::Declined);
        };
        if raw.trim().is_empty() {
            return Ok(Conversion::Converted(Value::Data(Json::Array(Vec::new()))));
        }
        let pieces = raw.split(',').map(str::trim);

        if !argument.declared_type().is_some_and(TypeRef::is_scalar) {
            return Ok(Conversion::Converted(Value::Data(Json::Array(pieces.map(Json::from).collect()))));
        }

        let mut items = Vec::new();
        for (i, piece) in pieces.enumerate() {
            let element = argument.element(i);
            let resolved = converters.resolve(Some(Value::from(piece)), &element, data)?;
            match resolved {
                Value::Data(json) if element.accepts(&Value::Data(json.clone())) => items.push(json),
                other => {
                    let expected = element.declared_type().map(ToString::to_string).unwrap_or_default();
                    return Err(ContextError::conversion(element.name(), format!("expected {expected}, found {}", other.describe())));
                }
            }
        }
        Ok(Conversion::Converted(Value::Data(Json::Array(items))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::ScalarConverter;
    use serde_json::json;

    fn registry() -> ConverterRegistry {
        ConverterRegistry::new().with(StringToArrayConverter).with(ScalarConverter)
    }

    #[test]
    fn splits_and_trims() {
        let arg = Argument::new("tags").array();
        let out = registry().resolve(Some(Value::from("a, b ,c")), &arg, &RequestData::default()).unwrap();
        assert_eq!(out, Value::Data(json!(["a", "b", "c"])));
    }

    #[test]
    fn scalar_elements_are_converted() {
        let arg = Argument::new("numbers").typed(TypeRef::Float).array();
        let out = registry().resolve(Some(Value::from("1,2.5,3")), &arg, &RequestData::default()).unwrap();
        assert_eq!(out, Value::Data(json!([1.0, 2.5, 3.0])));
    }

    #[test]
    fn blank_input_is_an_empty_list() {
        let arg = Argument::new("numbers").typed(TypeRef::Float).array();
        let out = registry().resolve(Some(Value::from("  ")), &arg, &RequestData::default()).unwrap();
        assert_eq!(out, Value::Data(json!([])));
    }

    #[test]
    fn bad_element_names_its_position() {
        let arg = Argument::new("numbers").typed(TypeRef::Int).array();
        let err = registry().resolve(Some(Value::from("1,x")), &arg, &RequestData::default()).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert value to 'numbers[1]': expected int, found a string");
    }
}
