//! Opciones de una invocación y su esquema.
//!
//! `Options` es el mapa mutable que recorre la cadena de advices. Los valores
//! son heterogéneos (`OptionValue`): el callable de destino, la bolsa de
//! datos, descriptores de argumentos o valores sueltos.

pub mod schema;

use indexmap::IndexMap;
use serde_json::Value as Json;

use crate::constants;
use crate::errors::ContextError;
use crate::model::{Argument, Callable, RequestData, TypeRef, Value};

pub use schema::OptionsSchema;

#[derive(Debug, Clone)]
pub enum OptionValue {
    Value(Value),
    Params(Vec<Value>),
    Context(Callable),
    Data(RequestData),
    Arguments(Vec<Argument>),
    Interfaces(IndexMap<TypeRef, TypeRef>),
}

impl OptionValue {
    pub fn null() -> Self {
        OptionValue::Value(Value::null())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Value(v) if v.is_null())
    }
}

impl From<Value> for OptionValue {
    fn from(v: Value) -> Self {
        OptionValue::Value(v)
    }
}

impl From<Json> for OptionValue {
    fn from(v: Json) -> Self {
        OptionValue::Value(Value::Data(v))
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Value(Value::from(v))
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Value(Value::from(v))
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Value(Value::from(v))
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Value(Value::from(v))
    }
}

impl From<Vec<Value>> for OptionValue {
    fn from(v: Vec<Value>) -> Self {
        OptionValue::Params(v)
    }
}

impl From<Callable> for OptionValue {
    fn from(v: Callable) -> Self {
        OptionValue::Context(v)
    }
}

impl From<RequestData> for OptionValue {
    fn from(v: RequestData) -> Self {
        OptionValue::Data(v)
    }
}

impl From<Vec<Argument>> for OptionValue {
    fn from(v: Vec<Argument>) -> Self {
        OptionValue::Arguments(v)
    }
}

impl From<IndexMap<TypeRef, TypeRef>> for OptionValue {
    fn from(v: IndexMap<TypeRef, TypeRef>) -> Self {
        OptionValue::Interfaces(v)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    entries: IndexMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> IndexMap<String, OptionValue> {
        self.entries
    }

    /// Fusión superficial: las claves de `overrides` reemplazan a las propias.
    pub fn merged_with(&self, overrides: Options) -> Options {
        let mut out = self.entries.clone();
        for (k, v) in overrides.entries {
            out.insert(k, v);
        }
        Options { entries: out }
    }

    /// Callable de destino (`context`).
    pub fn context(&self) -> Result<&Callable, ContextError> {
        match self.get(constants::CONTEXT) {
            Some(OptionValue::Context(callable)) => Ok(callable),
            None => Err(ContextError::MissingOptions(vec![constants::CONTEXT.to_string()])),
            Some(_) => Err(invalid(constants::CONTEXT, "a callable")),
        }
    }

    pub fn params(&self) -> Result<&[Value], ContextError> {
        match self.get(constants::PARAMS) {
            Some(OptionValue::Params(values)) => Ok(values),
            Some(v) if v.is_null() => Ok(&[]),
            None => Ok(&[]),
            Some(_) => Err(invalid(constants::PARAMS, "a list of values")),
        }
    }

    pub fn data(&self) -> Result<Option<&RequestData>, ContextError> {
        match self.get(constants::DATA) {
            Some(OptionValue::Data(data)) => Ok(Some(data)),
            Some(v) if v.is_null() => Ok(None),
            None => Ok(None),
            Some(_) => Err(invalid(constants::DATA, "request data")),
        }
    }

    pub fn arguments(&self) -> Result<&[Argument], ContextError> {
        match self.get(constants::ARGUMENTS) {
            Some(OptionValue::Arguments(arguments)) => Ok(arguments),
            Some(v) if v.is_null() => Ok(&[]),
            None => Ok(&[]),
            Some(_) => Err(invalid(constants::ARGUMENTS, "a list of arguments")),
        }
    }

    pub fn interfaces(&self) -> Result<Option<&IndexMap<TypeRef, TypeRef>>, ContextError> {
        match self.get(constants::INTERFACES) {
            Some(OptionValue::Interfaces(map)) => Ok(Some(map)),
            Some(v) if v.is_null() => Ok(None),
            None => Ok(None),
            Some(_) => Err(invalid(constants::INTERFACES, "an interface mapping")),
        }
    }

    /// Opción booleana; ausente o `null` cuenta como `false`.
    pub fn flag(&self, key: &str) -> Result<bool, ContextError> {
        match self.value(key) {
            None => Ok(false),
            Some(v) if v.is_null() => Ok(false),
            Some(Value::Data(Json::Bool(b))) => Ok(*b),
            Some(_) => Err(invalid(key, "a boolean")),
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.get(key) {
            Some(OptionValue::Value(v)) => Some(v),
            _ => None,
        }
    }

    pub fn string(&self, key: &str) -> Result<Option<&str>, ContextError> {
        match self.value(key) {
            None => Ok(None),
            Some(v) if v.is_null() => Ok(None),
            Some(v) => v.as_str().map(Some).ok_or_else(|| invalid(key, "a string")),
        }
    }

    pub fn u64(&self, key: &str) -> Result<Option<u64>, ContextError> {
        match self.value(key) {
            None => Ok(None),
            Some(v) if v.is_null() => Ok(None),
            Some(v) => v.as_data().and_then(Json::as_u64).map(Some).ok_or_else(|| invalid(key, "an unsigned integer")),
        }
    }

    /// Lista de cadenas; acepta también una cadena suelta.
    pub fn string_list(&self, key: &str) -> Result<Vec<String>, ContextError> {
        match self.value(key) {
            None => Ok(Vec::new()),
            Some(Value::Data(Json::Null)) => Ok(Vec::new()),
            Some(Value::Data(Json::String(s))) => Ok(vec![s.clone()]),
            Some(Value::Data(Json::Array(items))) => items.iter()
                                                          .map(|item| item.as_str().map(str::to_string).ok_or_else(|| invalid(key, "a list of strings")))
                                                          .collect(),
            Some(_) => Err(invalid(key, "a list of strings")),
        }
    }

    /// Callable opcional bajo una clave arbitraria (p.ej. `invalid`).
    pub fn callable(&self, key: &str) -> Result<Option<&Callable>, ContextError> {
        match self.get(key) {
            Some(OptionValue::Context(callable)) => Ok(Some(callable)),
            Some(v) if v.is_null() => Ok(None),
            None => Ok(None),
            Some(_) => Err(invalid(key, "a callable")),
        }
    }
}

fn invalid(name: &str, expected: &'static str) -> ContextError {
    ContextError::InvalidOption { name: name.to_string(),
                                  expected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merged_with_prefers_overrides() {
        let defaults = Options::new().with("a", 1i64).with("b", 2i64);
        let merged = defaults.merged_with(Options::new().with("b", 3i64));
        assert_eq!(merged.value("a"), Some(&Value::from(1)));
        assert_eq!(merged.value("b"), Some(&Value::from(3)));
    }

    #[test]
    fn typed_accessors() {
        let opts = Options::new().with("flag", true)
                                 .with("list", json!(["a", "b"]))
                                 .with("one", "x")
                                 .with(constants::PARAMS, OptionValue::null());
        assert_eq!(opts.flag("flag"), Ok(true));
        assert_eq!(opts.flag("absent"), Ok(false));
        assert_eq!(opts.string_list("list"), Ok(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(opts.string_list("one"), Ok(vec!["x".to_string()]));
        assert_eq!(opts.params().map(<[Value]>::len), Ok(0));
        assert!(matches!(opts.flag("one"), Err(ContextError::InvalidOption { .. })));
    }

    #[test]
    fn missing_context_is_reported() {
        let err = Options::new().context().unwrap_err();
        assert_eq!(err, ContextError::MissingOptions(vec!["context".into()]));
    }
}
