//! Valor neutro que circula por el motor.
//!
//! - `Value::Data` envuelve la entrada cruda (escalares, listas, mapas) como
//!   `serde_json::Value`; el motor no interpreta su semántica.
//! - `Value::Instance` transporta un objeto tipado (resultado de un
//!   convertidor o suministrado explícitamente) junto al nombre de su tipo y
//!   las interfaces que implementa.
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value as Json};

use crate::errors::ContextError;

/// Objeto tipado compartible entre hilos.
#[derive(Clone)]
pub struct Instance {
    type_name: String,
    interfaces: Arc<[String]>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<String>, value: T) -> Self {
        Self { type_name: type_name.into(),
               interfaces: Arc::from(Vec::new()),
               inner: Arc::new(value) }
    }

    pub(crate) fn from_boxed(type_name: String, interfaces: Vec<String>, inner: Box<dyn Any + Send + Sync>) -> Self {
        Self { type_name,
               interfaces: Arc::from(interfaces),
               inner: Arc::from(inner) }
    }

    /// Declara las interfaces que satisface la instancia.
    pub fn implementing<I, S>(mut self, interfaces: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.interfaces = interfaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// `true` si la instancia es del tipo `name` o implementa la interfaz `name`.
    pub fn is(&self, name: &str) -> bool {
        self.type_name == name || self.interfaces.iter().any(|i| i == name)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).downcast_ref::<T>()
    }

    /// Identidad del objeto subyacente (no del envoltorio).
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
         .field("type_name", &self.type_name)
         .field("interfaces", &self.interfaces)
         .finish_non_exhaustive()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.ptr_eq(other)
    }
}

/// Valor de parámetro: dato crudo o instancia tipada.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Data(Json),
    Instance(Instance),
}

impl Value {
    pub fn null() -> Self {
        Value::Data(Json::Null)
    }

    pub fn instance<T: Any + Send + Sync>(type_name: impl Into<String>, value: T) -> Self {
        Value::Instance(Instance::new(type_name, value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Data(Json::Null))
    }

    pub fn as_data(&self) -> Option<&Json> {
        match self {
            Value::Data(json) => Some(json),
            Value::Instance(_) => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            Value::Data(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_data().and_then(Json::as_str)
    }

    pub fn as_object(&self) -> Option<&Map<String, Json>> {
        self.as_data().and_then(Json::as_object)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_instance().and_then(Instance::downcast_ref::<T>)
    }

    /// Copia del objeto tipado contenido.
    pub fn instance_cloned<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    pub fn extract<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// Extracción tipada que falla con un error de conversión nombrando el
    /// destino (`field` suele ser el campo o parámetro que se hidrata).
    pub fn require<T: FromValue>(&self, field: &str) -> Result<T, ContextError> {
        T::from_value(self).ok_or_else(|| {
                               ContextError::conversion(field, format!("expected {}, found {}", T::expected(), self.describe()))
                           })
    }

    /// Descripción corta del tipo en tiempo de ejecución (para mensajes).
    pub fn describe(&self) -> String {
        match self {
            Value::Data(Json::Null) => "null".into(),
            Value::Data(Json::Bool(_)) => "a boolean".into(),
            Value::Data(Json::Number(_)) => "a number".into(),
            Value::Data(Json::String(_)) => "a string".into(),
            Value::Data(Json::Array(_)) => "a list".into(),
            Value::Data(Json::Object(_)) => "a mapping".into(),
            Value::Instance(i) => format!("an instance of {}", i.type_name()),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::Data(json)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Data(Json::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Data(Json::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Data(Json::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Data(Json::Bool(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Data(Json::String(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Data(Json::String(v))
    }
}

impl<T: Into<Json>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Data(Json::from(v))
    }
}

/// Extracción tipada desde un `Value`.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;

    /// Nombre legible del tipo esperado.
    fn expected() -> &'static str;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_data().and_then(Json::as_i64)
    }

    fn expected() -> &'static str {
        "an integer"
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_data().and_then(Json::as_i64).and_then(|n| i32::try_from(n).ok())
    }

    fn expected() -> &'static str {
        "a 32-bit integer"
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_data().and_then(Json::as_u64)
    }

    fn expected() -> &'static str {
        "an unsigned integer"
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_data().and_then(Json::as_f64)
    }

    fn expected() -> &'static str {
        "a number"
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_data().and_then(Json::as_bool)
    }

    fn expected() -> &'static str {
        "a boolean"
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn expected() -> &'static str {
        "a string"
    }
}

impl FromValue for Json {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_data().cloned()
    }

    fn expected() -> &'static str {
        "raw data"
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn expected() -> &'static str {
        "any value"
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_data()
             .and_then(Json::as_array)?
             .iter()
             .map(|item| T::from_value(&Value::Data(item.clone())))
             .collect()
    }

    fn expected() -> &'static str {
        "a list"
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::from_value(value).map(Some)
    }

    fn expected() -> &'static str {
        T::expected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: i64,
    }

    #[test]
    fn instance_matches_type_and_interfaces() {
        let inst = Instance::new("Point", Point { x: 1 }).implementing(["Shape"]);
        assert!(inst.is("Point"));
        assert!(inst.is("Shape"));
        assert!(!inst.is("Line"));
        assert_eq!(inst.downcast_ref::<Point>(), Some(&Point { x: 1 }));
        assert!(inst.downcast_ref::<String>().is_none());
    }

    #[test]
    fn typed_extraction() {
        assert_eq!(Value::from(5).extract::<i64>(), Some(5));
        assert_eq!(Value::from(5).extract::<f64>(), Some(5.0));
        assert_eq!(Value::from("5").extract::<i64>(), None);
        assert_eq!(Value::Data(json!([1, 2])).extract::<Vec<i64>>(), Some(vec![1, 2]));
        assert_eq!(Value::null().extract::<Option<i64>>(), Some(None));
        let v = Value::instance("Point", Point { x: 3 });
        assert_eq!(v.instance_cloned::<Point>(), Some(Point { x: 3 }));
    }

    #[test]
    fn require_reports_target_and_found_type() {
        let err = Value::from("abc").require::<i64>("age").unwrap_err();
        assert_eq!(err.to_string(), "cannot convert value to 'age': expected an integer, found a string");
    }
}
