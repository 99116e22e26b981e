//! Descriptor de un parámetro formal (`Argument`) y referencia de tipo
//! declarada (`TypeRef`).
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use super::Value;

/// Tipo declarado de un parámetro.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Bool,
    Int,
    Float,
    String,
    /// Tipo compuesto identificado por nombre (ver `TypeRegistry`).
    Class(std::string::String),
}

impl TypeRef {
    pub fn class(name: impl Into<std::string::String>) -> Self {
        TypeRef::Class(name.into())
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, TypeRef::Class(_))
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeRef::Class(name) => Some(name),
            _ => None,
        }
    }

    /// Comprueba si el tipo en tiempo de ejecución de `value` ya satisface
    /// este tipo declarado.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeRef::Bool, Value::Data(json)) => json.is_boolean(),
            (TypeRef::Int, Value::Data(json)) => json.is_i64() || json.is_u64(),
            (TypeRef::Float, Value::Data(json)) => json.is_number(),
            (TypeRef::String, Value::Data(json)) => json.is_string(),
            (TypeRef::Class(name), Value::Instance(instance)) => instance.is(name),
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Bool => f.write_str("bool"),
            TypeRef::Int => f.write_str("int"),
            TypeRef::Float => f.write_str("float"),
            TypeRef::String => f.write_str("string"),
            TypeRef::Class(name) => f.write_str(name),
        }
    }
}

/// Parámetro formal de un callable. Objeto valor inmutable: los métodos
/// `typed`/`array`/`optional` consumen y devuelven un nuevo descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: String,
    declared_type: Option<TypeRef>,
    is_array: bool,
    is_optional: bool,
    default_value: Option<Value>,
}

impl Argument {
    /// Parámetro obligatorio y sin tipo declarado.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               declared_type: None,
               is_array: false,
               is_optional: false,
               default_value: None }
    }

    pub fn typed(mut self, declared_type: TypeRef) -> Self {
        self.declared_type = Some(declared_type);
        self
    }

    /// Marca el parámetro como lista. Si además tiene tipo declarado, ese
    /// tipo describe a cada elemento.
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn optional(mut self, default_value: impl Into<Value>) -> Self {
        self.is_optional = true;
        self.default_value = Some(default_value.into());
        self
    }

    /// Copia con el tipo declarado sustituido (binding interfaz -> implementación).
    pub fn with_type(&self, declared_type: TypeRef) -> Self {
        Self { declared_type: Some(declared_type),
               ..self.clone() }
    }

    /// Descriptor del elemento `index` de un parámetro lista.
    pub fn element(&self, index: usize) -> Self {
        Self { name: format!("{}[{}]", self.name, index),
               declared_type: self.declared_type.clone(),
               is_array: false,
               is_optional: false,
               default_value: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> Option<&TypeRef> {
        self.declared_type.as_ref()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.declared_type.as_ref().and_then(TypeRef::class_name)
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    /// Valor por defecto; `null` para parámetros opcionales sin default explícito.
    pub fn default_value(&self) -> Value {
        self.default_value.clone().unwrap_or_else(Value::null)
    }

    /// `true` cuando `value` ya satisface lo declarado, es decir, ningún
    /// convertidor debe tocarlo. Un parámetro sin tipo ni lista no declara
    /// nada que satisfacer.
    pub fn accepts(&self, value: &Value) -> bool {
        if self.is_array {
            let Value::Data(Json::Array(items)) = value else {
                return false;
            };
            return match &self.declared_type {
                Some(element) => items.iter().all(|item| element.accepts(&Value::Data(item.clone()))),
                None => true,
            };
        }
        self.declared_type.as_ref().is_some_and(|t| t.accepts(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Instance;
    use serde_json::json;

    #[test]
    fn class_argument() {
        let arg = Argument::new("arg").typed(TypeRef::class("stdClass"));
        assert_eq!(arg.name(), "arg");
        assert_eq!(arg.class_name(), Some("stdClass"));
        assert!(!arg.is_array());
        assert!(!arg.is_optional());
    }

    #[test]
    fn array_argument() {
        let arg = Argument::new("foo").array();
        assert!(arg.class_name().is_none());
        assert!(arg.is_array());
        assert!(arg.accepts(&Value::Data(json!(["a"]))));
        assert!(!arg.accepts(&Value::from("a,b")));
    }

    #[test]
    fn optional_default_value() {
        let arg = Argument::new("opt").optional(1234);
        assert!(arg.is_optional());
        assert_eq!(arg.default_value(), Value::from(1234));
    }

    #[test]
    fn accepts_checks_runtime_type() {
        let int = Argument::new("x").typed(TypeRef::Int);
        assert!(int.accepts(&Value::from(5)));
        assert!(!int.accepts(&Value::from("5")));
        assert!(!int.accepts(&Value::from(5.5)));

        let untyped = Argument::new("y");
        assert!(!untyped.accepts(&Value::from(5)));

        let class = Argument::new("s").typed(TypeRef::class("Shape"));
        let inst = Instance::new("Circle", 1u8).implementing(["Shape"]);
        assert!(class.accepts(&Value::Instance(inst)));

        let floats = Argument::new("n").typed(TypeRef::Float).array();
        assert!(floats.accepts(&Value::Data(json!([1, 2.5]))));
        assert!(!floats.accepts(&Value::Data(json!(["1"]))));
    }

    #[test]
    fn with_type_rebinds_only_the_type() {
        let arg = Argument::new("repo").typed(TypeRef::class("Repository")).optional(Value::null());
        let bound = arg.with_type(TypeRef::class("SqlRepository"));
        assert_eq!(bound.class_name(), Some("SqlRepository"));
        assert_eq!(bound.name(), "repo");
        assert!(bound.is_optional());
    }
}
