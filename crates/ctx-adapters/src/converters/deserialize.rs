//! Deserialización del payload crudo de la petición.
//!
//! Sólo hay un payload por petición, así que como mucho un parámetro por
//! llamada debería depender de este convertidor. El formato sale del
//! metadato `format` (por defecto `json`).
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use serde::de::DeserializeOwned;

use ctx_core::{Argument, Conversion, ContextError, ConverterRegistry, Instance, ParamConverter, RequestData, Value};

pub const FORMAT: &str = "format";
pub const JSON: &str = "json";

type DeserializeFn = dyn Fn(&[u8], &str) -> Result<Instance, ContextError> + Send + Sync;

#[derive(Clone)]
pub struct DeserializeConverter {
    deserializers: IndexMap<String, Arc<DeserializeFn>>,
    default_format: String,
}

impl Default for DeserializeConverter {
    fn default() -> Self {
        Self { deserializers: IndexMap::new(),
               default_format: JSON.to_string() }
    }
}

impl fmt::Debug for DeserializeConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeserializeConverter")
         .field("classes", &self.deserializers.keys().collect::<Vec<_>>())
         .field("default_format", &self.default_format)
         .finish()
    }
}

impl DeserializeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    /// Registra `T` como destino deserializable bajo el nombre `class`.
    pub fn register<T>(mut self, class: impl Into<String>) -> Self
        where T: DeserializeOwned + Any + Send + Sync
    {
        let class = class.into();
        let type_name = class.clone();
        let deserialize = move |raw: &[u8], format: &str| -> Result<Instance, ContextError> {
            match format {
                JSON => serde_json::from_slice::<T>(raw).map(|value| Instance::new(type_name.clone(), value))
                                                        .map_err(|e| ContextError::conversion(&type_name, e.to_string())),
                other => Err(ContextError::conversion(&type_name, format!("unsupported format '{other}'"))),
            }
        };
        self.deserializers.insert(class, Arc::new(deserialize));
        self
    }
}

impl ParamConverter for DeserializeConverter {
    fn supports(&self, _value: Option<&Value>, argument: &Argument, data: &RequestData) -> bool {
        data.has_raw_input() && argument.class_name().is_some_and(|class| self.deserializers.contains_key(class))
    }

    fn convert(&self,
               _value: Option<&Value>,
               argument: &Argument,
               data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        let (Some(deserialize), Some(raw)) =
            (argument.class_name().and_then(|class| self.deserializers.get(class)), data.raw_input())
        else {
            return Ok(Conversion::Declined);
        };
        let format = data.metadata_or(FORMAT, &self.default_format);
        debug!("deserializing argument '{}' from {} bytes of {format}", argument.name(), raw.len());
        deserialize(raw, format).map(|instance| Conversion::Converted(Value::Instance(instance)))
    }

    fn priority(&self) -> i32 {
        1
    }
}
