//! `ObjectConverter`: hidrata tipos compuestos registrados a partir de un
//! mapa de datos.
//!
//! Orden de hidratación:
//! 1. parámetros del constructor (cada uno resuelto recursivamente a través
//!    del registro; los opcionales ausentes toman su default),
//! 2. setters cuyo campo no consumió el constructor,
//! 3. campos públicos no consumidos todavía.
//!
//! Las claves que no encajan en nada se ignoran. Un fallo en cualquier paso
//! aborta la construcción: nunca se devuelve un objeto a medias.
use std::collections::HashSet;
use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value as Json};

use super::{Conversion, ConverterRegistry, ParamConverter};
use crate::constants::OBJECT_CONVERTER_PRIORITY;
use crate::errors::ContextError;
use crate::model::{Argument, Instance, RequestData, Value};
use crate::types::{TypeDescriptor, TypeRegistry};

#[derive(Debug, Clone)]
pub struct ObjectConverter {
    types: Arc<TypeRegistry>,
}

impl ObjectConverter {
    pub fn new(types: TypeRegistry) -> Self {
        Self { types: Arc::new(types) }
    }

    pub fn shared(types: Arc<TypeRegistry>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    fn descriptor(&self, argument: &Argument) -> Option<&Arc<TypeDescriptor>> {
        argument.class_name().and_then(|name| self.types.get(name))
    }

    fn hydrate(&self,
               descriptor: &TypeDescriptor,
               input: &Map<String, Json>,
               data: &RequestData,
               converters: &ConverterRegistry)
               -> Result<Instance, ContextError> {
        let mut consumed: HashSet<&str> = HashSet::new();

        let mut ctor_args = Vec::with_capacity(descriptor.constructor_params().len());
        for param in descriptor.constructor_params() {
            let value = match input.get(param.name()) {
                Some(raw) => {
                    consumed.insert(param.name());
                    converters.resolve(Some(Value::Data(raw.clone())), param, data)?
                }
                None if param.is_optional() => param.default_value(),
                None => converters.resolve(None, param, data)?,
            };
            ctor_args.push(value);
        }
        let mut object = descriptor.new_object(ctor_args)?;

        for setter in descriptor.setters() {
            if consumed.contains(setter.field()) {
                continue;
            }
            if let Some(raw) = input.get(setter.field()) {
                let value = converters.resolve(Some(Value::Data(raw.clone())), setter.argument(), data)?;
                setter.apply(object.as_mut(), value)?;
                consumed.insert(setter.field());
            }
        }

        for field in descriptor.fields() {
            if consumed.contains(field.name()) {
                continue;
            }
            if let Some(raw) = input.get(field.name()) {
                let value = converters.resolve(Some(Value::Data(raw.clone())), field.argument(), data)?;
                field.assign(object.as_mut(), value)?;
                consumed.insert(field.name());
            }
        }

        debug!("hydrated '{}' from {} of {} keys", descriptor.name(), consumed.len(), input.len());
        Ok(Instance::from_boxed(descriptor.name().to_string(), descriptor.interfaces().to_vec(), object))
    }
}

impl ParamConverter for ObjectConverter {
    fn supports(&self, value: Option<&Value>, argument: &Argument, _data: &RequestData) -> bool {
        !argument.is_array() && self.descriptor(argument).is_some() && value.and_then(Value::as_object).is_some()
    }

    fn convert(&self,
               value: Option<&Value>,
               argument: &Argument,
               data: &RequestData,
               converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        let (Some(descriptor), Some(input)) = (self.descriptor(argument), value.and_then(Value::as_object)) else {
            return Ok(Conversion::Declined);
        };
        self.hydrate(descriptor, input, data, converters)
            .map(|instance| Conversion::Converted(Value::Instance(instance)))
    }

    fn priority(&self) -> i32 {
        OBJECT_CONVERTER_PRIORITY
    }
}
