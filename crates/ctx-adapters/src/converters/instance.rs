//! Reutiliza instancias ya presentes en la bolsa de datos.
use ctx_core::{Argument, Conversion, ContextError, ConverterRegistry, ParamConverter, RequestData, Value};

/// Para un parámetro de clase sin valor, toma la primera instancia de esa
/// clase (o interfaz) que aparezca en `data`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceConverter;

impl ParamConverter for InstanceConverter {
    fn supports(&self, value: Option<&Value>, argument: &Argument, _data: &RequestData) -> bool {
        value.is_none() && argument.class_name().is_some()
    }

    fn convert(&self,
               _value: Option<&Value>,
               argument: &Argument,
               data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        let Some(class) = argument.class_name() else {
            return Ok(Conversion::Declined);
        };
        let found = data.values().find(|v| v.as_instance().is_some_and(|i| i.is(class)));
        Ok(found.map_or(Conversion::Declined, |v| Conversion::Converted(v.clone())))
    }
}
