//! Formularios ligados a la petición.
//!
//! Si hay `form_type` y la petición viene codificada como formulario
//! (`application/x-www-form-urlencoded` o `multipart/form-data`), se crea el
//! formulario con el `FormFactory`, se liga a los datos y se deja en `data`
//! bajo `form` (instancia `Form`) y `form_data` (datos ligados). Si no es
//! válido, `context` pasa a ser el callable de `invalid`.
use std::fmt::Debug;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::{json, Value as Json};

use ctx_core::constants::{CONTEXT, DATA};
use ctx_core::{Advice, ContextError, ContextInvocation, Instance, OptionsSchema, RequestData, Value};

pub const FORM_TYPE: &str = "form_type";
pub const FORM_OPTIONS: &str = "form_options";
pub const FORM_DATA: &str = "form_data";
pub const INVALID: &str = "invalid";
pub const CONTENT_TYPE: &str = "content_type";
/// Clave de `data` donde queda el formulario ligado.
pub const FORM: &str = "form";
/// Nombre de tipo de la instancia guardada bajo `form`.
pub const FORM_CLASS: &str = "Form";

const URL_ENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

pub trait Form: Send + Sync + Debug {
    fn bind(&mut self, data: &RequestData) -> Result<(), ContextError>;

    fn is_valid(&self) -> bool;

    /// Datos ligados tras `bind`.
    fn data(&self) -> Value;
}

pub trait FormFactory: Send + Sync + Debug {
    fn create_form(&self, form_type: &str, data: &Value, options: &Value) -> Result<Box<dyn Form>, ContextError>;
}

pub fn is_form_content_type(content_type: &str) -> bool {
    content_type == URL_ENCODED || content_type.starts_with(MULTIPART)
}

#[derive(Debug, Clone)]
pub struct FormAdvice {
    factory: Arc<dyn FormFactory>,
}

impl FormAdvice {
    pub fn new<F: FormFactory + 'static>(factory: F) -> Self {
        Self { factory: Arc::new(factory) }
    }

    fn content_type<'a>(invocation: &'a ContextInvocation, data: &'a RequestData) -> Result<Option<&'a str>, ContextError> {
        let explicit = invocation.options().string(CONTENT_TYPE)?;
        Ok(explicit.or_else(|| data.metadata(CONTENT_TYPE)))
    }
}

impl Advice for FormAdvice {
    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_default(FORM_TYPE, Json::Null)
              .set_default(FORM_OPTIONS, json!({}))
              .set_default(FORM_DATA, Json::Null)
              .set_default(INVALID, Json::Null)
              .set_default(CONTENT_TYPE, Json::Null);
    }

    fn around(&self, invocation: &mut ContextInvocation) -> Result<Value, ContextError> {
        let Some(form_type) = invocation.options().string(FORM_TYPE)?.map(str::to_string) else {
            return invocation.invoke();
        };
        let data = invocation.options().data()?.cloned().unwrap_or_default();
        let content_type = Self::content_type(invocation, &data)?.unwrap_or_default();
        if !is_form_content_type(content_type) {
            debug!("form:skip invocation={} content_type='{content_type}'", invocation.id());
            return invocation.invoke();
        }

        let initial = invocation.options().value(FORM_DATA).cloned().unwrap_or_else(Value::null);
        let form_options = invocation.options().value(FORM_OPTIONS).cloned().unwrap_or_else(Value::null);
        let mut form = self.factory.create_form(&form_type, &initial, &form_options)?;
        form.bind(&data)?;

        let valid = form.is_valid();
        let bound = form.data();
        let form: Arc<dyn Form> = Arc::from(form);
        let data = data.with_parameter(FORM, Instance::new(FORM_CLASS, form))
                       .with_parameter(FORM_DATA, bound);
        invocation.set_option(DATA, data);

        if !valid {
            match invocation.options().callable(INVALID)?.cloned() {
                Some(invalid) => {
                    debug!("form:invalid invocation={} rerouting to '{}'", invocation.id(), invalid.name());
                    invocation.set_option(CONTEXT, invalid);
                }
                None => warn!("form:invalid invocation={} form_type={form_type} without an 'invalid' callable",
                              invocation.id()),
            }
        }
        invocation.invoke()
    }
}
