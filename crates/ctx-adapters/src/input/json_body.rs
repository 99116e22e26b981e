//! Fuente tipo petición HTTP ya decodificada.
//!
//! La opción `request` lleva un objeto JSON:
//! `{query, body, attributes, content, format, content_type}`. `query`,
//! `body` y `attributes` se fusionan (en ese orden, el último gana) como
//! parámetros; `content` queda como payload crudo y `format` /
//! `content_type` como metadatos.
use serde_json::{Map, Value as Json};

use ctx_core::{ContextError, InputSource, Options, OptionsSchema, ParamKey, RequestData, Value};

pub const REQUEST: &str = "request";

const SECTIONS: [&str; 3] = ["query", "body", "attributes"];
const METADATA: [&str; 2] = ["format", "content_type"];

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodyInput;

impl JsonBodyInput {
    fn request(options: &Options) -> Option<&Map<String, Json>> {
        options.value(REQUEST).and_then(Value::as_object)
    }
}

impl InputSource for JsonBodyInput {
    fn has_data(&self, options: &Options) -> bool {
        Self::request(options).is_some()
    }

    fn create_data(&self, options: &Options) -> Result<RequestData, ContextError> {
        let request = Self::request(options).ok_or_else(|| ContextError::InvalidOption { name: REQUEST.to_string(),
                                                                                          expected: "a request object" })?;

        let mut parameters = Vec::new();
        for section in SECTIONS {
            match request.get(section) {
                Some(Json::Object(values)) => {
                    parameters.extend(values.iter().map(|(k, v)| (ParamKey::parse(k), v.clone())));
                }
                None | Some(Json::Null) => {}
                Some(_) => {
                    return Err(ContextError::InvalidOption { name: format!("{REQUEST}.{section}"),
                                                             expected: "a mapping" })
                }
            }
        }

        let mut data = RequestData::new(parameters);
        match request.get("content") {
            Some(Json::String(content)) => data = data.with_raw_input(content.as_bytes()),
            Some(Json::Null) | None => {}
            Some(other) => data = data.with_raw_input(other.to_string()),
        }
        for key in METADATA {
            if let Some(value) = request.get(key).and_then(Json::as_str) {
                data = data.with_metadata(key, value);
            }
        }
        Ok(data)
    }

    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_default(REQUEST, Json::Null);
    }
}
