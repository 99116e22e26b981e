//! `RequestData`: bolsa inmutable de valores de entrada.
//!
//! Las claves pueden ser nombres o posiciones enteras. Además de los
//! parámetros guarda un payload crudo opcional (cuerpo de una petición) y
//! metadatos de texto (`format`, `content_type`, ...).
//!
//! La resolución de argumentos sólo lee de aquí; cualquier "modificación"
//! (`with_parameter`, `with_metadata`) produce una bolsa nueva.
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use super::Value;

/// Clave de un parámetro: nombre o posición.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamKey {
    Position(usize),
    Name(String),
}

impl ParamKey {
    /// Las cadenas puramente numéricas se interpretan como posición.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(position) => ParamKey::Position(position),
            Err(_) => ParamKey::Name(raw.to_string()),
        }
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        ParamKey::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        ParamKey::Name(name)
    }
}

impl From<usize> for ParamKey {
    fn from(position: usize) -> Self {
        ParamKey::Position(position)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Position(p) => write!(f, "{p}"),
            ParamKey::Name(n) => f.write_str(n),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestData {
    parameters: IndexMap<ParamKey, Value>,
    raw_input: Option<Vec<u8>>,
    metadata: IndexMap<String, String>,
}

impl RequestData {
    pub fn new<I, K, V>(parameters: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<ParamKey>,
              V: Into<Value>
    {
        Self { parameters: parameters.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
               ..Self::default() }
    }

    /// Bolsa posicional: el valor `i` queda bajo la clave `i`.
    pub fn from_values<I, V>(values: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<Value>
    {
        Self::new(values.into_iter().enumerate())
    }

    /// Construye la bolsa desde un objeto JSON (claves numéricas pasan a ser
    /// posiciones) o un array (posicional). Cualquier otro valor queda en la
    /// posición 0.
    pub fn from_json(json: Json) -> Self {
        match json {
            Json::Object(map) => Self::new(map.into_iter().map(|(k, v)| (ParamKey::parse(&k), v))),
            Json::Array(items) => Self::from_values(items),
            Json::Null => Self::default(),
            other => Self::from_values([other]),
        }
    }

    pub fn with_raw_input(mut self, raw: impl Into<Vec<u8>>) -> Self {
        self.raw_input = Some(raw.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Copia de la bolsa con un parámetro añadido o sustituido.
    pub fn with_parameter(&self, key: impl Into<ParamKey>, value: impl Into<Value>) -> Self {
        let mut next = self.clone();
        next.parameters.insert(key.into(), value.into());
        next
    }

    pub fn has(&self, key: &ParamKey) -> bool {
        self.parameters.contains_key(key)
    }

    pub fn get(&self, key: &ParamKey) -> Option<&Value> {
        self.parameters.get(key)
    }

    pub fn get_or(&self, key: &ParamKey, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Busca por nombre y, si no existe, por posición.
    pub fn lookup(&self, name: &str, position: usize) -> Option<&Value> {
        self.parameters
            .get(&ParamKey::Name(name.to_string()))
            .or_else(|| self.parameters.get(&ParamKey::Position(position)))
    }

    pub fn all(&self) -> &IndexMap<ParamKey, Value> {
        &self.parameters
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.parameters.values()
    }

    /// Valores en posiciones consecutivas desde 0, hasta el primer hueco.
    pub fn positional(&self) -> Vec<Value> {
        (0..).map_while(|i| self.parameters.get(&ParamKey::Position(i)).cloned())
             .collect()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Sólo cuenta parámetros; el payload crudo se comprueba aparte.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn raw_input(&self) -> Option<&[u8]> {
        self.raw_input.as_deref()
    }

    pub fn raw_input_str(&self) -> Option<&str> {
        self.raw_input().and_then(|raw| std::str::from_utf8(raw).ok())
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn metadata_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.metadata(key).unwrap_or(default)
    }
}
