//! Esquema de opciones reconocidas: claves obligatorias, valores por defecto
//! y claves opcionales sin default. Cada advice/fuente de entrada declara
//! aquí sus opciones al construir el engine.
use indexmap::IndexSet;

use super::{OptionValue, Options};
use crate::errors::ContextError;

#[derive(Debug, Clone, Default)]
pub struct OptionsSchema {
    required: IndexSet<String>,
    defaults: Options,
    known: IndexSet<String>,
}

impl OptionsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_required(&mut self, keys: &[&str]) -> &mut Self {
        for key in keys {
            self.required.insert(key.to_string());
            self.known.insert(key.to_string());
        }
        self
    }

    pub fn set_default(&mut self, key: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.defaults.set(key, value);
        self.known.insert(key.to_string());
        self
    }

    pub fn set_defaults(&mut self, defaults: Options) -> &mut Self {
        for (key, value) in defaults.into_entries() {
            self.known.insert(key.clone());
            self.defaults.set(key, value);
        }
        self
    }

    /// Clave reconocida sin valor por defecto.
    pub fn set_optional(&mut self, keys: &[&str]) -> &mut Self {
        for key in keys {
            self.known.insert(key.to_string());
        }
        self
    }

    pub fn is_known(&self, key: &str) -> bool {
        self.known.contains(key)
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.required.contains(key)
    }

    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    /// Valida `options` y devuelve el resultado de fusionarlas sobre los
    /// defaults. Claves desconocidas -> `UndefinedOptions`; obligatorias
    /// ausentes tras la fusión -> `MissingOptions`.
    pub fn resolve(&self, options: Options) -> Result<Options, ContextError> {
        let undefined: Vec<String> = options.keys().filter(|k| !self.is_known(k)).map(str::to_string).collect();
        if !undefined.is_empty() {
            return Err(ContextError::UndefinedOptions(undefined));
        }

        let merged = self.defaults.merged_with(options);
        let missing: Vec<String> = self.required.iter().filter(|k| !merged.contains(k)).cloned().collect();
        if !missing.is_empty() {
            return Err(ContextError::MissingOptions(missing));
        }
        Ok(merged)
    }
}
