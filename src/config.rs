//! Configuración del proceso para la demo.
//! Carga variables de entorno (.env) una sola vez y expone una estructura
//! inmutable (`CONFIG`). La configuración por llamada vive en las opciones
//! del motor, no aquí.
use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

pub const DISABLE_EXCEPTION_HANDLER_VAR: &str = "CTXFLOW_DISABLE_EXCEPTION_HANDLER";
pub const DATE_FORMAT_VAR: &str = "CTXFLOW_DATE_FORMAT";
pub const DEADLINE_MS_VAR: &str = "CTXFLOW_DEADLINE_MS";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Deja pasar los errores sin contención (útil al depurar).
    pub disable_exception_handler: bool,
    /// Formato `chrono` extra para fechas de entrada.
    pub date_format: Option<String>,
    /// Plazo por llamada; ausente = sin plazo.
    pub deadline_ms: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración desde cualquier origen clave -> valor.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let disable_exception_handler = lookup(DISABLE_EXCEPTION_HANDLER_VAR).is_some_and(|v| parse_bool(&v));
        let date_format = lookup(DATE_FORMAT_VAR).filter(|v| !v.trim().is_empty());
        let deadline_ms = lookup(DEADLINE_MS_VAR).and_then(|v| v.trim().parse().ok());
        Self { disable_exception_handler,
               date_format,
               deadline_ms }
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(AppConfig::from_lookup(|_| None), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[(DISABLE_EXCEPTION_HANDLER_VAR, "TRUE"),
                                                     (DATE_FORMAT_VAR, "%d/%m/%Y"),
                                                     (DEADLINE_MS_VAR, " 250 ")]));
        assert!(config.disable_exception_handler);
        assert_eq!(config.date_format.as_deref(), Some("%d/%m/%Y"));
        assert_eq!(config.deadline_ms, Some(250));
    }

    #[test]
    fn garbage_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[(DISABLE_EXCEPTION_HANDLER_VAR, "maybe"),
                                                     (DATE_FORMAT_VAR, "  "),
                                                     (DEADLINE_MS_VAR, "soon")]));
        assert_eq!(config, AppConfig::default());
    }
}
