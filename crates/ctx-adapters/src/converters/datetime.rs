//! Cadena -> `DateTime<Utc>` para parámetros de clase `DateTime` (o un alias
//! registrado).
//!
//! Formatos aceptados, en orden: RFC 3339, los formatos extra configurados y
//! `%Y-%m-%d %H:%M:%S`, `%Y-%m-%d`. Las fechas sin zona se interpretan en UTC.
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use ctx_core::{Argument, Conversion, ContextError, ConverterRegistry, Instance, ParamConverter, RequestData, Value};

pub const DATETIME: &str = "DateTime";

const DEFAULT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

#[derive(Debug, Clone)]
pub struct DateTimeConverter {
    aliases: Vec<String>,
    formats: Vec<String>,
}

impl Default for DateTimeConverter {
    fn default() -> Self {
        Self { aliases: vec![DATETIME.to_string()],
               formats: Vec::new() }
    }
}

impl DateTimeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Otro nombre de clase que también se construye como fecha.
    pub fn with_alias(mut self, class: impl Into<String>) -> Self {
        self.aliases.push(class.into());
        self
    }

    /// Formato `chrono` adicional, probado antes de los predeterminados.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.formats.push(format.into());
        self
    }

    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        let formats = self.formats.iter().map(String::as_str).chain(DEFAULT_FORMATS);
        for format in formats {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Utc.from_utc_datetime(&naive));
            }
            if let Some(naive) = NaiveDate::parse_from_str(raw, format).ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        None
    }
}

impl ParamConverter for DateTimeConverter {
    fn supports(&self, value: Option<&Value>, argument: &Argument, _data: &RequestData) -> bool {
        argument.class_name().is_some_and(|class| self.aliases.iter().any(|a| a == class))
        && value.and_then(Value::as_str).is_some()
    }

    fn convert(&self,
               value: Option<&Value>,
               argument: &Argument,
               _data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        let (Some(class), Some(raw)) = (argument.class_name(), value.and_then(Value::as_str)) else {
            return Ok(Conversion::Declined);
        };
        let parsed = self.parse(raw)
                         .ok_or_else(|| ContextError::conversion(argument.name(), format!("'{raw}' is not a valid date")))?;
        Ok(Conversion::Converted(Value::Instance(Instance::new(class, parsed).implementing([DATETIME]))))
    }

    fn priority(&self) -> i32 {
        3
    }
}
