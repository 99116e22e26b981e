use ctx_core::ContextError;
use thiserror::Error;

/// Errores del dominio de la calculadora
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Resultado no finito: {0}")]
    NotFinite(f64),
}

/// Los fallos de dominio llegan al motor como fallos de aplicación.
impl From<DomainError> for ContextError {
    fn from(err: DomainError) -> Self {
        ContextError::application(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_variant_format() {
        let err = DomainError::Validation("inválido".into());
        assert_eq!(err.to_string(), "Validación fallida: inválido");
    }

    #[test]
    fn test_not_finite_variant_format() {
        let err = DomainError::NotFinite(f64::INFINITY);
        assert_eq!(err.to_string(), "Resultado no finito: inf");
    }

    #[test]
    fn test_into_application_error() {
        let err: ContextError = DomainError::Validation("vacío".into()).into();
        assert_eq!(err, ContextError::Application("Validación fallida: vacío".into()));
    }
}
