use ctx_core::ContextError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de invocación: {0}")]
    Context(#[from] ContextError),
}

impl CoreError {
    /// Causa original cuando el fallo fue contenido por el motor.
    pub fn root_cause(&self) -> Option<&ContextError> {
        match self {
            CoreError::Context(err) => Some(err.cause().unwrap_or(err)),
            _ => None,
        }
    }
}
