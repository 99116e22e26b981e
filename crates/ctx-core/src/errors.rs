//! Errores del núcleo de invocación.
//!
//! Un único enum cubre la taxonomía completa: validación de opciones (antes
//! de ejecutar cualquier advice), resolución de argumentos, la pila de
//! advices vacía y los fallos de aplicación contenidos.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContextError {
    #[error("missing required options: {}", .0.join(", "))]
    MissingOptions(Vec<String>),
    #[error("undefined options: {}", .0.join(", "))]
    UndefinedOptions(Vec<String>),
    #[error("option '{name}' must hold {expected}")]
    InvalidOption { name: String, expected: &'static str },
    #[error("could not resolve value for argument named '{name}'")]
    UnresolvedArgument { name: String },
    #[error("argument at position {position} is not {expected}")]
    ArgumentType { position: usize, expected: String },
    #[error("type '{0}' is not registered")]
    UnknownType(String),
    #[error("delegate has no method named '{0}'")]
    UnknownMethod(String),
    #[error("empty advice stack")]
    EmptyAdviceStack,
    #[error("an error occurred inside your application")]
    Contained { source: Box<ContextError> },
    #[error("{0}")]
    Application(String),
    #[error("cannot convert value to '{target}': {message}")]
    Conversion { target: String, message: String },
    #[error("invocation exceeded its deadline of {limit_ms}ms (took {elapsed_ms}ms)")]
    DeadlineExceeded { limit_ms: u64, elapsed_ms: u64 },
    #[error("internal: {0}")]
    Internal(String),
}

impl ContextError {
    /// Atajo para fallos levantados por el callable de destino.
    pub fn application(message: impl Into<String>) -> Self {
        ContextError::Application(message.into())
    }

    pub fn conversion(target: impl Into<String>, message: impl Into<String>) -> Self {
        ContextError::Conversion { target: target.into(),
                                   message: message.into() }
    }

    /// Errores de programación/configuración que la contención de
    /// excepciones nunca intercepta.
    pub fn is_fatal(&self) -> bool {
        matches!(self,
                 ContextError::EmptyAdviceStack
                 | ContextError::MissingOptions(_)
                 | ContextError::UndefinedOptions(_))
    }

    /// Causa original de un fallo contenido.
    pub fn cause(&self) -> Option<&ContextError> {
        match self {
            ContextError::Contained { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unresolved_argument_names_the_parameter() {
        let err = ContextError::UnresolvedArgument { name: "foo".into() };
        assert_eq!(err.to_string(), "could not resolve value for argument named 'foo'");
    }

    #[test]
    fn missing_options_lists_keys() {
        let err = ContextError::MissingOptions(vec!["context".into(), "tx".into()]);
        assert_eq!(err.to_string(), "missing required options: context, tx");
    }

    #[test]
    fn contained_exposes_source() {
        let err = ContextError::Contained { source: Box::new(ContextError::application("boom")) };
        assert_eq!(err.cause(), Some(&ContextError::application("boom")));
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".to_string()));
        assert!(!err.is_fatal());
        assert!(ContextError::EmptyAdviceStack.is_fatal());
    }
}
