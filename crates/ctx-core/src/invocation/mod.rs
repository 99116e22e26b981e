//! Cadena de advices alrededor de la llamada final.

pub mod advice;
pub mod context_invocation;
pub mod invocation_advice;

pub use advice::Advice;
pub use context_invocation::ContextInvocation;
pub use invocation_advice::InvocationAdvice;
