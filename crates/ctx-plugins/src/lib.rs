//! ctx-plugins: advices opcionales que se enchufan en la cadena del motor.
//!
//! - `TransactionAdvice`: envuelve la llamada en una transacción.
//! - `FormAdvice`: construye, liga y valida formularios.
//! - `DeadlineAdvice`: marca como fallida una llamada demasiado lenta.
pub mod deadline;
pub mod form;
pub mod transaction;

pub use deadline::DeadlineAdvice;
pub use form::{Form, FormAdvice, FormFactory};
pub use transaction::{TransactionAdvice, TransactionManager};
