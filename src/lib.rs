//! ctxflow Rust Library
//!
//! Este crate reúne la demo sobre el motor de invocación:
//! - Expone `config` con la configuración del proceso (`.env`).
//! - Expone `errors` para manejar errores de núcleo y dominio.
//! - Expone `calculator`, la calculadora de línea de comandos.
//!
//! El motor en sí vive en `ctx-core`; entradas y convertidores en
//! `ctx-adapters`; advices opcionales en `ctx-plugins`.

pub mod calculator;
pub mod config;
pub mod errors;

pub use ctx_adapters;
pub use ctx_core;
pub use ctx_plugins;
