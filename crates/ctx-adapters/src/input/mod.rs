//! Fuentes de entrada concretas.

pub mod argv;
pub mod getopt;
pub mod json_body;

pub use argv::ArgvInput;
pub use getopt::GetOptInput;
pub use json_body::JsonBodyInput;
