//! Engine module
//!
//! Provides the engine, its builder and the proxy wrapper that routes
//! method calls through the advice chain.

pub mod builder;
pub mod core;
pub mod proxy;

pub use builder::EngineBuilder;
pub use core::Engine;
pub use proxy::{Delegate, MethodTable, Proxy};
