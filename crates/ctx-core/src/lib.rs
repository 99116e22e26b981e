//! ctx-core: motor de invocación genérico.
//!
//! Dado un callable (`context`) y una bolsa de datos poco tipados, resuelve
//! los argumentos formales del callable por tipo/nombre/posición, aplica una
//! cadena de advices alrededor de la llamada final y convierte los valores
//! crudos en objetos tipados bajo demanda.
pub mod constants;
pub mod convert;
pub mod engine;
pub mod errors;
pub mod exception;
pub mod input;
pub mod invocation;
pub mod model;
pub mod options;
pub mod resolve;
pub mod types;

pub use convert::{Conversion, ConverterRegistry, ObjectConverter, ParamConverter};
pub use engine::{Delegate, Engine, EngineBuilder, MethodTable, Proxy};
pub use errors::ContextError;
pub use exception::{ExceptionAdvice, ExceptionHandler, Handler};
pub use input::{InputAdvice, InputSource};
pub use invocation::{Advice, ContextInvocation, InvocationAdvice};
pub use model::{Args, Argument, Callable, FromValue, Instance, ParamKey, RequestData, TypeRef, Value};
pub use options::{OptionValue, Options, OptionsSchema};
pub use resolve::{ArgumentResolver, ConverterArgumentResolver, ParamsArgumentResolver};
pub use types::{TypeDescriptor, TypeRegistry};
