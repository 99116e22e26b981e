//! Constantes del motor: claves de opciones reconocidas y prioridades por
//! defecto de los convertidores del núcleo.

/// Callable de destino. Única opción obligatoria del núcleo.
pub const CONTEXT: &str = "context";
/// Lista posicional de valores explícitos.
pub const PARAMS: &str = "params";
/// `RequestData` de la invocación.
pub const DATA: &str = "data";
/// Sustitución interfaz -> implementación aplicada antes de convertir.
pub const INTERFACES: &str = "interfaces";
/// Descriptores `Argument` que reemplazan posicionalmente a la firma.
pub const ARGUMENTS: &str = "arguments";
/// Desactiva la contención de excepciones para una llamada.
pub const DISABLE_EXCEPTION_HANDLER: &str = "disable_exception_handler";

/// Prioridad del `ObjectConverter`: la más baja entre los convertidores de
/// tipos compuestos, para que los convertidores de dominio decidan antes.
pub const OBJECT_CONVERTER_PRIORITY: i32 = 0;

/// Prioridad por defecto de un convertidor o handler sin prioridad explícita.
pub const DEFAULT_PRIORITY: i32 = 0;
