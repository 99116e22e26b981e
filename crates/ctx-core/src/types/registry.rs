//! Registro de tipos compuestos.
//!
//! Cada `TypeDescriptor` describe cómo construir e hidratar un tipo a partir
//! de datos: constructor (parámetros + función de construcción) o factoría
//! por defecto, setters con el campo que escriben y campos públicos
//! asignables. El `ObjectConverter` consume esta tabla en lugar de
//! introspección en tiempo de ejecución.
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use log::warn;

use crate::errors::ContextError;
use crate::model::{Args, Argument, Value};

pub type Object = Box<dyn Any + Send + Sync>;

type BuildFn = dyn Fn(Args) -> Result<Object, ContextError> + Send + Sync;
type FactoryFn = dyn Fn() -> Object + Send + Sync;
type ApplyFn = dyn Fn(&mut (dyn Any + Send + Sync), Value) -> Result<(), ContextError> + Send + Sync;

pub struct Constructor {
    params: Vec<Argument>,
    build: Box<BuildFn>,
}

impl Constructor {
    pub fn params(&self) -> &[Argument] {
        &self.params
    }
}

/// Método mutador de un único parámetro.
pub struct Setter {
    method: String,
    field: String,
    argument: Argument,
    apply: Box<ApplyFn>,
}

impl Setter {
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Campo inferido a partir del nombre del método.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    pub fn apply(&self, target: &mut (dyn Any + Send + Sync), value: Value) -> Result<(), ContextError> {
        (self.apply)(target, value)
    }
}

/// Campo público asignable; su nombre es el del `Argument`.
pub struct Field {
    argument: Argument,
    assign: Box<ApplyFn>,
}

impl Field {
    pub fn name(&self) -> &str {
        self.argument.name()
    }

    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    pub fn assign(&self, target: &mut (dyn Any + Send + Sync), value: Value) -> Result<(), ContextError> {
        (self.assign)(target, value)
    }
}

pub struct TypeDescriptor {
    name: String,
    interfaces: Vec<String>,
    constructor: Option<Constructor>,
    factory: Option<Box<FactoryFn>>,
    setters: Vec<Setter>,
    fields: Vec<Field>,
}

impl TypeDescriptor {
    /// Empieza la descripción del tipo Rust `T` registrado bajo `name`.
    pub fn builder<T: Any + Send + Sync>(name: impl Into<String>) -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder { descriptor: TypeDescriptor { name: name.into(),
                                                             interfaces: Vec::new(),
                                                             constructor: None,
                                                             factory: None,
                                                             setters: Vec::new(),
                                                             fields: Vec::new() },
                                _type: PhantomData }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    pub fn constructor_params(&self) -> &[Argument] {
        self.constructor.as_ref().map(Constructor::params).unwrap_or(&[])
    }

    pub fn setters(&self) -> &[Setter] {
        &self.setters
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Instancia el tipo: constructor con `args` si existe, si no la factoría.
    pub fn new_object(&self, args: Vec<Value>) -> Result<Object, ContextError> {
        if let Some(constructor) = &self.constructor {
            return (constructor.build)(Args::new(args));
        }
        match &self.factory {
            Some(factory) => Ok(factory()),
            None => Err(ContextError::Internal(format!("type '{}' has neither constructor nor factory", self.name))),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
         .field("name", &self.name)
         .field("interfaces", &self.interfaces)
         .field("constructor", &self.constructor.as_ref().map(|c| &c.params))
         .field("setters", &self.setters.iter().map(|s| s.method.as_str()).collect::<Vec<_>>())
         .field("fields", &self.fields.iter().map(Field::name).collect::<Vec<_>>())
         .finish()
    }
}

pub struct TypeDescriptorBuilder<T> {
    descriptor: TypeDescriptor,
    _type: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> TypeDescriptorBuilder<T> {
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.descriptor.interfaces.push(interface.into());
        self
    }

    pub fn constructor<F>(mut self, params: Vec<Argument>, build: F) -> Self
        where F: Fn(Args) -> Result<T, ContextError> + Send + Sync + 'static
    {
        let build: Box<BuildFn> = Box::new(move |args| build(args).map(|value| Box::new(value) as Object));
        self.descriptor.constructor = Some(Constructor { params, build });
        self
    }

    pub fn factory<F>(mut self, factory: F) -> Self
        where F: Fn() -> T + Send + Sync + 'static
    {
        self.descriptor.factory = Some(Box::new(move || Box::new(factory()) as Object));
        self
    }

    pub fn default_factory(self) -> Self
        where T: Default
    {
        self.factory(T::default)
    }

    /// Registra un setter. Si el nombre del método no codifica ningún campo
    /// (`set_x`, `setX`) el setter se descarta.
    pub fn setter<F>(mut self, method: impl Into<String>, argument: Argument, apply: F) -> Self
        where F: Fn(&mut T, Value) -> Result<(), ContextError> + Send + Sync + 'static
    {
        let method = method.into();
        let Some(field) = infer_setter_field(&method) else {
            warn!("type '{}': method '{}' is not setter-shaped, ignored", self.descriptor.name, method);
            return self;
        };
        let type_name = self.descriptor.name.clone();
        self.descriptor.setters.push(Setter { method,
                                              field,
                                              argument,
                                              apply: downcasting(type_name, apply) });
        self
    }

    pub fn field<F>(mut self, argument: Argument, assign: F) -> Self
        where F: Fn(&mut T, Value) -> Result<(), ContextError> + Send + Sync + 'static
    {
        let type_name = self.descriptor.name.clone();
        self.descriptor.fields.push(Field { argument,
                                            assign: downcasting(type_name, assign) });
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}

fn downcasting<T, F>(type_name: String, apply: F) -> Box<ApplyFn>
    where T: Any + Send + Sync,
          F: Fn(&mut T, Value) -> Result<(), ContextError> + Send + Sync + 'static
{
    Box::new(move |target: &mut (dyn Any + Send + Sync), value| {
        let target = target.downcast_mut::<T>()
                           .ok_or_else(|| ContextError::Internal(format!("object is not an instance of '{type_name}'")))?;
        apply(target, value)
    })
}

/// `set_foo_bar` -> `foo_bar`, `setFooBar` -> `fooBar`.
pub fn infer_setter_field(method: &str) -> Option<String> {
    if let Some(rest) = method.strip_prefix("set_") {
        return (!rest.is_empty()).then(|| rest.to_string());
    }
    let rest = method.strip_prefix("set")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    Some(first.to_lowercase().chain(chars).collect())
}

/// Tabla nombre de tipo -> descriptor, poblada al arrancar.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: IndexMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: TypeDescriptor) {
        self.types.insert(descriptor.name.clone(), Arc::new(descriptor));
    }

    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
