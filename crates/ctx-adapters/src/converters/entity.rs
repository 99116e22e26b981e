//! Búsqueda de entidades persistentes por id.
//!
//! Si el parámetro es de una clase persistente y los datos traen una clave
//! con el nombre del parámetro o `id` (en ese orden), se busca la entidad en
//! el repositorio. Sin resultado el convertidor renuncia.
use std::fmt::Debug;
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use serde_json::Value as Json;

use ctx_core::{Argument, Conversion, ContextError, ConverterRegistry, Instance, ParamConverter, ParamKey, RequestData, Value};

pub trait EntityRepository: Send + Sync + Debug {
    fn is_persistent(&self, class: &str) -> bool;

    fn find(&self, class: &str, id: &Value) -> Option<Instance>;
}

impl<R: EntityRepository + ?Sized> EntityRepository for Arc<R> {
    fn is_persistent(&self, class: &str) -> bool {
        (**self).is_persistent(class)
    }

    fn find(&self, class: &str, id: &Value) -> Option<Instance> {
        (**self).find(class, id)
    }
}

/// Repositorio en memoria indexado por (clase, id). Seguro para uso
/// concurrente.
#[derive(Debug, Default)]
pub struct InMemoryEntityRepository {
    classes: DashSet<String>,
    entities: DashMap<(String, String), Instance>,
}

impl InMemoryEntityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: impl Into<Value>, entity: Instance) {
        let class = entity.type_name().to_string();
        self.classes.insert(class.clone());
        self.entities.insert((class, id_key(&id.into())), entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// `"42"` y `42` identifican la misma entidad.
fn id_key(id: &Value) -> String {
    match id {
        Value::Data(Json::String(s)) => s.clone(),
        Value::Data(other) => other.to_string(),
        Value::Instance(i) => i.type_name().to_string(),
    }
}

impl EntityRepository for InMemoryEntityRepository {
    fn is_persistent(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn find(&self, class: &str, id: &Value) -> Option<Instance> {
        self.entities.get(&(class.to_string(), id_key(id))).map(|e| e.value().clone())
    }
}

#[derive(Debug, Clone)]
pub struct EntityConverter<R> {
    repository: R,
}

impl<R: EntityRepository> EntityConverter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn id<'d>(argument: &Argument, data: &'d RequestData) -> Option<&'d Value> {
        data.get(&ParamKey::from(argument.name())).or_else(|| data.get(&ParamKey::from("id")))
    }
}

impl<R: EntityRepository> ParamConverter for EntityConverter<R> {
    fn supports(&self, _value: Option<&Value>, argument: &Argument, data: &RequestData) -> bool {
        argument.class_name().is_some_and(|class| self.repository.is_persistent(class)) && Self::id(argument, data).is_some()
    }

    fn convert(&self,
               _value: Option<&Value>,
               argument: &Argument,
               data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        let (Some(class), Some(id)) = (argument.class_name(), Self::id(argument, data)) else {
            return Ok(Conversion::Declined);
        };
        Ok(self.repository
               .find(class, id)
               .map_or(Conversion::Declined, |entity| Conversion::Converted(Value::Instance(entity))))
    }

    fn priority(&self) -> i32 {
        2
    }
}
