//! Inyección de servicios por tipo.
use std::fmt::Debug;
use std::sync::Arc;

use indexmap::IndexMap;

use ctx_core::{Argument, Conversion, ContextError, ConverterRegistry, Instance, ParamConverter, RequestData, Value};

/// Localizador de servicios por nombre de clase.
pub trait ServiceLocator: Send + Sync + Debug {
    fn is_service(&self, class: &str) -> bool;

    fn service(&self, class: &str) -> Option<Instance>;
}

impl<L: ServiceLocator + ?Sized> ServiceLocator for Arc<L> {
    fn is_service(&self, class: &str) -> bool {
        (**self).is_service(class)
    }

    fn service(&self, class: &str) -> Option<Instance> {
        (**self).service(class)
    }
}

/// Localizador en memoria: clase -> instancia compartida.
#[derive(Debug, Clone, Default)]
pub struct ServiceMap {
    services: IndexMap<String, Instance>,
}

impl ServiceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra `instance` bajo su tipo y cada interfaz que implementa.
    pub fn with(mut self, instance: Instance) -> Self {
        self.services.insert(instance.type_name().to_string(), instance.clone());
        for interface in instance.interfaces() {
            self.services.insert(interface.clone(), instance.clone());
        }
        self
    }
}

impl ServiceLocator for ServiceMap {
    fn is_service(&self, class: &str) -> bool {
        self.services.contains_key(class)
    }

    fn service(&self, class: &str) -> Option<Instance> {
        self.services.get(class).cloned()
    }
}

/// Para un parámetro de clase sin valor, pide el servicio al localizador.
#[derive(Debug, Clone)]
pub struct ServiceRegistryConverter<L> {
    locator: L,
}

impl<L: ServiceLocator> ServiceRegistryConverter<L> {
    pub fn new(locator: L) -> Self {
        Self { locator }
    }
}

impl<L: ServiceLocator> ParamConverter for ServiceRegistryConverter<L> {
    fn supports(&self, value: Option<&Value>, argument: &Argument, _data: &RequestData) -> bool {
        value.is_none() && argument.class_name().is_some_and(|class| self.locator.is_service(class))
    }

    fn convert(&self,
               _value: Option<&Value>,
               argument: &Argument,
               _data: &RequestData,
               _converters: &ConverterRegistry)
               -> Result<Conversion, ContextError> {
        let service = argument.class_name().and_then(|class| self.locator.service(class));
        Ok(service.map_or(Conversion::Declined, |s| Conversion::Converted(Value::Instance(s))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctx_core::TypeRef;

    #[derive(Debug)]
    struct Mailer;

    #[test]
    fn injects_registered_service_by_interface() {
        let mailer = Instance::new("SmtpMailer", Mailer).implementing(["Mailer"]);
        let converter = ServiceRegistryConverter::new(ServiceMap::new().with(mailer.clone()));
        let arg = Argument::new("mailer").typed(TypeRef::class("Mailer"));
        let data = RequestData::default();

        assert!(converter.supports(None, &arg, &data));
        assert!(!converter.supports(Some(&Value::from("x")), &arg, &data));
        let out = converter.convert(None, &arg, &data, &ConverterRegistry::new()).unwrap();
        assert!(matches!(out, Conversion::Converted(Value::Instance(i)) if i.ptr_eq(&mailer)));
    }
}
