//! Mapping provider seams consumed by the persistence pipeline.

use crate::mapping::class_map::ClassMap;
use crate::mapping::subclass_map::SubclassMap;
use crate::model::{ClassMapping, SubclassKind, SubclassMapping};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Source of one top-level class fragment.
pub trait ClassMappingProvider: Send + Sync {
    /// Raw entity identifier; validated when registered.
    fn entity_type(&self) -> &str;

    /// Returns a fresh fragment; never mutates the provider.
    fn class_mapping(&self) -> ClassMapping;
}

/// Source of one subclass fragment.
pub trait SubclassMappingProvider: Send + Sync {
    fn entity_type(&self) -> &str;

    /// Parent class or subclass this fragment extends.
    fn parent_entity(&self) -> Option<&str>;

    /// Returns a fresh fragment; `parent_kind` is the storage kind inherited
    /// from the parent hierarchy.
    fn subclass_mapping(&self, parent_kind: SubclassKind) -> SubclassMapping;
}

/// Registered provider, either a class or a subclass.
#[derive(Clone)]
pub enum MappingProvider {
    Class(Arc<dyn ClassMappingProvider>),
    Subclass(Arc<dyn SubclassMappingProvider>),
}

impl MappingProvider {
    pub fn class(provider: impl ClassMappingProvider + 'static) -> Self {
        Self::Class(Arc::new(provider))
    }

    pub fn subclass(provider: impl SubclassMappingProvider + 'static) -> Self {
        Self::Subclass(Arc::new(provider))
    }

    pub fn entity_type(&self) -> &str {
        match self {
            Self::Class(provider) => provider.entity_type(),
            Self::Subclass(provider) => provider.entity_type(),
        }
    }
}

impl Debug for MappingProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class(provider) => f
                .debug_tuple("Class")
                .field(&provider.entity_type())
                .finish(),
            Self::Subclass(provider) => f
                .debug_struct("Subclass")
                .field("entity_type", &provider.entity_type())
                .field("extends", &provider.parent_entity())
                .finish(),
        }
    }
}

/// Anything that can be handed to `PersistenceInstructions::add_source`.
pub trait ProviderSource {
    fn into_providers(self) -> Vec<MappingProvider>;
}

impl ProviderSource for MappingProvider {
    fn into_providers(self) -> Vec<MappingProvider> {
        vec![self]
    }
}

impl ProviderSource for Vec<MappingProvider> {
    fn into_providers(self) -> Vec<MappingProvider> {
        self
    }
}

impl ProviderSource for ClassMap {
    fn into_providers(self) -> Vec<MappingProvider> {
        vec![MappingProvider::class(self)]
    }
}

impl ProviderSource for SubclassMap {
    fn into_providers(self) -> Vec<MappingProvider> {
        vec![MappingProvider::subclass(self)]
    }
}

/// Ordered batch of fluent mappings, registered in one `add_source` call.
#[derive(Debug, Clone, Default)]
pub struct FluentMappings {
    providers: Vec<MappingProvider>,
}

impl FluentMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, map: ClassMap) -> &mut Self {
        self.providers.push(MappingProvider::class(map));
        self
    }

    pub fn add_subclass(&mut self, map: SubclassMap) -> &mut Self {
        self.providers.push(MappingProvider::subclass(map));
        self
    }

    /// Adds a hand-written provider.
    pub fn add(&mut self, provider: MappingProvider) -> &mut Self {
        self.providers.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ProviderSource for FluentMappings {
    fn into_providers(self) -> Vec<MappingProvider> {
        self.providers
    }
}

#[cfg(test)]
mod tests {
    use super::{FluentMappings, MappingProvider, ProviderSource};
    use crate::mapping::{ClassMap, SubclassMap};

    #[test]
    fn batch_keeps_registration_order() {
        let mut mappings = FluentMappings::new();
        let mut child = SubclassMap::new("shop::Book");
        child.extends("shop::Product");
        mappings
            .add_subclass(child)
            .add_class(ClassMap::new("shop::Product"));

        let providers = mappings.into_providers();
        let names: Vec<&str> = providers.iter().map(MappingProvider::entity_type).collect();
        assert_eq!(names, vec!["shop::Book", "shop::Product"]);
        assert!(matches!(providers[0], MappingProvider::Subclass(_)));
    }

    #[test]
    fn debug_names_the_entity() {
        let provider = MappingProvider::class(ClassMap::new("shop::Product"));
        assert_eq!(format!("{provider:?}"), "Class(\"shop::Product\")");
    }
}
