//! Fluent mapping builders and the providers that expose them.
//!
//! # Responsibility
//! - Accumulate explicit mapping calls into plain builder records.
//! - Snapshot a record into a fresh model fragment on every `build()`.
//!
//! # Invariants
//! - Every fluent setter is an explicit attribute write.
//! - Builders are pure accumulators: building twice yields equal fragments
//!   and never mutates the builder.
//! - `not()` inverts only the next boolean setter.

pub mod class_map;
pub mod component_part;
pub mod identity_part;
pub mod property_part;
pub mod provider;
pub mod subclass_map;

pub use class_map::ClassMap;
pub use component_part::ComponentPart;
pub use identity_part::{CompositeIdentityPart, IdentityPart};
pub use property_part::{ManyToOnePart, PropertyPart};
pub use provider::{
    ClassMappingProvider, FluentMappings, MappingProvider, ProviderSource,
    SubclassMappingProvider,
};
pub use subclass_map::SubclassMap;

use crate::model::{Members, TypeName};

/// Pending negation for the next boolean setter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NotFlag(bool);

impl NotFlag {
    pub(crate) fn toggle(&mut self) {
        self.0 = !self.0;
    }

    /// Returns the value the next boolean setter writes and clears negation.
    pub(crate) fn take(&mut self) -> bool {
        let value = !self.0;
        self.0 = false;
        value
    }
}

/// Member builders shared by classes, subclasses and components.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct MemberParts {
    properties: Vec<PropertyPart>,
    references: Vec<ManyToOnePart>,
    components: Vec<ComponentPart>,
}

impl MemberParts {
    pub(crate) fn build(&self, owner: &TypeName) -> Members {
        Members {
            properties: self
                .properties
                .iter()
                .map(|part| part.build(owner))
                .collect(),
            references: self
                .references
                .iter()
                .map(|part| part.build(owner))
                .collect(),
            components: self
                .components
                .iter()
                .map(|part| part.build(owner))
                .collect(),
        }
    }
}

/// Member declarations available on class, subclass and component builders.
pub trait MemberMapping {
    #[doc(hidden)]
    fn member_parts(&mut self) -> &mut MemberParts;

    /// Maps a value property.
    fn map(&mut self, name: impl Into<String>) -> &mut PropertyPart {
        let parts = self.member_parts();
        let index = parts.properties.len();
        parts.properties.push(PropertyPart::new(name));
        &mut parts.properties[index]
    }

    /// Maps a many-to-one association to `target`.
    fn references(&mut self, name: impl Into<String>, target: TypeName) -> &mut ManyToOnePart {
        let parts = self.member_parts();
        let index = parts.references.len();
        parts.references.push(ManyToOnePart::new(name, target));
        &mut parts.references[index]
    }

    /// Maps a component; `configure` declares its members.
    fn component(
        &mut self,
        name: impl Into<String>,
        configure: impl FnOnce(&mut ComponentPart),
    ) -> &mut ComponentPart {
        let parts = self.member_parts();
        let index = parts.components.len();
        parts.components.push(ComponentPart::new(name));
        let component = &mut parts.components[index];
        configure(component);
        component
    }
}
