//! Member lists and the component node.
//!
//! `Members` is the ordered child list shared by classes, subclasses and
//! components: properties, then many-to-ones, then components.

use crate::attributes::AttributeStore;
use crate::model::property::{ManyToOneMapping, PropertyMapping};
use crate::model::type_name::TypeName;
use crate::model::visitor::MappingVisitor;
use serde::Serialize;

attribute_keys! {
    /// Component attributes.
    pub enum ComponentAttr {
        Name => ("name", Text),
        Access => ("access", Text),
        Class => ("class", Text),
        Insert => ("insert", Flag),
        Update => ("update", Flag),
        Unique => ("unique", Flag),
        OptimisticLock => ("optimistic-lock", Flag),
        Lazy => ("lazy", Flag),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Members {
    pub(crate) properties: Vec<PropertyMapping>,
    pub(crate) references: Vec<ManyToOneMapping>,
    pub(crate) components: Vec<ComponentMapping>,
}

impl Members {
    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        for property in &self.properties {
            property.accept_visitor(visitor);
        }
        for reference in &self.references {
            reference.accept_visitor(visitor);
        }
        for component in &self.components {
            component.accept_visitor(visitor);
        }
    }

    pub fn properties(&self) -> &[PropertyMapping] {
        &self.properties
    }

    pub fn references(&self) -> &[ManyToOneMapping] {
        &self.references
    }

    pub fn components(&self) -> &[ComponentMapping] {
        &self.components
    }

    pub fn property(&self, name: &str) -> Option<&PropertyMapping> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn reference(&self, name: &str) -> Option<&ManyToOneMapping> {
        self.references.iter().find(|r| r.name() == name)
    }

    pub fn component(&self, name: &str) -> Option<&ComponentMapping> {
        self.components.iter().find(|c| c.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentMapping {
    attributes: AttributeStore<ComponentAttr>,
    containing_entity: TypeName,
    members: Members,
}

impl ComponentMapping {
    pub(crate) fn new(
        attributes: AttributeStore<ComponentAttr>,
        containing_entity: TypeName,
        members: Members,
    ) -> Self {
        Self {
            attributes,
            containing_entity,
            members,
        }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_component(self);
        self.members.accept_visitor(visitor);
    }

    pub fn attributes(&self) -> &AttributeStore<ComponentAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<ComponentAttr> {
        &mut self.attributes
    }

    pub fn containing_entity(&self) -> &TypeName {
        &self.containing_entity
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    pub fn name(&self) -> &str {
        self.attributes.text(ComponentAttr::Name)
    }

    pub fn access(&self) -> &str {
        self.attributes.text(ComponentAttr::Access)
    }

    pub fn class(&self) -> &str {
        self.attributes.text(ComponentAttr::Class)
    }

    pub fn insert(&self) -> bool {
        self.attributes.flag(ComponentAttr::Insert)
    }

    pub fn update(&self) -> bool {
        self.attributes.flag(ComponentAttr::Update)
    }

    pub fn unique(&self) -> bool {
        self.attributes.flag(ComponentAttr::Unique)
    }

    pub fn optimistic_lock(&self) -> bool {
        self.attributes.flag(ComponentAttr::OptimisticLock)
    }

    pub fn lazy(&self) -> bool {
        self.attributes.flag(ComponentAttr::Lazy)
    }
}
