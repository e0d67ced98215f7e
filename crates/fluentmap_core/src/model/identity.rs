//! Identity nodes: simple id with generator, and composite id with key parts.
//!
//! # Invariants
//! - `IdMapping` visits itself, then its columns, then its generator.
//! - `CompositeIdMapping` visits itself, then key properties, then key
//!   many-to-ones.

use crate::attributes::AttributeStore;
use crate::model::column::ColumnMapping;
use crate::model::type_name::TypeName;
use crate::model::visitor::MappingVisitor;
use serde::Serialize;
use std::collections::BTreeMap;

attribute_keys! {
    /// Simple identity attributes.
    pub enum IdAttr {
        Name => ("name", Text),
        Access => ("access", Text),
        Type => ("type", Text),
        UnsavedValue => ("unsaved-value", Text),
    }
}

attribute_keys! {
    /// Generator attributes.
    pub enum GeneratorAttr {
        Class => ("class", Text),
    }
}

attribute_keys! {
    /// Composite identity attributes.
    pub enum CompositeIdAttr {
        Name => ("name", Text),
        Access => ("access", Text),
        Mapped => ("mapped", Flag),
        UnsavedValue => ("unsaved-value", Text),
        Class => ("class", Text),
    }
}

attribute_keys! {
    /// Key property attributes.
    pub enum KeyPropertyAttr {
        Name => ("name", Text),
        Access => ("access", Text),
        Type => ("type", Text),
        Length => ("length", Number),
    }
}

attribute_keys! {
    /// Key many-to-one attributes.
    pub enum KeyManyToOneAttr {
        Name => ("name", Text),
        Access => ("access", Text),
        ForeignKey => ("foreign-key", Text),
        Lazy => ("lazy", Flag),
    }
}

/// Identity owned by a class mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Id(IdMapping),
    Composite(CompositeIdMapping),
}

impl Identity {
    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Id(id) => id.accept_visitor(visitor),
            Self::Composite(id) => id.accept_visitor(visitor),
        }
    }

    pub fn as_id(&self) -> Option<&IdMapping> {
        match self {
            Self::Id(id) => Some(id),
            Self::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeIdMapping> {
        match self {
            Self::Composite(id) => Some(id),
            Self::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GeneratorMapping {
    attributes: AttributeStore<GeneratorAttr>,
    params: BTreeMap<String, String>,
}

impl GeneratorMapping {
    pub(crate) fn new(attributes: AttributeStore<GeneratorAttr>, params: BTreeMap<String, String>) -> Self {
        Self { attributes, params }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_generator(self);
    }

    pub fn attributes(&self) -> &AttributeStore<GeneratorAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<GeneratorAttr> {
        &mut self.attributes
    }

    /// Generator class, e.g. `identity` or `hilo`.
    pub fn class(&self) -> &str {
        self.attributes.text(GeneratorAttr::Class)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdMapping {
    attributes: AttributeStore<IdAttr>,
    columns: Vec<ColumnMapping>,
    generator: Option<GeneratorMapping>,
}

impl IdMapping {
    pub(crate) fn new(
        attributes: AttributeStore<IdAttr>,
        columns: Vec<ColumnMapping>,
        generator: Option<GeneratorMapping>,
    ) -> Self {
        Self {
            attributes,
            columns,
            generator,
        }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_id(self);
        for column in &self.columns {
            column.accept_visitor(visitor);
        }
        if let Some(generator) = &self.generator {
            generator.accept_visitor(visitor);
        }
    }

    pub fn attributes(&self) -> &AttributeStore<IdAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<IdAttr> {
        &mut self.attributes
    }

    pub fn columns(&self) -> &[ColumnMapping] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<ColumnMapping> {
        &mut self.columns
    }

    pub fn generator(&self) -> Option<&GeneratorMapping> {
        self.generator.as_ref()
    }

    /// Returns the generator, creating an empty one when absent.
    pub(crate) fn generator_mut(&mut self) -> &mut GeneratorMapping {
        self.generator.get_or_insert_with(GeneratorMapping::default)
    }

    pub fn name(&self) -> &str {
        self.attributes.text(IdAttr::Name)
    }

    pub fn access(&self) -> &str {
        self.attributes.text(IdAttr::Access)
    }

    pub fn type_name(&self) -> &str {
        self.attributes.text(IdAttr::Type)
    }

    pub fn unsaved_value(&self) -> &str {
        self.attributes.text(IdAttr::UnsavedValue)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPropertyMapping {
    attributes: AttributeStore<KeyPropertyAttr>,
    columns: Vec<ColumnMapping>,
}

impl KeyPropertyMapping {
    pub(crate) fn new(attributes: AttributeStore<KeyPropertyAttr>, columns: Vec<ColumnMapping>) -> Self {
        Self {
            attributes,
            columns,
        }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_key_property(self);
        for column in &self.columns {
            column.accept_visitor(visitor);
        }
    }

    pub fn attributes(&self) -> &AttributeStore<KeyPropertyAttr> {
        &self.attributes
    }

    pub fn columns(&self) -> &[ColumnMapping] {
        &self.columns
    }

    pub fn name(&self) -> &str {
        self.attributes.text(KeyPropertyAttr::Name)
    }

    pub fn access(&self) -> &str {
        self.attributes.text(KeyPropertyAttr::Access)
    }

    pub fn type_name(&self) -> &str {
        self.attributes.text(KeyPropertyAttr::Type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyManyToOneMapping {
    attributes: AttributeStore<KeyManyToOneAttr>,
    containing_entity: TypeName,
    referenced_entity: TypeName,
    columns: Vec<ColumnMapping>,
}

impl KeyManyToOneMapping {
    pub(crate) fn new(
        attributes: AttributeStore<KeyManyToOneAttr>,
        containing_entity: TypeName,
        referenced_entity: TypeName,
        columns: Vec<ColumnMapping>,
    ) -> Self {
        Self {
            attributes,
            containing_entity,
            referenced_entity,
            columns,
        }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_key_many_to_one(self);
        visitor.register_dependency(&self.containing_entity, &self.referenced_entity);
        for column in &self.columns {
            column.accept_visitor(visitor);
        }
    }

    pub fn attributes(&self) -> &AttributeStore<KeyManyToOneAttr> {
        &self.attributes
    }

    pub fn columns(&self) -> &[ColumnMapping] {
        &self.columns
    }

    pub fn name(&self) -> &str {
        self.attributes.text(KeyManyToOneAttr::Name)
    }

    pub fn referenced_entity(&self) -> &TypeName {
        &self.referenced_entity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeIdMapping {
    attributes: AttributeStore<CompositeIdAttr>,
    key_properties: Vec<KeyPropertyMapping>,
    key_many_to_ones: Vec<KeyManyToOneMapping>,
}

impl CompositeIdMapping {
    pub(crate) fn new(
        attributes: AttributeStore<CompositeIdAttr>,
        key_properties: Vec<KeyPropertyMapping>,
        key_many_to_ones: Vec<KeyManyToOneMapping>,
    ) -> Self {
        Self {
            attributes,
            key_properties,
            key_many_to_ones,
        }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_composite_id(self);
        for key in &self.key_properties {
            key.accept_visitor(visitor);
        }
        for key in &self.key_many_to_ones {
            key.accept_visitor(visitor);
        }
    }

    pub fn attributes(&self) -> &AttributeStore<CompositeIdAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<CompositeIdAttr> {
        &mut self.attributes
    }

    pub fn key_properties(&self) -> &[KeyPropertyMapping] {
        &self.key_properties
    }

    pub fn key_many_to_ones(&self) -> &[KeyManyToOneMapping] {
        &self.key_many_to_ones
    }

    pub fn name(&self) -> &str {
        self.attributes.text(CompositeIdAttr::Name)
    }

    pub fn access(&self) -> &str {
        self.attributes.text(CompositeIdAttr::Access)
    }

    /// Whether the composite id is mapped onto a separate component class.
    pub fn mapped(&self) -> bool {
        self.attributes.flag(CompositeIdAttr::Mapped)
    }

    pub fn unsaved_value(&self) -> &str {
        self.attributes.text(CompositeIdAttr::UnsavedValue)
    }

    pub fn class(&self) -> &str {
        self.attributes.text(CompositeIdAttr::Class)
    }
}
