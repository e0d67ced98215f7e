//! Value property and many-to-one association nodes.

use crate::attributes::AttributeStore;
use crate::model::column::ColumnMapping;
use crate::model::type_name::TypeName;
use crate::model::visitor::MappingVisitor;
use serde::Serialize;

attribute_keys! {
    /// Property attributes.
    pub enum PropertyAttr {
        Name => ("name", Text),
        Access => ("access", Text),
        Insert => ("insert", Flag),
        Update => ("update", Flag),
        Formula => ("formula", Text),
        OptimisticLock => ("optimistic-lock", Flag),
        Generated => ("generated", Text),
        Type => ("type", Text),
        Lazy => ("lazy", Flag),
    }
}

attribute_keys! {
    /// Many-to-one attributes.
    pub enum ManyToOneAttr {
        Name => ("name", Text),
        Access => ("access", Text),
        Cascade => ("cascade", Text),
        Fetch => ("fetch", Text),
        Lazy => ("lazy", Flag),
        NotFound => ("not-found", Text),
        ForeignKey => ("foreign-key", Text),
        Insert => ("insert", Flag),
        Update => ("update", Flag),
        PropertyRef => ("property-ref", Text),
        OptimisticLock => ("optimistic-lock", Flag),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyMapping {
    attributes: AttributeStore<PropertyAttr>,
    containing_entity: TypeName,
    columns: Vec<ColumnMapping>,
}

impl PropertyMapping {
    pub(crate) fn new(
        attributes: AttributeStore<PropertyAttr>,
        containing_entity: TypeName,
        columns: Vec<ColumnMapping>,
    ) -> Self {
        Self {
            attributes,
            containing_entity,
            columns,
        }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_property(self);
        for column in &self.columns {
            column.accept_visitor(visitor);
        }
    }

    pub fn attributes(&self) -> &AttributeStore<PropertyAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<PropertyAttr> {
        &mut self.attributes
    }

    pub fn containing_entity(&self) -> &TypeName {
        &self.containing_entity
    }

    pub fn columns(&self) -> &[ColumnMapping] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<ColumnMapping> {
        &mut self.columns
    }

    pub fn name(&self) -> &str {
        self.attributes.text(PropertyAttr::Name)
    }

    pub fn access(&self) -> &str {
        self.attributes.text(PropertyAttr::Access)
    }

    pub fn insert(&self) -> bool {
        self.attributes.flag(PropertyAttr::Insert)
    }

    pub fn update(&self) -> bool {
        self.attributes.flag(PropertyAttr::Update)
    }

    pub fn formula(&self) -> &str {
        self.attributes.text(PropertyAttr::Formula)
    }

    pub fn optimistic_lock(&self) -> bool {
        self.attributes.flag(PropertyAttr::OptimisticLock)
    }

    pub fn generated(&self) -> &str {
        self.attributes.text(PropertyAttr::Generated)
    }

    pub fn type_name(&self) -> &str {
        self.attributes.text(PropertyAttr::Type)
    }

    pub fn lazy(&self) -> bool {
        self.attributes.flag(PropertyAttr::Lazy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManyToOneMapping {
    attributes: AttributeStore<ManyToOneAttr>,
    containing_entity: TypeName,
    referenced_entity: TypeName,
    columns: Vec<ColumnMapping>,
}

impl ManyToOneMapping {
    pub(crate) fn new(
        attributes: AttributeStore<ManyToOneAttr>,
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

    /// Visits the node, records the entity dependency, then visits columns.
    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_many_to_one(self);
        visitor.register_dependency(&self.containing_entity, &self.referenced_entity);
        for column in &self.columns {
            column.accept_visitor(visitor);
        }
    }

    pub fn attributes(&self) -> &AttributeStore<ManyToOneAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<ManyToOneAttr> {
        &mut self.attributes
    }

    pub fn containing_entity(&self) -> &TypeName {
        &self.containing_entity
    }

    pub fn referenced_entity(&self) -> &TypeName {
        &self.referenced_entity
    }

    pub fn columns(&self) -> &[ColumnMapping] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<ColumnMapping> {
        &mut self.columns
    }

    pub fn name(&self) -> &str {
        self.attributes.text(ManyToOneAttr::Name)
    }

    pub fn access(&self) -> &str {
        self.attributes.text(ManyToOneAttr::Access)
    }

    pub fn cascade(&self) -> &str {
        self.attributes.text(ManyToOneAttr::Cascade)
    }

    pub fn fetch(&self) -> &str {
        self.attributes.text(ManyToOneAttr::Fetch)
    }

    pub fn lazy(&self) -> bool {
        self.attributes.flag(ManyToOneAttr::Lazy)
    }

    pub fn not_found(&self) -> &str {
        self.attributes.text(ManyToOneAttr::NotFound)
    }

    pub fn foreign_key(&self) -> &str {
        self.attributes.text(ManyToOneAttr::ForeignKey)
    }

    pub fn insert(&self) -> bool {
        self.attributes.flag(ManyToOneAttr::Insert)
    }

    pub fn update(&self) -> bool {
        self.attributes.flag(ManyToOneAttr::Update)
    }

    pub fn property_ref(&self) -> &str {
        self.attributes.text(ManyToOneAttr::PropertyRef)
    }

    pub fn optimistic_lock(&self) -> bool {
        self.attributes.flag(ManyToOneAttr::OptimisticLock)
    }
}
