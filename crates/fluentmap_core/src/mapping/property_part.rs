//! Property and many-to-one builders.

use crate::attributes::AttributeStore;
use crate::mapping::NotFlag;
use crate::model::column::columns_from;
use crate::model::{
    Cascade, ColumnAttr, Fetch, ManyToOneAttr, ManyToOneMapping, NotFound, PropertyAttr,
    PropertyMapping, TypeName,
};

/// Builder for one value property.
#[derive(Debug, Clone)]
pub struct PropertyPart {
    attributes: AttributeStore<PropertyAttr>,
    column_names: Vec<String>,
    column_template: AttributeStore<ColumnAttr>,
    not: NotFlag,
}

impl PropertyPart {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let mut attributes = AttributeStore::new();
        attributes.set(PropertyAttr::Name, name.into());
        Self {
            attributes,
            column_names: Vec::new(),
            column_template: AttributeStore::new(),
            not: NotFlag::default(),
        }
    }

    fn store(&mut self) -> &mut AttributeStore<PropertyAttr> {
        &mut self.attributes
    }

    fn columns_store(&mut self, mut apply: impl FnMut(&mut AttributeStore<ColumnAttr>)) {
        apply(&mut self.column_template);
    }

    /// Inverts the next boolean setter.
    pub fn not(&mut self) -> &mut Self {
        self.not.toggle();
        self
    }

    /// Adds a named column; repeat for multi-column properties.
    pub fn column(&mut self, name: impl Into<String>) -> &mut Self {
        self.column_names.push(name.into());
        self
    }

    access_setter!(set: PropertyAttr::Access);

    text_setters! { set:
        /// Custom ORM type name.
        custom_type => PropertyAttr::Type;
        formula => PropertyAttr::Formula;
        /// Generation timing: `never`, `insert` or `always`.
        generated => PropertyAttr::Generated;
    }

    flag_setters! { set:
        insert => PropertyAttr::Insert;
        update => PropertyAttr::Update;
        optimistic_lock => PropertyAttr::OptimisticLock;
        lazy_load => PropertyAttr::Lazy;
    }

    column_setters!(set);

    /// Column check constraint.
    pub fn check(&mut self, constraint: impl Into<String>) -> &mut Self {
        self.column_template.set(ColumnAttr::Check, constraint.into());
        self
    }

    /// Column default value, as SQL.
    pub fn default_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.column_template.set(ColumnAttr::Default, value.into());
        self
    }

    pub(crate) fn build(&self, owner: &TypeName) -> PropertyMapping {
        PropertyMapping::new(
            self.attributes.clone(),
            owner.clone(),
            columns_from(&self.column_names, &self.column_template),
        )
    }
}

/// Builder for one many-to-one association.
#[derive(Debug, Clone)]
pub struct ManyToOnePart {
    attributes: AttributeStore<ManyToOneAttr>,
    referenced_entity: TypeName,
    column_names: Vec<String>,
    column_template: AttributeStore<ColumnAttr>,
    not: NotFlag,
}

impl ManyToOnePart {
    pub(crate) fn new(name: impl Into<String>, referenced_entity: TypeName) -> Self {
        let mut attributes = AttributeStore::new();
        attributes.set(ManyToOneAttr::Name, name.into());
        Self {
            attributes,
            referenced_entity,
            column_names: Vec::new(),
            column_template: AttributeStore::new(),
            not: NotFlag::default(),
        }
    }

    fn store(&mut self) -> &mut AttributeStore<ManyToOneAttr> {
        &mut self.attributes
    }

    fn columns_store(&mut self, mut apply: impl FnMut(&mut AttributeStore<ColumnAttr>)) {
        apply(&mut self.column_template);
    }

    /// Inverts the next boolean setter.
    pub fn not(&mut self) -> &mut Self {
        self.not.toggle();
        self
    }

    /// Adds a foreign-key column; repeat for composite keys.
    pub fn column(&mut self, name: impl Into<String>) -> &mut Self {
        self.column_names.push(name.into());
        self
    }

    access_setter!(set: ManyToOneAttr::Access);

    pub fn cascade(&mut self, cascade: Cascade) -> &mut Self {
        self.attributes.set(ManyToOneAttr::Cascade, cascade.as_str());
        self
    }

    pub fn fetch(&mut self, fetch: Fetch) -> &mut Self {
        self.attributes.set(ManyToOneAttr::Fetch, fetch.as_str());
        self
    }

    pub fn not_found(&mut self, not_found: NotFound) -> &mut Self {
        self.attributes.set(ManyToOneAttr::NotFound, not_found.as_str());
        self
    }

    text_setters! { set:
        /// Foreign-key constraint name.
        foreign_key => ManyToOneAttr::ForeignKey;
        property_ref => ManyToOneAttr::PropertyRef;
    }

    flag_setters! { set:
        lazy_load => ManyToOneAttr::Lazy;
        insert => ManyToOneAttr::Insert;
        update => ManyToOneAttr::Update;
        optimistic_lock => ManyToOneAttr::OptimisticLock;
    }

    column_setters!(set);

    pub(crate) fn build(&self, owner: &TypeName) -> ManyToOneMapping {
        ManyToOneMapping::new(
            self.attributes.clone(),
            owner.clone(),
            self.referenced_entity.clone(),
            columns_from(&self.column_names, &self.column_template),
        )
    }
}
