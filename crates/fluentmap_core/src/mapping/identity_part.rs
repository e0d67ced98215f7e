//! Identity builders: simple id and composite id.

use crate::attributes::AttributeStore;
use crate::mapping::NotFlag;
use crate::model::column::columns_from;
use crate::model::{
    ColumnAttr, CompositeIdAttr, CompositeIdMapping, GeneratorAttr,
    GeneratorKind, GeneratorMapping, IdAttr, IdMapping, KeyManyToOneAttr, KeyManyToOneMapping,
    KeyPropertyAttr, KeyPropertyMapping, TypeName,
};
use std::collections::BTreeMap;

/// Builder for a simple identity.
#[derive(Debug, Clone)]
pub struct IdentityPart {
    attributes: AttributeStore<IdAttr>,
    column_names: Vec<String>,
    column_template: AttributeStore<ColumnAttr>,
    generator: Option<GeneratorKind>,
    generator_params: BTreeMap<String, String>,
}

impl IdentityPart {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let mut attributes = AttributeStore::new();
        attributes.set(IdAttr::Name, name.into());
        Self {
            attributes,
            column_names: Vec::new(),
            column_template: AttributeStore::new(),
            generator: None,
            generator_params: BTreeMap::new(),
        }
    }

    fn store(&mut self) -> &mut AttributeStore<IdAttr> {
        &mut self.attributes
    }

    pub fn column(&mut self, name: impl Into<String>) -> &mut Self {
        self.column_names.push(name.into());
        self
    }

    access_setter!(set: IdAttr::Access);

    text_setters! { set:
        /// Custom ORM type name.
        custom_type => IdAttr::Type;
        /// Identifier value that marks a transient instance.
        unsaved_value => IdAttr::UnsavedValue;
    }

    pub fn length(&mut self, value: u32) -> &mut Self {
        self.column_template.set(ColumnAttr::Length, i64::from(value));
        self
    }

    pub fn generated_by(&mut self, kind: GeneratorKind) -> &mut Self {
        self.generator = Some(kind);
        self
    }

    /// Adds a generator parameter, e.g. `max_lo` for `hilo`.
    pub fn generator_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.generator_params.insert(key.into(), value.into());
        self
    }

    pub(crate) fn build(&self) -> IdMapping {
        let generator = self.generator.as_ref().map(|kind| {
            let mut attributes = AttributeStore::new();
            attributes.set(GeneratorAttr::Class, kind.as_str());
            GeneratorMapping::new(attributes, self.generator_params.clone())
        });
        IdMapping::new(
            self.attributes.clone(),
            columns_from(&self.column_names, &self.column_template),
            generator,
        )
    }
}

#[derive(Debug, Clone)]
struct KeyPropertyPart {
    attributes: AttributeStore<KeyPropertyAttr>,
    column_names: Vec<String>,
}

#[derive(Debug, Clone)]
struct KeyReferencePart {
    attributes: AttributeStore<KeyManyToOneAttr>,
    referenced_entity: TypeName,
    column_names: Vec<String>,
}

/// Builder for a composite identity made of key properties and key
/// references.
#[derive(Debug, Clone)]
pub struct CompositeIdentityPart {
    attributes: AttributeStore<CompositeIdAttr>,
    key_properties: Vec<KeyPropertyPart>,
    key_references: Vec<KeyReferencePart>,
    not: NotFlag,
}

impl CompositeIdentityPart {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let mut attributes = AttributeStore::new();
        let name = name.into();
        if !name.trim().is_empty() {
            attributes.set(CompositeIdAttr::Name, name);
        }
        Self {
            attributes,
            key_properties: Vec::new(),
            key_references: Vec::new(),
            not: NotFlag::default(),
        }
    }

    fn store(&mut self) -> &mut AttributeStore<CompositeIdAttr> {
        &mut self.attributes
    }

    /// Inverts the next boolean setter.
    pub fn not(&mut self) -> &mut Self {
        self.not.toggle();
        self
    }

    /// Adds a key property whose column is named after it.
    pub fn key_property(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        let column = name.clone();
        self.key_property_column(name, column)
    }

    pub fn key_property_column(
        &mut self,
        name: impl Into<String>,
        column: impl Into<String>,
    ) -> &mut Self {
        let mut attributes = AttributeStore::new();
        attributes.set(KeyPropertyAttr::Name, name.into());
        self.key_properties.push(KeyPropertyPart {
            attributes,
            column_names: vec![column.into()],
        });
        self
    }

    /// Adds a key many-to-one to `target`, column `<name>_id`.
    pub fn key_reference(&mut self, name: impl Into<String>, target: TypeName) -> &mut Self {
        let name = name.into();
        let column = format!("{name}_id");
        self.key_reference_column(name, target, column)
    }

    pub fn key_reference_column(
        &mut self,
        name: impl Into<String>,
        target: TypeName,
        column: impl Into<String>,
    ) -> &mut Self {
        let mut attributes = AttributeStore::new();
        attributes.set(KeyManyToOneAttr::Name, name.into());
        self.key_references.push(KeyReferencePart {
            attributes,
            referenced_entity: target,
            column_names: vec![column.into()],
        });
        self
    }

    access_setter!(set: CompositeIdAttr::Access);

    text_setters! { set:
        unsaved_value => CompositeIdAttr::UnsavedValue;
        /// Component class holding the key when `mapped`.
        component_class => CompositeIdAttr::Class;
    }

    flag_setters! { set:
        /// Maps the key onto a separate component class.
        mapped => CompositeIdAttr::Mapped;
    }

    pub(crate) fn build(&self, owner: &TypeName) -> CompositeIdMapping {
        let no_template = AttributeStore::new();
        let key_properties = self
            .key_properties
            .iter()
            .map(|key| {
                KeyPropertyMapping::new(
                    key.attributes.clone(),
                    columns_from(&key.column_names, &no_template),
                )
            })
            .collect();
        let key_many_to_ones = self
            .key_references
            .iter()
            .map(|key| {
                KeyManyToOneMapping::new(
                    key.attributes.clone(),
                    owner.clone(),
                    key.referenced_entity.clone(),
                    columns_from(&key.column_names, &no_template),
                )
            })
            .collect();
        CompositeIdMapping::new(self.attributes.clone(), key_properties, key_many_to_ones)
    }
}
