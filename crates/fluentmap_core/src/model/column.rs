//! Column node, owned by identity, property and association nodes.

use crate::attributes::AttributeStore;
use crate::model::visitor::MappingVisitor;
use serde::Serialize;

attribute_keys! {
    /// Column attributes.
    pub enum ColumnAttr {
        Name => ("name", Text),
        Length => ("length", Number),
        NotNull => ("not-null", Flag),
        Unique => ("unique", Flag),
        UniqueKey => ("unique-key", Text),
        Index => ("index", Text),
        SqlType => ("sql-type", Text),
        Check => ("check", Text),
        Default => ("default", Text),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ColumnMapping {
    attributes: AttributeStore<ColumnAttr>,
}

impl ColumnMapping {
    pub(crate) fn from_store(attributes: AttributeStore<ColumnAttr>) -> Self {
        Self { attributes }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_column(self);
    }

    pub fn attributes(&self) -> &AttributeStore<ColumnAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<ColumnAttr> {
        &mut self.attributes
    }

    /// Column name; empty until mapped or supplied by a convention.
    pub fn name(&self) -> &str {
        self.attributes.text(ColumnAttr::Name)
    }

    pub fn length(&self) -> i64 {
        self.attributes.number(ColumnAttr::Length)
    }

    pub fn not_null(&self) -> bool {
        self.attributes.flag(ColumnAttr::NotNull)
    }

    pub fn unique(&self) -> bool {
        self.attributes.flag(ColumnAttr::Unique)
    }

    pub fn unique_key(&self) -> &str {
        self.attributes.text(ColumnAttr::UniqueKey)
    }

    pub fn index(&self) -> &str {
        self.attributes.text(ColumnAttr::Index)
    }

    pub fn sql_type(&self) -> &str {
        self.attributes.text(ColumnAttr::SqlType)
    }

    pub fn check(&self) -> &str {
        self.attributes.text(ColumnAttr::Check)
    }

    pub fn default_value(&self) -> &str {
        self.attributes.text(ColumnAttr::Default)
    }
}

/// Builds the column list of a node from explicit names and shared settings.
///
/// With no names, a single unnamed column is produced so conventions can
/// still name it.
pub(crate) fn columns_from(
    names: &[String],
    template: &AttributeStore<ColumnAttr>,
) -> Vec<ColumnMapping> {
    if names.is_empty() {
        return vec![ColumnMapping::from_store(template.clone())];
    }
    names
        .iter()
        .map(|name| {
            let mut attributes = template.clone();
            attributes.set(ColumnAttr::Name, name.as_str());
            ColumnMapping::from_store(attributes)
        })
        .collect()
}

/// Names the first unnamed column (creating one if needed) via default write.
pub(crate) fn default_column_name(columns: &mut Vec<ColumnMapping>, name: &str) -> bool {
    if columns.is_empty() {
        columns.push(ColumnMapping::default());
    }
    columns
        .iter_mut()
        .find(|column| !column.attributes.is_specified(ColumnAttr::Name))
        .map(|column| column.attributes.set_default(ColumnAttr::Name, name))
        .unwrap_or(false)
}
