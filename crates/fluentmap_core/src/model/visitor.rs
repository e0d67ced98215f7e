//! Double-dispatch visitor contract consumed by emitters.
//!
//! Nodes call the matching `process_*` method and then visit their children
//! in a fixed order; visitors only ever receive shared references.

use crate::model::class::{ClassMapping, SubclassMapping};
use crate::model::column::ColumnMapping;
use crate::model::component::ComponentMapping;
use crate::model::identity::{
    CompositeIdMapping, GeneratorMapping, IdMapping, KeyManyToOneMapping, KeyPropertyMapping,
};
use crate::model::property::{ManyToOneMapping, PropertyMapping};
use crate::model::type_name::TypeName;

/// One callback per node variant. Every method defaults to a no-op.
pub trait MappingVisitor {
    fn process_class(&mut self, _mapping: &ClassMapping) {}
    fn process_subclass(&mut self, _mapping: &SubclassMapping) {}
    fn process_id(&mut self, _mapping: &IdMapping) {}
    fn process_composite_id(&mut self, _mapping: &CompositeIdMapping) {}
    fn process_key_property(&mut self, _mapping: &KeyPropertyMapping) {}
    fn process_key_many_to_one(&mut self, _mapping: &KeyManyToOneMapping) {}
    fn process_property(&mut self, _mapping: &PropertyMapping) {}
    fn process_many_to_one(&mut self, _mapping: &ManyToOneMapping) {}
    fn process_component(&mut self, _mapping: &ComponentMapping) {}
    fn process_column(&mut self, _mapping: &ColumnMapping) {}
    fn process_generator(&mut self, _mapping: &GeneratorMapping) {}

    /// Called while visiting an association: `dependent` holds a foreign key
    /// to `dependency`. Ordering entities by these edges is left to the caller.
    fn register_dependency(&mut self, _dependent: &TypeName, _dependency: &TypeName) {}
}

/// Visitor that only collects dependency edges, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyRecorder {
    edges: Vec<(TypeName, TypeName)>,
}

impl DependencyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> &[(TypeName, TypeName)] {
        &self.edges
    }

    /// Entities `dependent` references.
    pub fn dependencies_of(&self, dependent: &TypeName) -> Vec<&TypeName> {
        self.edges
            .iter()
            .filter(|(from, _)| from == dependent)
            .map(|(_, to)| to)
            .collect()
    }
}

impl MappingVisitor for DependencyRecorder {
    fn register_dependency(&mut self, dependent: &TypeName, dependency: &TypeName) {
        let edge = (dependent.clone(), dependency.clone());
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }
}
