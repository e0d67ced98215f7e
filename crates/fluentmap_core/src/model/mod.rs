//! In-memory mapping model graph.
//!
//! # Responsibility
//! - Define one node type per mapping element, each owning its attribute
//!   store and child nodes.
//! - Expose the finished, read-only result of a pipeline build.
//!
//! # Invariants
//! - The graph is a strict tree: every node has one owner.
//! - Nodes are only mutated inside the crate (builders and the convention
//!   pass); callers receive shared references.
//! - Traversal order is fixed; see `class` and `identity`.

pub mod class;
pub mod column;
pub mod component;
pub mod identity;
pub mod property;
pub mod type_name;
pub mod values;
pub mod visitor;

pub use class::{ClassAttr, ClassMapping, SubclassAttr, SubclassKind, SubclassMapping};
pub use column::{ColumnAttr, ColumnMapping};
pub use component::{ComponentAttr, ComponentMapping, Members};
pub use identity::{
    CompositeIdAttr, CompositeIdMapping, GeneratorAttr, GeneratorMapping, IdAttr, IdMapping,
    Identity, KeyManyToOneAttr, KeyManyToOneMapping, KeyPropertyAttr, KeyPropertyMapping,
};
pub use property::{ManyToOneAttr, ManyToOneMapping, PropertyAttr, PropertyMapping};
pub use type_name::{TypeName, TypeNameError};
pub use values::{AccessStrategy, Cascade, Fetch, GeneratorKind, NotFound};
pub use visitor::{DependencyRecorder, MappingVisitor};

use crate::conventions::ConventionReport;
use serde::Serialize;

/// Finished mapping graph: top-level classes with subclasses attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingModel {
    classes: Vec<ClassMapping>,
    #[serde(skip)]
    convention_report: ConventionReport,
}

impl MappingModel {
    pub(crate) fn new(classes: Vec<ClassMapping>, convention_report: ConventionReport) -> Self {
        Self {
            classes,
            convention_report,
        }
    }

    /// Top-level classes in provider registration order.
    pub fn classes(&self) -> &[ClassMapping] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn find_class(&self, entity_type: &str) -> Option<&ClassMapping> {
        self.classes
            .iter()
            .find(|class| class.entity_type().matches(entity_type))
    }

    /// Depth-first search through every hierarchy.
    pub fn find_subclass(&self, entity_type: &str) -> Option<&SubclassMapping> {
        fn search<'a>(
            subclasses: &'a [SubclassMapping],
            entity_type: &str,
        ) -> Option<&'a SubclassMapping> {
            for subclass in subclasses {
                if subclass.entity_type().matches(entity_type) {
                    return Some(subclass);
                }
                if let Some(found) = search(subclass.subclasses(), entity_type) {
                    return Some(found);
                }
            }
            None
        }

        self.classes
            .iter()
            .find_map(|class| search(class.subclasses(), entity_type))
    }

    /// Convention pass statistics of the build that produced this model.
    pub fn convention_report(&self) -> ConventionReport {
        self.convention_report
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        for class in &self.classes {
            class.accept_visitor(visitor);
        }
    }
}
