//! Graph walk that offers every node to the matching conventions.
//!
//! # Invariants
//! - Nodes are visited in the same order the visitor contract uses.
//! - For each node, conventions run in registration order.
//! - A convention is only applied when its `accept` returns true.

use crate::conventions::instances::{
    ClassInstance, ComponentInstance, CompositeIdInstance, IdInstance, ManyToOneInstance,
    PropertyInstance, SubclassInstance,
};
use crate::conventions::{Convention, ConventionCollection, SubclassConvention};
use crate::model::{ClassMapping, Identity, Members, SubclassKind, SubclassMapping};
use log::debug;

/// Convention pass statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConventionReport {
    /// Node offers made to conventions of the matching capability.
    pub evaluated: usize,
    /// Offers whose `accept` returned true and that ran `apply`. Counts
    /// runs, not landed writes: an `apply` whose writes all hit explicit
    /// values still counts.
    pub accepted: usize,
}

/// One convention pass over freshly built classes.
pub struct ConventionEngine<'c> {
    conventions: Vec<&'c Convention>,
    report: ConventionReport,
}

macro_rules! offer {
    ($engine:ident, $node:expr, $variant:ident, $instance:ident) => {
        for convention in $engine.conventions.iter().copied() {
            if let Convention::$variant(convention) = convention {
                let mut instance = $instance::new(&mut *$node);
                $engine.report.evaluated += 1;
                if convention.accept(&instance) {
                    convention.apply(&mut instance);
                    $engine.report.accepted += 1;
                }
            }
        }
    };
}

impl<'c> ConventionEngine<'c> {
    /// Chains collections; earlier collections take precedence.
    pub fn new<I>(collections: I) -> Self
    where
        I: IntoIterator<Item = &'c ConventionCollection>,
    {
        Self {
            conventions: collections
                .into_iter()
                .flat_map(ConventionCollection::iter)
                .collect(),
            report: ConventionReport::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }

    /// Runs the pass and returns its statistics.
    pub fn apply(mut self, classes: &mut [ClassMapping]) -> ConventionReport {
        if self.conventions.is_empty() {
            return self.report;
        }
        for class in classes.iter_mut() {
            self.class(class);
        }
        debug!(
            "event=conventions_apply module=conventions status=ok conventions={} evaluated={} accepted={}",
            self.conventions.len(),
            self.report.evaluated,
            self.report.accepted
        );
        self.report
    }

    fn class(&mut self, class: &mut ClassMapping) {
        offer!(self, class, Class, ClassInstance);
        match class.identity_mut() {
            Some(Identity::Id(id)) => {
                offer!(self, id, Id, IdInstance);
            }
            Some(Identity::Composite(id)) => {
                offer!(self, id, CompositeId, CompositeIdInstance);
            }
            None => {}
        }
        self.members(class.members_mut());
        for subclass in class.subclasses_mut().iter_mut() {
            self.subclass(subclass);
        }
    }

    fn subclass(&mut self, subclass: &mut SubclassMapping) {
        let kind = subclass.kind();
        for convention in self.conventions.iter().copied() {
            let convention: &dyn SubclassConvention = match convention {
                Convention::Subclass(convention) => &**convention,
                Convention::JoinedSubclass(convention) if kind == SubclassKind::Joined => {
                    &**convention
                }
                Convention::DiscriminatedSubclass(convention)
                    if kind == SubclassKind::Discriminated =>
                {
                    &**convention
                }
                _ => continue,
            };
            let mut instance = SubclassInstance::new(&mut *subclass);
            self.report.evaluated += 1;
            if convention.accept(&instance) {
                convention.apply(&mut instance);
                self.report.accepted += 1;
            }
        }
        self.members(subclass.members_mut());
        for child in subclass.subclasses_mut().iter_mut() {
            self.subclass(child);
        }
    }

    fn members(&mut self, members: &mut Members) {
        for property in members.properties.iter_mut() {
            offer!(self, property, Property, PropertyInstance);
        }
        for reference in members.references.iter_mut() {
            offer!(self, reference, ManyToOne, ManyToOneInstance);
        }
        for component in members.components.iter_mut() {
            offer!(self, component, Component, ComponentInstance);
            self.members(component.members_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConventionEngine, ConventionReport};
    use crate::conventions::{
        ClassConventionBuilder, ConventionCollection, JoinedSubclassConventionBuilder,
        PropertyConventionBuilder,
    };
    use crate::mapping::{ClassMap, MemberMapping, SubclassMap};
    use crate::model::SubclassKind;

    #[test]
    fn empty_engine_reports_nothing() {
        let conventions = ConventionCollection::new();
        let mut classes = vec![ClassMap::new("shop::Order").build()];
        let report = ConventionEngine::new([&conventions]).apply(&mut classes);
        assert_eq!(report, ConventionReport::default());
    }

    #[test]
    fn earlier_collection_wins() {
        let mut first = ConventionCollection::new();
        first.add(ClassConventionBuilder.always(|class| {
            class.table("first");
        }));
        let mut second = ConventionCollection::new();
        second.add(ClassConventionBuilder.always(|class| {
            class.table("second");
        }));

        let mut classes = vec![ClassMap::new("shop::Order").build()];
        let report = ConventionEngine::new([&first, &second]).apply(&mut classes);

        assert_eq!(classes[0].table_name(), "first");
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.accepted, 2);
    }

    #[test]
    fn accepted_counts_runs_even_when_explicit_values_block_every_write() {
        let mut order = ClassMap::new("shop::Order");
        order.table("ORDERS");
        let mut classes = vec![order.build()];
        let mut conventions = ConventionCollection::new();
        conventions.add(ClassConventionBuilder.always(|class| {
            class.table("orders");
        }));

        let report = ConventionEngine::new([&conventions]).apply(&mut classes);

        assert_eq!(classes[0].table_name(), "ORDERS");
        assert_eq!(report, ConventionReport { evaluated: 1, accepted: 1 });
    }

    #[test]
    fn component_members_and_subclasses_are_reached() {
        let mut order = ClassMap::new("shop::Order");
        order.component("Address", |address| {
            address.map("Street");
        });
        let mut classes = vec![order.build()];
        let mut express = SubclassMap::new("shop::ExpressOrder");
        express.extends("shop::Order").map("Courier");
        classes[0]
            .subclasses_mut()
            .push(express.build(SubclassKind::Joined));

        let mut conventions = ConventionCollection::new();
        conventions
            .add(PropertyConventionBuilder.always(|property| {
                property.length(64);
            }))
            .add(JoinedSubclassConventionBuilder.always(|subclass| {
                subclass.key_column("order_id");
            }));
        ConventionEngine::new([&conventions]).apply(&mut classes);

        let address = classes[0].members().component("Address").expect("component");
        assert_eq!(address.members().properties()[0].columns()[0].length(), 64);
        let express = &classes[0].subclasses()[0];
        assert_eq!(express.key_column(), "order_id");
        assert_eq!(express.members().properties()[0].columns()[0].length(), 64);
    }
}
