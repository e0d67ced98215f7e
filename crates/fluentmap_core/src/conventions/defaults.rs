//! Built-in naming conventions, appended after user conventions when
//! `BuildOptions::default_conventions` is on.

use crate::conventions::instances::{
    ClassInstance, IdInstance, ManyToOneInstance, PropertyInstance, SubclassInstance,
};
use crate::conventions::{
    ClassConvention, Convention, ConventionCollection, IdConvention, ManyToOneConvention,
    PropertyConvention, SubclassConvention,
};
use crate::model::{Cascade, GeneratorKind};

/// Tables named after the entity's short name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableNameConvention;

impl ClassConvention for TableNameConvention {
    fn apply(&self, instance: &mut ClassInstance<'_>) {
        let table = instance.mapping().entity_type().short_name().to_string();
        instance.table(table);
    }
}

impl SubclassConvention for TableNameConvention {
    fn apply(&self, instance: &mut SubclassInstance<'_>) {
        let table = instance.mapping().entity_type().short_name().to_string();
        instance.table(table);
    }
}

/// Property columns named after the property.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyColumnConvention;

impl PropertyConvention for PropertyColumnConvention {
    fn apply(&self, instance: &mut PropertyInstance<'_>) {
        let name = instance.mapping().name().to_string();
        instance.column(name);
    }
}

/// `<property>_id` columns and `FK_<Entity>To<Property>` constraint names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForeignKeyConvention;

impl ManyToOneConvention for ForeignKeyConvention {
    fn apply(&self, instance: &mut ManyToOneInstance<'_>) {
        let property = instance.mapping().name().to_string();
        let foreign_key = format!(
            "FK_{}To{}",
            instance.mapping().containing_entity().short_name(),
            property
        );
        instance
            .column(format!("{property}_id"))
            .foreign_key(foreign_key)
            .cascade(Cascade::All);
    }
}

/// Id columns named after the id; `native` generation when none is mapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdColumnConvention;

impl IdConvention for IdColumnConvention {
    fn apply(&self, instance: &mut IdInstance<'_>) {
        let name = instance.mapping().name().to_string();
        if !name.is_empty() {
            instance.column(name);
        }
        instance.generated_by(GeneratorKind::Native);
    }
}

/// The built-in set, in the order it is appended.
pub fn builtin_conventions() -> ConventionCollection {
    [
        Convention::class(TableNameConvention),
        Convention::joined_subclass(TableNameConvention),
        Convention::id(IdColumnConvention),
        Convention::property(PropertyColumnConvention),
        Convention::many_to_one(ForeignKeyConvention),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::builtin_conventions;
    use crate::conventions::ConventionEngine;
    use crate::mapping::{ClassMap, MemberMapping, SubclassMap};
    use crate::model::{SubclassKind, TypeName};

    #[test]
    fn builtins_fill_unset_names_only() {
        let mut order = ClassMap::new("shop::Order");
        order.table("ORDERS");
        order.id("OrderId");
        order.map("Total");
        order.map("Notes").column("NOTE_TEXT");
        order.references("Customer", TypeName::parse("shop::Customer").expect("type name"));
        let mut classes = vec![order.build()];
        let mut express = SubclassMap::new("shop::ExpressOrder");
        express.extends("shop::Order");
        classes[0]
            .subclasses_mut()
            .push(express.build(SubclassKind::Joined));

        let conventions = builtin_conventions();
        ConventionEngine::new([&conventions]).apply(&mut classes);

        let order = &classes[0];
        assert_eq!(order.table_name(), "ORDERS");
        let id = order.identity().and_then(|identity| identity.as_id()).expect("id");
        assert_eq!(id.columns()[0].name(), "OrderId");
        assert_eq!(id.generator().map(|g| g.class()), Some("native"));
        assert_eq!(order.members().properties()[0].columns()[0].name(), "Total");
        assert_eq!(order.members().properties()[1].columns()[0].name(), "NOTE_TEXT");
        let customer = &order.members().references()[0];
        assert_eq!(customer.columns()[0].name(), "Customer_id");
        assert_eq!(customer.foreign_key(), "FK_OrderToCustomer");
        assert_eq!(customer.cascade(), "all");
        assert_eq!(order.subclasses()[0].table_name(), "ExpressOrder");
    }
}
