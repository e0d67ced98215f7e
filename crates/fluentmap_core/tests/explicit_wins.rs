use fluentmap_core::{
    AccessStrategy, Cascade, ClassConventionBuilder, ClassMap, ClassMapping,
    ComponentConventionBuilder, CompositeIdConventionBuilder, ConventionCollection, Fetch,
    GeneratorKind, IdConventionBuilder, IdMapping, JoinedSubclassConventionBuilder,
    ManyToOneConventionBuilder, MappingModel, MemberMapping, NotFound, PersistenceInstructions,
    PropertyConventionBuilder, SubclassInstance, SubclassMap, SubclassMapping, TypeName,
};

fn build(sources: Vec<ClassOrSubclass>, conventions: ConventionCollection) -> MappingModel {
    let mut instructions = PersistenceInstructions::new();
    for source in sources {
        let registered = match source {
            ClassOrSubclass::Class(map) => instructions.add_source(map),
            ClassOrSubclass::Subclass(map) => instructions.add_source(map),
        };
        registered.expect("provider should register");
    }
    instructions.use_conventions(conventions);
    instructions.build_mappings().expect("model should build")
}

enum ClassOrSubclass {
    Class(ClassMap),
    Subclass(SubclassMap),
}

fn parent() -> ClassMap {
    let mut map = ClassMap::new("tests::Parent");
    map.id("Id");
    map
}

fn joined_child(configure: impl FnOnce(&mut SubclassMap)) -> SubclassMap {
    let mut map = SubclassMap::new("tests::Child");
    map.extends("tests::Parent");
    configure(&mut map);
    map
}

fn joined_conventions(
    apply: impl Fn(&mut SubclassInstance<'_>) + Send + Sync + 'static,
) -> ConventionCollection {
    let mut conventions = ConventionCollection::new();
    conventions.add(JoinedSubclassConventionBuilder.always(apply));
    conventions
}

fn child_of(model: &MappingModel) -> &SubclassMapping {
    model
        .find_subclass("tests::Child")
        .expect("child should be attached")
}

fn id_of(class: &ClassMapping) -> &IdMapping {
    class
        .identity()
        .and_then(|identity| identity.as_id())
        .expect("class should have a simple id")
}

#[test]
fn joined_subclass_flags_are_not_overwritten() {
    let child = joined_child(|map| {
        map.abstract_().dynamic_insert().dynamic_update().lazy_load().select_before_update();
    });
    let conventions = joined_conventions(|subclass| {
        subclass.not().abstract_();
        subclass.not().dynamic_insert();
        subclass.not().dynamic_update();
        subclass.not().lazy_load();
        subclass.not().select_before_update();
    });

    let model = build(
        vec![ClassOrSubclass::Class(parent()), ClassOrSubclass::Subclass(child)],
        conventions,
    );

    let child = child_of(&model);
    assert!(child.is_abstract());
    assert!(child.dynamic_insert());
    assert!(child.dynamic_update());
    assert!(child.lazy());
    assert!(child.select_before_update());
}

#[test]
fn joined_subclass_values_are_not_overwritten() {
    let child = joined_child(|map| {
        map.check("const")
            .schema("dbo")
            .table("table")
            .subselect("select")
            .persister("tests::CustomPersister")
            .proxy("tests::ChildProxy")
            .batch_size(10);
    });
    let conventions = joined_conventions(|subclass| {
        subclass
            .check("xxx")
            .schema("xxx")
            .table("value")
            .subselect("xxx")
            .persister("tests::SecondCustomPersister")
            .proxy("tests::OtherProxy")
            .batch_size(100);
    });

    let model = build(
        vec![ClassOrSubclass::Class(parent()), ClassOrSubclass::Subclass(child)],
        conventions,
    );

    let child = child_of(&model);
    assert_eq!(child.check(), "const");
    assert_eq!(child.schema(), "dbo");
    assert_eq!(child.table_name(), "table");
    assert_eq!(child.subselect(), "select");
    assert_eq!(child.persister(), "tests::CustomPersister");
    assert_eq!(child.proxy(), "tests::ChildProxy");
    assert_eq!(child.batch_size(), 10);
}

#[test]
fn joined_subclass_convention_fills_unset_batch_size() {
    let model = build(
        vec![
            ClassOrSubclass::Class(parent()),
            ClassOrSubclass::Subclass(joined_child(|_| {})),
        ],
        joined_conventions(|subclass| {
            subclass.batch_size(100);
        }),
    );

    let child = child_of(&model);
    assert_eq!(child.batch_size(), 100);
    assert!(!child
        .attributes()
        .is_explicit(fluentmap_core::model::SubclassAttr::BatchSize));
}

#[test]
fn class_values_are_not_overwritten() {
    let mut order = parent();
    order.table("PARENTS").not().lazy_load().batch_size(5);
    let mut conventions = ConventionCollection::new();
    conventions.add(ClassConventionBuilder.always(|class| {
        class.table("parent").lazy_load().batch_size(50).schema("dbo");
    }));

    let model = build(vec![ClassOrSubclass::Class(order)], conventions);

    let class = model.find_class("tests::Parent").expect("parent");
    assert_eq!(class.table_name(), "PARENTS");
    assert!(!class.lazy());
    assert_eq!(class.batch_size(), 5);
    assert_eq!(class.schema(), "dbo");
}

#[test]
fn id_access_is_not_overwritten() {
    let mut order = ClassMap::new("tests::Parent");
    order.id("Id").access(AccessStrategy::Field).column("PARENT_ID");
    let mut conventions = ConventionCollection::new();
    conventions.add(IdConventionBuilder.always(|id| {
        id.access(AccessStrategy::Property).column("Id");
    }));

    let model = build(vec![ClassOrSubclass::Class(order)], conventions);

    let id = id_of(model.find_class("tests::Parent").expect("parent"));
    assert_eq!(id.access(), "field");
    assert_eq!(id.columns().len(), 1);
    assert_eq!(id.columns()[0].name(), "PARENT_ID");
}

#[test]
fn composite_id_values_are_not_overwritten() {
    let mut line = ClassMap::new("tests::OrderLine");
    line.composite_id("Key")
        .key_property("LineNumber")
        .key_reference("Order", TypeName::parse("tests::Order").expect("type name"))
        .access(AccessStrategy::Field)
        .mapped()
        .unsaved_value("any");
    let mut conventions = ConventionCollection::new();
    conventions.add(CompositeIdConventionBuilder.always(|id| {
        id.access(AccessStrategy::Property)
            .not()
            .mapped()
            .unsaved_value("none")
            .component_class("tests::OrderLineKey");
    }));

    let model = build(vec![ClassOrSubclass::Class(line)], conventions);

    let composite = model
        .find_class("tests::OrderLine")
        .and_then(|class| class.identity())
        .and_then(|identity| identity.as_composite())
        .expect("composite id");
    assert_eq!(composite.access(), "field");
    assert!(composite.mapped());
    assert_eq!(composite.unsaved_value(), "any");
    assert_eq!(composite.class(), "tests::OrderLineKey");
}

#[test]
fn component_values_are_not_overwritten() {
    let mut person = parent();
    person
        .component("Address", |address| {
            address.map("Street");
        })
        .access(AccessStrategy::Field)
        .not()
        .insert()
        .unique();
    let mut conventions = ConventionCollection::new();
    conventions.add(ComponentConventionBuilder.always(|component| {
        component
            .access(AccessStrategy::Property)
            .insert()
            .not()
            .unique()
            .update();
    }));

    let model = build(vec![ClassOrSubclass::Class(person)], conventions);

    let address = model
        .find_class("tests::Parent")
        .and_then(|class| class.members().component("Address"))
        .expect("component");
    assert_eq!(address.access(), "field");
    assert!(!address.insert());
    assert!(address.unique());
    assert!(address.update());
}

#[test]
fn last_explicit_table_wins_over_earlier_call_and_convention() {
    let mut order = parent();
    order.table("a").table("b");
    let mut conventions = ConventionCollection::new();
    conventions.add(ClassConventionBuilder.always(|class| {
        class.table("c");
    }));

    let model = build(vec![ClassOrSubclass::Class(order)], conventions);

    let class = model.find_class("tests::Parent").expect("parent");
    assert_eq!(class.table_name(), "b");
}

#[test]
fn id_generator_is_not_overwritten() {
    let mut order = ClassMap::new("tests::Parent");
    order.id("Id").generated_by(GeneratorKind::HiLo);
    let mut conventions = ConventionCollection::new();
    conventions.add(IdConventionBuilder.always(|id| {
        id.generated_by(GeneratorKind::Native);
    }));

    let model = build(vec![ClassOrSubclass::Class(order)], conventions);

    let id = id_of(model.find_class("tests::Parent").expect("parent"));
    assert_eq!(id.generator().map(|generator| generator.class()), Some("hilo"));
}

#[test]
fn id_convention_supplies_missing_generator() {
    let mut conventions = ConventionCollection::new();
    conventions.add(IdConventionBuilder.always(|id| {
        id.generated_by(GeneratorKind::Native);
    }));

    let model = build(vec![ClassOrSubclass::Class(parent())], conventions);

    let id = id_of(model.find_class("tests::Parent").expect("parent"));
    assert_eq!(id.generator().map(|generator| generator.class()), Some("native"));
}

#[test]
fn many_to_one_values_are_not_overwritten() {
    let mut order = parent();
    order
        .references("Customer", TypeName::parse("tests::Customer").expect("type name"))
        .cascade(Cascade::None)
        .fetch(Fetch::Join)
        .not_found(NotFound::Ignore)
        .foreign_key("FK_X")
        .column("cust");
    let mut conventions = ConventionCollection::new();
    conventions.add(ManyToOneConventionBuilder.always(|reference| {
        reference
            .cascade(Cascade::All)
            .fetch(Fetch::Select)
            .not_found(NotFound::Exception)
            .foreign_key("FK_Y")
            .column("other");
    }));

    let model = build(vec![ClassOrSubclass::Class(order)], conventions);

    let customer = model
        .find_class("tests::Parent")
        .and_then(|class| class.members().reference("Customer"))
        .expect("customer reference");
    assert_eq!(customer.cascade(), "none");
    assert_eq!(customer.fetch(), "join");
    assert_eq!(customer.not_found(), "ignore");
    assert_eq!(customer.foreign_key(), "FK_X");
    assert_eq!(customer.columns().len(), 1);
    assert_eq!(customer.columns()[0].name(), "cust");
}

#[test]
fn property_values_are_not_overwritten() {
    let mut order = parent();
    order
        .map("Total")
        .access(AccessStrategy::Field)
        .formula("price * quantity")
        .lazy_load()
        .length(5)
        .not()
        .insert()
        .not()
        .update();
    let mut conventions = ConventionCollection::new();
    conventions.add(PropertyConventionBuilder.always(|property| {
        property
            .access(AccessStrategy::Property)
            .formula("0")
            .insert()
            .update()
            .not()
            .lazy_load()
            .length(50);
    }));

    let model = build(vec![ClassOrSubclass::Class(order)], conventions);

    let total = model
        .find_class("tests::Parent")
        .and_then(|class| class.members().property("Total"))
        .expect("total property");
    assert_eq!(total.access(), "field");
    assert_eq!(total.formula(), "price * quantity");
    assert!(total.lazy());
    assert!(!total.insert());
    assert!(!total.update());
    assert_eq!(total.columns()[0].length(), 5);
}
