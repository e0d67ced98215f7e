use fluentmap_core::{
    ClassMap, ClassMapping, ColumnMapping, ComponentMapping, CompositeIdMapping,
    DependencyRecorder, GeneratorKind, GeneratorMapping, IdMapping, KeyManyToOneMapping,
    KeyPropertyMapping, ManyToOneMapping, MappingModel, MappingVisitor, MemberMapping,
    PersistenceInstructions, PropertyMapping, SubclassMap, SubclassMapping, TypeName,
};
use serde_json::json;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl MappingVisitor for Recorder {
    fn process_class(&mut self, mapping: &ClassMapping) {
        self.events.push(format!("class {}", mapping.entity_type()));
    }

    fn process_subclass(&mut self, mapping: &SubclassMapping) {
        self.events.push(format!("subclass {}", mapping.entity_type()));
    }

    fn process_id(&mut self, mapping: &IdMapping) {
        self.events.push(format!("id {}", mapping.name()));
    }

    fn process_composite_id(&mut self, mapping: &CompositeIdMapping) {
        self.events.push(format!("composite-id {}", mapping.name()));
    }

    fn process_key_property(&mut self, mapping: &KeyPropertyMapping) {
        self.events.push(format!("key-property {}", mapping.name()));
    }

    fn process_key_many_to_one(&mut self, mapping: &KeyManyToOneMapping) {
        self.events.push(format!("key-many-to-one {}", mapping.name()));
    }

    fn process_property(&mut self, mapping: &PropertyMapping) {
        self.events.push(format!("property {}", mapping.name()));
    }

    fn process_many_to_one(&mut self, mapping: &ManyToOneMapping) {
        self.events.push(format!("many-to-one {}", mapping.name()));
    }

    fn process_component(&mut self, mapping: &ComponentMapping) {
        self.events.push(format!("component {}", mapping.name()));
    }

    fn process_column(&mut self, mapping: &ColumnMapping) {
        self.events.push(format!("column {}", mapping.name()));
    }

    fn process_generator(&mut self, mapping: &GeneratorMapping) {
        self.events.push(format!("generator {}", mapping.class()));
    }

    fn register_dependency(&mut self, dependent: &TypeName, dependency: &TypeName) {
        self.events.push(format!("depends {dependent} -> {dependency}"));
    }
}

fn type_name(value: &str) -> TypeName {
    TypeName::parse(value).expect("type name")
}

fn order_model() -> MappingModel {
    let mut order = ClassMap::new("shop::Order");
    order
        .id("Id")
        .column("order_id")
        .generated_by(GeneratorKind::Identity);
    order.map("Total").column("total");
    order
        .references("Customer", type_name("shop::Customer"))
        .column("customer_id");
    order.component("Address", |address| {
        address.map("Street").column("street");
    });

    let mut rush = SubclassMap::new("shop::RushOrder");
    rush.extends("shop::Order");
    rush.map("Deadline").column("deadline");

    let mut instructions = PersistenceInstructions::new();
    instructions.add_source(rush).expect("rush order");
    instructions.add_source(order).expect("order");
    instructions.build_mappings().expect("model")
}

#[test]
fn traversal_visits_nodes_in_fixed_order() {
    let model = order_model();
    let mut recorder = Recorder::default();
    model.accept_visitor(&mut recorder);

    assert_eq!(
        recorder.events,
        vec![
            "class shop::Order",
            "id Id",
            "column order_id",
            "generator identity",
            "property Total",
            "column total",
            "many-to-one Customer",
            "depends shop::Order -> shop::Customer",
            "column customer_id",
            "component Address",
            "property Street",
            "column street",
            "subclass shop::RushOrder",
            "property Deadline",
            "column deadline",
        ]
    );
}

#[test]
fn composite_identity_visits_key_properties_before_key_references() {
    let mut line = ClassMap::new("shop::OrderLine");
    line.composite_id("Key")
        .key_reference("Order", type_name("shop::Order"))
        .key_property("LineNumber");

    let mut instructions = PersistenceInstructions::new();
    instructions.add_source(line).expect("order line");
    let model = instructions.build_mappings().expect("model");

    let mut recorder = Recorder::default();
    model.accept_visitor(&mut recorder);

    assert_eq!(
        recorder.events,
        vec![
            "class shop::OrderLine",
            "composite-id Key",
            "key-property LineNumber",
            "column LineNumber",
            "key-many-to-one Order",
            "depends shop::OrderLine -> shop::Order",
            "column Order_id",
        ]
    );
}

#[test]
fn repeated_traversal_yields_identical_sequences() {
    let model = order_model();
    let mut first = Recorder::default();
    let mut second = Recorder::default();

    model.accept_visitor(&mut first);
    model.accept_visitor(&mut second);

    assert_eq!(first.events, second.events);
}

#[test]
fn dependency_recorder_collects_unique_edges() {
    let mut invoice = ClassMap::new("shop::Invoice");
    invoice.id("Id");
    invoice.references("Order", type_name("shop::Order"));
    invoice.references("ReplacedOrder", type_name("shop::Order"));
    invoice.references("Customer", type_name("shop::Customer"));

    let mut instructions = PersistenceInstructions::new();
    instructions.add_source(invoice).expect("invoice");
    let model = instructions.build_mappings().expect("model");

    let mut recorder = DependencyRecorder::new();
    model.accept_visitor(&mut recorder);

    assert_eq!(recorder.edges().len(), 2);
    let dependencies = recorder.dependencies_of(&type_name("shop::Invoice"));
    assert_eq!(
        dependencies,
        vec![&type_name("shop::Order"), &type_name("shop::Customer")]
    );
    assert!(recorder
        .dependencies_of(&type_name("shop::Order"))
        .is_empty());
}

#[test]
fn model_serializes_explicit_and_default_values() {
    let model = order_model();
    let value = serde_json::to_value(&model).expect("model should serialize");

    let order = &value["classes"][0];
    assert_eq!(order["entity_type"], json!("shop::Order"));
    assert_eq!(order["identity"]["kind"], json!("id"));
    assert_eq!(order["identity"]["attributes"], json!({ "name": "Id" }));
    assert_eq!(
        order["identity"]["generator"]["attributes"],
        json!({ "class": "identity" })
    );
    assert_eq!(
        order["members"]["properties"][0]["columns"][0]["attributes"],
        json!({ "name": "total" })
    );
    assert_eq!(order["subclasses"][0]["kind"], json!("joined"));
    assert_eq!(order["subclasses"][0]["extends"], json!("shop::Order"));
}
