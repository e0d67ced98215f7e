//! CLI smoke entry point.
//!
//! # Responsibility
//! - Build a small sample model through the full pipeline.
//! - Print a deterministic outline produced by a visitor.

use fluentmap_core::{
    init_logging, AccessStrategy, BuildOptions, ClassMap, ClassMapping, ColumnMapping,
    DependencyRecorder, GeneratorMapping, IdMapping, LoggingConfig, ManyToOneMapping,
    MappingVisitor, MemberMapping, PersistenceInstructions, PropertyMapping, SubclassMap,
    SubclassMapping, TypeName,
};
use std::process::ExitCode;

/// Indented text outline of a mapping model.
#[derive(Default)]
struct Outline {
    lines: Vec<String>,
}

impl MappingVisitor for Outline {
    fn process_class(&mut self, mapping: &ClassMapping) {
        self.lines.push(format!(
            "class {} table={}",
            mapping.entity_type(),
            mapping.table_name()
        ));
    }

    fn process_subclass(&mut self, mapping: &SubclassMapping) {
        self.lines.push(format!(
            "  subclass {} extends={} kind={:?} table={}",
            mapping.entity_type(),
            mapping.extends(),
            mapping.kind(),
            mapping.table_name()
        ));
    }

    fn process_id(&mut self, mapping: &IdMapping) {
        self.lines
            .push(format!("  id {} access={}", mapping.name(), mapping.access()));
    }

    fn process_property(&mut self, mapping: &PropertyMapping) {
        self.lines.push(format!("  property {}", mapping.name()));
    }

    fn process_many_to_one(&mut self, mapping: &ManyToOneMapping) {
        self.lines.push(format!(
            "  many-to-one {} -> {} fk={}",
            mapping.name(),
            mapping.referenced_entity(),
            mapping.foreign_key()
        ));
    }

    fn process_column(&mut self, mapping: &ColumnMapping) {
        self.lines.push(format!("    column {}", mapping.name()));
    }

    fn process_generator(&mut self, mapping: &GeneratorMapping) {
        self.lines.push(format!("    generator {}", mapping.class()));
    }
}

fn sample_instructions() -> Result<PersistenceInstructions, Box<dyn std::error::Error>> {
    let mut parent = ClassMap::new("sample::Parent");
    parent.id("Id").access(AccessStrategy::Field);
    parent.map("Name").length(100).not().nullable();

    let mut child = ClassMap::new("sample::Child");
    child.id("Id");
    child.map("Position");
    child.references("Parent", TypeName::parse("sample::Parent")?);

    let mut adopted = SubclassMap::new("sample::AdoptedChild");
    adopted.extends("sample::Child").map("AdoptedOn");

    let mut instructions = PersistenceInstructions::with_options(BuildOptions {
        default_conventions: true,
        ..BuildOptions::default()
    });
    instructions.add_source(adopted)?;
    instructions.add_source(parent)?;
    instructions.add_source(child)?;
    Ok(instructions)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let logging = LoggingConfig::from_env();
    if logging.is_enabled() {
        if let Err(err) = init_logging(&logging) {
            eprintln!("logging disabled: {err}");
        }
    }

    let model = sample_instructions()?.build_mappings()?;

    let mut outline = Outline::default();
    model.accept_visitor(&mut outline);
    for line in &outline.lines {
        println!("{line}");
    }

    let mut dependencies = DependencyRecorder::new();
    model.accept_visitor(&mut dependencies);
    for (dependent, dependency) in dependencies.edges() {
        println!("depends {dependent} -> {dependency}");
    }
    println!("fluentmap_core version={}", fluentmap_core::core_version());
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
