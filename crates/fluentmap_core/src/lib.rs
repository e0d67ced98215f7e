//! Fluent, convention-driven ORM mapping model builder.
//! Builders record explicit mapping calls, conventions fill the gaps, and the
//! pipeline hands back a finished graph for emitters to visit.

#[macro_use]
mod macros;

pub mod attributes;
pub mod config;
pub mod conventions;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod pipeline;

pub use attributes::{AttributeKey, AttributeKind, AttributeStore, AttributeValue, Origin};
pub use config::{BuildOptions, LoggingConfig};
pub use conventions::{
    builtin_conventions, ClassConvention, ClassConventionBuilder, ClassInstance,
    ComponentConvention, ComponentConventionBuilder, ComponentInstance, CompositeIdConvention,
    CompositeIdConventionBuilder, CompositeIdInstance, Convention, ConventionCollection,
    ConventionReport, ConventionTarget, DiscriminatedSubclassConventionBuilder, IdConvention,
    IdConventionBuilder, IdInstance, JoinedSubclassConventionBuilder, ManyToOneConvention,
    ManyToOneConventionBuilder, ManyToOneInstance, PropertyConvention, PropertyConventionBuilder,
    PropertyInstance, SubclassConvention, SubclassConventionBuilder, SubclassInstance,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mapping::{
    ClassMap, ClassMappingProvider, ComponentPart, CompositeIdentityPart, FluentMappings,
    IdentityPart, ManyToOnePart, MappingProvider, MemberMapping, PropertyPart, ProviderSource,
    SubclassMap, SubclassMappingProvider,
};
pub use model::{
    AccessStrategy, Cascade, ClassMapping, ColumnMapping, ComponentMapping, CompositeIdMapping,
    DependencyRecorder, Fetch, GeneratorKind, GeneratorMapping, IdMapping, Identity,
    KeyManyToOneMapping, KeyPropertyMapping, ManyToOneMapping, MappingModel, MappingVisitor,
    Members, NotFound, PropertyMapping, SubclassKind, SubclassMapping, TypeName, TypeNameError,
};
pub use pipeline::{MalformedReason, PersistenceInstructions, PipelineError, PipelineResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
