//! Provider registry and `build_mappings` orchestration.

use crate::config::BuildOptions;
use crate::conventions::{builtin_conventions, ConventionCollection, ConventionEngine};
use crate::mapping::{
    ClassMappingProvider, MappingProvider, ProviderSource, SubclassMappingProvider,
};
use crate::model::{ClassMapping, MappingModel, SubclassKind, SubclassMapping, TypeName};
use crate::pipeline::{MalformedReason, PipelineError, PipelineResult};
use log::{debug, error, info};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

enum RegisteredProvider {
    Class {
        entity_type: TypeName,
        provider: Arc<dyn ClassMappingProvider>,
    },
    Subclass {
        entity_type: TypeName,
        extends: TypeName,
        provider: Arc<dyn SubclassMappingProvider>,
    },
}

impl RegisteredProvider {
    fn validate(provider: MappingProvider) -> PipelineResult<Self> {
        let raw = provider.entity_type().to_string();
        let entity_type = TypeName::parse(&raw).map_err(|err| PipelineError::MalformedProvider {
            entity_type: raw.clone(),
            reason: MalformedReason::InvalidEntityType(err),
        })?;

        match provider {
            MappingProvider::Class(provider) => Ok(Self::Class {
                entity_type,
                provider,
            }),
            MappingProvider::Subclass(provider) => {
                let parent = provider
                    .parent_entity()
                    .ok_or_else(|| PipelineError::MalformedProvider {
                        entity_type: raw.clone(),
                        reason: MalformedReason::MissingParent,
                    })?;
                let extends =
                    TypeName::parse(parent).map_err(|err| PipelineError::MalformedProvider {
                        entity_type: raw.clone(),
                        reason: MalformedReason::InvalidParent(err),
                    })?;
                Ok(Self::Subclass {
                    entity_type,
                    extends,
                    provider,
                })
            }
        }
    }

    fn entity_type(&self) -> &TypeName {
        match self {
            Self::Class { entity_type, .. } | Self::Subclass { entity_type, .. } => entity_type,
        }
    }
}

struct PendingSubclass<'a> {
    entity_type: &'a TypeName,
    extends: &'a TypeName,
    provider: &'a dyn SubclassMappingProvider,
}

/// Entry point: register providers, pick conventions, build the model.
///
/// ```
/// use fluentmap_core::{ClassMap, MemberMapping, PersistenceInstructions};
///
/// let mut order = ClassMap::new("shop::Order");
/// order.id("Id");
/// order.map("Total");
///
/// let mut instructions = PersistenceInstructions::new();
/// instructions.add_source(order).expect("valid provider");
/// let model = instructions.build_mappings().expect("model");
/// assert_eq!(model.classes().len(), 1);
/// ```
pub struct PersistenceInstructions {
    providers: Vec<RegisteredProvider>,
    entities: BTreeSet<TypeName>,
    conventions: ConventionCollection,
    options: BuildOptions,
}

impl Default for PersistenceInstructions {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceInstructions {
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            providers: Vec::new(),
            entities: BTreeSet::new(),
            conventions: ConventionCollection::new(),
            options,
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Registers every provider of `source`, in order.
    ///
    /// # Errors
    /// - `MalformedProvider` when an entity or parent identifier is blank or
    ///   invalid, or a subclass names no parent.
    /// - `DuplicateEntity` when an entity already has a provider, including
    ///   one earlier in the same source.
    ///
    /// On error nothing from `source` is registered.
    pub fn add_source(&mut self, source: impl ProviderSource) -> PipelineResult<()> {
        let mut staged = Vec::new();
        let mut seen = BTreeSet::new();
        for provider in source.into_providers() {
            let registered = RegisteredProvider::validate(provider)?;
            let entity_type = registered.entity_type().clone();
            if self.entities.contains(&entity_type) || !seen.insert(entity_type.clone()) {
                return Err(PipelineError::DuplicateEntity(entity_type));
            }
            staged.push(registered);
        }

        let added = staged.len();
        self.entities.extend(seen);
        self.providers.extend(staged);
        debug!(
            "event=add_source module=pipeline status=ok added={} providers={}",
            added,
            self.providers.len()
        );
        Ok(())
    }

    /// Replaces the convention collection used by later builds.
    pub fn use_conventions(&mut self, conventions: ConventionCollection) -> &mut Self {
        self.conventions = conventions;
        self
    }

    /// Builds an independent finished model from the providers registered
    /// so far.
    ///
    /// # Errors
    /// - `UnresolvedParent` when a subclass names an entity that is neither a
    ///   mapped class nor an attachable subclass (cycles included).
    /// - `MissingIdentity` when identity validation is on and a class has
    ///   no id.
    pub fn build_mappings(&self) -> PipelineResult<MappingModel> {
        let started_at = Instant::now();
        info!(
            "event=build_mappings module=pipeline status=start providers={}",
            self.providers.len()
        );

        match self.assemble() {
            Ok(model) => {
                info!(
                    "event=build_mappings module=pipeline status=ok classes={} subclasses={} conventions_accepted={} duration_ms={}",
                    model.len(),
                    count_subclasses(model.classes()),
                    model.convention_report().accepted,
                    started_at.elapsed().as_millis()
                );
                Ok(model)
            }
            Err(err) => {
                error!(
                    "event=build_mappings module=pipeline status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    fn assemble(&self) -> PipelineResult<MappingModel> {
        let mut classes = Vec::new();
        let mut pending = Vec::new();
        for provider in &self.providers {
            match provider {
                RegisteredProvider::Class {
                    entity_type,
                    provider,
                } => classes.push((entity_type, provider.class_mapping())),
                RegisteredProvider::Subclass {
                    entity_type,
                    extends,
                    provider,
                } => pending.push(PendingSubclass {
                    entity_type,
                    extends,
                    provider: &**provider,
                }),
            }
        }

        for (entity_type, class) in classes.iter_mut() {
            let kind = class.inherited_subclass_kind();
            attach_subclasses(*entity_type, kind, class.subclasses_mut(), &mut pending);
        }
        if let Some(orphan) = pending.first() {
            return Err(PipelineError::UnresolvedParent {
                subclass: orphan.entity_type.clone(),
                extends: orphan.extends.clone(),
            });
        }

        let mut classes: Vec<ClassMapping> = classes.into_iter().map(|(_, class)| class).collect();
        if self.options.validate_identity {
            if let Some(class) = classes.iter().find(|class| class.identity().is_none()) {
                return Err(PipelineError::MissingIdentity(class.entity_type().clone()));
            }
        }

        let builtins = self.options.default_conventions.then(builtin_conventions);
        let engine = ConventionEngine::new(std::iter::once(&self.conventions).chain(builtins.as_ref()));
        let report = engine.apply(&mut classes);
        Ok(MappingModel::new(classes, report))
    }
}

/// Moves every pending subclass of `parent` under it, depth first, keeping
/// registration order among siblings.
fn attach_subclasses(
    parent: &TypeName,
    parent_kind: SubclassKind,
    children: &mut Vec<SubclassMapping>,
    pending: &mut Vec<PendingSubclass<'_>>,
) {
    let (matched, rest): (Vec<_>, Vec<_>) = pending
        .drain(..)
        .partition(|subclass| subclass.extends == parent);
    *pending = rest;

    for subclass in matched {
        let mut mapping = subclass.provider.subclass_mapping(parent_kind);
        let kind = mapping.kind();
        attach_subclasses(subclass.entity_type, kind, mapping.subclasses_mut(), pending);
        children.push(mapping);
    }
}

fn count_subclasses(classes: &[ClassMapping]) -> usize {
    fn count(subclasses: &[SubclassMapping]) -> usize {
        subclasses
            .iter()
            .map(|subclass| 1 + count(subclass.subclasses()))
            .sum()
    }

    classes.iter().map(|class| count(class.subclasses())).sum()
}

#[cfg(test)]
mod tests {
    use super::PersistenceInstructions;
    use crate::config::BuildOptions;
    use crate::mapping::{ClassMap, FluentMappings, SubclassMap};
    use crate::pipeline::PipelineError;

    fn order() -> ClassMap {
        let mut map = ClassMap::new("shop::Order");
        map.id("Id");
        map
    }

    #[test]
    fn failed_source_registers_nothing() {
        let mut instructions = PersistenceInstructions::new();
        let mut batch = FluentMappings::new();
        batch
            .add_class(order())
            .add_class(ClassMap::new("not a type"));

        let err = instructions.add_source(batch).expect_err("malformed batch");
        assert!(matches!(err, PipelineError::MalformedProvider { .. }));
        assert!(instructions.is_empty());

        instructions.add_source(order()).expect("order registers after failure");
        assert_eq!(instructions.len(), 1);
    }

    #[test]
    fn duplicate_within_one_batch_is_rejected() {
        let mut instructions = PersistenceInstructions::new();
        let mut batch = FluentMappings::new();
        batch.add_class(order()).add_class(order());

        let err = instructions.add_source(batch).expect_err("duplicate");
        assert!(matches!(err, PipelineError::DuplicateEntity(ref entity) if entity.as_str() == "shop::Order"));
    }

    #[test]
    fn subclass_without_parent_is_malformed() {
        let mut instructions = PersistenceInstructions::new();
        let err = instructions
            .add_source(SubclassMap::new("shop::ExpressOrder"))
            .expect_err("missing parent");
        assert!(matches!(err, PipelineError::MalformedProvider { .. }));
    }

    #[test]
    fn identity_validation_can_be_disabled() {
        let options = BuildOptions {
            validate_identity: false,
            ..BuildOptions::default()
        };
        let mut instructions = PersistenceInstructions::with_options(options);
        instructions
            .add_source(ClassMap::new("shop::AuditEntry"))
            .expect("provider");

        let model = instructions.build_mappings().expect("model without id");
        assert_eq!(model.len(), 1);
    }
}
