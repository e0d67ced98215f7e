//! Class and subclass nodes, the roots of each entity hierarchy.
//!
//! # Invariants
//! - A class visits identity, then members (properties, many-to-ones,
//!   components), then subclasses.
//! - A subclass visits the same order without identity.
//! - Every subclass has exactly one owner; the hierarchy is a tree.

use crate::attributes::AttributeStore;
use crate::model::component::Members;
use crate::model::identity::Identity;
use crate::model::type_name::TypeName;
use crate::model::visitor::MappingVisitor;
use serde::Serialize;

attribute_keys! {
    /// Class attributes.
    pub enum ClassAttr {
        TableName => ("table", Text),
        Schema => ("schema", Text),
        Lazy => ("lazy", Flag),
        BatchSize => ("batch-size", Number),
        DynamicInsert => ("dynamic-insert", Flag),
        DynamicUpdate => ("dynamic-update", Flag),
        SelectBeforeUpdate => ("select-before-update", Flag),
        Abstract => ("abstract", Flag),
        Check => ("check", Text),
        Proxy => ("proxy", Text),
        Persister => ("persister", Text),
        Subselect => ("subselect", Text),
        OptimisticLock => ("optimistic-lock", Text),
        Mutable => ("mutable", Flag),
        Where => ("where", Text),
        DiscriminatorColumn => ("discriminator-column", Text),
    }
}

attribute_keys! {
    /// Subclass attributes.
    pub enum SubclassAttr {
        TableName => ("table", Text),
        Schema => ("schema", Text),
        Lazy => ("lazy", Flag),
        BatchSize => ("batch-size", Number),
        DynamicInsert => ("dynamic-insert", Flag),
        DynamicUpdate => ("dynamic-update", Flag),
        SelectBeforeUpdate => ("select-before-update", Flag),
        Abstract => ("abstract", Flag),
        Check => ("check", Text),
        Proxy => ("proxy", Text),
        Persister => ("persister", Text),
        Subselect => ("subselect", Text),
        DiscriminatorValue => ("discriminator-value", Text),
        KeyColumn => ("key-column", Text),
    }
}

/// Inheritance storage of one subclass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubclassKind {
    /// Own table joined on the parent key.
    Joined,
    /// Shares the parent table, told apart by a discriminator value.
    Discriminated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMapping {
    entity_type: TypeName,
    attributes: AttributeStore<ClassAttr>,
    identity: Option<Identity>,
    members: Members,
    subclasses: Vec<SubclassMapping>,
}

impl ClassMapping {
    pub(crate) fn new(
        entity_type: TypeName,
        attributes: AttributeStore<ClassAttr>,
        identity: Option<Identity>,
        members: Members,
    ) -> Self {
        Self {
            entity_type,
            attributes,
            identity,
            members,
            subclasses: Vec::new(),
        }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_class(self);
        if let Some(identity) = &self.identity {
            identity.accept_visitor(visitor);
        }
        self.members.accept_visitor(visitor);
        for subclass in &self.subclasses {
            subclass.accept_visitor(visitor);
        }
    }

    pub fn entity_type(&self) -> &TypeName {
        &self.entity_type
    }

    pub fn attributes(&self) -> &AttributeStore<ClassAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<ClassAttr> {
        &mut self.attributes
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub(crate) fn identity_mut(&mut self) -> Option<&mut Identity> {
        self.identity.as_mut()
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    pub fn subclasses(&self) -> &[SubclassMapping] {
        &self.subclasses
    }

    pub(crate) fn subclasses_mut(&mut self) -> &mut Vec<SubclassMapping> {
        &mut self.subclasses
    }

    /// Kind given to subclasses that do not pin their own storage.
    pub fn inherited_subclass_kind(&self) -> SubclassKind {
        if self.discriminator_column().is_empty() {
            SubclassKind::Joined
        } else {
            SubclassKind::Discriminated
        }
    }

    pub fn table_name(&self) -> &str {
        self.attributes.text(ClassAttr::TableName)
    }

    pub fn schema(&self) -> &str {
        self.attributes.text(ClassAttr::Schema)
    }

    pub fn lazy(&self) -> bool {
        self.attributes.flag(ClassAttr::Lazy)
    }

    pub fn batch_size(&self) -> i64 {
        self.attributes.number(ClassAttr::BatchSize)
    }

    pub fn dynamic_insert(&self) -> bool {
        self.attributes.flag(ClassAttr::DynamicInsert)
    }

    pub fn dynamic_update(&self) -> bool {
        self.attributes.flag(ClassAttr::DynamicUpdate)
    }

    pub fn select_before_update(&self) -> bool {
        self.attributes.flag(ClassAttr::SelectBeforeUpdate)
    }

    pub fn is_abstract(&self) -> bool {
        self.attributes.flag(ClassAttr::Abstract)
    }

    pub fn check(&self) -> &str {
        self.attributes.text(ClassAttr::Check)
    }

    pub fn proxy(&self) -> &str {
        self.attributes.text(ClassAttr::Proxy)
    }

    pub fn persister(&self) -> &str {
        self.attributes.text(ClassAttr::Persister)
    }

    pub fn subselect(&self) -> &str {
        self.attributes.text(ClassAttr::Subselect)
    }

    pub fn optimistic_lock(&self) -> &str {
        self.attributes.text(ClassAttr::OptimisticLock)
    }

    /// Unset reads as mutable.
    pub fn mutable(&self) -> bool {
        !self.attributes.is_specified(ClassAttr::Mutable) || self.attributes.flag(ClassAttr::Mutable)
    }

    pub fn where_clause(&self) -> &str {
        self.attributes.text(ClassAttr::Where)
    }

    pub fn discriminator_column(&self) -> &str {
        self.attributes.text(ClassAttr::DiscriminatorColumn)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubclassMapping {
    entity_type: TypeName,
    extends: TypeName,
    kind: SubclassKind,
    attributes: AttributeStore<SubclassAttr>,
    members: Members,
    subclasses: Vec<SubclassMapping>,
}

impl SubclassMapping {
    pub(crate) fn new(
        entity_type: TypeName,
        extends: TypeName,
        kind: SubclassKind,
        attributes: AttributeStore<SubclassAttr>,
        members: Members,
    ) -> Self {
        Self {
            entity_type,
            extends,
            kind,
            attributes,
            members,
            subclasses: Vec::new(),
        }
    }

    pub fn accept_visitor<V: MappingVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.process_subclass(self);
        self.members.accept_visitor(visitor);
        for subclass in &self.subclasses {
            subclass.accept_visitor(visitor);
        }
    }

    pub fn entity_type(&self) -> &TypeName {
        &self.entity_type
    }

    /// Parent entity this subclass was declared against.
    pub fn extends(&self) -> &TypeName {
        &self.extends
    }

    pub fn kind(&self) -> SubclassKind {
        self.kind
    }

    pub fn attributes(&self) -> &AttributeStore<SubclassAttr> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore<SubclassAttr> {
        &mut self.attributes
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    pub fn subclasses(&self) -> &[SubclassMapping] {
        &self.subclasses
    }

    pub(crate) fn subclasses_mut(&mut self) -> &mut Vec<SubclassMapping> {
        &mut self.subclasses
    }

    pub fn table_name(&self) -> &str {
        self.attributes.text(SubclassAttr::TableName)
    }

    pub fn schema(&self) -> &str {
        self.attributes.text(SubclassAttr::Schema)
    }

    pub fn lazy(&self) -> bool {
        self.attributes.flag(SubclassAttr::Lazy)
    }

    pub fn batch_size(&self) -> i64 {
        self.attributes.number(SubclassAttr::BatchSize)
    }

    pub fn dynamic_insert(&self) -> bool {
        self.attributes.flag(SubclassAttr::DynamicInsert)
    }

    pub fn dynamic_update(&self) -> bool {
        self.attributes.flag(SubclassAttr::DynamicUpdate)
    }

    pub fn select_before_update(&self) -> bool {
        self.attributes.flag(SubclassAttr::SelectBeforeUpdate)
    }

    pub fn is_abstract(&self) -> bool {
        self.attributes.flag(SubclassAttr::Abstract)
    }

    pub fn check(&self) -> &str {
        self.attributes.text(SubclassAttr::Check)
    }

    pub fn proxy(&self) -> &str {
        self.attributes.text(SubclassAttr::Proxy)
    }

    pub fn persister(&self) -> &str {
        self.attributes.text(SubclassAttr::Persister)
    }

    pub fn subselect(&self) -> &str {
        self.attributes.text(SubclassAttr::Subselect)
    }

    pub fn discriminator_value(&self) -> &str {
        self.attributes.text(SubclassAttr::DiscriminatorValue)
    }

    pub fn key_column(&self) -> &str {
        self.attributes.text(SubclassAttr::KeyColumn)
    }
}
