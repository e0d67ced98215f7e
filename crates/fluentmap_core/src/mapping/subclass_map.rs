//! Subclass builder, registered separately from its parent.

use crate::attributes::AttributeStore;
use crate::mapping::provider::SubclassMappingProvider;
use crate::mapping::{MemberMapping, MemberParts, NotFlag};
use crate::model::{SubclassAttr, SubclassKind, SubclassMapping, TypeName};

/// Fluent mapping of one subclass.
///
/// The parent is named with [`SubclassMap::extends`]; the pipeline attaches
/// the subclass under it no matter which was registered first. Storage
/// follows the parent hierarchy unless `joined()` or `discriminator_value()`
/// pins it.
#[derive(Debug, Clone)]
pub struct SubclassMap {
    entity_type: String,
    extends: Option<String>,
    kind: Option<SubclassKind>,
    attributes: AttributeStore<SubclassAttr>,
    members: MemberParts,
    not: NotFlag,
}

impl SubclassMap {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            extends: None,
            kind: None,
            attributes: AttributeStore::new(),
            members: MemberParts::default(),
            not: NotFlag::default(),
        }
    }

    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    fn store(&mut self) -> &mut AttributeStore<SubclassAttr> {
        &mut self.attributes
    }

    /// Inverts the next boolean setter.
    pub fn not(&mut self) -> &mut Self {
        self.not.toggle();
        self
    }

    /// Names the parent class or subclass.
    pub fn extends(&mut self, parent: impl Into<String>) -> &mut Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn extends_type<T: ?Sized>(&mut self) -> &mut Self {
        self.extends(std::any::type_name::<T>())
    }

    /// Stores the subclass in its own table joined on the parent key.
    pub fn joined(&mut self) -> &mut Self {
        self.kind = Some(SubclassKind::Joined);
        self
    }

    /// Stores the subclass in the parent table under `value`.
    pub fn discriminator_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.kind = Some(SubclassKind::Discriminated);
        self.attributes.set(SubclassAttr::DiscriminatorValue, value.into());
        self
    }

    text_setters! { set:
        table => SubclassAttr::TableName;
        schema => SubclassAttr::Schema;
        check => SubclassAttr::Check;
        proxy => SubclassAttr::Proxy;
        persister => SubclassAttr::Persister;
        subselect => SubclassAttr::Subselect;
        /// Key column joining a joined subclass to its parent.
        key_column => SubclassAttr::KeyColumn;
    }

    flag_setters! { set:
        lazy_load => SubclassAttr::Lazy;
        dynamic_insert => SubclassAttr::DynamicInsert;
        dynamic_update => SubclassAttr::DynamicUpdate;
        select_before_update => SubclassAttr::SelectBeforeUpdate;
        abstract_ => SubclassAttr::Abstract;
    }

    number_setters! { set:
        batch_size => SubclassAttr::BatchSize;
    }

    /// Snapshots the recorded calls; `parent_kind` applies unless the
    /// builder pinned a storage kind.
    pub fn build(&self, parent_kind: SubclassKind) -> SubclassMapping {
        let entity = TypeName::from_registered(&self.entity_type);
        let extends = TypeName::from_registered(self.extends.as_deref().unwrap_or_default());
        let members = self.members.build(&entity);
        SubclassMapping::new(
            entity,
            extends,
            self.kind.unwrap_or(parent_kind),
            self.attributes.clone(),
            members,
        )
    }
}

impl MemberMapping for SubclassMap {
    fn member_parts(&mut self) -> &mut MemberParts {
        &mut self.members
    }
}

impl SubclassMappingProvider for SubclassMap {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn parent_entity(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    fn subclass_mapping(&self, parent_kind: SubclassKind) -> SubclassMapping {
        self.build(parent_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::SubclassMap;
    use crate::mapping::MemberMapping;
    use crate::model::{SubclassAttr, SubclassKind};

    #[test]
    fn parent_kind_applies_when_not_pinned() {
        let mut map = SubclassMap::new("shop::Book");
        map.extends("shop::Product");

        assert_eq!(map.build(SubclassKind::Discriminated).kind(), SubclassKind::Discriminated);
        assert_eq!(map.build(SubclassKind::Joined).kind(), SubclassKind::Joined);
    }

    #[test]
    fn discriminator_value_pins_kind() {
        let mut map = SubclassMap::new("shop::Book");
        map.extends("shop::Product").discriminator_value("B");

        let mapping = map.build(SubclassKind::Joined);
        assert_eq!(mapping.kind(), SubclassKind::Discriminated);
        assert_eq!(mapping.discriminator_value(), "B");
        assert!(mapping.attributes().is_explicit(SubclassAttr::DiscriminatorValue));
    }

    #[test]
    fn members_belong_to_the_subclass() {
        let mut map = SubclassMap::new("shop::Book");
        map.extends("shop::Product").joined().batch_size(100);
        map.map("Isbn");

        let mapping = map.build(SubclassKind::Discriminated);
        assert_eq!(mapping.kind(), SubclassKind::Joined);
        assert_eq!(mapping.batch_size(), 100);
        assert_eq!(mapping.extends().as_str(), "shop::Product");
        assert_eq!(
            mapping.members().properties()[0].containing_entity().as_str(),
            "shop::Book"
        );
    }
}
