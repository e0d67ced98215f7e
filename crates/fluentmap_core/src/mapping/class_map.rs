//! Top-level entity builder.

use crate::attributes::AttributeStore;
use crate::mapping::identity_part::{CompositeIdentityPart, IdentityPart};
use crate::mapping::provider::ClassMappingProvider;
use crate::mapping::{MemberMapping, MemberParts, NotFlag};
use crate::model::{ClassAttr, ClassMapping, Identity, TypeName};

/// Fluent mapping of one root entity.
///
/// ```
/// use fluentmap_core::{AccessStrategy, ClassMap, GeneratorKind, MemberMapping};
///
/// let mut map = ClassMap::new("shop::Order");
/// map.table("orders");
/// map.id("Id").access(AccessStrategy::Field).generated_by(GeneratorKind::Identity);
/// map.map("Total").not().nullable();
/// ```
#[derive(Debug, Clone)]
pub struct ClassMap {
    entity_type: String,
    attributes: AttributeStore<ClassAttr>,
    id: Option<IdentityPart>,
    composite_id: Option<CompositeIdentityPart>,
    members: MemberParts,
    not: NotFlag,
}

impl ClassMap {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            attributes: AttributeStore::new(),
            id: None,
            composite_id: None,
            members: MemberParts::default(),
            not: NotFlag::default(),
        }
    }

    /// Maps the Rust type `T`, identified by its type name.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    fn store(&mut self) -> &mut AttributeStore<ClassAttr> {
        &mut self.attributes
    }

    /// Inverts the next boolean setter.
    pub fn not(&mut self) -> &mut Self {
        self.not.toggle();
        self
    }

    /// Declares a simple identity, replacing any earlier identity.
    pub fn id(&mut self, name: impl Into<String>) -> &mut IdentityPart {
        self.composite_id = None;
        self.id.insert(IdentityPart::new(name))
    }

    /// Declares a composite identity, replacing any earlier identity.
    pub fn composite_id(&mut self, name: impl Into<String>) -> &mut CompositeIdentityPart {
        self.id = None;
        self.composite_id.insert(CompositeIdentityPart::new(name))
    }

    text_setters! { set:
        table => ClassAttr::TableName;
        schema => ClassAttr::Schema;
        check => ClassAttr::Check;
        /// Proxy type name.
        proxy => ClassAttr::Proxy;
        /// Persister type name.
        persister => ClassAttr::Persister;
        subselect => ClassAttr::Subselect;
        /// Optimistic lock mode: `none`, `version`, `dirty` or `all`.
        optimistic_lock => ClassAttr::OptimisticLock;
        where_clause => ClassAttr::Where;
        /// Stores subclasses in this table, told apart by `column`.
        discriminate_subclasses_by_column => ClassAttr::DiscriminatorColumn;
    }

    flag_setters! { set:
        lazy_load => ClassAttr::Lazy;
        dynamic_insert => ClassAttr::DynamicInsert;
        dynamic_update => ClassAttr::DynamicUpdate;
        select_before_update => ClassAttr::SelectBeforeUpdate;
        abstract_ => ClassAttr::Abstract;
    }

    number_setters! { set:
        batch_size => ClassAttr::BatchSize;
    }

    pub fn proxy_type<T: ?Sized>(&mut self) -> &mut Self {
        self.proxy(std::any::type_name::<T>())
    }

    pub fn persister_type<T: ?Sized>(&mut self) -> &mut Self {
        self.persister(std::any::type_name::<T>())
    }

    /// Marks the entity immutable; `not().read_only()` marks it mutable.
    pub fn read_only(&mut self) -> &mut Self {
        let value = !self.not.take();
        self.attributes.set(ClassAttr::Mutable, value);
        self
    }

    /// Snapshots the recorded calls into a fresh class fragment.
    pub fn build(&self) -> ClassMapping {
        let entity = TypeName::from_registered(&self.entity_type);
        let identity = match (&self.id, &self.composite_id) {
            (Some(id), _) => Some(Identity::Id(id.build())),
            (None, Some(composite)) => Some(Identity::Composite(composite.build(&entity))),
            (None, None) => None,
        };
        let members = self.members.build(&entity);
        ClassMapping::new(entity, self.attributes.clone(), identity, members)
    }
}

impl MemberMapping for ClassMap {
    fn member_parts(&mut self) -> &mut MemberParts {
        &mut self.members
    }
}

impl ClassMappingProvider for ClassMap {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn class_mapping(&self) -> ClassMapping {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::ClassMap;
    use crate::mapping::MemberMapping;
    use crate::model::{AccessStrategy, ClassAttr, GeneratorKind, Identity, TypeName};

    #[test]
    fn build_is_repeatable() {
        let mut map = ClassMap::new("shop::Order");
        map.table("orders").batch_size(25);
        map.id("Id").generated_by(GeneratorKind::HiLo);
        map.map("Total").length(10);

        assert_eq!(map.build(), map.build());
    }

    #[test]
    fn fluent_calls_are_explicit() {
        let mut map = ClassMap::new("shop::Order");
        map.not().lazy_load().table("orders");

        let mapping = map.build();
        assert!(!mapping.lazy());
        assert!(mapping.attributes().is_explicit(ClassAttr::Lazy));
        assert!(mapping.attributes().is_explicit(ClassAttr::TableName));
        assert!(!mapping.attributes().is_specified(ClassAttr::Schema));
    }

    #[test]
    fn later_identity_replaces_earlier_one() {
        let mut map = ClassMap::new("shop::Line");
        map.id("Id").access(AccessStrategy::Field);
        map.composite_id("Key")
            .key_property("OrderId")
            .key_reference("Product", TypeName::parse("shop::Product").expect("type name"));

        let mapping = map.build();
        let composite = match mapping.identity() {
            Some(Identity::Composite(composite)) => composite,
            other => panic!("expected composite id, got {other:?}"),
        };
        assert_eq!(composite.key_properties().len(), 1);
        assert_eq!(composite.key_many_to_ones()[0].columns()[0].name(), "Product_id");
    }

    #[test]
    fn members_record_their_owner() {
        let mut map = ClassMap::new("shop::Order");
        map.component("Address", |address| {
            address.map("Street");
        });

        let mapping = map.build();
        let address = mapping.members().component("Address").expect("component");
        assert_eq!(address.containing_entity().as_str(), "shop::Order");
        assert_eq!(
            address.members().properties()[0].containing_entity().as_str(),
            "shop::Order"
        );
    }

    #[test]
    fn read_only_inverts_mutable() {
        let mut map = ClassMap::new("shop::Country");
        assert!(map.build().mutable());

        map.read_only();
        assert!(!map.build().mutable());
    }
}
