//! Convention-facing views over model nodes.
//!
//! An instance exposes the node it wraps through `mapping()` and offers the
//! same setters as the fluent builders, except every write is a default
//! write: it only lands when the attribute is still unset.

use crate::attributes::AttributeStore;
use crate::mapping::NotFlag;
use crate::model::column::default_column_name;
use crate::model::{
    Cascade, ClassAttr, ClassMapping, ColumnAttr, ComponentAttr, ComponentMapping,
    CompositeIdAttr, CompositeIdMapping, Fetch, GeneratorAttr, GeneratorKind, IdAttr, IdMapping,
    ManyToOneAttr, ManyToOneMapping, NotFound, PropertyAttr, PropertyMapping, SubclassAttr,
    SubclassMapping,
};

macro_rules! instance {
    ($(#[$meta:meta])* $name:ident => $node:ty, $key:ty) => {
        $(#[$meta])*
        pub struct $name<'a> {
            mapping: &'a mut $node,
            not: NotFlag,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(mapping: &'a mut $node) -> Self {
                Self {
                    mapping,
                    not: NotFlag::default(),
                }
            }

            fn store(&mut self) -> &mut AttributeStore<$key> {
                self.mapping.attributes_mut()
            }

            /// Current state of the wrapped node.
            pub fn mapping(&self) -> &$node {
                &*self.mapping
            }

            /// Inverts the next boolean setter.
            pub fn not(&mut self) -> &mut Self {
                self.not.toggle();
                self
            }
        }
    };
}

macro_rules! column_instance {
    ($name:ident) => {
        impl $name<'_> {
            fn columns_store(&mut self, mut apply: impl FnMut(&mut AttributeStore<ColumnAttr>)) {
                for column in self.mapping.columns_mut().iter_mut() {
                    apply(column.attributes_mut());
                }
            }

            /// Names the first unnamed column.
            pub fn column(&mut self, name: impl Into<String>) -> &mut Self {
                let name = name.into();
                default_column_name(self.mapping.columns_mut(), &name);
                self
            }

            column_setters!(set_default);
        }
    };
}

instance!(
    /// Top-level class seen by a class convention.
    ClassInstance => ClassMapping, ClassAttr
);
instance!(
    /// Subclass seen by a subclass convention.
    SubclassInstance => SubclassMapping, SubclassAttr
);
instance!(IdInstance => IdMapping, IdAttr);
instance!(CompositeIdInstance => CompositeIdMapping, CompositeIdAttr);
instance!(PropertyInstance => PropertyMapping, PropertyAttr);
instance!(ManyToOneInstance => ManyToOneMapping, ManyToOneAttr);
instance!(ComponentInstance => ComponentMapping, ComponentAttr);

column_instance!(IdInstance);
column_instance!(PropertyInstance);
column_instance!(ManyToOneInstance);

impl ClassInstance<'_> {
    text_setters! { set_default:
        table => ClassAttr::TableName;
        schema => ClassAttr::Schema;
        check => ClassAttr::Check;
        proxy => ClassAttr::Proxy;
        persister => ClassAttr::Persister;
        subselect => ClassAttr::Subselect;
        optimistic_lock => ClassAttr::OptimisticLock;
        where_clause => ClassAttr::Where;
    }

    flag_setters! { set_default:
        lazy_load => ClassAttr::Lazy;
        dynamic_insert => ClassAttr::DynamicInsert;
        dynamic_update => ClassAttr::DynamicUpdate;
        select_before_update => ClassAttr::SelectBeforeUpdate;
        abstract_ => ClassAttr::Abstract;
    }

    number_setters! { set_default:
        batch_size => ClassAttr::BatchSize;
    }

    pub fn read_only(&mut self) -> &mut Self {
        let value = !self.not.take();
        self.store().set_default(ClassAttr::Mutable, value);
        self
    }
}

impl SubclassInstance<'_> {
    text_setters! { set_default:
        table => SubclassAttr::TableName;
        schema => SubclassAttr::Schema;
        check => SubclassAttr::Check;
        proxy => SubclassAttr::Proxy;
        persister => SubclassAttr::Persister;
        subselect => SubclassAttr::Subselect;
        key_column => SubclassAttr::KeyColumn;
        /// Only meaningful for discriminated subclasses.
        discriminator_value => SubclassAttr::DiscriminatorValue;
    }

    flag_setters! { set_default:
        lazy_load => SubclassAttr::Lazy;
        dynamic_insert => SubclassAttr::DynamicInsert;
        dynamic_update => SubclassAttr::DynamicUpdate;
        select_before_update => SubclassAttr::SelectBeforeUpdate;
        abstract_ => SubclassAttr::Abstract;
    }

    number_setters! { set_default:
        batch_size => SubclassAttr::BatchSize;
    }
}

impl IdInstance<'_> {
    access_setter!(set_default: IdAttr::Access);

    text_setters! { set_default:
        custom_type => IdAttr::Type;
        unsaved_value => IdAttr::UnsavedValue;
    }

    /// Supplies a generator class unless one was mapped.
    pub fn generated_by(&mut self, kind: GeneratorKind) -> &mut Self {
        self.mapping
            .generator_mut()
            .attributes_mut()
            .set_default(GeneratorAttr::Class, kind.as_str());
        self
    }
}

impl CompositeIdInstance<'_> {
    access_setter!(set_default: CompositeIdAttr::Access);

    text_setters! { set_default:
        unsaved_value => CompositeIdAttr::UnsavedValue;
        component_class => CompositeIdAttr::Class;
    }

    flag_setters! { set_default:
        mapped => CompositeIdAttr::Mapped;
    }
}

impl PropertyInstance<'_> {
    access_setter!(set_default: PropertyAttr::Access);

    text_setters! { set_default:
        custom_type => PropertyAttr::Type;
        formula => PropertyAttr::Formula;
        generated => PropertyAttr::Generated;
    }

    flag_setters! { set_default:
        insert => PropertyAttr::Insert;
        update => PropertyAttr::Update;
        optimistic_lock => PropertyAttr::OptimisticLock;
        lazy_load => PropertyAttr::Lazy;
    }
}

impl ManyToOneInstance<'_> {
    access_setter!(set_default: ManyToOneAttr::Access);

    pub fn cascade(&mut self, cascade: Cascade) -> &mut Self {
        self.store().set_default(ManyToOneAttr::Cascade, cascade.as_str());
        self
    }

    pub fn fetch(&mut self, fetch: Fetch) -> &mut Self {
        self.store().set_default(ManyToOneAttr::Fetch, fetch.as_str());
        self
    }

    pub fn not_found(&mut self, not_found: NotFound) -> &mut Self {
        self.store().set_default(ManyToOneAttr::NotFound, not_found.as_str());
        self
    }

    text_setters! { set_default:
        foreign_key => ManyToOneAttr::ForeignKey;
        property_ref => ManyToOneAttr::PropertyRef;
    }

    flag_setters! { set_default:
        lazy_load => ManyToOneAttr::Lazy;
        insert => ManyToOneAttr::Insert;
        update => ManyToOneAttr::Update;
        optimistic_lock => ManyToOneAttr::OptimisticLock;
    }
}

impl ComponentInstance<'_> {
    access_setter!(set_default: ComponentAttr::Access);

    text_setters! { set_default:
        component_class => ComponentAttr::Class;
    }

    flag_setters! { set_default:
        insert => ComponentAttr::Insert;
        update => ComponentAttr::Update;
        unique => ComponentAttr::Unique;
        optimistic_lock => ComponentAttr::OptimisticLock;
        lazy_load => ComponentAttr::Lazy;
    }
}
