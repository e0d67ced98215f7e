//! Component builder.

use crate::attributes::AttributeStore;
use crate::mapping::{MemberMapping, MemberParts, NotFlag};
use crate::model::{ComponentAttr, ComponentMapping, TypeName};

/// Builder for a component: a value object mapped into its owner's table.
#[derive(Debug, Clone)]
pub struct ComponentPart {
    attributes: AttributeStore<ComponentAttr>,
    members: MemberParts,
    not: NotFlag,
}

impl ComponentPart {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let mut attributes = AttributeStore::new();
        attributes.set(ComponentAttr::Name, name.into());
        Self {
            attributes,
            members: MemberParts::default(),
            not: NotFlag::default(),
        }
    }

    fn store(&mut self) -> &mut AttributeStore<ComponentAttr> {
        &mut self.attributes
    }

    /// Inverts the next boolean setter.
    pub fn not(&mut self) -> &mut Self {
        self.not.toggle();
        self
    }

    access_setter!(set: ComponentAttr::Access);

    text_setters! { set:
        /// Component class name.
        component_class => ComponentAttr::Class;
    }

    flag_setters! { set:
        insert => ComponentAttr::Insert;
        update => ComponentAttr::Update;
        unique => ComponentAttr::Unique;
        optimistic_lock => ComponentAttr::OptimisticLock;
        lazy_load => ComponentAttr::Lazy;
    }

    pub(crate) fn build(&self, owner: &TypeName) -> ComponentMapping {
        ComponentMapping::new(self.attributes.clone(), owner.clone(), self.members.build(owner))
    }
}

impl MemberMapping for ComponentPart {
    fn member_parts(&mut self) -> &mut MemberParts {
        &mut self.members
    }
}
