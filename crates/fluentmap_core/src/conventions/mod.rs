//! Convention engine: rules that fill in mapping attributes left unset.
//!
//! # Responsibility
//! - Define one convention capability per node variant.
//! - Walk a built graph and offer each node to every convention of the
//!   matching capability, in registration order.
//!
//! # Invariants
//! - Conventions write through `set_default`, so explicit values always win.
//! - The first convention to supply a value for an attribute wins; later
//!   conventions see the attribute as specified and leave it alone.
//! - A convention never sees node variants outside its capability.

pub mod builders;
pub mod defaults;
pub mod engine;
pub mod instances;

pub use builders::{
    ClassConventionBuilder, ComponentConventionBuilder, CompositeIdConventionBuilder,
    DiscriminatedSubclassConventionBuilder, IdConventionBuilder, JoinedSubclassConventionBuilder,
    ManyToOneConventionBuilder, PropertyConventionBuilder, SubclassConventionBuilder,
};
pub use defaults::{
    builtin_conventions, ForeignKeyConvention, IdColumnConvention, PropertyColumnConvention,
    TableNameConvention,
};
pub use engine::{ConventionEngine, ConventionReport};
pub use instances::{
    ClassInstance, ComponentInstance, CompositeIdInstance, IdInstance, ManyToOneInstance,
    PropertyInstance, SubclassInstance,
};

use std::fmt::{Debug, Formatter};

macro_rules! convention_trait {
    ($(#[$meta:meta])* $name:ident => $instance:ident) => {
        $(#[$meta])*
        pub trait $name: Send + Sync {
            /// Whether this convention wants to touch `instance`.
            fn accept(&self, _instance: &$instance<'_>) -> bool {
                true
            }

            fn apply(&self, instance: &mut $instance<'_>);
        }
    };
}

convention_trait!(
    /// Convention over top-level classes.
    ClassConvention => ClassInstance
);
convention_trait!(
    /// Convention over subclasses; registration picks which kinds it sees.
    SubclassConvention => SubclassInstance
);
convention_trait!(
    /// Convention over simple identities.
    IdConvention => IdInstance
);
convention_trait!(
    /// Convention over composite identities.
    CompositeIdConvention => CompositeIdInstance
);
convention_trait!(
    /// Convention over value properties, including component members.
    PropertyConvention => PropertyInstance
);
convention_trait!(
    /// Convention over many-to-one associations.
    ManyToOneConvention => ManyToOneInstance
);
convention_trait!(
    /// Convention over components.
    ComponentConvention => ComponentInstance
);

/// Node variant a registered convention targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConventionTarget {
    Class,
    /// Every subclass, joined or discriminated.
    Subclass,
    JoinedSubclass,
    DiscriminatedSubclass,
    Id,
    CompositeId,
    Property,
    ManyToOne,
    Component,
}

/// One registered convention, tagged with the capability it implements.
pub enum Convention {
    Class(Box<dyn ClassConvention>),
    Subclass(Box<dyn SubclassConvention>),
    JoinedSubclass(Box<dyn SubclassConvention>),
    DiscriminatedSubclass(Box<dyn SubclassConvention>),
    Id(Box<dyn IdConvention>),
    CompositeId(Box<dyn CompositeIdConvention>),
    Property(Box<dyn PropertyConvention>),
    ManyToOne(Box<dyn ManyToOneConvention>),
    Component(Box<dyn ComponentConvention>),
}

impl Convention {
    pub fn class(convention: impl ClassConvention + 'static) -> Self {
        Self::Class(Box::new(convention))
    }

    pub fn subclass(convention: impl SubclassConvention + 'static) -> Self {
        Self::Subclass(Box::new(convention))
    }

    pub fn joined_subclass(convention: impl SubclassConvention + 'static) -> Self {
        Self::JoinedSubclass(Box::new(convention))
    }

    pub fn discriminated_subclass(convention: impl SubclassConvention + 'static) -> Self {
        Self::DiscriminatedSubclass(Box::new(convention))
    }

    pub fn id(convention: impl IdConvention + 'static) -> Self {
        Self::Id(Box::new(convention))
    }

    pub fn composite_id(convention: impl CompositeIdConvention + 'static) -> Self {
        Self::CompositeId(Box::new(convention))
    }

    pub fn property(convention: impl PropertyConvention + 'static) -> Self {
        Self::Property(Box::new(convention))
    }

    pub fn many_to_one(convention: impl ManyToOneConvention + 'static) -> Self {
        Self::ManyToOne(Box::new(convention))
    }

    pub fn component(convention: impl ComponentConvention + 'static) -> Self {
        Self::Component(Box::new(convention))
    }

    pub fn target(&self) -> ConventionTarget {
        match self {
            Self::Class(_) => ConventionTarget::Class,
            Self::Subclass(_) => ConventionTarget::Subclass,
            Self::JoinedSubclass(_) => ConventionTarget::JoinedSubclass,
            Self::DiscriminatedSubclass(_) => ConventionTarget::DiscriminatedSubclass,
            Self::Id(_) => ConventionTarget::Id,
            Self::CompositeId(_) => ConventionTarget::CompositeId,
            Self::Property(_) => ConventionTarget::Property,
            Self::ManyToOne(_) => ConventionTarget::ManyToOne,
            Self::Component(_) => ConventionTarget::Component,
        }
    }
}

impl Debug for Convention {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Convention").field(&self.target()).finish()
    }
}

/// Ordered set of conventions handed to the pipeline.
#[derive(Debug, Default)]
pub struct ConventionCollection {
    conventions: Vec<Convention>,
}

impl ConventionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a convention; earlier registrations take precedence.
    pub fn add(&mut self, convention: Convention) -> &mut Self {
        self.conventions.push(convention);
        self
    }

    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Convention> + '_ {
        self.conventions.iter()
    }
}

impl FromIterator<Convention> for ConventionCollection {
    fn from_iter<I: IntoIterator<Item = Convention>>(iter: I) -> Self {
        Self {
            conventions: iter.into_iter().collect(),
        }
    }
}
