//! Closure-backed conventions for one-off rules.
//!
//! ```
//! use fluentmap_core::{ConventionCollection, PropertyConventionBuilder};
//!
//! let mut conventions = ConventionCollection::new();
//! conventions.add(PropertyConventionBuilder.when(
//!     |property| property.mapping().name().ends_with("Code"),
//!     |property| {
//!         property.length(16);
//!     },
//! ));
//! ```

use crate::conventions::instances::{
    ClassInstance, ComponentInstance, CompositeIdInstance, IdInstance, ManyToOneInstance,
    PropertyInstance, SubclassInstance,
};
use crate::conventions::{
    ClassConvention, ComponentConvention, CompositeIdConvention, Convention, IdConvention,
    ManyToOneConvention, PropertyConvention, SubclassConvention,
};

macro_rules! convention_builder {
    (
        $(#[$meta:meta])*
        $builder:ident => $closure:ident: $convention:ident<$instance:ident>, $variant:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $builder;

        impl $builder {
            /// Applies `apply` to every node of this capability.
            pub fn always<F>(self, apply: F) -> Convention
            where
                F: Fn(&mut $instance<'_>) + Send + Sync + 'static,
            {
                self.when(|_| true, apply)
            }

            /// Applies `apply` to nodes for which `accept` holds.
            pub fn when<P, F>(self, accept: P, apply: F) -> Convention
            where
                P: Fn(&$instance<'_>) -> bool + Send + Sync + 'static,
                F: Fn(&mut $instance<'_>) + Send + Sync + 'static,
            {
                Convention::$variant(Box::new($closure { accept, apply }))
            }
        }

        struct $closure<P, F> {
            accept: P,
            apply: F,
        }

        impl<P, F> $convention for $closure<P, F>
        where
            P: Fn(&$instance<'_>) -> bool + Send + Sync,
            F: Fn(&mut $instance<'_>) + Send + Sync,
        {
            fn accept(&self, instance: &$instance<'_>) -> bool {
                (self.accept)(instance)
            }

            fn apply(&self, instance: &mut $instance<'_>) {
                (self.apply)(instance)
            }
        }
    };
}

convention_builder!(
    ClassConventionBuilder => ClosureClassConvention: ClassConvention<ClassInstance>, Class
);
convention_builder!(
    /// Sees joined and discriminated subclasses alike.
    SubclassConventionBuilder => ClosureSubclassConvention: SubclassConvention<SubclassInstance>, Subclass
);
convention_builder!(
    JoinedSubclassConventionBuilder => ClosureJoinedConvention: SubclassConvention<SubclassInstance>, JoinedSubclass
);
convention_builder!(
    DiscriminatedSubclassConventionBuilder => ClosureDiscriminatedConvention: SubclassConvention<SubclassInstance>, DiscriminatedSubclass
);
convention_builder!(
    IdConventionBuilder => ClosureIdConvention: IdConvention<IdInstance>, Id
);
convention_builder!(
    CompositeIdConventionBuilder => ClosureCompositeIdConvention: CompositeIdConvention<CompositeIdInstance>, CompositeId
);
convention_builder!(
    /// Sees properties of classes, subclasses and components.
    PropertyConventionBuilder => ClosurePropertyConvention: PropertyConvention<PropertyInstance>, Property
);
convention_builder!(
    ManyToOneConventionBuilder => ClosureManyToOneConvention: ManyToOneConvention<ManyToOneInstance>, ManyToOne
);
convention_builder!(
    ComponentConventionBuilder => ClosureComponentConvention: ComponentConvention<ComponentInstance>, Component
);
