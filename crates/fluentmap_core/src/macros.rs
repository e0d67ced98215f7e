//! Internal macros shared by mapping nodes, fluent builders and convention
//! instances.
//!
//! Builders and instances expose the same setter vocabulary; the only
//! difference is which attribute-store write they route through (`set` for
//! explicit mapping calls, `set_default` for conventions). Each user of these
//! macros provides a private `store()` accessor and a `not: NotFlag` field.

/// Declares a closed attribute key enum for one node variant.
macro_rules! attribute_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => ($attr:literal, $kind:ident)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::attributes::AttributeKey for $name {
            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $attr),+
                }
            }

            fn kind(self) -> $crate::attributes::AttributeKind {
                match self {
                    $(Self::$variant => $crate::attributes::AttributeKind::$kind),+
                }
            }
        }
    };
}

/// Boolean setters honouring a pending `not()`.
macro_rules! flag_setters {
    ($write:ident: $($(#[$meta:meta])* $name:ident => $key:expr;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self) -> &mut Self {
                let value = self.not.take();
                self.store().$write($key, value);
                self
            }
        )*
    };
}

/// String-valued setters.
macro_rules! text_setters {
    ($write:ident: $($(#[$meta:meta])* $name:ident => $key:expr;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, value: impl Into<String>) -> &mut Self {
                self.store().$write($key, value.into());
                self
            }
        )*
    };
}

/// Numeric setters.
macro_rules! number_setters {
    ($write:ident: $($(#[$meta:meta])* $name:ident => $key:expr;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, value: u32) -> &mut Self {
                self.store().$write($key, i64::from(value));
                self
            }
        )*
    };
}

/// Column-level setters that fan out to every column a node owns.
///
/// Expects a private `columns_store(&mut self, f)` helper that applies `f` to
/// each column store the node (or its builder template) holds.
macro_rules! column_setters {
    ($write:ident) => {
        /// Sets the column length.
        pub fn length(&mut self, value: u32) -> &mut Self {
            self.columns_store(|store| {
                store.$write($crate::model::ColumnAttr::Length, i64::from(value));
            });
            self
        }

        /// Marks the columns nullable; `not().nullable()` marks them `not-null`.
        pub fn nullable(&mut self) -> &mut Self {
            let value = !self.not.take();
            self.columns_store(|store| {
                store.$write($crate::model::ColumnAttr::NotNull, value);
            });
            self
        }

        /// Marks the columns unique.
        pub fn unique(&mut self) -> &mut Self {
            let value = self.not.take();
            self.columns_store(|store| {
                store.$write($crate::model::ColumnAttr::Unique, value);
            });
            self
        }

        /// Names the index the columns participate in.
        pub fn index(&mut self, name: impl Into<String>) -> &mut Self {
            let name = name.into();
            self.columns_store(|store| {
                store.$write($crate::model::ColumnAttr::Index, name.clone());
            });
            self
        }

        /// Overrides the column SQL type.
        pub fn sql_type(&mut self, sql_type: impl Into<String>) -> &mut Self {
            let sql_type = sql_type.into();
            self.columns_store(|store| {
                store.$write($crate::model::ColumnAttr::SqlType, sql_type.clone());
            });
            self
        }
    };
}

/// `access(AccessStrategy)` setter.
macro_rules! access_setter {
    ($write:ident: $key:expr) => {
        /// Sets how the ORM reaches the member value.
        pub fn access(&mut self, access: $crate::model::AccessStrategy) -> &mut Self {
            self.store().$write($key, access.as_str());
            self
        }
    };
}
