//! Stable entity identity carried through providers and the model graph.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TYPE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*(<.+>)?$")
        .expect("valid type name regex")
});

/// Entity identifier, e.g. `shop::Order` or `shop::Page<shop::Order>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Parses and validates a user supplied identifier.
    pub fn parse(value: &str) -> Result<Self, TypeNameError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeNameError::Empty);
        }
        if !TYPE_NAME_RE.is_match(trimmed) {
            return Err(TypeNameError::Invalid(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Identifier of a Rust type, as reported by `std::any::type_name`.
    /// Generic arguments are kept verbatim and always pass `parse`.
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// Wraps a raw value that was validated at registration time.
    pub(crate) fn from_registered(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment without generic arguments (`shop::Order` -> `Order`).
    pub fn short_name(&self) -> &str {
        let base = match self.0.find('<') {
            Some(index) => &self.0[..index],
            None => self.0.as_str(),
        };
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Whether this identifier names `value` (surrounding whitespace ignored).
    pub fn matches(&self, value: &str) -> bool {
        self.0 == value.trim()
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entity identifier parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNameError {
    Empty,
    Invalid(String),
}

impl Display for TypeNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "entity type name must not be empty"),
            Self::Invalid(value) => write!(f, "entity type name is invalid: {value}"),
        }
    }
}

impl Error for TypeNameError {}

#[cfg(test)]
mod tests {
    use super::{TypeName, TypeNameError};

    struct Order;
    struct Pair<T>(T);
    struct Wrapper<T>(T);

    #[test]
    fn parses_paths_and_generics() {
        assert_eq!(
            TypeName::parse("shop::Order").expect("path").as_str(),
            "shop::Order"
        );
        assert!(TypeName::parse("Page<shop::Order>").is_ok());
        assert_eq!(
            TypeName::parse("  Order ").expect("trimmed").as_str(),
            "Order"
        );
    }

    #[test]
    fn rejects_blank_and_malformed_names() {
        assert_eq!(TypeName::parse("   "), Err(TypeNameError::Empty));
        assert!(matches!(
            TypeName::parse("shop order"),
            Err(TypeNameError::Invalid(_))
        ));
        assert!(matches!(
            TypeName::parse("::Order"),
            Err(TypeNameError::Invalid(_))
        ));
    }

    #[test]
    fn short_name_strips_path_and_generics() {
        let name = TypeName::parse("shop::Page<shop::Order>").expect("generic path");
        assert_eq!(name.short_name(), "Page");
        assert_eq!(TypeName::of::<Order>().short_name(), "Order");
    }

    #[test]
    fn rust_type_names_parse() {
        let name = TypeName::of::<Order>();
        assert!(TypeName::parse(name.as_str()).is_ok());
    }

    #[test]
    fn tuple_pointer_and_trait_object_generics_parse() {
        let tuple = TypeName::of::<Pair<(u8, u8)>>();
        assert!(TypeName::parse(tuple.as_str()).is_ok());
        assert_eq!(tuple.short_name(), "Pair");

        let pointer = TypeName::of::<Wrapper<*const u8>>();
        assert!(TypeName::parse(pointer.as_str()).is_ok());

        let object = TypeName::of::<Wrapper<Box<dyn Fn() + Send>>>();
        assert!(TypeName::parse(object.as_str()).is_ok());

        assert!(matches!(
            TypeName::parse("Pair<>"),
            Err(TypeNameError::Invalid(_))
        ));
    }
}
