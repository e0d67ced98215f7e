//! Persistence-instructions pipeline: provider registration and model build.
//!
//! # Responsibility
//! - Collect mapping providers and the user's convention collection.
//! - Assemble class fragments, attach subclasses and run the convention pass.
//!
//! # Invariants
//! - Provider identifiers are validated when registered, never at build time.
//! - Every `build_mappings` call starts from fresh provider fragments, so
//!   conventions never apply twice to the same node.
//! - A subclass that cannot be attached fails the build; it is never dropped.
//!
//! # See also
//! - crate::conventions for the convention pass.

use crate::model::{TypeName, TypeNameError};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod instructions;

pub use instructions::PersistenceInstructions;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Why a provider was rejected at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    InvalidEntityType(TypeNameError),
    MissingParent,
    InvalidParent(TypeNameError),
}

impl Display for MalformedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEntityType(err) => write!(f, "{err}"),
            Self::MissingParent => write!(f, "subclass does not name the entity it extends"),
            Self::InvalidParent(err) => write!(f, "parent {err}"),
        }
    }
}

/// Pipeline registration and build errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    MalformedProvider {
        entity_type: String,
        reason: MalformedReason,
    },
    DuplicateEntity(TypeName),
    UnresolvedParent {
        subclass: TypeName,
        extends: TypeName,
    },
    MissingIdentity(TypeName),
}

impl PipelineError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedProvider { .. } => "malformed_provider",
            Self::DuplicateEntity(_) => "duplicate_entity",
            Self::UnresolvedParent { .. } => "unresolved_parent",
            Self::MissingIdentity(_) => "missing_identity",
        }
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedProvider {
                entity_type,
                reason,
            } => write!(f, "mapping provider for `{entity_type}` is malformed: {reason}"),
            Self::DuplicateEntity(entity) => {
                write!(f, "entity already has a mapping provider: {entity}")
            }
            Self::UnresolvedParent { subclass, extends } => write!(
                f,
                "subclass {subclass} extends {extends}, which is not a mapped class or subclass"
            ),
            Self::MissingIdentity(entity) => {
                write!(f, "class mapping has no id or composite id: {entity}")
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedProvider {
                reason: MalformedReason::InvalidEntityType(err),
                ..
            }
            | Self::MalformedProvider {
                reason: MalformedReason::InvalidParent(err),
                ..
            } => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MalformedReason, PipelineError};
    use crate::model::{TypeName, TypeNameError};
    use std::error::Error;

    #[test]
    fn malformed_provider_exposes_parse_error() {
        let err = PipelineError::MalformedProvider {
            entity_type: " ".to_string(),
            reason: MalformedReason::InvalidEntityType(TypeNameError::Empty),
        };

        assert_eq!(err.code(), "malformed_provider");
        assert!(err.source().is_some());
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn unresolved_parent_names_both_sides() {
        let err = PipelineError::UnresolvedParent {
            subclass: TypeName::parse("shop::Book").expect("type name"),
            extends: TypeName::parse("shop::Product").expect("type name"),
        };

        let message = err.to_string();
        assert!(message.contains("shop::Book"));
        assert!(message.contains("shop::Product"));
        assert!(err.source().is_none());
    }
}
