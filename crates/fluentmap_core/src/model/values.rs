//! Enumerated attribute values with their mapping-schema spelling.

/// How the ORM reaches a member's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessStrategy {
    Property,
    Field,
    BackField,
    ReadOnly,
    NoSetter,
    NoOp,
    Custom(String),
}

impl AccessStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Property => "property",
            Self::Field => "field",
            Self::BackField => "backfield",
            Self::ReadOnly => "readonly",
            Self::NoSetter => "nosetter",
            Self::NoOp => "noop",
            Self::Custom(value) => value.as_str(),
        }
    }
}

/// Identifier generation strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorKind {
    Assigned,
    Identity,
    Increment,
    Native,
    Sequence,
    HiLo,
    Guid,
    GuidComb,
    Foreign,
    Custom(String),
}

impl GeneratorKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Assigned => "assigned",
            Self::Identity => "identity",
            Self::Increment => "increment",
            Self::Native => "native",
            Self::Sequence => "sequence",
            Self::HiLo => "hilo",
            Self::Guid => "guid",
            Self::GuidComb => "guid.comb",
            Self::Foreign => "foreign",
            Self::Custom(value) => value.as_str(),
        }
    }
}

/// Cascade style of an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cascade {
    All,
    None,
    SaveUpdate,
    Delete,
    AllDeleteOrphan,
}

impl Cascade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::None => "none",
            Self::SaveUpdate => "save-update",
            Self::Delete => "delete",
            Self::AllDeleteOrphan => "all-delete-orphan",
        }
    }
}

/// Association fetch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    Join,
    Select,
}

impl Fetch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Select => "select",
        }
    }
}

/// Behaviour when a referenced row is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    Ignore,
    Exception,
}

impl NotFound {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Exception => "exception",
        }
    }
}
