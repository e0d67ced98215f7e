//! Per-node attribute storage with explicit/default tracking.
//!
//! # Responsibility
//! - Hold the typed attribute values of one mapping node.
//! - Record whether each value came from an explicit mapping call or from a
//!   convention default.
//!
//! # Invariants
//! - `set` is the explicit write: it always stores, last explicit write wins.
//! - `set_default` is the convention write: it is a no-op once the slot holds
//!   any value, explicit or default.
//! - Reads are total: an unset slot reads as the kind default (`""`, `false`,
//!   `0`).
//! - A write whose value kind does not match the key kind is dropped.

use log::warn;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Value shape carried by one attribute key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Text,
    Flag,
    Number,
}

/// Tagged attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Flag(bool),
    Number(i64),
}

impl AttributeValue {
    /// Returns the kind default used for unset reads.
    pub fn default_for(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Text => Self::Text(String::new()),
            AttributeKind::Flag => Self::Flag(false),
            AttributeKind::Number => Self::Number(0),
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Text(_) => AttributeKind::Text,
            Self::Flag(_) => AttributeKind::Flag,
            Self::Number(_) => AttributeKind::Number,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) => serializer.serialize_str(value),
            Self::Flag(value) => serializer.serialize_bool(*value),
            Self::Number(value) => serializer.serialize_i64(*value),
        }
    }
}

/// Where a stored value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Supplied through a fluent mapping call.
    Explicit,
    /// Supplied by a convention while the slot was unset.
    Default,
}

/// Closed attribute key of one node variant.
pub trait AttributeKey: Copy + Ord + Debug + 'static {
    /// Stable attribute name, as an emitter would spell it.
    fn name(self) -> &'static str;
    fn kind(self) -> AttributeKind;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    value: AttributeValue,
    origin: Origin,
}

/// Attribute record of one mapping node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeStore<K: AttributeKey> {
    slots: BTreeMap<K, Slot>,
}

impl<K: AttributeKey> Default for AttributeStore<K> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<K: AttributeKey> AttributeStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value, or the kind default when unset.
    pub fn get(&self, key: K) -> AttributeValue {
        self.slots
            .get(&key)
            .map(|slot| slot.value.clone())
            .unwrap_or_else(|| AttributeValue::default_for(key.kind()))
    }

    /// Text read; `""` when unset.
    pub fn text(&self, key: K) -> &str {
        self.slots
            .get(&key)
            .and_then(|slot| slot.value.as_text())
            .unwrap_or("")
    }

    /// Flag read; `false` when unset.
    pub fn flag(&self, key: K) -> bool {
        self.slots
            .get(&key)
            .and_then(|slot| slot.value.as_flag())
            .unwrap_or(false)
    }

    /// Number read; `0` when unset.
    pub fn number(&self, key: K) -> i64 {
        self.slots
            .get(&key)
            .and_then(|slot| slot.value.as_number())
            .unwrap_or(0)
    }

    /// Records an explicit value, replacing whatever the slot held.
    ///
    /// Returns `false` only when the value kind does not match the key.
    pub fn set(&mut self, key: K, value: impl Into<AttributeValue>) -> bool {
        let value = value.into();
        if !kind_matches(key, &value) {
            return false;
        }
        self.slots.insert(
            key,
            Slot {
                value,
                origin: Origin::Explicit,
            },
        );
        true
    }

    /// Records a default value when the slot is still unset.
    ///
    /// Returns whether the value was stored.
    pub fn set_default(&mut self, key: K, value: impl Into<AttributeValue>) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }
        let value = value.into();
        if !kind_matches(key, &value) {
            return false;
        }
        self.slots.insert(
            key,
            Slot {
                value,
                origin: Origin::Default,
            },
        );
        true
    }

    /// Whether the slot holds any value.
    pub fn is_specified(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    /// Whether the slot holds an explicit value.
    pub fn is_explicit(&self, key: K) -> bool {
        self.origin(key) == Some(Origin::Explicit)
    }

    pub fn origin(&self, key: K) -> Option<Origin> {
        self.slots.get(&key).map(|slot| slot.origin)
    }

    /// Iterates specified slots in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &AttributeValue, Origin)> + '_ {
        self.slots
            .iter()
            .map(|(key, slot)| (*key, &slot.value, slot.origin))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K: AttributeKey> Serialize for AttributeStore<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (key, slot) in &self.slots {
            map.serialize_entry(key.name(), &slot.value)?;
        }
        map.end()
    }
}

fn kind_matches<K: AttributeKey>(key: K, value: &AttributeValue) -> bool {
    if key.kind() == value.kind() {
        return true;
    }
    warn!(
        "event=attribute_write module=attributes status=rejected attribute={} expected={:?} got={:?}",
        key.name(),
        key.kind(),
        value.kind()
    );
    false
}
