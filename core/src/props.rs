//! Property mappings attached to virtual nodes.
//!
//! A [`Props`] value maps string keys to [`PropValue`]s. Element props become host
//! attributes or event subscriptions when mounted; component props are handed to the
//! component function.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::{String, ToString};
use core::fmt;

use crate::event::EventHandler;
use crate::node::Leaf;

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// A string attribute value.
    Str(String),
    /// A numeric attribute value.
    Number(f64),
    /// A boolean attribute, applied by presence rather than by value.
    Bool(bool),
    /// An event handler, subscribed under the key's event name.
    Handler(EventHandler),
    /// An absent value. Never applied to the host.
    Null,
}

impl PropValue {
    /// Returns `true` for [`PropValue::Handler`].
    #[must_use]
    pub const fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the numeric payload, if any.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the handler payload, if any.
    #[must_use]
    pub const fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            Self::Handler(handler) => Some(handler),
            _ => None,
        }
    }

    /// Converts a string or number into a text leaf.
    #[must_use]
    pub fn to_leaf(&self) -> Option<Leaf> {
        match self {
            Self::Str(value) => Some(Leaf::Text(value.clone())),
            Self::Number(value) => Some(Leaf::Number(*value)),
            _ => None,
        }
    }

    /// Returns the attribute text for string and number values.
    #[must_use]
    pub fn attribute_value(&self) -> Option<String> {
        match self {
            Self::Str(value) => Some(value.clone()),
            Self::Number(value) => Some(Leaf::Number(*value).to_string()),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for PropValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<EventHandler> for PropValue {
    fn from(value: EventHandler) -> Self {
        Self::Handler(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! impl_number_prop {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PropValue {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_number_prop!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// An ordered mapping from property names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a value, returning the previous one for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`Props::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    /// Looks up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Looks up a string value.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    /// Looks up a number value.
    #[must_use]
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropValue::as_number)
    }

    /// Looks up a boolean value.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PropValue::as_bool)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PropValue> {
        self.0.iter()
    }

    /// Iterates over the attribute entries: everything except handlers.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.iter()
            .filter(|(_, value)| !value.is_handler())
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over the handler entries.
    pub fn handlers(&self) -> impl Iterator<Item = (&str, &EventHandler)> {
        self.iter()
            .filter_map(|(key, value)| value.as_handler().map(|handler| (key.as_str(), handler)))
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<PropValue>, const N: usize> From<[(K, V); N]> for Props {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{}", Leaf::Number(*value)),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Handler(_) => f.write_str("[handler]"),
            Self::Null => f.write_str("null"),
        }
    }
}
