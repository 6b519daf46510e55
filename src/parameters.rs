//! Bind parameters attached to a command.
//!
//! [`ParameterCollection`] is the command's bound-parameter set: an
//! insertion-ordered map from name to [`ParameterBinding`]. Names are matched
//! the way the MySQL connector matches them, ignoring a leading `@` or `?`
//! and letter case, so `@P0`, `?p0` and `p0` all refer to one parameter.
//!
//! # Example
//!
//! ```
//! use sql_literal_inliner::parameters::{ParameterCollection, ParameterValue};
//!
//! let mut params = ParameterCollection::new();
//! params.insert("@p0", 5);
//! params.insert("name", "O'Brien");
//!
//! assert!(params.contains("P0"));
//! assert_eq!(params.get("@name").map(|b| &b.value), Some(&ParameterValue::from("O'Brien")));
//! ```

mod value;

use compact_str::CompactString;
use indexmap::IndexMap;
pub use value::{DbType, ParameterValue};

/// A named, typed value bound to a command
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBinding {
    /// Name without the `@`/`?` prefix, original case
    pub name:    CompactString,
    pub db_type: DbType,
    pub value:   ParameterValue
}

impl ParameterBinding {
    /// Binding whose declared type is inferred from the value.
    pub fn new(name: &str, value: impl Into<ParameterValue>) -> Self {
        let value = value.into();
        Self::with_type(name, DbType::infer(&value), value)
    }

    pub fn with_type(name: &str, db_type: DbType, value: impl Into<ParameterValue>) -> Self {
        Self {
            name: strip_prefix(name).into(),
            db_type,
            value: value.into()
        }
    }

    pub fn is_textual(&self) -> bool {
        self.value.is_textual()
    }
}

/// Ordered collection of bind parameters keyed by normalised name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterCollection {
    entries: IndexMap<CompactString, ParameterBinding>
}

impl ParameterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, returning the one it replaced.
    pub fn add(&mut self, binding: ParameterBinding) -> Option<ParameterBinding> {
        self.entries.insert(normalize_name(&binding.name), binding)
    }

    /// Add a binding with an inferred declared type.
    pub fn insert(
        &mut self,
        name: &str,
        value: impl Into<ParameterValue>
    ) -> Option<ParameterBinding> {
        self.add(ParameterBinding::new(name, value))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    pub fn get(&self, name: &str) -> Option<&ParameterBinding> {
        self.entries.get(&normalize_name(name))
    }

    /// Remove a binding, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<ParameterBinding> {
        self.entries.shift_remove(&normalize_name(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterBinding> {
        self.entries.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.values().map(|b| b.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ParameterBinding> for ParameterCollection {
    fn from_iter<I: IntoIterator<Item = ParameterBinding>>(iter: I) -> Self {
        let mut collection = Self::new();
        for binding in iter {
            collection.add(binding);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a ParameterBinding;
    type IntoIter = indexmap::map::Values<'a, CompactString, ParameterBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Lookup key for a parameter name.
pub(crate) fn normalize_name(name: &str) -> CompactString {
    CompactString::from(strip_prefix(name).to_lowercase())
}

fn strip_prefix(name: &str) -> &str {
    name.strip_prefix(['@', '?']).unwrap_or(name)
}
