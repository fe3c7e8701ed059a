//! Key-ordered object container
//!
//! `Object<A>` maps field labels to payloads. Keys are kept sorted so that
//! iteration, display and serialization are identical across re-encodings,
//! which hash pinning and cross-node determinism rely on.

use crate::names::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Object type for key-value mappings, ordered by field label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Object<A> {
    fields: BTreeMap<Field, A>,
}

impl<A> Object<A> {
    /// Create a new empty object
    pub fn new() -> Self {
        Object {
            fields: BTreeMap::new(),
        }
    }

    /// Object with a single field
    pub fn singleton<F: Into<Field>>(field: F, value: A) -> Self {
        let mut obj = Object::new();
        obj.insert(field, value);
        obj
    }

    /// Create object from key-value pairs; later duplicates win
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Field, A)>,
    {
        Object {
            fields: pairs.into_iter().collect(),
        }
    }

    /// Get a field value by name
    pub fn get(&self, field: &Field) -> Option<&A> {
        self.fields.get(field)
    }

    /// Insert or update a field
    pub fn insert<F: Into<Field>>(&mut self, field: F, value: A) -> Option<A> {
        self.fields.insert(field.into(), value)
    }

    /// Remove a field
    pub fn remove(&mut self, field: &Field) -> Option<A> {
        self.fields.remove(field)
    }

    /// Check if field exists
    pub fn contains_field(&self, field: &Field) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the object has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field labels in ascending order
    pub fn field_names(&self) -> impl Iterator<Item = &Field> {
        self.fields.keys()
    }

    /// Values in field order
    pub fn values(&self) -> impl Iterator<Item = &A> {
        self.fields.values()
    }

    /// Field-value pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &A)> {
        self.fields.iter()
    }

    /// Underlying map
    pub fn fields(&self) -> &BTreeMap<Field, A> {
        &self.fields
    }

    /// Apply `f` to every value, keeping labels
    pub fn map_values<B, F>(self, mut f: F) -> Object<B>
    where
        F: FnMut(A) -> B,
    {
        Object {
            fields: self.fields.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }

    /// Fallible [`Object::map_values`]; stops at the first error in field order
    pub fn try_map_values<B, E, F>(self, mut f: F) -> Result<Object<B>, E>
    where
        F: FnMut(A) -> Result<B, E>,
    {
        let fields = self
            .fields
            .into_iter()
            .map(|(k, v)| f(v).map(|v| (k, v)))
            .collect::<Result<BTreeMap<_, _>, E>>()?;
        Ok(Object { fields })
    }
}

impl<A> Default for Object<A> {
    fn default() -> Self {
        Object::new()
    }
}

impl<A: fmt::Display> fmt::Display for Object<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl<A> FromIterator<(Field, A)> for Object<A> {
    fn from_iter<T: IntoIterator<Item = (Field, A)>>(iter: T) -> Self {
        Object::from_pairs(iter)
    }
}

impl<A> Extend<(Field, A)> for Object<A> {
    fn extend<T: IntoIterator<Item = (Field, A)>>(&mut self, iter: T) {
        self.fields.extend(iter);
    }
}

impl<A> IntoIterator for Object<A> {
    type Item = (Field, A);
    type IntoIter = std::collections::btree_map::IntoIter<Field, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a Object<A> {
    type Item = (&'a Field, &'a A);
    type IntoIter = std::collections::btree_map::Iter<'a, Field, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
