use std::ops::{Deref, DerefMut};

use crate::MapT;

/// A dict-like object keyed by attribute name.
///
/// This is the backing store of every instance `__dict__`; keys are
/// case-sensitive and unique.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub struct PyDictRaw<V>(pub MapT<Box<str>, V>);

impl<V> DerefMut for PyDictRaw<V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<V> Deref for PyDictRaw<V> {
    type Target = MapT<Box<str>, V>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V> Default for PyDictRaw<V> {
    fn default() -> Self {
        Self(MapT::new())
    }
}

impl<V> PyDictRaw<V>
where
    V: Clone,
{
    /// Get a value from the dictionary.
    pub fn get(&self, key: &str) -> Option<V> {
        self.0.get(key).cloned()
    }

    /// Insert a value into the dictionary, returning the previous binding.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        self.0.insert(key.into(), value)
    }

    /// Remove a binding, returning it if it was present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.0.remove(key)
    }
}
