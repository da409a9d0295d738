use std::sync::atomic::{AtomicU64, Ordering};

use ahash::RandomState;
use dashmap::DashMap;

use crate::{
    exception::{PyException, PyResult},
    object::PyValue,
    ObjectId,
};

/// A concurrent object space: every entry is guarded by its shard's lock, so
/// `with_object_mut` is an atomic read-modify-write for that one object.
#[derive(Debug)]
pub struct DefaultObjectSpace {
    last_object_id: AtomicU64,
    inner: DashMap<ObjectId, PyValue, RandomState>,
}

impl DefaultObjectSpace {
    pub fn new() -> Self {
        Self {
            last_object_id: 1.into(),
            inner: Default::default(),
        }
    }
}

impl Default for DefaultObjectSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// Closures handed to `with_object`/`with_object_mut` run while the entry is
/// locked and must not call back into the space.
pub trait ObjectSpace {
    /// Generate a new, unique, unassociated ObjectId.
    fn new_object_id(&self) -> ObjectId;

    /// Insert a PyValue and get back its ObjectId.
    fn insert(&self, value: PyValue) -> ObjectId;

    /// Insert a PyValue from the constructor function.
    fn insert_with(&self, f: impl FnOnce(ObjectId) -> PyValue) -> ObjectId;

    /// Associate a value with an id previously obtained from `new_object_id`.
    fn insert_at(&self, object: ObjectId, value: PyValue);

    /// Drop an object from the space.
    fn remove(&self, object: ObjectId) -> Option<PyValue>;

    /// Invoke the provided function with a reference to the PyValue associated with the given ObjectId.
    fn with_object<T>(&self, object: ObjectId, f: impl FnOnce(&PyValue) -> T) -> PyResult<T>;

    /// Invoke the provided function with a **mutable** reference to the PyValue associated with the given ObjectId.
    fn with_object_mut<T>(&self, object: ObjectId, f: impl FnOnce(&mut PyValue) -> T)
        -> PyResult<T>;

    /// The amount of objects in this space.
    fn size_hint(&self) -> Option<usize>;
}

impl ObjectSpace for DefaultObjectSpace {
    fn new_object_id(&self) -> ObjectId {
        let id = self.last_object_id.fetch_add(1, Ordering::SeqCst);

        ObjectId::from(id)
    }

    fn insert(&self, value: PyValue) -> ObjectId {
        let alloc = self.new_object_id();
        self.inner.insert(alloc, value);
        alloc
    }

    fn insert_with(&self, f: impl FnOnce(ObjectId) -> PyValue) -> ObjectId {
        let alloc = self.new_object_id();
        let val = f(alloc);

        self.inner.insert(alloc, val);

        alloc
    }

    fn insert_at(&self, object: ObjectId, value: PyValue) {
        self.inner.insert(object, value);
    }

    fn remove(&self, object: ObjectId) -> Option<PyValue> {
        self.inner.remove(&object).map(|(_, value)| value)
    }

    #[track_caller]
    fn with_object<T>(&self, object: ObjectId, f: impl FnOnce(&PyValue) -> T) -> PyResult<T> {
        let entry = self
            .inner
            .get(&object)
            .ok_or_else(|| PyException::no_such_object(object))?;

        Ok(f(entry.value()))
    }

    #[track_caller]
    fn with_object_mut<T>(
        &self,
        object: ObjectId,
        f: impl FnOnce(&mut PyValue) -> T,
    ) -> PyResult<T> {
        let mut entry = self
            .inner
            .get_mut(&object)
            .ok_or_else(|| PyException::no_such_object(object))?;

        Ok(f(entry.value_mut()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_removal_is_observable() {
        let space = DefaultObjectSpace::new();

        let a = space.insert(PyValue::Int(1));
        let b = space.insert(PyValue::Int(1));

        assert_ne!(a, b);
        assert_eq!(space.size_hint(), Some(2));

        assert!(space.remove(a).is_some());
        assert!(space.with_object(a, |_| ()).is_err());
        assert_eq!(space.with_object(b, |v| v.as_int()).unwrap(), Some(1));
    }

    #[test]
    fn mutate_in_place() {
        let space = DefaultObjectSpace::new();
        let dict = space.insert(PyValue::Dict(Default::default()));
        let value = space.insert(PyValue::None);

        space
            .with_object_mut(dict, |v| v.as_dict_mut().map(|d| d.insert("k", value)))
            .unwrap();

        let got = space
            .with_object(dict, |v| v.as_dict().and_then(|d| d.get("k")))
            .unwrap();

        assert_eq!(got, Some(value));
    }
}
