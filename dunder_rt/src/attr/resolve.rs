use crate::exception::{PyResult, PyResultExt};
use crate::object::{ClassObject, PyValue};
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

use super::Descriptor;

impl Runtime {
    /// `object.__getattribute__(object, name)`
    ///
    /// Data descriptors on the class win over instance storage, which in turn
    /// wins over non-data descriptors and plain class members. Never creates
    /// instance storage.
    pub fn getattr(&self, object: ObjectId, name: &str) -> PyResult<ObjectId> {
        let class = self.class_of(object)?;

        let (descr, kind) = match class.lookup(name) {
            Some((member, owner)) => {
                tracing::trace!(
                    "[Runtime::getattr] {:?} found on {:?} for instance of {:?}",
                    name,
                    owner.name,
                    class.name
                );

                (Some(member), self.class_of(member)?.descriptor())
            }

            None => (None, Descriptor::Plain),
        };

        if let (Some(descr), Descriptor::Data { get: Some(get), .. }) = (descr, kind) {
            tracing::trace!("[Runtime::getattr] {:?} is a data descriptor", name);
            return self.descr_get(get, descr, object, &class);
        }

        if let Some(value) = self.instance_attribute(object, name)? {
            tracing::trace!("[Runtime::getattr] {:?} read from instance storage", name);
            return Ok(value);
        }

        let descr = match descr {
            Some(descr) => descr,
            None => return Err(self.no_such_attribute(object, name)),
        };

        if object == self.none() && self.objects.with_object(descr, PyValue::is_function)? {
            return Ok(self.new_bound_method(object, descr));
        }

        match kind.getter() {
            Some(get) => self.descr_get(get, descr, object, &class),
            None => Ok(descr),
        }
    }

    /// `getattr` with `AttributeError` mapped to `None`.
    pub fn getattr_opt(&self, object: ObjectId, name: &str) -> PyResult<Option<ObjectId>> {
        match self.getattr(object, name) {
            Ok(value) => Ok(Some(value)),
            Err(exc) if exc.is_attribute_error() => Ok(None),
            Err(exc) => Err(exc),
        }
    }

    pub fn hasattr(&self, object: ObjectId, name: &str) -> PyResult<bool> {
        self.getattr_opt(object, name).map(|value| value.is_some())
    }

    fn descr_get(
        &self,
        get: ObjectId,
        descr: ObjectId,
        object: ObjectId,
        class: &ClassObject,
    ) -> PyResult<ObjectId> {
        self.call_object(get, &[descr, object, class.alloc_id])
            .trace()
    }
}
