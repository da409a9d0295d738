use crate::exception::{PyResult, PyResultExt};
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

impl Runtime {
    /// `object.__setattr__(object, name, value)`
    pub fn setattr(&self, object: ObjectId, name: &str, value: ObjectId) -> PyResult<()> {
        let class = self.class_of(object)?;
        let descr = class.lookup(name).map(|(member, _)| member);

        if let Some(descr) = descr {
            if let Some(set) = self.class_of(descr)?.descriptor().setter() {
                tracing::trace!("[Runtime::setattr] {:?} routed through __set__", name);

                self.call_object(set, &[descr, object, value]).trace()?;
                return Ok(());
            }
        }

        match self.instance_dict(object)? {
            Some(dict) => {
                self.objects.with_object_mut(dict, |this| {
                    this.as_dict_mut().map(|dict| dict.insert(name, value))
                })?;

                Ok(())
            }

            None if descr.is_some() => Err(self.read_only_attribute(object, name)),
            None => Err(self.no_such_attribute(object, name)),
        }
    }

    /// `object.__delattr__(object, name)`
    pub fn delattr(&self, object: ObjectId, name: &str) -> PyResult<()> {
        let class = self.class_of(object)?;
        let descr = class.lookup(name).map(|(member, _)| member);

        if let Some(descr) = descr {
            if let Some(delete) = self.class_of(descr)?.descriptor().deleter() {
                tracing::trace!("[Runtime::delattr] {:?} routed through __delete__", name);

                self.call_object(delete, &[descr, object]).trace()?;
                return Ok(());
            }
        }

        if let Some(dict) = self.existing_dict(object)? {
            let removed = self.objects.with_object_mut(dict, |this| {
                this.as_dict_mut().and_then(|dict| dict.remove(name))
            })?;

            if removed.is_some() {
                return Ok(());
            }
        }

        match descr {
            Some(_) => Err(self.read_only_attribute(object, name)),
            None => Err(self.no_such_attribute(object, name)),
        }
    }
}
