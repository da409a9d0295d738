use crate::exception::PyResult;
use crate::object::PyValue;
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

enum Slot {
    Fixed,
    Vacant,
    Present(ObjectId),
}

impl Runtime {
    /// The instance storage of `object`, if it has been created.
    pub fn existing_dict(&self, object: ObjectId) -> PyResult<Option<ObjectId>> {
        self.objects
            .with_object(object, |this| this.as_raw().and_then(|raw| raw.__dict__))
    }

    /// Read `name` straight out of the instance storage.
    pub(crate) fn instance_attribute(
        &self,
        object: ObjectId,
        name: &str,
    ) -> PyResult<Option<ObjectId>> {
        match self.existing_dict(object)? {
            Some(dict) => self
                .objects
                .with_object(dict, |this| this.as_dict().and_then(|dict| dict.get(name))),

            None => Ok(None),
        }
    }

    /// Get or create the instance storage of `object`.
    ///
    /// `Ok(None)` for objects without a dict slot. Concurrent first calls
    /// agree on a single dict: the slot is filled under the object's entry
    /// lock and a losing candidate is dropped from the object space.
    pub fn instance_dict(&self, object: ObjectId) -> PyResult<Option<ObjectId>> {
        let slot = self.objects.with_object(object, |this| match this.as_raw() {
            Some(raw) if raw.has_dict_slot() => match raw.__dict__ {
                Some(dict) => Slot::Present(dict),
                None => Slot::Vacant,
            },

            _ => Slot::Fixed,
        })?;

        match slot {
            Slot::Fixed => Ok(None),
            Slot::Present(dict) => Ok(Some(dict)),
            Slot::Vacant => {
                let candidate = self.new_dict();

                let winner = self.objects.with_object_mut(object, |this| {
                    this.as_raw_mut()
                        .map(|raw| *raw.__dict__.get_or_insert(candidate))
                })?;

                if winner != Some(candidate) {
                    tracing::trace!(
                        "[Runtime::instance_dict] lost materialization race for {:?}",
                        object
                    );

                    self.objects.remove(candidate);
                } else {
                    tracing::trace!(
                        "[Runtime::instance_dict] materialized {:?} for {:?}",
                        candidate,
                        object
                    );
                }

                Ok(winner)
            }
        }
    }

    /// Replace the instance storage of `object` wholesale.
    pub fn replace_instance_dict(&self, object: ObjectId, dict: ObjectId) -> PyResult<()> {
        let is_dict = self
            .objects
            .with_object(dict, |this| matches!(this, PyValue::Dict(_)))?;

        if !is_dict {
            return self.type_error_with(dict, |ty| {
                format!("__dict__ must be set to a dictionary, not a '{}'", ty)
            });
        }

        let replaced = self.objects.with_object_mut(object, |this| {
            match this.as_raw_mut() {
                Some(raw) if raw.has_dict_slot() => {
                    raw.__dict__ = Some(dict);
                    true
                }

                _ => false,
            }
        })?;

        if replaced {
            Ok(())
        } else {
            Err(self.no_such_attribute(object, "__dict__"))
        }
    }

    /// `vars(object)`-style snapshot of the instance storage keys.
    pub fn instance_keys(&self, object: ObjectId) -> PyResult<Vec<String>> {
        match self.existing_dict(object)? {
            Some(dict) => self.objects.with_object(dict, |this| {
                this.as_dict()
                    .map(|dict| dict.keys().map(|k| k.to_string()).collect())
                    .unwrap_or_default()
            }),

            None => Ok(Vec::new()),
        }
    }
}

