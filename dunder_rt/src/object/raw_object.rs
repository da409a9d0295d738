use std::sync::Arc;

use super::{ClassObject, ObjectId};

/// A heap instance of a user-level class.
#[derive(Debug, Clone)]
pub struct RawObject {
    /// Every object is assigned a unique object allocation ID.
    pub alloc_id: ObjectId,

    /// The `__dict__` slot, materialized on first write or first explicit request.
    ///
    /// Once set it only changes through wholesale replacement.
    pub __dict__: Option<ObjectId>,

    /// The class of the object.
    pub __class__: Arc<ClassObject>,
}

impl RawObject {
    pub fn new(alloc_id: ObjectId, class: Arc<ClassObject>) -> Self {
        Self {
            alloc_id,
            __dict__: None,
            __class__: class,
        }
    }

    /// Whether this instance may carry mutable attribute storage at all.
    #[inline]
    pub fn has_dict_slot(&self) -> bool {
        self.__class__.instance_dict
    }
}
