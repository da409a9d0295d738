use crate::object::DescrSlots;
use crate::ObjectId;

/// How a class member participates in attribute access, decided by the
/// protocol methods the member's own class defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    /// Defines `__set__` and/or `__delete__`; shadows instance storage.
    Data {
        get: Option<ObjectId>,
        set: Option<ObjectId>,
        delete: Option<ObjectId>,
    },

    /// Only `__get__`; instance storage of the same name wins.
    NonData { get: ObjectId },

    /// An ordinary value.
    Plain,
}

impl From<DescrSlots> for Descriptor {
    fn from(slots: DescrSlots) -> Self {
        match slots {
            DescrSlots {
                get: None,
                set: None,
                delete: None,
            } => Self::Plain,

            DescrSlots {
                get: Some(get),
                set: None,
                delete: None,
            } => Self::NonData { get },

            DescrSlots { get, set, delete } => Self::Data { get, set, delete },
        }
    }
}

impl Descriptor {
    #[inline]
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    #[inline]
    pub fn getter(&self) -> Option<ObjectId> {
        match self {
            Self::Data { get, .. } => *get,
            Self::NonData { get } => Some(*get),
            Self::Plain => None,
        }
    }

    #[inline]
    pub fn setter(&self) -> Option<ObjectId> {
        match self {
            Self::Data { set, .. } => *set,
            _ => None,
        }
    }

    #[inline]
    pub fn deleter(&self) -> Option<ObjectId> {
        match self {
            Self::Data { delete, .. } => *delete,
            _ => None,
        }
    }
}
