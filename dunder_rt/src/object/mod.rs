use std::fmt;
use std::num::NonZeroU64;

/// Identity of a runtime object. Two handles are the same object iff their ids are equal.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::From, Clone, Copy)]
#[repr(transparent)]
pub struct ObjectId(NonZeroU64);

impl From<u64> for ObjectId {
    fn from(n: u64) -> Self {
        NonZeroU64::new(n)
            .map(Self)
            .expect("ObjectIds must be non-zero.")
    }
}

impl ObjectId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::LowerHex for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0.get(), f)
    }
}

pub mod builders;
pub mod class;
pub mod raw_object;
pub mod value;

pub use self::{builders::*, class::*, raw_object::*, value::*};
