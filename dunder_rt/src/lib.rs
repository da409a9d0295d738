//! `dunder_rt` is the object model runtime: attribute resolution through the
//! descriptor protocol and default rich comparison.


pub(crate) mod exception;
pub(crate) mod storage;

pub mod attr;
pub(crate) mod builtins;
pub mod call;
pub mod cmp;
pub mod object;
pub mod rt;

pub use {
    exception::{PyException, PyResult, PyResultExt, TracePoint},
    object::ObjectId,
    rt::Runtime,
    storage::{DefaultObjectSpace, ObjectSpace},
};
