use dunder_core::CompareOp;

use crate::exception::{PyResult, PyResultExt};
use crate::rt::Runtime;
use crate::ObjectId;

/// The outcome of a comparison handler: a verdict, or a request for the
/// other operand to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Bool(bool),
    NotImplemented,
}

impl Comparison {
    pub fn into_object(self, rt: &Runtime) -> ObjectId {
        match self {
            Comparison::Bool(b) => rt.new_bool(b),
            Comparison::NotImplemented => rt.not_implemented(),
        }
    }

    #[inline]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Comparison::NotImplemented)
    }
}

impl From<bool> for Comparison {
    fn from(b: bool) -> Self {
        Comparison::Bool(b)
    }
}

impl Runtime {
    /// `object.__eq__`: identical objects are equal, anything else is undecided.
    pub fn default_eq(&self, left: ObjectId, right: ObjectId) -> Comparison {
        if left == right {
            Comparison::Bool(true)
        } else {
            Comparison::NotImplemented
        }
    }

    /// `object.__ne__`: the negation of `type(left).__eq__`, passing an
    /// undecided result through unchanged.
    pub fn default_ne(&self, left: ObjectId, right: ObjectId) -> PyResult<Comparison> {
        let eq = match self.call_special(left, "__eq__", &[right]).trace()? {
            Some(eq) => eq,
            None => return Ok(match self.default_eq(left, right) {
                Comparison::Bool(b) => Comparison::Bool(!b),
                undecided => undecided,
            }),
        };

        if self.is_not_implemented(eq) {
            return Ok(Comparison::NotImplemented);
        }

        self.is_true(eq).map(|eq| Comparison::Bool(!eq))
    }

    /// The `object` handler for `op`. There is no default ordering.
    pub fn default_compare(
        &self,
        left: ObjectId,
        right: ObjectId,
        op: CompareOp,
    ) -> PyResult<Comparison> {
        match op {
            CompareOp::Eq => Ok(self.default_eq(left, right)),
            CompareOp::Ne => self.default_ne(left, right),
            CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
                Ok(Comparison::NotImplemented)
            }
        }
    }
}
