//! Rich comparison: the `object` defaults, operand double dispatch and the
//! per call-site comparison cache.

use dunder_core::CompareOp;

use crate::exception::{PyException, PyResult, PyResultExt};
use crate::rt::Runtime;
use crate::ObjectId;

mod defaults;
mod site;
mod truth;

#[cfg(test)]
mod tests;

pub use defaults::Comparison;
pub use site::RichCompareSite;

/// The comparison procedure for one operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryComparison {
    op: CompareOp,
}

impl BinaryComparison {
    pub fn new(op: CompareOp) -> Self {
        Self { op }
    }

    #[inline]
    pub fn op(&self) -> CompareOp {
        self.op
    }

    /// Evaluate `left <op> right`.
    ///
    /// The right operand's reflected handler goes first when its type is a
    /// proper subtype of the left operand's type. Once both sides answered
    /// `NotImplemented`, `==`/`!=` fall back to identity and ordering raises.
    pub fn execute(&self, rt: &Runtime, left: ObjectId, right: ObjectId) -> PyResult<ObjectId> {
        let op = self.op;
        let reflected = op.reflected();

        let left_class = rt.class_of(left)?;
        let right_class = rt.class_of(right)?;

        let reflected_first = left_class.alloc_id != right_class.alloc_id
            && right_class.is_subclass(&left_class);

        if reflected_first {
            tracing::trace!(
                "[BinaryComparison::execute] {:?} is a subtype of {:?}, trying {} first",
                right_class.name,
                left_class.name,
                reflected.dunder()
            );

            if let Some(result) = handler(rt, right, reflected, left)? {
                return Ok(result);
            }
        }

        if let Some(result) = handler(rt, left, op, right)? {
            return Ok(result);
        }

        if !reflected_first {
            if let Some(result) = handler(rt, right, reflected, left)? {
                return Ok(result);
            }
        }

        match op {
            CompareOp::Eq => Ok(rt.new_bool(left == right)),
            CompareOp::Ne => Ok(rt.new_bool(left != right)),
            _ => {
                let err = format!(
                    "'{}' not supported between instances of '{}' and '{}'",
                    op.symbol(),
                    left_class.name,
                    right_class.name
                );

                PyException::type_error().set_message(err).into()
            }
        }
    }
}

/// Run `receiver.<op>(other)`, `None` when undefined or `NotImplemented`.
fn handler(
    rt: &Runtime,
    receiver: ObjectId,
    op: CompareOp,
    other: ObjectId,
) -> PyResult<Option<ObjectId>> {
    let result = rt.call_special(receiver, op.dunder(), &[other]).trace()?;

    Ok(result.filter(|result| !rt.is_not_implemented(*result)))
}

impl Runtime {
    /// `left <op> right` as an object, the way a comparison expression evaluates.
    pub fn rich_compare(&self, left: ObjectId, right: ObjectId, op: CompareOp) -> PyResult<ObjectId> {
        BinaryComparison::new(op).execute(self, left, right)
    }

    /// `bool(left <op> right)`
    pub fn compare(&self, left: ObjectId, right: ObjectId, op: CompareOp) -> PyResult<bool> {
        let result = self.rich_compare(left, right, op)?;

        self.is_true(result)
    }
}
