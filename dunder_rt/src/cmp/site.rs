use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use dunder_core::CompareOp;

use crate::exception::PyResult;
use crate::rt::Runtime;
use crate::ObjectId;

use super::BinaryComparison;

/// State for one static comparison expression.
///
/// The procedure for the site's operator is resolved on first use. Results
/// are assumed to be plain bools until a handler returns anything else, after
/// which the site truth-tests every result. That switch never reverts.
#[derive(Debug, Default)]
pub struct RichCompareSite {
    node: OnceLock<BinaryComparison>,
    seen_non_boolean: AtomicBool,
}

impl RichCompareSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute(
        &self,
        rt: &Runtime,
        left: ObjectId,
        right: ObjectId,
        op: CompareOp,
    ) -> PyResult<bool> {
        let cached = *self.node.get_or_init(|| BinaryComparison::new(op));

        let node = if cached.op() == op {
            cached
        } else {
            tracing::debug!(
                "[RichCompareSite::execute] site bound to {} executed with {}",
                cached.op(),
                op
            );

            BinaryComparison::new(op)
        };

        let result = node.execute(rt, left, right)?;

        if !self.seen_non_boolean.load(Ordering::Acquire) {
            if let Some(b) = rt.as_bool(result)? {
                return Ok(b);
            }

            tracing::debug!(
                "[RichCompareSite::execute] {} produced a non-bool, switching to truth testing",
                op
            );

            self.seen_non_boolean.store(true, Ordering::Release);
        }

        rt.is_true(result)
    }

    /// The operator this site has been specialised for, if any.
    pub fn op(&self) -> Option<CompareOp> {
        self.node.get().map(BinaryComparison::op)
    }

    pub fn seen_non_boolean(&self) -> bool {
        self.seen_non_boolean.load(Ordering::Acquire)
    }
}
