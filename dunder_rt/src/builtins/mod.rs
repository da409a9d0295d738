//! Member tables of the builtin classes.

use dunder_core::CompareOp;

use crate::cmp::Comparison;

pub(crate) mod bytes;
pub(crate) mod descriptors;
pub(crate) mod object;
pub(crate) mod scalars;

#[cfg(test)]
mod tests;

/// Expand to six natives `__lt__`..`__ge__` forwarding to `$handler(cx, op)`.
macro_rules! comparison_natives {
    ($handler:path) => {
        pub(crate) fn lt(cx: CallCx<'_>) -> PyResult<ObjectId> {
            $handler(cx, CompareOp::Lt)
        }

        pub(crate) fn le(cx: CallCx<'_>) -> PyResult<ObjectId> {
            $handler(cx, CompareOp::Le)
        }

        pub(crate) fn eq(cx: CallCx<'_>) -> PyResult<ObjectId> {
            $handler(cx, CompareOp::Eq)
        }

        pub(crate) fn ne(cx: CallCx<'_>) -> PyResult<ObjectId> {
            $handler(cx, CompareOp::Ne)
        }

        pub(crate) fn gt(cx: CallCx<'_>) -> PyResult<ObjectId> {
            $handler(cx, CompareOp::Gt)
        }

        pub(crate) fn ge(cx: CallCx<'_>) -> PyResult<ObjectId> {
            $handler(cx, CompareOp::Ge)
        }
    };
}

pub(crate) use comparison_natives;

/// Register the natives produced by `comparison_natives!` on a class builder.
macro_rules! with_comparisons {
    ($builder:expr) => {
        $builder
            .setattr("__lt__", PyValue::native("__lt__", lt))
            .setattr("__le__", PyValue::native("__le__", le))
            .setattr("__eq__", PyValue::native("__eq__", eq))
            .setattr("__ne__", PyValue::native("__ne__", ne))
            .setattr("__gt__", PyValue::native("__gt__", gt))
            .setattr("__ge__", PyValue::native("__ge__", ge))
    };
}

pub(crate) use with_comparisons;

/// Turn an optional three-way ordering into a comparison result for `op`.
pub(crate) fn ordered(ordering: Option<std::cmp::Ordering>, op: CompareOp) -> Comparison {
    match ordering {
        Some(ordering) => Comparison::Bool(op.matches(ordering)),
        None => Comparison::NotImplemented,
    }
}
