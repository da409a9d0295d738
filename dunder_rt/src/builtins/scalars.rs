use dunder_core::CLASS;

use crate::call::CallCx;
use crate::exception::PyResult;
use crate::object::{ObjectBuilder, PyValue};
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

pub(crate) fn none_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("NoneType").setattr("__repr__", PyValue::native("__repr__", repr))
}

pub(crate) fn not_implemented_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("NotImplementedType")
        .setattr("__repr__", PyValue::native("__repr__", repr))
}

pub(crate) fn int_class() -> ObjectBuilder<{ CLASS }> {
    let int = ObjectBuilder::builtin("int")
        .setattr("__repr__", PyValue::native("__repr__", repr))
        .setattr("__hash__", PyValue::native("__hash__", int_hash));

    int_cmp::comparisons(int)
}

pub(crate) fn bool_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("bool").setattr("__repr__", PyValue::native("__repr__", repr))
}

pub(crate) fn float_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("float").setattr("__repr__", PyValue::native("__repr__", repr))
}

pub(crate) fn str_class() -> ObjectBuilder<{ CLASS }> {
    let st = ObjectBuilder::builtin("str")
        .setattr("__repr__", PyValue::native("__repr__", repr))
        .setattr("__str__", PyValue::native("__str__", str_str))
        .setattr("__len__", PyValue::native("__len__", len));

    str_cmp::comparisons(st)
}

pub(crate) fn dict_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("dict")
        .setattr("__repr__", PyValue::native("__repr__", repr))
        .setattr("__len__", PyValue::native("__len__", len))
}

pub(crate) fn list_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("list")
        .setattr("__repr__", PyValue::native("__repr__", repr))
        .setattr("__len__", PyValue::native("__len__", len))
}

enum Rendered {
    Done(String),
    Items(Vec<ObjectId>),
    Entries(Vec<(String, ObjectId)>),
}

/// `__repr__` shared by the value types.
fn repr(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object], []) = cx.parse_args::<1, 0>("__repr__")?;

    let rendered = cx.rt.objects.with_object(object, |this| match this {
        PyValue::None => Rendered::Done("None".into()),
        PyValue::NotImplemented => Rendered::Done("NotImplemented".into()),
        PyValue::Bool(true) => Rendered::Done("True".into()),
        PyValue::Bool(false) => Rendered::Done("False".into()),
        PyValue::Int(n) => Rendered::Done(n.to_string()),
        PyValue::Float(f) if f.fract() == 0.0 && f.is_finite() => {
            Rendered::Done(format!("{:.1}", f))
        }
        PyValue::Float(f) => Rendered::Done(f.to_string()),
        PyValue::Str(st) => Rendered::Done(str_repr(st)),
        PyValue::List(items) => Rendered::Items(items.clone()),
        PyValue::Dict(dict) => {
            let mut entries = dict
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<Vec<_>>();

            entries.sort_by(|a, b| a.0.cmp(&b.0));

            Rendered::Entries(entries)
        }
        _ => Rendered::Done(format!("<object at {:#x}>", object)),
    })?;

    let repr = match rendered {
        Rendered::Done(repr) => repr,
        Rendered::Items(items) => {
            let items = items
                .into_iter()
                .map(|item| cx.rt.repr(item))
                .collect::<PyResult<Vec<_>>>()?;

            format!("[{}]", items.join(", "))
        }
        Rendered::Entries(entries) => {
            let entries = entries
                .into_iter()
                .map(|(key, value)| Ok(format!("'{}': {}", key, cx.rt.repr(value)?)))
                .collect::<PyResult<Vec<_>>>()?;

            format!("{{{}}}", entries.join(", "))
        }
    };

    Ok(cx.rt.new_string(&repr))
}

fn str_repr(st: &str) -> String {
    let quote = if st.contains('\'') && !st.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(st.len() + 2);
    out.push(quote);

    for ch in st.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch == quote => {
                out.push('\\');
                out.push(ch);
            }
            ch => out.push(ch),
        }
    }

    out.push(quote);
    out
}

fn str_str(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([st], []) = cx.parse_args::<1, 0>("__str__")?;

    Ok(st)
}

fn len(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object], []) = cx.parse_args::<1, 0>("__len__")?;

    let len = cx.rt.objects.with_object(object, |this| match this {
        PyValue::Str(st) => st.chars().count(),
        PyValue::Dict(dict) => dict.len(),
        PyValue::List(list) => list.len(),
        _ => 0,
    })?;

    Ok(cx.rt.new_int(len as i64))
}

fn int_hash(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object], []) = cx.parse_args::<1, 0>("__hash__")?;

    match int_value(cx.rt, object)? {
        Some(-1) => Ok(cx.rt.new_int(-2)),
        Some(n) => Ok(cx.rt.new_int(n)),
        None => cx.rt.type_error_with(object, |ty| {
            format!("descriptor '__hash__' requires a 'int' object but received a '{}'", ty)
        }),
    }
}

/// Integers, with bools counting as `0`/`1`.
fn int_value(rt: &Runtime, object: ObjectId) -> PyResult<Option<i64>> {
    rt.objects.with_object(object, |this| match this {
        PyValue::Int(n) => Some(*n),
        PyValue::Bool(b) => Some(*b as i64),
        _ => None,
    })
}

mod int_cmp {
    use dunder_core::{CompareOp, CLASS};

    use crate::builtins::{comparison_natives, ordered, with_comparisons};
    use crate::call::CallCx;
    use crate::exception::PyResult;
    use crate::object::{ObjectBuilder, PyValue};
    use crate::ObjectId;

    fn compare(cx: CallCx<'_>, op: CompareOp) -> PyResult<ObjectId> {
        let ([left, right], []) = cx.parse_args::<2, 0>(op.dunder())?;

        let ordering = match (super::int_value(cx.rt, left)?, super::int_value(cx.rt, right)?) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        };

        Ok(ordered(ordering, op).into_object(cx.rt))
    }

    comparison_natives!(compare);

    pub(super) fn comparisons(class: ObjectBuilder<{ CLASS }>) -> ObjectBuilder<{ CLASS }> {
        with_comparisons!(class)
    }
}

mod str_cmp {
    use dunder_core::{CompareOp, CLASS};

    use crate::builtins::{comparison_natives, ordered, with_comparisons};
    use crate::call::CallCx;
    use crate::exception::PyResult;
    use crate::object::{ObjectBuilder, PyValue};
    use crate::ObjectId;

    fn compare(cx: CallCx<'_>, op: CompareOp) -> PyResult<ObjectId> {
        let ([left, right], []) = cx.parse_args::<2, 0>(op.dunder())?;

        let ordering = match (cx.rt.string_of(left)?, cx.rt.string_of(right)?) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        };

        Ok(ordered(ordering, op).into_object(cx.rt))
    }

    comparison_natives!(compare);

    pub(super) fn comparisons(class: ObjectBuilder<{ CLASS }>) -> ObjectBuilder<{ CLASS }> {
        with_comparisons!(class)
    }
}
