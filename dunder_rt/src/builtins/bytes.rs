use dunder_core::{bytes, CompareOp, CoreError, CLASS};

use crate::call::CallCx;
use crate::exception::{PyException, PyResult};
use crate::object::{ObjectBuilder, PyValue};
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

use super::{comparison_natives, ordered, with_comparisons};

pub(crate) fn class() -> ObjectBuilder<{ CLASS }> {
    let class = ObjectBuilder::builtin("bytes")
        .setattr("__add__", PyValue::native("__add__", add))
        .setattr("__radd__", PyValue::native("__radd__", radd))
        .setattr("__mul__", PyValue::native("__mul__", mul))
        .setattr("__rmul__", PyValue::native("__rmul__", mul))
        .setattr("__len__", PyValue::native("__len__", len))
        .setattr("__contains__", PyValue::native("__contains__", contains))
        .setattr("__repr__", PyValue::native("__repr__", repr))
        .setattr("__getitem__", PyValue::native("__getitem__", getitem))
        .setattr("__setitem__", PyValue::native("__setitem__", setitem))
        .setattr("startswith", PyValue::native("startswith", startswith))
        .setattr("endswith", PyValue::native("endswith", endswith))
        .setattr("strip", PyValue::native("strip", strip))
        .setattr("find", PyValue::native("find", find))
        .setattr("join", PyValue::native("join", join));

    with_comparisons!(class)
}

/// The receiver of a `bytes` method, which must itself be bytes.
fn receiver(rt: &Runtime, object: ObjectId, method: &str) -> PyResult<Vec<u8>> {
    match rt.bytes_of(object)? {
        Some(bytes) => Ok(bytes),
        None => rt.type_error_with(object, |ty| {
            format!(
                "descriptor '{}' requires a 'bytes' object but received a '{}'",
                method, ty
            )
        }),
    }
}

fn bytes_like(rt: &Runtime, object: ObjectId) -> PyResult<Vec<u8>> {
    match rt.bytes_of(object)? {
        Some(bytes) => Ok(bytes),
        None => rt.type_error_with(object, |ty| {
            format!("a bytes-like object is required, not '{}'", ty)
        }),
    }
}

/// An optional `start`/`end` argument: absent or `None`, or an int.
fn bound(rt: &Runtime, object: Option<ObjectId>) -> PyResult<Option<i64>> {
    match object {
        None => Ok(None),
        Some(object) if object == rt.none() => Ok(None),
        Some(object) => match rt.as_int(object)? {
            Some(n) => Ok(Some(n)),
            None => PyException::type_error()
                .set_message("slice indices must be integers or None or have an __index__ method")
                .into(),
        },
    }
}

enum Needle {
    Seq(Vec<u8>),
    Byte(u8),
}

fn needle(rt: &Runtime, object: ObjectId) -> PyResult<Needle> {
    if let Some(n) = rt.as_int(object)? {
        return match u8::try_from(n) {
            Ok(byte) => Ok(Needle::Byte(byte)),
            Err(_) => PyException::type_error()
                .set_message("byte must be in range(0, 256)")
                .into(),
        };
    }

    bytes_like(rt, object).map(Needle::Seq)
}

fn compare(cx: CallCx<'_>, op: CompareOp) -> PyResult<ObjectId> {
    let ([this, other], []) = cx.parse_args::<2, 0>(op.dunder())?;
    let this = receiver(cx.rt, this, op.dunder())?;

    let ordering = cx
        .rt
        .bytes_of(other)?
        .map(|other| bytes::compare(&this, &other));

    Ok(ordered(ordering, op).into_object(cx.rt))
}

comparison_natives!(compare);

fn concat(rt: &Runtime, left: ObjectId, right: ObjectId, other: ObjectId) -> PyResult<ObjectId> {
    match (rt.bytes_of(left)?, rt.bytes_of(right)?) {
        (Some(mut left), Some(right)) => {
            left.extend_from_slice(&right);
            Ok(rt.new_bytes(left))
        }

        _ => rt.type_error_with(other, |ty| format!("can't concat bytes to {}", ty)),
    }
}

fn add(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this, other], []) = cx.parse_args::<2, 0>("__add__")?;
    receiver(cx.rt, this, "__add__")?;

    concat(cx.rt, this, other, other)
}

fn radd(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this, other], []) = cx.parse_args::<2, 0>("__radd__")?;
    receiver(cx.rt, this, "__radd__")?;

    concat(cx.rt, other, this, other)
}

fn mul(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this, times], []) = cx.parse_args::<2, 0>("__mul__")?;
    let this = receiver(cx.rt, this, "__mul__")?;

    match cx.rt.as_int(times)? {
        Some(times) => match bytes::repeat(&this, times) {
            Ok(repeated) => Ok(cx.rt.new_bytes(repeated)),
            Err(err @ CoreError::OutOfMemory(_)) => {
                PyException::memory_error().set_message(err.to_string()).into()
            }
            Err(err) => PyException::overflow_error()
                .set_message(err.to_string())
                .into(),
        },
        None => cx.rt.type_error_with(times, |ty| {
            format!("can't multiply sequence by non-int of type '{}'", ty)
        }),
    }
}

fn len(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this], []) = cx.parse_args::<1, 0>("__len__")?;
    let this = receiver(cx.rt, this, "__len__")?;

    Ok(cx.rt.new_int(this.len() as i64))
}

fn contains(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this, item], []) = cx.parse_args::<2, 0>("__contains__")?;
    let this = receiver(cx.rt, this, "__contains__")?;

    let found = match needle(cx.rt, item)? {
        Needle::Seq(needle) => bytes::contains(&this, &needle),
        Needle::Byte(byte) => this.contains(&byte),
    };

    Ok(cx.rt.new_bool(found))
}

fn repr(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this], []) = cx.parse_args::<1, 0>("__repr__")?;
    let this = receiver(cx.rt, this, "__repr__")?;

    Ok(cx.rt.new_string(&bytes::repr(&this)))
}

fn getitem(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this, index], []) = cx.parse_args::<2, 0>("__getitem__")?;
    let this = receiver(cx.rt, this, "__getitem__")?;

    let index = match cx.rt.as_int(index)? {
        Some(index) => index,
        None => {
            return cx.rt.type_error_with(index, |ty| {
                format!("byte indices must be integers, not '{}'", ty)
            })
        }
    };

    let position = if index < 0 {
        i64::try_from(this.len()).ok().map(|len| len + index)
    } else {
        Some(index)
    };

    match position
        .and_then(|n| usize::try_from(n).ok())
        .and_then(|n| this.get(n))
    {
        Some(byte) => Ok(cx.rt.new_int(i64::from(*byte))),
        None => PyException::index_error()
            .set_message("index out of range")
            .into(),
    }
}

fn setitem(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([_this, _index, _value], []) = cx.parse_args::<3, 0>("__setitem__")?;

    PyException::type_error()
        .set_message("'bytes' object does not support item assignment")
        .into()
}

type AffixTest = fn(&[u8], &[u8], Option<i64>, Option<i64>) -> bool;

fn affix(cx: CallCx<'_>, method: &str, test: AffixTest) -> PyResult<ObjectId> {
    let ([this, affix], [start, end]) = cx.parse_args::<2, 2>(method)?;
    let this = receiver(cx.rt, this, method)?;
    let affix = bytes_like(cx.rt, affix)?;

    let start = bound(cx.rt, start)?;
    let end = bound(cx.rt, end)?;

    Ok(cx.rt.new_bool(test(&this, &affix, start, end)))
}

fn startswith(cx: CallCx<'_>) -> PyResult<ObjectId> {
    affix(cx, "startswith", bytes::starts_with)
}

fn endswith(cx: CallCx<'_>) -> PyResult<ObjectId> {
    affix(cx, "endswith", bytes::ends_with)
}

fn strip(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this], [chars]) = cx.parse_args::<1, 1>("strip")?;
    let this = receiver(cx.rt, this, "strip")?;

    let chars = match chars {
        Some(chars) if chars != cx.rt.none() => Some(bytes_like(cx.rt, chars)?),
        _ => None,
    };

    let stripped = bytes::strip(&this, chars.as_deref());

    Ok(cx.rt.new_bytes(stripped))
}

fn find(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this, sub], [start, end]) = cx.parse_args::<2, 2>("find")?;
    let this = receiver(cx.rt, this, "find")?;

    let start = bound(cx.rt, start)?;
    let end = bound(cx.rt, end)?;

    let position = match needle(cx.rt, sub)? {
        Needle::Seq(needle) => bytes::find(&this, &needle, start, end),
        Needle::Byte(byte) => bytes::find_byte(&this, byte, start, end),
    };

    Ok(cx
        .rt
        .new_int(position.map_or(-1, |n| n as i64)))
}

fn join(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([this, parts], []) = cx.parse_args::<2, 0>("join")?;
    let separator = receiver(cx.rt, this, "join")?;

    let parts = match cx
        .rt
        .objects
        .with_object(parts, |this| this.as_list().map(<[ObjectId]>::to_vec))?
    {
        Some(parts) => parts,
        None => {
            return PyException::type_error()
                .set_message("can only join an iterable")
                .into()
        }
    };

    let mut chunks = Vec::with_capacity(parts.len());

    for (n, part) in parts.into_iter().enumerate() {
        match cx.rt.bytes_of(part)? {
            Some(chunk) => chunks.push(chunk),
            None => {
                return cx.rt.type_error_with(part, |ty| {
                    format!(
                        "sequence item {}: expected a bytes-like object, {} found",
                        n, ty
                    )
                })
            }
        }
    }

    let joined = bytes::join(&separator, chunks.iter().map(Vec::as_slice));

    Ok(cx.rt.new_bytes(joined))
}
