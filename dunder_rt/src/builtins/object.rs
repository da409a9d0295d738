use dunder_core::{CompareOp, CLASS};

use crate::call::CallCx;
use crate::exception::{PyException, PyResult};
use crate::object::{ClassObject, GetSetDescr, ObjectBuilder, PyValue};
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

use super::{comparison_natives, with_comparisons};

pub(crate) fn class() -> ObjectBuilder<{ CLASS }> {
    let object = ObjectBuilder::builtin("object")
        .setattr(
            "__getattribute__",
            PyValue::native("__getattribute__", getattribute),
        )
        .setattr("__setattr__", PyValue::native("__setattr__", setattr))
        .setattr("__delattr__", PyValue::native("__delattr__", delattr))
        .setattr("__hash__", PyValue::native("__hash__", hash))
        .setattr("__repr__", PyValue::native("__repr__", repr))
        .setattr("__str__", PyValue::native("__str__", str))
        .setattr("__format__", PyValue::native("__format__", format))
        .setattr(
            "__class__",
            GetSetDescr {
                name: "__class__".into(),
                owner: "object".into(),
                get: Some(get_class),
                set: Some(set_class),
            },
        )
        .setattr(
            "__dict__",
            GetSetDescr {
                name: "__dict__".into(),
                owner: "object".into(),
                get: Some(get_dict),
                set: Some(set_dict),
            },
        );

    with_comparisons!(object)
}

pub(crate) fn type_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("type").setattr("__repr__", PyValue::native("__repr__", type_repr))
}

fn attribute_name(rt: &Runtime, name: ObjectId) -> PyResult<String> {
    match rt.string_of(name)? {
        Some(name) => Ok(name),
        None => rt.type_error_with(name, |ty| {
            format!("attribute name must be string, not '{}'", ty)
        }),
    }
}

fn getattribute(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object, name], []) = cx.parse_args::<2, 0>("__getattribute__")?;
    let name = attribute_name(cx.rt, name)?;

    cx.rt.getattr(object, &name)
}

fn setattr(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object, name, value], []) = cx.parse_args::<3, 0>("__setattr__")?;
    let name = attribute_name(cx.rt, name)?;

    cx.rt.setattr(object, &name, value)?;

    Ok(cx.rt.none())
}

fn delattr(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object, name], []) = cx.parse_args::<2, 0>("__delattr__")?;
    let name = attribute_name(cx.rt, name)?;

    cx.rt.delattr(object, &name)?;

    Ok(cx.rt.none())
}

fn compare(cx: CallCx<'_>, op: CompareOp) -> PyResult<ObjectId> {
    let ([left, right], []) = cx.parse_args::<2, 0>(op.dunder())?;

    cx.rt
        .default_compare(left, right, op)
        .map(|result| result.into_object(cx.rt))
}

comparison_natives!(compare);

fn hash(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object], []) = cx.parse_args::<1, 0>("__hash__")?;

    Ok(cx.rt.new_int(object.get() as i64))
}

fn repr(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object], []) = cx.parse_args::<1, 0>("__repr__")?;

    if object == cx.rt.none() {
        return Ok(cx.rt.new_string("None"));
    }

    let class = cx.rt.class_of(object)?;
    let repr = format!("<{} object at {:#x}>", class.qualified_name(), object);

    Ok(cx.rt.new_string(&repr))
}

fn str(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object], []) = cx.parse_args::<1, 0>("__str__")?;
    let repr = cx.rt.repr(object)?;

    Ok(cx.rt.new_string(&repr))
}

fn format(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([object, spec], []) = cx.parse_args::<2, 0>("__format__")?;

    let spec = match cx.rt.string_of(spec)? {
        Some(spec) => spec,
        None => {
            return cx.rt.type_error_with(spec, |ty| {
                format!("format spec must be a str, not '{}'", ty)
            })
        }
    };

    if !spec.is_empty() {
        return cx.rt.type_error_with(object, |ty| {
            format!("unsupported format string passed to {}.__format__", ty)
        });
    }

    let st = cx.rt.str(object)?;

    Ok(cx.rt.new_string(&st))
}

fn type_repr(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([class], []) = cx.parse_args::<1, 0>("__repr__")?;

    let name = match cx.rt.objects.with_object(class, |this| {
        this.as_class().map(|class| class.qualified_name())
    })? {
        Some(name) => name,
        None => {
            return cx.rt.type_error_with(class, |ty| {
                format!("descriptor '__repr__' requires a 'type' object but received a '{}'", ty)
            })
        }
    };

    Ok(cx.rt.new_string(&format!("<class '{}'>", name)))
}

fn get_class(rt: &Runtime, object: ObjectId) -> PyResult<ObjectId> {
    rt.class_of(object).map(|class| class.alloc_id)
}

fn set_class(rt: &Runtime, object: ObjectId, value: Option<ObjectId>) -> PyResult<()> {
    let value = match value {
        Some(value) => value,
        None => {
            return PyException::type_error()
                .set_message("can't delete __class__ attribute")
                .into()
        }
    };

    let new_class = match rt.objects.with_object(value, |this| this.as_class().cloned())? {
        Some(class) => class,
        None => {
            return rt.type_error_with(value, |ty| {
                format!("__class__ must be set to a class, not '{}' object", ty)
            })
        }
    };

    let old_class = rt.class_of(object)?;
    let is_heap_instance = rt
        .objects
        .with_object(object, |this| this.as_raw().is_some())?;

    if new_class.builtin || old_class.builtin || !is_heap_instance {
        return PyException::type_error()
            .set_message("__class__ assignment only supported for heap types or ModuleType subclasses")
            .into();
    }

    if !layout_compatible(&old_class, &new_class) {
        let err = format!(
            "__class__ assignment: '{}' object layout differs from '{}'",
            new_class.name, old_class.name
        );

        return PyException::type_error().set_message(err).into();
    }

    tracing::trace!(
        "[object.__class__] {:?} reassigned from {:?} to {:?}",
        object,
        old_class.name,
        new_class.name
    );

    rt.objects.with_object_mut(object, |this| {
        if let Some(raw) = this.as_raw_mut() {
            raw.__class__ = new_class;
        }
    })
}

fn layout_compatible(old: &ClassObject, new: &ClassObject) -> bool {
    old.instance_dict == new.instance_dict
}

fn get_dict(rt: &Runtime, object: ObjectId) -> PyResult<ObjectId> {
    match rt.instance_dict(object)? {
        Some(dict) => Ok(dict),
        None => Err(rt.no_such_attribute(object, "__dict__")),
    }
}

fn set_dict(rt: &Runtime, object: ObjectId, value: Option<ObjectId>) -> PyResult<()> {
    match value {
        Some(dict) => rt.replace_instance_dict(object, dict),
        None => PyException::type_error()
            .set_message("cannot delete __dict__")
            .into(),
    }
}

