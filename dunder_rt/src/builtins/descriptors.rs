use dunder_core::CLASS;

use crate::call::CallCx;
use crate::exception::{PyException, PyResult, PyResultExt};
use crate::object::{GetSetDescr, ObjectBuilder, PyValue};
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

pub(crate) fn function_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("function")
        .setattr("__get__", PyValue::native("__get__", function_get))
        .setattr("__repr__", PyValue::native("__repr__", function_repr))
}

pub(crate) fn method_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("method").setattr("__repr__", PyValue::native("__repr__", method_repr))
}

pub(crate) fn property_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("property")
        .setattr("__get__", PyValue::native("__get__", property_get))
        .setattr("__set__", PyValue::native("__set__", property_set))
        .setattr("__delete__", PyValue::native("__delete__", property_delete))
}

pub(crate) fn getset_class() -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::builtin("getset_descriptor")
        .setattr("__get__", PyValue::native("__get__", getset_get))
        .setattr("__set__", PyValue::native("__set__", getset_set))
        .setattr("__delete__", PyValue::native("__delete__", getset_delete))
}

/// `descr.__get__(None, owner)` asks for the descriptor itself, unless the
/// owner is `NoneType` and `None` is the actual receiver.
fn is_unbound_access(rt: &Runtime, instance: ObjectId, owner: Option<ObjectId>) -> bool {
    instance == rt.none() && owner != Some(rt.singletons.none_class.alloc_id)
}

fn function_get(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([func, instance], [_owner]) = cx.parse_args::<2, 1>("__get__")?;

    if instance == cx.rt.none() {
        Ok(func)
    } else {
        Ok(cx.rt.new_bound_method(instance, func))
    }
}

fn function_name(rt: &Runtime, func: ObjectId) -> PyResult<String> {
    rt.objects.with_object(func, |this| match this {
        PyValue::Function { name, .. } => name.to_string(),
        _ => "?".to_owned(),
    })
}

fn function_repr(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([func], []) = cx.parse_args::<1, 0>("__repr__")?;
    let name = function_name(cx.rt, func)?;

    Ok(cx
        .rt
        .new_string(&format!("<function {} at {:#x}>", name, func)))
}

fn method_repr(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([method], []) = cx.parse_args::<1, 0>("__repr__")?;

    let (receiver, func) = match cx.rt.objects.with_object(method, |this| match this {
        PyValue::BoundMethod { receiver, func } => Some((*receiver, *func)),
        _ => None,
    })? {
        Some(parts) => parts,
        None => return Ok(cx.rt.new_string("<method>")),
    };

    let repr = format!(
        "<bound method {} of {}>",
        function_name(cx.rt, func)?,
        cx.rt.repr(receiver)?
    );

    Ok(cx.rt.new_string(&repr))
}

type Accessors = (Option<ObjectId>, Option<ObjectId>, Option<ObjectId>);

fn property_accessors(rt: &Runtime, property: ObjectId) -> PyResult<Accessors> {
    let accessors = rt.objects.with_object(property, |this| match this {
        PyValue::Property { fget, fset, fdel } => Some((*fget, *fset, *fdel)),
        _ => None,
    })?;

    match accessors {
        Some(accessors) => Ok(accessors),
        None => rt.type_error_with(property, |ty| {
            format!("descriptor requires a 'property' object but received a '{}'", ty)
        }),
    }
}

fn property_get(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([property, instance], [owner]) = cx.parse_args::<2, 1>("__get__")?;

    if is_unbound_access(cx.rt, instance, owner) {
        return Ok(property);
    }

    match property_accessors(cx.rt, property)? {
        (Some(fget), _, _) => cx.rt.call_object(fget, &[instance]).trace(),
        (None, _, _) => PyException::attribute_error("")
            .set_message("unreadable attribute")
            .into(),
    }
}

fn property_set(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([property, instance, value], []) = cx.parse_args::<3, 0>("__set__")?;

    match property_accessors(cx.rt, property)? {
        (_, Some(fset), _) => {
            cx.rt.call_object(fset, &[instance, value]).trace()?;
            Ok(cx.rt.none())
        }

        (_, None, _) => PyException::attribute_error("")
            .set_message("can't set attribute")
            .into(),
    }
}

fn property_delete(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([property, instance], []) = cx.parse_args::<2, 0>("__delete__")?;

    match property_accessors(cx.rt, property)? {
        (_, _, Some(fdel)) => {
            cx.rt.call_object(fdel, &[instance]).trace()?;
            Ok(cx.rt.none())
        }

        (_, _, None) => PyException::attribute_error("")
            .set_message("can't delete attribute")
            .into(),
    }
}

fn getset_descr(rt: &Runtime, descr: ObjectId) -> PyResult<GetSetDescr> {
    let getset = rt.objects.with_object(descr, |this| match this {
        PyValue::GetSet(getset) => Some(getset.clone()),
        _ => None,
    })?;

    match getset {
        Some(getset) => Ok(getset),
        None => rt.type_error_with(descr, |ty| {
            format!(
                "descriptor requires a 'getset_descriptor' object but received a '{}'",
                ty
            )
        }),
    }
}

fn not_writable(getset: &GetSetDescr) -> PyException {
    PyException::attribute_error(getset.name.clone()).set_message(format!(
        "attribute '{}' of '{}' objects is not writable",
        getset.name, getset.owner
    ))
}

fn getset_get(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([descr, instance], [owner]) = cx.parse_args::<2, 1>("__get__")?;

    if is_unbound_access(cx.rt, instance, owner) {
        return Ok(descr);
    }

    let getset = getset_descr(cx.rt, descr)?;

    match getset.get {
        Some(get) => get(cx.rt, instance).trace(),
        None => Err(PyException::attribute_error(getset.name.clone()).set_message(format!(
            "attribute '{}' of '{}' objects is not readable",
            getset.name, getset.owner
        ))),
    }
}

fn getset_set(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([descr, instance, value], []) = cx.parse_args::<3, 0>("__set__")?;
    let getset = getset_descr(cx.rt, descr)?;

    match getset.set {
        Some(set) => set(cx.rt, instance, Some(value)).trace()?,
        None => return Err(not_writable(&getset)),
    }

    Ok(cx.rt.none())
}

fn getset_delete(cx: CallCx<'_>) -> PyResult<ObjectId> {
    let ([descr, instance], []) = cx.parse_args::<2, 0>("__delete__")?;
    let getset = getset_descr(cx.rt, descr)?;

    match getset.set {
        Some(set) => set(cx.rt, instance, None).trace()?,
        None => return Err(not_writable(&getset)),
    }

    Ok(cx.rt.none())
}
