use dunder_core::ExcKind;

use crate::object::{GetSetDescr, ObjectBuilder};
use crate::test::setup;
use crate::{ObjectId, PyException, PyResult, Runtime};

fn bytes_of(rt: &Runtime, object: ObjectId) -> Vec<u8> {
    rt.bytes_of(object).unwrap().unwrap()
}

fn int_of(rt: &Runtime, object: ObjectId) -> i64 {
    rt.as_int(object).unwrap().unwrap()
}

fn find(rt: &Runtime, haystack: ObjectId, args: &[ObjectId]) -> i64 {
    int_of(rt, rt.call_method(haystack, "find", args).unwrap())
}

fn message(result: PyResult<ObjectId>) -> String {
    let err: PyException = result.unwrap_err();

    err.message().unwrap_or_default().to_owned()
}

#[test]
fn bytes_getitem() {
    let rt = setup();
    let abc = rt.new_bytes(b"abc".to_vec());

    let at = |n: i64| rt.call_method(abc, "__getitem__", &[rt.new_int(n)]);

    assert_eq!(int_of(&rt, at(0).unwrap()), 97);
    assert_eq!(int_of(&rt, at(-1).unwrap()), 99);

    let err = at(3).unwrap_err();
    assert_eq!(err.kind(), ExcKind::IndexError);
    assert_eq!(err.message(), Some("index out of range"));

    assert_eq!(message(at(-4)), "index out of range");

    assert_eq!(
        message(rt.call_method(abc, "__getitem__", &[rt.new_string("0")])),
        "byte indices must be integers, not 'str'"
    );

    assert_eq!(
        message(rt.call_method(abc, "__setitem__", &[rt.new_int(0), rt.new_int(1)])),
        "'bytes' object does not support item assignment"
    );
}

#[test]
fn bytes_concat_and_repeat() {
    let rt = setup();

    let ab = rt.new_bytes(b"ab".to_vec());
    let cd = rt.new_bytes(b"cd".to_vec());

    let joined = rt.call_method(ab, "__add__", &[cd]).unwrap();
    assert_eq!(bytes_of(&rt, joined), b"abcd");

    let joined = rt.call_method(ab, "__radd__", &[cd]).unwrap();
    assert_eq!(bytes_of(&rt, joined), b"cdab");

    assert_eq!(
        message(rt.call_method(ab, "__add__", &[rt.new_int(1)])),
        "can't concat bytes to int"
    );

    let repeated = rt.call_method(ab, "__mul__", &[rt.new_int(3)]).unwrap();
    assert_eq!(bytes_of(&rt, repeated), b"ababab");

    let empty = rt.call_method(ab, "__rmul__", &[rt.new_int(-2)]).unwrap();
    assert_eq!(bytes_of(&rt, empty), b"");

    assert_eq!(
        message(rt.call_method(ab, "__mul__", &[rt.new_string("2")])),
        "can't multiply sequence by non-int of type 'str'"
    );

    assert_eq!(int_of(&rt, rt.call_method(ab, "__len__", &[]).unwrap()), 2);
}

#[test]
fn bytes_repeat_too_long() {
    let rt = setup();
    let ab = rt.new_bytes(b"ab".to_vec());

    let err = rt
        .call_method(ab, "__mul__", &[rt.new_int(i64::MAX)])
        .unwrap_err();

    assert_eq!(err.kind(), ExcKind::OverflowError);
    assert_eq!(err.message(), Some("repeated bytes are too long"));

    let err = rt
        .call_method(ab, "__rmul__", &[rt.new_int(i64::MAX / 2 + 1)])
        .unwrap_err();

    assert_eq!(err.kind(), ExcKind::OverflowError);

    let empty = rt.new_bytes(Vec::new());
    let repeated = rt.call_method(empty, "__mul__", &[rt.new_int(i64::MAX)]).unwrap();
    assert_eq!(bytes_of(&rt, repeated), b"");
}

#[test]
fn bytes_contains() {
    let rt = setup();
    let hello = rt.new_bytes(b"hello".to_vec());

    let contains = |item| {
        let found = rt.call_method(hello, "__contains__", &[item])?;
        Ok::<_, PyException>(rt.as_bool(found).unwrap().unwrap())
    };

    assert!(contains(rt.new_bytes(b"ell".to_vec())).unwrap());
    assert!(contains(rt.new_bytes(b"".to_vec())).unwrap());
    assert!(!contains(rt.new_bytes(b"elo".to_vec())).unwrap());
    assert!(contains(rt.new_int(104)).unwrap());
    assert!(!contains(rt.new_int(0)).unwrap());

    let err = contains(rt.new_string("h")).unwrap_err();
    assert_eq!(err.message(), Some("a bytes-like object is required, not 'str'"));
}

#[test]
fn bytes_search_and_trim() {
    let rt = setup();
    let text = rt.new_bytes(b"  hello world  ".to_vec());

    let stripped = rt.call_method(text, "strip", &[]).unwrap();
    assert_eq!(bytes_of(&rt, stripped), b"hello world");

    let chars = rt.new_bytes(b" hd".to_vec());
    let stripped = rt.call_method(text, "strip", &[chars]).unwrap();
    assert_eq!(bytes_of(&rt, stripped), b"ello worl");

    let o = rt.new_bytes(b"o".to_vec());
    let l = rt.new_bytes(b"l".to_vec());

    assert_eq!(find(&rt, stripped, &[o]), 3);
    assert_eq!(find(&rt, stripped, &[o, rt.new_int(4)]), 6);
    assert_eq!(find(&rt, stripped, &[o, rt.new_int(-3)]), 6);
    assert_eq!(find(&rt, stripped, &[rt.new_bytes(b"zz".to_vec())]), -1);
    assert_eq!(find(&rt, stripped, &[rt.new_int(i64::from(b'w'))]), 5);
    assert_eq!(find(&rt, stripped, &[l, rt.none(), rt.new_int(1)]), -1);

    let starts = rt
        .call_method(stripped, "startswith", &[rt.new_bytes(b"ell".to_vec())])
        .unwrap();
    assert!(rt.as_bool(starts).unwrap().unwrap());

    let ends = rt
        .call_method(
            stripped,
            "endswith",
            &[rt.new_bytes(b"wor".to_vec()), rt.new_int(0), rt.new_int(-1)],
        )
        .unwrap();
    assert!(rt.as_bool(ends).unwrap().unwrap());
}

#[test]
fn bytes_join_and_repr() {
    let rt = setup();

    let sep = rt.new_bytes(b", ".to_vec());
    let parts = rt.new_list(vec![
        rt.new_bytes(b"a".to_vec()),
        rt.new_bytes(b"b".to_vec()),
        rt.new_bytes(b"c".to_vec()),
    ]);

    let joined = rt.call_method(sep, "join", &[parts]).unwrap();
    assert_eq!(bytes_of(&rt, joined), b"a, b, c");

    let bad = rt.new_list(vec![rt.new_bytes(b"a".to_vec()), rt.new_int(1)]);
    assert_eq!(
        message(rt.call_method(sep, "join", &[bad])),
        "sequence item 1: expected a bytes-like object, int found"
    );

    assert_eq!(
        message(rt.call_method(sep, "join", &[rt.new_int(1)])),
        "can only join an iterable"
    );

    assert_eq!(rt.repr(rt.new_bytes(b"it's".to_vec())).unwrap(), "b\"it's\"");
    assert_eq!(rt.repr(rt.new_bytes(b"\t\xff".to_vec())).unwrap(), "b'\\t\\xff'");
}

#[test]
fn bytes_eq_requires_bytes_receiver() {
    let rt = setup();

    let eq = rt.singletons.bytes_class.own_member("__eq__").unwrap();
    let abc = rt.new_bytes(b"abc".to_vec());

    assert_eq!(
        message(rt.call_object(eq, &[rt.new_int(1), abc])),
        "descriptor '__eq__' requires a 'bytes' object but received a 'int'"
    );

    let result = rt.call_object(eq, &[abc, rt.new_int(1)]).unwrap();
    assert!(rt.is_not_implemented(result));
}

#[test]
fn int_and_str_compare_by_value() {
    use dunder_core::CompareOp;

    let rt = setup();

    assert!(rt.compare(rt.new_int(2), rt.new_int(2), CompareOp::Eq).unwrap());
    assert!(rt.compare(rt.new_int(1), rt.new_bool(true), CompareOp::Eq).unwrap());
    assert!(rt.compare(rt.new_int(1), rt.new_int(2), CompareOp::Lt).unwrap());
    assert!(rt.compare(rt.new_string("b"), rt.new_string("a"), CompareOp::Gt).unwrap());
    assert!(!rt.compare(rt.new_string("1"), rt.new_int(1), CompareOp::Eq).unwrap());
}

#[test]
fn attribute_names_must_be_strings() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A"));
    let object = rt.new_instance(&a).unwrap();

    assert_eq!(
        message(rt.call_method(object, "__getattribute__", &[rt.new_int(1)])),
        "attribute name must be string, not 'int'"
    );

    let name = rt.new_string("k");
    let value = rt.new_int(9);

    rt.call_method(object, "__setattr__", &[name, value]).unwrap();
    assert_eq!(rt.call_method(object, "__getattribute__", &[name]).unwrap(), value);

    rt.call_method(object, "__delattr__", &[name]).unwrap();
    assert!(rt.getattr(object, "k").is_err());
}

#[test]
fn object_format() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A"));
    let object = rt.new_instance(&a).unwrap();

    let formatted = rt
        .call_method(object, "__format__", &[rt.new_string("")])
        .unwrap();
    assert_eq!(
        rt.string_of(formatted).unwrap().unwrap(),
        rt.repr(object).unwrap()
    );

    assert_eq!(
        message(rt.call_method(object, "__format__", &[rt.new_string(">10")])),
        "unsupported format string passed to A.__format__"
    );

    assert_eq!(
        message(rt.call_method(object, "__format__", &[rt.new_int(1)])),
        "format spec must be a str, not 'int'"
    );
}

#[test]
fn object_hash_is_identity_based() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A"));
    let x = rt.new_instance(&a).unwrap();
    let y = rt.new_instance(&a).unwrap();

    let hash = |object| int_of(&rt, rt.call_method(object, "__hash__", &[]).unwrap());

    assert_eq!(hash(x), hash(x));
    assert_ne!(hash(x), hash(y));
    assert_eq!(hash(rt.new_int(-1)), -2);
}

#[test]
fn class_assignment() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A"));
    let b = rt.new_class(ObjectBuilder::class("B").setattr("tag", 1i64));
    let slotted = rt.new_class(ObjectBuilder::class("Slotted").instance_dict(false));

    let object = rt.new_instance(&a).unwrap();

    let set_class = |value| rt.setattr(object, "__class__", value);

    let err = set_class(rt.new_int(1)).unwrap_err();
    assert_eq!(
        err.message(),
        Some("__class__ must be set to a class, not 'int' object")
    );

    let err = set_class(rt.singletons.int_class.alloc_id).unwrap_err();
    assert_eq!(
        err.message(),
        Some("__class__ assignment only supported for heap types or ModuleType subclasses")
    );

    let err = set_class(slotted.alloc_id).unwrap_err();
    assert_eq!(
        err.message(),
        Some("__class__ assignment: 'Slotted' object layout differs from 'A'")
    );

    set_class(b.alloc_id).unwrap();
    assert_eq!(rt.class_of(object).unwrap().alloc_id, b.alloc_id);
    assert_eq!(int_of(&rt, rt.getattr(object, "tag").unwrap()), 1);

    let err = rt
        .setattr(rt.new_int(1), "__class__", b.alloc_id)
        .unwrap_err();
    assert!(err.is_type_error());

    let err = rt.delattr(object, "__class__").unwrap_err();
    assert_eq!(err.message(), Some("can't delete __class__ attribute"));
}

fn read_only_get(rt: &Runtime, _: ObjectId) -> PyResult<ObjectId> {
    Ok(rt.new_string("fixed"))
}

#[test]
fn getset_without_setter_is_not_writable() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A").setattr(
        "ro",
        GetSetDescr {
            name: "ro".into(),
            owner: "A".into(),
            get: Some(read_only_get),
            set: None,
        },
    ));

    let object = rt.new_instance(&a).unwrap();

    let value = rt.getattr(object, "ro").unwrap();
    assert_eq!(rt.string_of(value).unwrap().as_deref(), Some("fixed"));

    let err = rt.setattr(object, "ro", rt.none()).unwrap_err();
    assert_eq!(err.message(), Some("attribute 'ro' of 'A' objects is not writable"));

    let err = rt.delattr(object, "ro").unwrap_err();
    assert_eq!(err.message(), Some("attribute 'ro' of 'A' objects is not writable"));
}

#[test]
fn descriptors_accessed_without_an_instance() {
    let rt = setup();

    let fget = rt.new_function("fget", |cx| Ok(cx.rt.none()));
    let prop = rt.new_property(Some(fget), None, None);

    let get = rt.singletons.property_class.own_member("__get__").unwrap();
    let owner = rt.singletons.object_class.alloc_id;

    assert_eq!(rt.call_object(get, &[prop, rt.none(), owner]).unwrap(), prop);

    let func_get = rt.singletons.function_class.own_member("__get__").unwrap();
    assert_eq!(rt.call_object(func_get, &[fget, rt.none(), owner]).unwrap(), fget);
}

#[test]
fn method_repr_names_the_receiver() {
    let rt = setup();

    let method = rt.new_function("method", |cx| Ok(cx.rt.none()));
    let a = rt.new_class(ObjectBuilder::class("A").setattr_object("method", method));
    let object = rt.new_instance(&a).unwrap();

    let bound = rt.getattr(object, "method").unwrap();
    let repr = rt.repr(bound).unwrap();

    assert!(repr.starts_with("<bound method method of <A object at 0x"), "{}", repr);
    assert!(rt.repr(method).unwrap().starts_with("<function method at 0x"));
}
