use std::sync::{Arc, Mutex};

use dunder_core::{CompareOp, ExcKind};

use super::*;
use crate::call::CallCx;
use crate::object::ObjectBuilder;
use crate::test::setup;

fn bytes(rt: &Runtime, bytes: &[u8]) -> ObjectId {
    rt.new_bytes(bytes)
}

/// A class whose `__eq__` returns `result` for every comparison.
fn class_with_eq(rt: &Runtime, name: &str, result: ObjectId) -> Arc<crate::object::ClassObject> {
    let eq = rt.new_closure("__eq__", move |_: CallCx<'_>| -> PyResult<ObjectId> {
        Ok(result)
    });

    rt.new_class(ObjectBuilder::class(name).setattr_object("__eq__", eq))
}

#[test]
fn every_object_equals_itself() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A"));

    let objects = [
        rt.none(),
        rt.new_bool(true),
        rt.new_int(4),
        rt.new_float(1.5),
        rt.new_string("s"),
        bytes(&rt, b"xyz"),
        rt.new_dict(),
        rt.new_instance(&a).unwrap(),
        a.alloc_id,
        rt.new_function("f", |cx| Ok(cx.rt.none())),
    ];

    for object in objects {
        assert!(rt.compare(object, object, CompareOp::Eq).unwrap());
        assert!(!rt.compare(object, object, CompareOp::Ne).unwrap());
    }
}

#[test]
fn unrelated_objects_are_unequal() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A"));
    let b = rt.new_class(ObjectBuilder::class("B"));

    let x = rt.new_instance(&a).unwrap();
    let y = rt.new_instance(&b).unwrap();
    let z = rt.new_instance(&a).unwrap();

    assert!(!rt.compare(x, y, CompareOp::Eq).unwrap());
    assert!(rt.compare(x, y, CompareOp::Ne).unwrap());
    assert!(!rt.compare(x, z, CompareOp::Eq).unwrap());

    assert!(!rt.compare(rt.new_int(1), bytes(&rt, b"1"), CompareOp::Eq).unwrap());
    assert!(rt.compare(bytes(&rt, b"1"), rt.new_int(1), CompareOp::Ne).unwrap());
}

#[test]
fn defaults_never_order() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A"));
    let x = rt.new_instance(&a).unwrap();

    assert_eq!(rt.default_eq(x, x), Comparison::Bool(true));
    assert_eq!(rt.default_eq(x, rt.none()), Comparison::NotImplemented);

    for op in [CompareOp::Lt, CompareOp::Le, CompareOp::Gt, CompareOp::Ge] {
        assert!(rt.default_compare(x, x, op).unwrap().is_not_implemented());
    }
}

#[test]
fn ordering_plain_objects_is_a_type_error() {
    let rt = setup();

    let a = rt.new_class(ObjectBuilder::class("A"));
    let b = rt.new_class(ObjectBuilder::class("B"));

    let x = rt.new_instance(&a).unwrap();
    let y = rt.new_instance(&b).unwrap();

    let err = rt.compare(x, y, CompareOp::Lt).unwrap_err();

    assert_eq!(err.kind(), ExcKind::TypeError);
    assert_eq!(
        err.message(),
        Some("'<' not supported between instances of 'A' and 'B'")
    );

    let err = rt.compare(x, x, CompareOp::Ge).unwrap_err();
    assert_eq!(
        err.message(),
        Some("'>=' not supported between instances of 'A' and 'A'")
    );
}

#[test]
fn bytes_order_lexically() {
    let rt = setup();

    let cases: [(&[u8], &[u8], CompareOp, bool); 8] = [
        (b"ab", b"abc", CompareOp::Lt, true),
        (b"b", b"ab", CompareOp::Gt, true),
        (b"ab", b"ab", CompareOp::Eq, true),
        (b"ab", b"ab", CompareOp::Le, true),
        (b"ab", b"ab", CompareOp::Lt, false),
        (b"\x80", b"\x01", CompareOp::Gt, true),
        (b"", b"\x00", CompareOp::Lt, true),
        (b"abd", b"abc", CompareOp::Ne, true),
    ];

    for (left, right, op, expected) in cases {
        let result = rt.compare(bytes(&rt, left), bytes(&rt, right), op).unwrap();
        assert_eq!(result, expected, "{:?} {} {:?}", left, op, right);
    }
}

#[test]
fn ordering_bytes_against_int_fails() {
    let rt = setup();

    let err = rt
        .compare(bytes(&rt, b"a"), rt.new_int(1), CompareOp::Lt)
        .unwrap_err();

    assert_eq!(
        err.message(),
        Some("'<' not supported between instances of 'bytes' and 'int'")
    );
}

#[test]
fn ne_negates_eq() {
    let rt = setup();

    let always = class_with_eq(&rt, "Always", rt.new_bool(true));

    let x = rt.new_instance(&always).unwrap();
    let y = rt.new_instance(&always).unwrap();

    assert!(rt.compare(x, y, CompareOp::Eq).unwrap());
    assert!(!rt.compare(x, y, CompareOp::Ne).unwrap());
    assert_eq!(rt.default_ne(x, y).unwrap(), Comparison::Bool(false));
}

#[test]
fn ne_passes_not_implemented_through() {
    let rt = setup();

    let undecided = class_with_eq(&rt, "Undecided", rt.not_implemented());
    let x = rt.new_instance(&undecided).unwrap();
    let y = rt.new_instance(&undecided).unwrap();

    assert_eq!(rt.default_ne(x, y).unwrap(), Comparison::NotImplemented);
    assert!(rt.compare(x, y, CompareOp::Ne).unwrap());
}

#[test]
fn subclass_gets_the_first_say() {
    let rt = setup();

    let calls = Arc::new(Mutex::new(Vec::new()));

    let recorder = |tag: &'static str| {
        let calls = Arc::clone(&calls);

        rt.new_closure("__eq__", move |cx: CallCx<'_>| -> PyResult<ObjectId> {
            calls.lock().unwrap().push(tag);
            Ok(cx.rt.not_implemented())
        })
    };

    let base = rt.new_class(ObjectBuilder::class("Base").setattr_object("__eq__", recorder("base")));
    let derived = rt.new_class(
        ObjectBuilder::class("Derived")
            .inherit(&base)
            .setattr_object("__eq__", recorder("derived")),
    );

    let x = rt.new_instance(&base).unwrap();
    let y = rt.new_instance(&derived).unwrap();

    assert!(!rt.compare(x, y, CompareOp::Eq).unwrap());
    assert_eq!(*calls.lock().unwrap(), ["derived", "base"]);

    calls.lock().unwrap().clear();

    assert!(!rt.compare(y, x, CompareOp::Eq).unwrap());
    assert_eq!(*calls.lock().unwrap(), ["derived", "base"]);
}

#[test]
fn reflected_operator_is_used() {
    let rt = setup();

    let gt = rt.new_function("__gt__", |cx| {
        cx.parse_args::<2, 0>("__gt__")?;
        Ok(cx.rt.new_bool(true))
    });

    let big = rt.new_class(ObjectBuilder::class("Big").setattr_object("__gt__", gt));
    let a = rt.new_class(ObjectBuilder::class("A"));

    let x = rt.new_instance(&a).unwrap();
    let y = rt.new_instance(&big).unwrap();

    // `x < y` becomes `y > x`
    assert!(rt.compare(x, y, CompareOp::Lt).unwrap());
}

#[test]
fn truth_testing() {
    let rt = setup();

    assert!(!rt.is_true(rt.none()).unwrap());
    assert!(!rt.is_true(rt.new_int(0)).unwrap());
    assert!(rt.is_true(rt.new_int(-1)).unwrap());
    assert!(!rt.is_true(bytes(&rt, b"")).unwrap());
    assert!(rt.is_true(rt.new_string("x")).unwrap());

    let plain = rt.new_class(ObjectBuilder::class("Plain"));
    assert!(rt.is_true(rt.new_instance(&plain).unwrap()).unwrap());

    let len = rt.new_function("__len__", |cx| Ok(cx.rt.new_int(0)));
    let empty = rt.new_class(ObjectBuilder::class("Empty").setattr_object("__len__", len));
    assert!(!rt.is_true(rt.new_instance(&empty).unwrap()).unwrap());

    let bool_ = rt.new_function("__bool__", |cx| Ok(cx.rt.new_int(1)));
    let broken = rt.new_class(ObjectBuilder::class("Broken").setattr_object("__bool__", bool_));

    let err = rt.is_true(rt.new_instance(&broken).unwrap()).unwrap_err();
    assert_eq!(
        err.message(),
        Some("__bool__ should return bool, returned int")
    );
}

#[test]
fn site_stays_on_the_boolean_path() {
    let rt = setup();
    let site = RichCompareSite::new();

    assert_eq!(site.op(), None);

    let pairs: [(&[u8], &[u8]); 3] = [(b"a", b"b"), (b"b", b"a"), (b"a", b"a")];

    for (left, right) in pairs {
        site.execute(&rt, bytes(&rt, left), bytes(&rt, right), CompareOp::Le)
            .unwrap();
    }

    assert_eq!(site.op(), Some(CompareOp::Le));
    assert!(!site.seen_non_boolean());
}

#[test]
fn site_switches_to_truth_testing_once() {
    let rt = setup();
    let site = RichCompareSite::new();

    let weird = class_with_eq(&rt, "Weird", rt.new_int(1));
    let falsy = class_with_eq(&rt, "Falsy", rt.new_string(""));

    let w = rt.new_instance(&weird).unwrap();
    let f = rt.new_instance(&falsy).unwrap();
    let other = rt.new_int(0);

    assert!(site.execute(&rt, w, other, CompareOp::Eq).unwrap());
    assert!(site.seen_non_boolean());

    assert!(!site.execute(&rt, f, other, CompareOp::Eq).unwrap());

    let (a, b) = (bytes(&rt, b"a"), bytes(&rt, b"a"));
    assert!(site.execute(&rt, a, b, CompareOp::Eq).unwrap());
    assert!(site.seen_non_boolean());
}

#[test]
fn site_keeps_its_operator() {
    let rt = setup();
    let site = RichCompareSite::new();

    let (a, b) = (bytes(&rt, b"a"), bytes(&rt, b"b"));

    assert!(site.execute(&rt, a, b, CompareOp::Lt).unwrap());
    assert!(!site.execute(&rt, a, b, CompareOp::Gt).unwrap());
    assert_eq!(site.op(), Some(CompareOp::Lt));
}

#[test]
fn binary_comparison_returns_handler_results() {
    let rt = setup();

    let marker = rt.new_string("marker");
    let odd = class_with_eq(&rt, "Odd", marker);
    let x = rt.new_instance(&odd).unwrap();

    let node = BinaryComparison::new(CompareOp::Eq);

    assert_eq!(node.execute(&rt, x, rt.none()).unwrap(), marker);
    assert_eq!(rt.rich_compare(x, rt.none(), CompareOp::Eq).unwrap(), marker);
}
