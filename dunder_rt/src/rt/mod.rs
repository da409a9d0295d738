use std::sync::Arc;

use dunder_core::CLASS;

use crate::exception::{PyException, PyResult, PyResultExt};
use crate::object::{ClassObject, IntoAnyFunc, NativeFn, ObjectBuilder, ObjectId, PyValue};
use crate::rt::singletons::Singletons;
use crate::storage::{DefaultObjectSpace, ObjectSpace};

mod raise;
pub mod singletons;


/// The object model: an object space plus the builtin classes every object
/// ultimately belongs to.
///
/// All entry points take `&self`; a runtime can be shared between threads.
#[derive(Debug)]
pub struct Runtime {
    /// All of the objects get stored here.
    pub objects: DefaultObjectSpace,

    /// Builtin classes and constants.
    pub singletons: Singletons,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        let objects = DefaultObjectSpace::new();
        let singletons = Singletons::bootstrap(&objects);

        tracing::debug!(
            "[Runtime::new] bootstrapped {:?} builtin objects",
            objects.size_hint()
        );

        Self {
            objects,
            singletons,
        }
    }

    #[track_caller]
    pub fn class_of(&self, obj: ObjectId) -> PyResult<Arc<ClassObject>> {
        let Singletons {
            type_class,
            none_class,
            not_implemented_class,
            bool_class,
            int_class,
            float_class,
            str_class,
            bytes_class,
            dict_class,
            list_class,
            function_class,
            method_class,
            property_class,
            getset_class,
            ..
        } = &self.singletons;

        self.objects.with_object(obj, |this| {
            let class = match this {
                PyValue::Any(raw) => &raw.__class__,
                PyValue::Int(_) => int_class,
                PyValue::Float(_) => float_class,
                PyValue::Bool(_) => bool_class,
                PyValue::None => none_class,
                PyValue::NotImplemented => not_implemented_class,
                PyValue::Bytes(_) => bytes_class,
                PyValue::Str(_) => str_class,
                PyValue::Dict(_) => dict_class,
                PyValue::List(_) => list_class,
                PyValue::Class(_) => type_class,
                PyValue::Function { .. } => function_class,
                PyValue::BoundMethod { .. } => method_class,
                PyValue::Property { .. } => property_class,
                PyValue::GetSet(_) => getset_class,
            };

            Arc::clone(class)
        })
    }

    pub fn type_name(&self, obj: ObjectId) -> PyResult<String> {
        Ok(self.class_of(obj)?.name.to_string())
    }

    #[inline]
    pub fn none(&self) -> ObjectId {
        self.singletons.none_v
    }

    #[inline]
    pub fn not_implemented(&self) -> ObjectId {
        self.singletons.not_implemented_v
    }

    #[inline]
    pub fn is_not_implemented(&self, obj: ObjectId) -> bool {
        obj == self.singletons.not_implemented_v
    }

    #[inline]
    pub fn new_bool(&self, b: bool) -> ObjectId {
        if b {
            self.singletons.true_v
        } else {
            self.singletons.false_v
        }
    }

    pub fn new_string(&self, string: &str) -> ObjectId {
        self.objects.insert(PyValue::from(string))
    }

    pub fn new_int(&self, n: i64) -> ObjectId {
        self.objects.insert(PyValue::Int(n))
    }

    pub fn new_float(&self, n: f64) -> ObjectId {
        self.objects.insert(PyValue::Float(n))
    }

    pub fn new_bytes<B>(&self, bytes: B) -> ObjectId
    where
        B: Into<Vec<u8>>,
    {
        self.objects.insert(PyValue::Bytes(bytes.into()))
    }

    pub fn new_dict(&self) -> ObjectId {
        self.objects.insert(PyValue::Dict(Default::default()))
    }

    pub fn new_list(&self, items: Vec<ObjectId>) -> ObjectId {
        self.objects.insert(PyValue::List(items))
    }

    pub fn new_function(&self, name: &str, body: NativeFn) -> ObjectId {
        self.objects.insert(PyValue::native(name, body))
    }

    /// Like `new_function` but for closures capturing state.
    pub fn new_closure<F>(&self, name: &str, body: F) -> ObjectId
    where
        F: IntoAnyFunc,
    {
        self.objects.insert(PyValue::function(name, body))
    }

    pub fn new_property(
        &self,
        fget: Option<ObjectId>,
        fset: Option<ObjectId>,
        fdel: Option<ObjectId>,
    ) -> ObjectId {
        self.objects.insert(PyValue::Property { fget, fset, fdel })
    }

    pub fn new_bound_method(&self, receiver: ObjectId, func: ObjectId) -> ObjectId {
        self.objects.insert(PyValue::BoundMethod { receiver, func })
    }

    /// Build a class; ancestor sequences that stop short of `object` get it appended.
    pub fn new_class(&self, class: ObjectBuilder<{ CLASS }>) -> Arc<ClassObject> {
        let object_class = &self.singletons.object_class;

        let class = if class.ends_with(object_class) {
            class
        } else {
            class.push_ancestor(object_class)
        };

        class.synthesise_within(&self.objects)
    }

    /// A fresh instance with no instance storage yet.
    pub fn new_instance(&self, class: &Arc<ClassObject>) -> PyResult<ObjectId> {
        ObjectBuilder::object(class).synthesise_within(self).trace()
    }

    pub fn as_bool(&self, obj: ObjectId) -> PyResult<Option<bool>> {
        self.objects.with_object(obj, PyValue::as_bool)
    }

    pub fn as_int(&self, obj: ObjectId) -> PyResult<Option<i64>> {
        self.objects.with_object(obj, PyValue::as_int)
    }

    pub fn string_of(&self, obj: ObjectId) -> PyResult<Option<String>> {
        self.objects
            .with_object(obj, |this| this.as_str().map(str::to_owned))
    }

    pub fn bytes_of(&self, obj: ObjectId) -> PyResult<Option<Vec<u8>>> {
        self.objects
            .with_object(obj, |this| this.as_bytes().map(<[u8]>::to_vec))
    }

    /// `repr(obj)` through the type's `__repr__`.
    pub fn repr(&self, obj: ObjectId) -> PyResult<String> {
        self.stringify(obj, "__repr__")
    }

    /// `str(obj)` through the type's `__str__`.
    pub fn str(&self, obj: ObjectId) -> PyResult<String> {
        self.stringify(obj, "__str__")
    }

    fn stringify(&self, obj: ObjectId, dunder: &str) -> PyResult<String> {
        let result = match self.call_special(obj, dunder, &[]).trace()? {
            Some(result) => result,
            None => return Ok(format!("<object at {:#x}>", obj)),
        };

        match self.string_of(result)? {
            Some(st) => Ok(st),
            None => {
                let err = format!(
                    "{}() returned non-string (type {})",
                    dunder,
                    self.type_name(result)?
                );

                PyException::type_error().set_message(err).into()
            }
        }
    }
}
