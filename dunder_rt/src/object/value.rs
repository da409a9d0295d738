use std::sync::Arc;

use dunder_core::{patma, PyDictRaw};

use crate::{call::CallCx, exception::PyResult, rt::Runtime, ObjectId};

use super::{ClassObject, RawObject};

pub(crate) mod sealed {
    use std::sync::Arc;

    use crate::{call::CallCx, exception::PyResult, ObjectId};

    use super::{AnyFunc, NativeFn, PyValue};

    pub trait IntoPyValue {
        fn into_py_val(self) -> PyValue;
    }

    impl<T> IntoPyValue for T
    where
        T: Into<PyValue>,
    {
        fn into_py_val(self) -> PyValue {
            self.into()
        }
    }

    pub trait IntoAnyFunc {
        fn into_any_func(self) -> AnyFunc;
    }

    impl<F> IntoAnyFunc for F
    where
        F: Fn(CallCx<'_>) -> PyResult<ObjectId> + Send + Sync + 'static,
    {
        fn into_any_func(self) -> AnyFunc {
            AnyFunc::Boxed {
                inner: Arc::new(self),
            }
        }
    }

    impl IntoAnyFunc for AnyFunc {
        fn into_any_func(self) -> AnyFunc {
            self
        }
    }

    impl From<NativeFn> for AnyFunc {
        fn from(inner: NativeFn) -> Self {
            AnyFunc::Native { inner }
        }
    }
}

pub use sealed::{IntoAnyFunc, IntoPyValue};

pub type NativeFn = fn(CallCx<'_>) -> PyResult<ObjectId>;

/// Native accessor backing a getset descriptor.
pub type GetterFn = fn(&Runtime, ObjectId) -> PyResult<ObjectId>;

/// Native mutator backing a getset descriptor, `None` requests deletion.
pub type SetterFn = fn(&Runtime, ObjectId, Option<ObjectId>) -> PyResult<()>;

#[derive(Clone)]
pub enum AnyFunc {
    Native {
        inner: NativeFn,
    },

    Boxed {
        inner: Arc<dyn Fn(CallCx<'_>) -> PyResult<ObjectId> + Send + Sync>,
    },
}

impl AnyFunc {
    #[inline]
    pub fn call(&self, cx: CallCx<'_>) -> PyResult<ObjectId> {
        match self {
            AnyFunc::Native { inner } => inner(cx),
            AnyFunc::Boxed { inner } => inner(cx),
        }
    }
}

impl std::fmt::Debug for AnyFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native { inner } => f
                .debug_tuple("Native")
                .field(&(*inner as *const ()))
                .finish(),

            Self::Boxed { inner } => f
                .debug_tuple("Boxed")
                .field(&Arc::as_ptr(inner))
                .finish(),
        }
    }
}

/// A native attribute accessor pair, e.g. `object.__dict__`.
#[derive(Clone)]
pub struct GetSetDescr {
    pub name: Box<str>,
    pub owner: Box<str>,
    pub get: Option<GetterFn>,
    pub set: Option<SetterFn>,
}

impl std::fmt::Debug for GetSetDescr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetSetDescr")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .finish()
    }
}

/// Representation of any runtime object.
#[derive(Debug, Clone)]
pub enum PyValue {
    // instances of user-level classes.
    Any(RawObject),

    // primitives
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    NotImplemented,

    // basic compounds
    Bytes(Vec<u8>),
    Str(Box<str>),
    Dict(PyDictRaw<ObjectId>),
    List(Vec<ObjectId>),

    Class(Arc<ClassObject>),

    Function {
        name: Box<str>,
        body: AnyFunc,
    },

    BoundMethod {
        receiver: ObjectId,
        func: ObjectId,
    },

    /// A data descriptor whose accessors are runtime callables.
    Property {
        fget: Option<ObjectId>,
        fset: Option<ObjectId>,
        fdel: Option<ObjectId>,
    },

    GetSet(GetSetDescr),
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PyValue {
                fn from(v: $ty) -> Self {
                    PyValue::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    RawObject => Any,
    i64 => Int,
    f64 => Float,
    bool => Bool,
    Vec<u8> => Bytes,
    Box<str> => Str,
    PyDictRaw<ObjectId> => Dict,
    Vec<ObjectId> => List,
    Arc<ClassObject> => Class,
    GetSetDescr => GetSet,
}

impl From<&str> for PyValue {
    fn from(st: &str) -> Self {
        PyValue::Str(st.into())
    }
}

impl From<String> for PyValue {
    fn from(st: String) -> Self {
        PyValue::Str(st.into_boxed_str())
    }
}

impl From<&[u8]> for PyValue {
    fn from(bytes: &[u8]) -> Self {
        PyValue::Bytes(bytes.to_vec())
    }
}

impl PyValue {
    pub fn function<S, F>(name: S, body: F) -> Self
    where
        S: Into<Box<str>>,
        F: IntoAnyFunc,
    {
        PyValue::Function {
            name: name.into(),
            body: body.into_any_func(),
        }
    }

    pub fn native(name: &str, body: NativeFn) -> Self {
        PyValue::Function {
            name: name.into(),
            body: AnyFunc::from(body),
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        patma!(*n, PyValue::Int(n) in self)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        patma!(*b, PyValue::Bool(b) in self)
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        patma!(st.as_ref(), PyValue::Str(st) in self)
    }

    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        patma!(bytes.as_slice(), PyValue::Bytes(bytes) in self)
    }

    #[inline]
    pub fn as_class(&self) -> Option<&Arc<ClassObject>> {
        patma!(class, PyValue::Class(class) in self)
    }

    #[inline]
    pub fn as_dict(&self) -> Option<&PyDictRaw<ObjectId>> {
        patma!(dict, PyValue::Dict(dict) in self)
    }

    #[inline]
    pub fn as_dict_mut(&mut self) -> Option<&mut PyDictRaw<ObjectId>> {
        patma!(dict, PyValue::Dict(dict) in self)
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[ObjectId]> {
        patma!(list.as_slice(), PyValue::List(list) in self)
    }

    #[inline]
    pub fn as_raw_mut(&mut self) -> Option<&mut RawObject> {
        patma!(raw, PyValue::Any(raw) in self)
    }

    #[inline]
    pub fn as_raw(&self) -> Option<&RawObject> {
        patma!(raw, PyValue::Any(raw) in self)
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self, PyValue::Function { .. })
    }
}
