use std::{fmt, panic::Location};

use dunder_core::ExcKind;

use crate::object::ObjectId;

pub type PyResult<T> = ::std::result::Result<T, self::PyException>;

pub trait PyResultExt {
    fn trace(self) -> Self;
}

impl<T> PyResultExt for PyResult<T> {
    #[track_caller]
    fn trace(self) -> Self {
        match self {
            ok @ Ok(_) => ok,
            Err(mut exc) => {
                exc.trace.push(TracePoint {
                    location: Some(*Location::caller()),
                });

                Err(exc)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum InnerExc {
    UnknownObject(ObjectId),

    AttributeError { name: Box<str> },

    TypeError,

    IndexError,

    OverflowError,

    MemoryError,
}

#[derive(Debug, Clone)]
pub struct TracePoint {
    pub location: Option<Location<'static>>,
}

#[derive(Debug, Clone)]
pub struct PyException {
    pub(crate) message: Option<Box<str>>,
    pub(crate) inner: InnerExc,
    pub(crate) trace: Vec<TracePoint>,
}

impl PyException {
    #[track_caller]
    fn new(inner: InnerExc) -> Self {
        let this = Self {
            message: None,
            inner,
            trace: Vec::with_capacity(2),
        };

        this.trace()
    }

    #[track_caller]
    fn trace(mut self) -> Self {
        self.trace.push(TracePoint {
            location: Some(*Location::caller()),
        });

        self
    }
}

impl<T> From<PyException> for Result<T, PyException> {
    fn from(exc: PyException) -> Self {
        Err(exc)
    }
}

impl PyException {
    pub fn kind(&self) -> ExcKind {
        match self.inner {
            InnerExc::UnknownObject(_) => ExcKind::SystemError,
            InnerExc::AttributeError { .. } => ExcKind::AttributeError,
            InnerExc::TypeError => ExcKind::TypeError,
            InnerExc::IndexError => ExcKind::IndexError,
            InnerExc::OverflowError => ExcKind::OverflowError,
            InnerExc::MemoryError => ExcKind::MemoryError,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The attribute name an `AttributeError` was raised for.
    pub fn attribute_name(&self) -> Option<&str> {
        match &self.inner {
            InnerExc::AttributeError { name } => Some(name),
            _ => None,
        }
    }

    pub fn tracepoints(&self) -> &[TracePoint] {
        &self.trace
    }

    pub fn is_attribute_error(&self) -> bool {
        matches!(self.inner, InnerExc::AttributeError { .. })
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self.inner, InnerExc::TypeError)
    }

    pub fn set_message<S>(mut self, message: S) -> Self
    where
        S: AsRef<str>,
    {
        self.message = Some(message.as_ref().into());
        self
    }

    #[track_caller]
    pub fn no_such_object(alloc: ObjectId) -> Self {
        Self::new(InnerExc::UnknownObject(alloc))
            .set_message(format!("object {:?} does not exist", alloc))
    }

    #[track_caller]
    pub fn attribute_error<S>(name: S) -> Self
    where
        S: Into<Box<str>>,
    {
        Self::new(InnerExc::AttributeError { name: name.into() })
    }

    #[track_caller]
    pub fn overflow_error() -> Self {
        Self::new(InnerExc::OverflowError)
    }

    #[track_caller]
    pub fn memory_error() -> Self {
        Self::new(InnerExc::MemoryError)
    }

    #[track_caller]
    pub fn type_error() -> Self {
        Self::new(InnerExc::TypeError)
    }

    #[track_caller]
    pub fn index_error() -> Self {
        Self::new(InnerExc::IndexError)
    }
}

impl fmt::Display for PyException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind(), message),
            None => write!(f, "{}", self.kind()),
        }
    }
}

impl std::error::Error for PyException {}
