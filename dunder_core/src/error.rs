use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// The kind of a runtime exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ExcKind {
    #[error("AttributeError")]
    AttributeError,

    #[error("TypeError")]
    TypeError,

    #[error("IndexError")]
    IndexError,

    #[error("OverflowError")]
    OverflowError,

    #[error("MemoryError")]
    MemoryError,

    /// Internal inconsistencies, e.g. an object id that no longer refers to anything.
    #[error("SystemError")]
    SystemError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown comparison operator {0:?}, expected one of: lt le eq ne gt ge (or < <= == != > >=)")]
    UnknownCompareOp(String),

    #[error("repeated bytes are too long")]
    RepeatOverflow,

    #[error("cannot allocate {0} bytes")]
    OutOfMemory(usize),
}
