//! Fundamental types that are shared and used all over the place.
//!
//! Nothing in here knows about the object space or the runtime. What lives here
//! is either plain data (operator tokens, error kinds, the storage map) or pure
//! algorithms over plain data (byte-sequence ordering and searching) that the
//! runtime wraps into builtin members.
//!

pub mod bytes;
pub mod dict;
pub mod error;
pub mod ops;
pub mod utils;

pub type MapT<K, V> = ahash::AHashMap<K, V>;

/// Tag for builders that produce class objects.
pub const CLASS: usize = 0xc1a55;

/// Tag for builders that produce plain instances.
pub const OBJECT: usize = 0xba5ed;

pub use {dict::PyDictRaw, error::*, ops::*};
