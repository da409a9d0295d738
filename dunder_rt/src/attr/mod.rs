//! The attribute protocol: descriptor-aware reads, writes and deletes over a
//! class's ancestor sequence and the lazily created instance storage.

mod descr;
mod dict_slot;
mod resolve;
mod write;


pub use descr::Descriptor;
