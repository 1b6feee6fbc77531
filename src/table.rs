//! The `SymTable` interface shared by the list and hash forms.

use core::fmt;

/// Why a `put` left the table unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PutError {
    /// A binding with the same key already exists; its value is untouched.
    DuplicateKey,
    /// Memory for the binding's key copy could not be obtained.
    ///
    /// Only the key copy is allocated fallibly. The binding node itself is a
    /// plain `Box`, so exhaustion there aborts through the global allocator
    /// instead of producing this error.
    OutOfMemory,
}

impl fmt::Display for PutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutError::DuplicateKey => f.write_str("key already bound"),
            PutError::OutOfMemory => f.write_str("out of memory allocating binding"),
        }
    }
}

impl std::error::Error for PutError {}

/// A new table could not be allocated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("out of memory allocating symbol table")
    }
}

impl std::error::Error for AllocError {}

/// A symbol table mapping owned string keys to borrowed values.
///
/// The table copies every key it stores and never copies, mutates, or
/// drops a value: it only holds `&'a V`. Both implementations must give
/// identical observable results for identical call sequences; only their
/// complexity differs. Traversal order is not part of the contract.
pub trait SymTable<'a, V: ?Sized + 'a>: Default {
    /// Create an empty table, reporting allocation failure instead of
    /// aborting.
    fn try_new() -> Result<Self, AllocError>;

    /// Number of bindings.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bind `key` to `value` if `key` is not already bound.
    fn put(&mut self, key: &str, value: &'a V) -> Result<(), PutError>;

    /// Rebind an existing `key`, returning the previous value, or `None`
    /// (table unchanged) if `key` is not bound.
    fn replace(&mut self, key: &str, value: &'a V) -> Option<&'a V>;

    fn contains(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<&'a V>;

    /// Unbind `key` and return its value, or `None` if `key` is not bound.
    fn remove(&mut self, key: &str) -> Option<&'a V>;

    /// Call `apply(key, value, extra)` once for every binding.
    fn map<C, F>(&self, apply: F, extra: &mut C)
    where
        C: ?Sized,
        F: FnMut(&str, &'a V, &mut C);
}
