//! symtable: a string-keyed symbol table in two interchangeable forms, an
//! association list and a chained hash table that grows through a fixed
//! capacity schedule.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one binding lifecycle shared by both forms so client code can
//!   switch between them (via the `SymTable` trait) without seeing any
//!   difference except speed.
//! - Layers:
//!   - `binding::Chain`: singly-linked chain of boxed bindings with head
//!     insertion, exact-key lookup, and predecessor-tracking unlink.
//!   - `SymTableList`: a single chain; O(n) per operation.
//!   - `SymTableHash`: a bucket array of chains indexed by
//!     `hash::bucket_index`, grown through a `Schedule`.
//!
//! Ownership
//! - The table owns every binding and a private copy of every key
//!   (`Box<str>`).
//! - Values are `&'a V` and are never copied, mutated, or dropped by the
//!   table. `get`/`replace`/`remove` hand back the same reference that was
//!   put. "Not found" is `None`, so no stored value is ambiguous with it.
//! - Teardown is `Drop`. Chains drop iteratively so very long chains cannot
//!   exhaust the stack.
//!
//! Growth
//! - Before a new binding is inserted, if `len > bucket_count` and the
//!   schedule has a larger size, the hash form allocates the larger bucket
//!   array and relinks every existing binding into it. Bindings are moved,
//!   never cloned.
//! - If the larger array cannot be allocated, growth is abandoned (logged at
//!   `warn`) and the insertion proceeds at the current size.
//! - The table never shrinks.
//!
//! Allocation failure
//! - Key copies and bucket arrays are allocated with `try_reserve_exact`, so
//!   exhaustion is reported as `PutError::OutOfMemory` / `AllocError` with
//!   the table unchanged. The binding node itself is a plain `Box`, which
//!   follows the global allocator's abort-on-exhaustion policy.
//!
//! Notes and non-goals
//! - Single-threaded; no internal synchronization.
//! - Keys are always text; no generic key types.
//! - Traversal order is an implementation artifact, not a contract. The
//!   list form yields most-recent first; the hash form goes bucket by
//!   bucket, most-recent first within each bucket.
//! - Mutating the table during `map` or iteration is rejected by the borrow
//!   checker.

mod binding;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;
pub mod list;
pub mod schedule;
mod table;

// Public surface
pub use hash_table::SymTableHash;
pub use list::SymTableList;
pub use schedule::{Schedule, ScheduleError, DEFAULT_BUCKET_COUNTS};
pub use table::{AllocError, PutError, SymTable};
