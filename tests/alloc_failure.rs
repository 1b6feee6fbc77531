// Key-copy allocation failure during `put`, for both forms.
//
// Invariants exercised:
// - When the key copy cannot be allocated, `put` returns
//   `PutError::OutOfMemory` and the table is unchanged: same length, the key
//   is not bound, and existing bindings keep their values.
// - The table stays usable: the same put succeeds once memory is available.
//
// The global allocator below refuses byte-aligned requests of one chosen
// size while armed. This binary holds a single test so nothing else
// allocates concurrently while the allocator is armed.
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};
use symtable::{PutError, SymTable, SymTableHash, SymTableList};

struct FailingAlloc;

/// Size of byte-aligned allocations to refuse; zero disarms.
static FAIL_SIZE: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for FailingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if layout.align() == 1 && layout.size() == FAIL_SIZE.load(Ordering::SeqCst) {
            return core::ptr::null_mut();
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: FailingAlloc = FailingAlloc;

// 37 bytes: no other byte-aligned allocation of this size happens in `put`.
const KEY: &str = "identifier_that_cannot_be_copied_0037";

static SEED: i32 = 1;
static VALUE: i32 = 2;

fn put_refused(t: &mut impl SymTable<'static, i32>, key: &str) -> Result<(), PutError> {
    FAIL_SIZE.store(key.len(), Ordering::SeqCst);
    let res = t.put(key, &VALUE);
    FAIL_SIZE.store(0, Ordering::SeqCst);
    res
}

fn key_copy_failure_leaves_table_unchanged<T: SymTable<'static, i32>>() {
    assert_eq!(KEY.len(), 37);
    let mut t = T::default();
    t.put("seed", &SEED).unwrap();

    assert_eq!(put_refused(&mut t, KEY), Err(PutError::OutOfMemory));
    assert_eq!(t.len(), 1);
    assert!(!t.contains(KEY));
    assert_eq!(t.get(KEY), None);
    assert_eq!(t.get("seed"), Some(&1));

    assert_eq!(t.put(KEY, &VALUE), Ok(()));
    assert_eq!(t.len(), 2);
    assert_eq!(t.get(KEY), Some(&2));
}

#[test]
fn key_copy_failure_is_reported_and_harmless() {
    key_copy_failure_leaves_table_unchanged::<SymTableList<'static, i32>>();
    key_copy_failure_leaves_table_unchanged::<SymTableHash<'static, i32>>();
}
