//! Key hashing and bucket indexing for the hash form.
//!
//! The hash is the classic multiplicative string hash with multiplier
//! 65599, computed in wrapping `usize` arithmetic over the key's bytes. It is
//! deterministic and order-sensitive; it offers no protection against
//! adversarially chosen key sets.

pub const HASH_MULTIPLIER: usize = 65599;

/// Full-width hash of `key`.
#[inline]
pub fn hash_key(key: &str) -> usize {
    key.bytes().fold(0usize, |hash, byte| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(usize::from(byte))
    })
}

/// Bucket that `key` belongs to in a table of `bucket_count` buckets.
#[inline]
pub fn bucket_index(key: &str, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0, "bucket count must be non-zero");
    hash_key(key) % bucket_count
}
